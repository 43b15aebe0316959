#![warn(missing_docs)]

//! Mesh model for the Janua PVS preprocessor.
//!
//! Every input format is normalized into the same representation: a list of
//! [`MeshRecord`]s, each a role-tagged triangle soup with no shared-vertex
//! indexing. Loaders report recoverable problems through [`Diagnostics`].
//!
//! # Example
//!
//! ```
//! use janua_mesh::{MeshRecord, MeshRole};
//!
//! let tri = MeshRecord::new(0, MeshRole::Occluder, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
//! assert_eq!(tri.triangle_count(), 1);
//! ```

mod bounds;
mod diagnostics;
mod error;
mod record;

pub use bounds::Aabb3;
pub use diagnostics::Diagnostics;
pub use error::MeshError;
pub use record::{MeshRecord, MeshRole, FLOATS_PER_TRIANGLE};
