#![warn(missing_docs)]

//! Scene import for the Janua PVS preprocessor.
//!
//! Reads the `janua_scene` XML schema and a Wavefront OBJ subset into
//! role-tagged triangle soups. Structural problems fail the load; problems
//! with individual meshes, vertices or faces are recorded in a
//! [`Diagnostics`](janua_mesh::Diagnostics) log and the offending element is
//! skipped.
//!
//! # Example
//!
//! ```no_run
//! use janua_import::Session;
//!
//! let session = Session::load("scene.xml").unwrap();
//! println!("{} meshes", session.meshes().len());
//! ```

mod error;
mod obj;
mod session;
mod tokenize;
mod xml;

pub use error::{ImportError, ObjIssue, XmlIssue};
pub use obj::{load_obj, load_obj_from_reader, ObjScene};
pub use session::{InputFormat, LoadFailure, Session};
pub use xml::{load_xml, load_xml_from_str};
