#![warn(missing_docs)]

//! Scene assembly and PVS export for the Janua preprocessor.
//!
//! The visibility engine itself lives outside this workspace and is reached
//! through the [`PvsEngine`] trait. This crate marshals the loaded meshes and
//! the session settings into an engine scene, triggers database generation
//! and writes the exported bytes to disk unchanged.
//!
//! # Example
//!
//! ```no_run
//! use janua_pvs::{build_pvs, ManifestEngine, SceneConfig, Size3};
//!
//! let config = SceneConfig {
//!     scene_name: "level1".into(),
//!     voxel_size: Size3::splat(10.5),
//!     max_cell_size: Size3::splat(100.0),
//!     tile_size: Size3::splat(10.0),
//! };
//! let report = build_pvs(&mut ManifestEngine::new(), &[], &config, "out.pvs").unwrap();
//! println!("wrote {} bytes", report.bytes);
//! ```

mod config;
mod engine;
mod error;
mod manifest;
mod orchestrator;

pub use config::{SceneConfig, SceneConfigOverrides, Size3};
pub use engine::{ModelInstance, PvsEngine, SceneOptions, Transform};
pub use error::{PvsError, Result};
pub use manifest::{
    ManifestDatabase, ManifestEngine, ManifestModel, ManifestScene, MANIFEST_FORMAT, MANIFEST_VERSION,
};
pub use orchestrator::{assemble_scene, build_pvs, export_database, BuildReport};
