//! JSON scene manifest backend.
//!
//! Does not compute visibility. It records the scene exactly as it was
//! assembled and exports it as JSON, so an out-of-process engine can pick it
//! up and the pipeline can run end to end without one.

use janua_mesh::MeshRole;
use serde::{Deserialize, Serialize};

use crate::engine::{ModelInstance, PvsEngine, SceneOptions};
use crate::error::{PvsError, Result};

/// Manifest format tag.
pub const MANIFEST_FORMAT: &str = "janua-scene-manifest";
/// Manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Assembled scene as written to the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestScene {
    /// Always [`MANIFEST_FORMAT`].
    pub format: String,
    /// Always [`MANIFEST_VERSION`].
    pub version: u32,
    /// Scene name.
    pub name: String,
    /// Engine options.
    pub options: SceneOptions,
    /// Registered models in registration order.
    pub models: Vec<ManifestModel>,
}

/// One registered model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestModel {
    /// Mesh id.
    pub id: u32,
    /// Mesh role.
    pub role: MeshRole,
    /// Triangle count.
    pub triangle_count: usize,
    /// Row-major model transform.
    pub transform: [[f32; 4]; 4],
    /// Triangle-soup positions.
    pub vertices: Vec<f32>,
    /// Index buffer.
    pub indices: Vec<u32>,
}

/// Serialized manifest.
#[derive(Debug, Clone)]
pub struct ManifestDatabase {
    bytes: Vec<u8>,
}

impl ManifestDatabase {
    /// Serialized JSON.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Engine that exports the assembled scene as a JSON manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestEngine {
    pretty: bool,
}

impl ManifestEngine {
    /// Compact JSON output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented JSON output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl PvsEngine for ManifestEngine {
    type Scene = ManifestScene;
    type Database = ManifestDatabase;

    fn create_scene(&mut self, options: &SceneOptions, name: &str) -> Result<ManifestScene> {
        Ok(ManifestScene {
            format: MANIFEST_FORMAT.to_string(),
            version: MANIFEST_VERSION,
            name: name.to_string(),
            options: *options,
            models: Vec::new(),
        })
    }

    fn add_model_instance(&mut self, scene: &mut ManifestScene, instance: ModelInstance<'_>) -> Result<()> {
        if instance.indices.len() != instance.triangle_count * 3 {
            return Err(PvsError::Engine(format!(
                "model {} has {} indices for {} triangles",
                instance.id,
                instance.indices.len(),
                instance.triangle_count
            )));
        }
        scene.models.push(ManifestModel {
            id: instance.id,
            role: instance.role,
            triangle_count: instance.triangle_count,
            transform: instance.transform.to_rows(),
            vertices: instance.vertices.to_vec(),
            indices: instance.indices.to_vec(),
        });
        Ok(())
    }

    fn generate(&mut self, scene: ManifestScene) -> Result<ManifestDatabase> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&scene)?
        } else {
            serde_json::to_vec(&scene)?
        };
        Ok(ManifestDatabase { bytes })
    }

    fn buffer_size(&self, database: &ManifestDatabase) -> usize {
        database.as_bytes().len()
    }

    fn save_to_buffer(&self, database: &ManifestDatabase, out: &mut [u8]) -> Result<usize> {
        let bytes = database.as_bytes();
        let len = bytes.len();
        let available = out.len();
        let dst = out.get_mut(..len).ok_or_else(|| {
            PvsError::Engine(format!("buffer of {available} bytes is too small for {len}"))
        })?;
        dst.copy_from_slice(bytes);
        Ok(len)
    }
}
