//! Boundary to the external visibility engine.

use janua_mesh::MeshRole;
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::error::Result;

/// Scene construction parameters in the units the engine expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneOptions {
    /// Largest cell, in whole voxels per axis.
    pub max_cell_size: [i32; 3],
    /// Scene tile size, in whole voxels per axis.
    pub tile_size: [i32; 3],
    /// Voxel edge lengths.
    pub voxel_size: [f32; 3],
}

impl SceneOptions {
    /// Derive engine options from the session settings.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            max_cell_size: config.max_cell_size.to_cells(),
            tile_size: config.tile_size.to_cells(),
            voxel_size: config.voxel_size.to_array(),
        }
    }
}

/// A 4x4 affine model transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f32>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Rows of the matrix, row-major.
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        let m = &self.matrix;
        std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)]))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// One model registered with an engine scene.
#[derive(Debug, Clone, Copy)]
pub struct ModelInstance<'a> {
    /// Mesh id, carried through unchanged.
    pub id: u32,
    /// Occluder or occludee.
    pub role: MeshRole,
    /// Triangle-soup positions.
    pub vertices: &'a [f32],
    /// Index buffer covering every triangle.
    pub indices: &'a [u32],
    /// Number of triangles.
    pub triangle_count: usize,
    /// Model-to-scene transform.
    pub transform: &'a Transform,
}

/// A visibility engine that turns an assembled scene into a PVS database.
///
/// Engines copy whatever they keep from a [`ModelInstance`]; the borrowed
/// buffers only live for the duration of the call.
pub trait PvsEngine {
    /// Scene under construction.
    type Scene;
    /// Generated PVS database.
    type Database;

    /// Create an empty scene.
    fn create_scene(&mut self, options: &SceneOptions, name: &str) -> Result<Self::Scene>;

    /// Register one model with the scene.
    fn add_model_instance(&mut self, scene: &mut Self::Scene, instance: ModelInstance<'_>) -> Result<()>;

    /// Voxelize the scene and compute its PVS database.
    fn generate(&mut self, scene: Self::Scene) -> Result<Self::Database>;

    /// Exact size of the serialized database, in bytes.
    fn buffer_size(&self, database: &Self::Database) -> usize;

    /// Serialize the database into `out`, returning the number of bytes written.
    fn save_to_buffer(&self, database: &Self::Database, out: &mut [u8]) -> Result<usize>;
}
