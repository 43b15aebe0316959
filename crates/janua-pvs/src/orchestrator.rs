//! Drives the engine: assemble, generate, export, write.

use std::path::Path;

use janua_mesh::MeshRecord;
use log::{debug, info};

use crate::config::SceneConfig;
use crate::engine::{ModelInstance, PvsEngine, SceneOptions, Transform};
use crate::error::{PvsError, Result};

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Meshes registered with the engine.
    pub meshes: usize,
    /// Triangles over all meshes.
    pub triangles: usize,
    /// Bytes written to the output file.
    pub bytes: usize,
}

/// Create an engine scene from the settings and register every mesh with it.
///
/// Each mesh becomes one model with a sequential index buffer, an identity
/// transform, and the mesh's own id and role.
pub fn assemble_scene<E: PvsEngine>(
    engine: &mut E,
    meshes: &[MeshRecord],
    config: &SceneConfig,
) -> Result<E::Scene> {
    let options = SceneOptions::from_config(config);
    let mut scene = engine.create_scene(&options, &config.scene_name)?;

    info!("Adding meshes");
    let identity = Transform::identity();
    for mesh in meshes {
        let indices = mesh.sequential_indices();
        engine.add_model_instance(
            &mut scene,
            ModelInstance {
                id: mesh.id(),
                role: mesh.role(),
                vertices: mesh.vertices(),
                indices: &indices,
                triangle_count: mesh.triangle_count(),
                transform: &identity,
            },
        )?;
    }
    debug!("registered {} models", meshes.len());
    Ok(scene)
}

/// Serialize a database into a buffer of exactly the size the engine reports.
pub fn export_database<E: PvsEngine>(engine: &E, database: &E::Database) -> Result<Vec<u8>> {
    let reported = engine.buffer_size(database);
    let mut buffer = vec![0u8; reported];
    let written = engine.save_to_buffer(database, &mut buffer)?;
    if written != reported {
        return Err(PvsError::ExportSize { reported, written });
    }
    Ok(buffer)
}

/// Run the whole engine side of the pipeline and write the database to `output`.
pub fn build_pvs<E: PvsEngine>(
    engine: &mut E,
    meshes: &[MeshRecord],
    config: &SceneConfig,
    output: impl AsRef<Path>,
) -> Result<BuildReport> {
    let scene = assemble_scene(engine, meshes, config)?;

    info!("Generating voxels");
    info!("Generating database");
    let database = engine.generate(scene)?;

    info!("Exporting");
    let buffer = export_database(engine, &database)?;
    std::fs::write(output.as_ref(), &buffer)?;

    Ok(BuildReport {
        meshes: meshes.len(),
        triangles: meshes.iter().map(MeshRecord::triangle_count).sum(),
        bytes: buffer.len(),
    })
}
