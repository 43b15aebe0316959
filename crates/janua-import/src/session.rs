//! A loaded scene: the mesh list plus everything recorded while reading it.

use std::path::{Path, PathBuf};

use janua_mesh::{Aabb3, Diagnostics, MeshRecord};
use log::{debug, info};
use thiserror::Error;

use crate::error::ImportError;
use crate::obj::load_obj;
use crate::xml::load_xml;

/// Input file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `janua_scene` XML.
    Xml,
    /// Wavefront OBJ subset.
    Obj,
}

impl InputFormat {
    /// `.obj` (any case) selects OBJ; everything else is read as XML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("obj") => InputFormat::Obj,
            _ => InputFormat::Xml,
        }
    }
}

/// A structural load failure together with the full diagnostic log.
#[derive(Error, Debug)]
#[error("failed to load {}: {error}", path.display())]
pub struct LoadFailure {
    /// The input that failed.
    pub path: PathBuf,
    /// What went wrong.
    #[source]
    pub error: ImportError,
    /// Every message recorded before and including the failure.
    pub diagnostics: Diagnostics,
}

/// Owns the meshes of one preprocessing run.
///
/// Meshes are only lent out by reference; dropping the session or calling
/// [`Session::release`] frees every vertex buffer at once.
#[derive(Debug)]
pub struct Session {
    format: InputFormat,
    meshes: Vec<MeshRecord>,
    diagnostics: Diagnostics,
    bounds: Option<Aabb3>,
}

impl Session {
    /// Load a scene file, picking the reader from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadFailure> {
        let path = path.as_ref();
        let format = InputFormat::from_path(path);
        info!("Importing file: {} ({:?})", path.display(), format);

        let mut diagnostics = Diagnostics::new();
        let loaded = match format {
            InputFormat::Xml => load_xml(path, &mut diagnostics).map(|meshes| (meshes, None)),
            InputFormat::Obj => load_obj(path, &mut diagnostics)
                .map(|scene| (scene.meshes, Some(scene.bounds).filter(|b| !b.is_empty()))),
        };

        match loaded {
            Ok((meshes, bounds)) => Ok(Self {
                format,
                meshes,
                diagnostics,
                bounds,
            }),
            Err(error) => {
                diagnostics.record(error.to_string());
                Err(LoadFailure {
                    path: path.to_path_buf(),
                    error,
                    diagnostics,
                })
            }
        }
    }

    /// Build a session from meshes that are already in memory.
    pub fn from_meshes(format: InputFormat, meshes: Vec<MeshRecord>, diagnostics: Diagnostics) -> Self {
        Self {
            format,
            meshes,
            diagnostics,
            bounds: None,
        }
    }

    /// Format the meshes were read from.
    pub fn format(&self) -> InputFormat {
        self.format
    }

    /// Accepted meshes, in input order.
    pub fn meshes(&self) -> &[MeshRecord] {
        &self.meshes
    }

    /// Messages recorded during the load.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Bounds of all emitted OBJ geometry; `None` for XML input.
    pub fn bounds(&self) -> Option<Aabb3> {
        self.bounds
    }

    /// Total triangles over all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(MeshRecord::triangle_count).sum()
    }

    /// Free every mesh buffer. Returns how many meshes were released.
    pub fn release(self) -> usize {
        let count = self.meshes.len();
        drop(self.meshes);
        debug!("released {count} meshes");
        count
    }
}
