//! The canonical in-memory mesh: id, role and a flat triangle soup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounds::Aabb3;
use crate::error::MeshError;

/// Floats stored per triangle (3 vertices x 3 coordinates).
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// Visibility role of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeshRole {
    /// Geometry that blocks visibility.
    Occluder,
    /// Geometry whose visibility is being determined.
    Occludee,
}

impl MeshRole {
    /// The textual tag used in scene files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshRole::Occluder => "OCCLUDER",
            MeshRole::Occludee => "OCCLUDEE",
        }
    }
}

impl fmt::Display for MeshRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeshRole {
    type Err = MeshError;

    /// Case-sensitive: only `OCCLUDER` and `OCCLUDEE` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OCCLUDER" => Ok(MeshRole::Occluder),
            "OCCLUDEE" => Ok(MeshRole::Occludee),
            other => Err(MeshError::UnknownRole(other.to_string())),
        }
    }
}

/// One mesh of the scene as a triangle soup.
///
/// `vertices` is `[x0, y0, z0, x1, y1, z1, x2, y2, z2, ...]` with every
/// triangle storing its own three positions. The length is always a
/// multiple of [`FLOATS_PER_TRIANGLE`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    id: u32,
    role: MeshRole,
    vertices: Vec<f32>,
}

impl MeshRecord {
    /// Create a mesh record, checking that the buffer holds whole triangles.
    pub fn new(id: u32, role: MeshRole, vertices: Vec<f32>) -> Result<Self, MeshError> {
        if vertices.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(MeshError::RaggedVertexBuffer {
                len: vertices.len(),
            });
        }
        Ok(Self { id, role, vertices })
    }

    /// Mesh id, unique within one load.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Visibility role.
    pub fn role(&self) -> MeshRole {
        self.role
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_TRIANGLE
    }

    /// Flat vertex buffer.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Iterate vertex positions in emission order.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Index buffer `0, 1, 2, ...` covering every triangle of the soup.
    pub fn sequential_indices(&self) -> Vec<u32> {
        (0..(self.triangle_count() * 3) as u32).collect()
    }

    /// Bounds of the emitted positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb3> {
        let aabb = Aabb3::from_points(self.positions());
        (!aabb.is_empty()).then_some(aabb)
    }
}
