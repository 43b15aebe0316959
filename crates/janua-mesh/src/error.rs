//! Error types for mesh construction.

use thiserror::Error;

/// Errors that can occur when building a [`MeshRecord`](crate::MeshRecord).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The vertex buffer does not hold a whole number of triangles.
    #[error("vertex buffer of {len} floats is not a multiple of 9")]
    RaggedVertexBuffer {
        /// Length of the offending buffer.
        len: usize,
    },

    /// A role string other than `OCCLUDER` or `OCCLUDEE`.
    #[error("unknown mesh role: {0:?}")]
    UnknownRole(String),
}
