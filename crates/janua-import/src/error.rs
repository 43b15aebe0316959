//! Error types for scene import.

use janua_mesh::MeshError;
use thiserror::Error;

/// Errors that abort a whole load operation.
#[derive(Error, Debug)]
pub enum ImportError {
    /// I/O error reading the input file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document ended with elements still open.
    #[error("XML error: unclosed element <{0}>")]
    UnclosedElement(String),

    /// No `janua_scene` root element.
    #[error("The root node [janua_scene] of the XML is missing.")]
    MissingRoot,

    /// The root has no `meshes` container.
    #[error("The \"meshes\" node of the XML is missing.")]
    MissingMeshes,
}

/// A problem with one mesh element of an XML scene. The mesh is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XmlIssue {
    /// Missing or non-numeric `id` attribute.
    #[error("The mesh at position {position} has an invalid ID: {raw:?}")]
    InvalidId {
        /// Zero-based position among the mesh elements.
        position: usize,
        /// Attribute text as found.
        raw: String,
    },

    /// An `id` already used earlier in the same document.
    #[error("The ID: {0} is duplicated.")]
    DuplicateId(u32),

    /// `type` is neither `OCCLUDER` nor `OCCLUDEE`.
    #[error("Bad mesh type for ID: {id} ({raw:?})")]
    BadType {
        /// Mesh id.
        id: u32,
        /// Attribute text as found.
        raw: String,
    },

    /// Missing, non-numeric or overflowing `triCount`.
    #[error("The mesh with ID: {id} has an invalid triCount [{raw}]")]
    InvalidTriCount {
        /// Mesh id.
        id: u32,
        /// Attribute text as found.
        raw: String,
    },

    /// A body token that is not a real number.
    #[error("The mesh with ID: {id} has an invalid coordinate {token:?}")]
    InvalidCoordinate {
        /// Mesh id.
        id: u32,
        /// Offending token.
        token: String,
    },

    /// More coordinates than `triCount * 9`.
    #[error("The mesh with ID: {id} has more vertices than the triCount specified [{tri_count}]")]
    TooManyValues {
        /// Mesh id.
        id: u32,
        /// Declared triangle count.
        tri_count: u32,
    },

    /// Fewer coordinates than `triCount * 9`.
    #[error("The triCount [{tri_count}] for the mesh with ID: {id} does not match with amount of coordinates [{expected} expected, {found} found]")]
    CountMismatch {
        /// Mesh id.
        id: u32,
        /// Declared triangle count.
        tri_count: u32,
        /// `tri_count * 9`.
        expected: usize,
        /// Coordinates actually present.
        found: usize,
    },

    /// The validated body was rejected when building the record.
    #[error("The mesh with ID: {id} could not be built: {source}")]
    Record {
        /// Mesh id.
        id: u32,
        /// Why the record was rejected.
        source: MeshError,
    },
}

/// A problem with one line or face reference of an OBJ file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjIssue {
    /// `v` line with fewer than three coordinates or a non-numeric one.
    #[error("line {line}: malformed vertex position")]
    MalformedVertex {
        /// One-based line number.
        line: usize,
    },

    /// Face reference whose vertex index is not an integer.
    #[error("line {line}: invalid face vertex reference {reference:?}")]
    InvalidReference {
        /// One-based line number.
        line: usize,
        /// The reference token.
        reference: String,
    },

    /// Face reference with vertex index zero.
    #[error("line {line}: vertex index in a face can't be zero")]
    ZeroReference {
        /// One-based line number.
        line: usize,
    },

    /// Face reference pointing outside the vertex pool.
    #[error("line {line}: vertex index {index} is out of range for {pool} vertices")]
    OutOfRange {
        /// One-based line number.
        line: usize,
        /// Index as written.
        index: i64,
        /// Vertex pool size at that point.
        pool: usize,
    },

    /// Face left with fewer than three usable vertices.
    #[error("line {line}: face has {count} usable vertices, at least 3 are required")]
    DegenerateFace {
        /// One-based line number.
        line: usize,
        /// Usable vertex count.
        count: usize,
    },
}
