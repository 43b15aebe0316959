//! Error types for scene assembly and export.

use thiserror::Error;

/// Errors that can occur while building or exporting a PVS database.
#[derive(Error, Debug)]
pub enum PvsError {
    /// I/O error reading configuration or writing the database.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The visibility engine rejected a request.
    #[error("engine error: {0}")]
    Engine(String),

    /// The exporter wrote a different number of bytes than it reported.
    #[error("exporter reported {reported} bytes but wrote {written}")]
    ExportSize {
        /// Size from `buffer_size`.
        reported: usize,
        /// Size from `save_to_buffer`.
        written: usize,
    },

    /// Scene manifest serialization failed.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Invalid session configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed TOML configuration file.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for PVS operations.
pub type Result<T> = std::result::Result<T, PvsError>;
