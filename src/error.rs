//! Error handling for the portal core
//!
//! Only data-driven failures (asset files, level descriptions, configuration)
//! are reported through `PortalError`. Programmer errors such as undersized
//! camera buffers or an exhausted stencil bit budget are assertions, and
//! "nothing was hit" is always an `Option`.

use std::path::PathBuf;

/// Main error type for the portal core
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("IO error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Mesh parse error in {} at line {line}: {reason}", path.display())]
    MeshParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid mesh data: {0}")]
    InvalidMeshData(String),

    #[error("Transform is not invertible: {context}")]
    SingularTransform { context: String },

    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("Deserialization error in {context}: {error}")]
    Deserialization { context: String, error: String },
}

/// Type alias for Results in the portal core
pub type PortalResult<T> = Result<T, PortalError>;

impl PortalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PortalError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_config(
        field: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        PortalError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(error: toml::de::Error) -> Self {
        PortalError::Deserialization {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}
