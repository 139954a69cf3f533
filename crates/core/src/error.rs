use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlusError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Capacity exceeded for {what} (limit {limit})")]
    CapacityExceeded { what: &'static str, limit: usize },

    #[error("Degenerate texture mapping on triangle {triangle}")]
    DegenerateTriangle { triangle: usize },

    #[error("Group '{group}' references unknown material '{material}'")]
    UnknownMaterial { group: String, material: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed line {line} ('{content}'): {reason}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },
}

impl GlusError {
    /// Wraps an I/O failure, mapping `NotFound` to [`GlusError::FileNotFound`].
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            GlusError::FileNotFound { path }
        } else {
            GlusError::Io { path, source }
        }
    }

    /// `true` for problems that are collected as warnings next to a valid result.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GlusError::DegenerateTriangle { .. } | GlusError::UnknownMaterial { .. }
        )
    }
}

pub type GlusResult<T> = Result<T, GlusError>;
