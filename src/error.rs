//! Error type shared by the loaders and the engine loop.
//!
//! Every failure in this crate happens at load time: a missing image, an
//! unreadable or malformed document, a layer whose data does not match its
//! declared size, or a sprite set missing one of the names a player needs.
//! Nothing inside the per-frame simulation returns an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced while loading assets or switching scenes.
#[derive(Debug)]
pub enum EngineError {
    /// The graphics backend could not load or decode an image.
    ImageLoad {
        /// Path that was requested.
        path: String,
        /// Backend-provided reason.
        reason: String,
    },
    /// A document could not be read from disk.
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A JSON document could not be parsed.
    Parse {
        /// Kind of document ("map", "sprite sheet").
        what: &'static str,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// A tile layer's data length does not match `width * height`.
    InvalidLayerSize {
        /// Layer name as found in the document.
        name: String,
        /// `width * height`.
        expected: usize,
        /// Number of tile ids actually present.
        actual: usize,
    },
    /// A sprite set lacks one of the required entries.
    MissingSprite(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ImageLoad { path, reason } => {
                write!(f, "Failed to load image '{}': {}", path, reason)
            }
            EngineError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            EngineError::Parse { what, source } => {
                write!(f, "Failed to parse {} document: {}", what, source)
            }
            EngineError::InvalidLayerSize {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Invalid layer size for layer '{}': expected {} tiles, found {}",
                name, expected, actual
            ),
            EngineError::MissingSprite(name) => {
                write!(f, "Sprite '{}' not found in sprite set", name)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io { source, .. } => Some(source),
            EngineError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias used across the crate.
pub type EngineResult<T> = Result<T, EngineError>;

/// Read a whole text file, tagging failures with the path.
pub fn read_document(path: impl Into<PathBuf>) -> EngineResult<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| EngineError::Io { path, source })
}
