// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all operations in the sprite sheet toolkit.
///
/// Every public operation fails as a whole: when one of these is returned,
/// no region set, offset list or canvas has been partially modified.
#[derive(Error, Debug)]
pub enum SpriteError {
    /// A source image could not be opened or decoded.
    #[error("Failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An image could not be encoded or written to disk.
    #[error("Failed to save image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An error occurred during I/O operations (e.g., directory creation, file writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Degenerate geometry or parameters, rejected before any mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An invalid argument was provided to a function.
    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    /// The offset interchange file is not well-formed.
    #[error("Offset file error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The detection worker stopped without delivering its result.
    #[error("Detection worker disconnected before finishing")]
    WorkerDisconnected,
}

/// A specialized `Result` type for sprite sheet operations.
pub type Result<T> = std::result::Result<T, SpriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_for_decode_errors() {
        let err = SpriteError::Decode {
            path: PathBuf::from("sheet.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )),
        };
        let msg = err.to_string();
        assert!(msg.contains("sheet.png"), "unexpected message: {msg}");
    }

    #[test]
    fn io_errors_convert() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(SpriteError::Io(_))));
    }
}
