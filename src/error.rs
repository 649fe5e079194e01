//! Errors raised by asset resolution.
//!
//! Every failure surfaces to the immediate caller. Nothing here retries or
//! substitutes a fallback URL.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    /// A policy was invoked but is not configured as something callable.
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Asset not found: {}", path.display())]
    NotFound { path: PathBuf },
    /// Undecodable image header, or unrecognized font format.
    #[error("Format error: {0}")]
    Format(String),
    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    /// Classify an IO failure on `path`; a missing file becomes [`AssetError::NotFound`].
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            AssetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_not_found() {
        let err = AssetError::from_io(
            Path::new("/nope/a.png"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, AssetError::NotFound { ref path } if path == Path::new("/nope/a.png")));
    }

    #[test]
    fn other_io_failures_keep_their_source() {
        let err = AssetError::from_io(
            Path::new("/locked.png"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("/locked.png"));
    }
}
