//! Built-in content-hash cache buster.
//!
//! Enabled with `asset_cache_buster = true` (or `"content-hash"`). The query
//! string becomes the first [`HASH_LENGTH`] hex characters of the file's
//! SHA-256:
//!
//! ```text
//! /images/logo.png  →  /images/logo.png?3a7bd3e2
//! ```
//!
//! Content-based rather than mtime-based so the URL survives `git checkout`
//! and fresh CI clones unchanged. A file that does not exist is passed
//! through untouched.

use crate::error::AssetError;
use crate::policy::{BusterResult, CacheBuster};
use futures::future::{BoxFuture, FutureExt};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Hex characters of the digest kept in the query string.
pub const HASH_LENGTH: usize = 8;

/// Appends a truncated content hash as the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashBuster;

impl CacheBuster for ContentHashBuster {
    fn bust<'a>(
        &'a self,
        http_path: &'a str,
        real_path: &'a Path,
    ) -> BoxFuture<'a, Result<BusterResult, AssetError>> {
        let result = match content_digest(real_path) {
            Ok(digest) => Ok(BusterResult::query(&digest[..HASH_LENGTH])),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %real_path.display(), "no file to hash, leaving URL as is");
                Ok(BusterResult::unchanged(http_path))
            }
            Err(err) => Err(AssetError::from_io(real_path, err)),
        };
        futures::future::ready(result).boxed()
    }
}

/// Hex SHA-256 of the asset at `path`, streamed so large fonts and images
/// are never held in memory whole.
pub fn content_digest(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
