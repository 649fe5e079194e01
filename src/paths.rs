//! Asset classes and the two path spaces every asset lives in.
//!
//! An asset filename written in a stylesheet (`logo.png`, `icons.svg#home`)
//! is resolved twice:
//!
//! | Space | Root | Example |
//! |---|---|---|
//! | **Real path** | `images_path` / `fonts_path` | `/srv/site/public/images/logo.png` |
//! | **HTTP path** | `http_images_path` / `http_fonts_path` | `/images/logo.png` |
//!
//! The real path is only ever used for local I/O (dimension reads, inlining,
//! content hashing). The HTTP path is what ends up in compiled CSS.

use std::fmt;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_IMAGES_PATH: &str = "public/images";
pub const DEFAULT_FONTS_PATH: &str = "public/fonts";
pub const DEFAULT_HTTP_IMAGES_PATH: &str = "/images";
pub const DEFAULT_HTTP_FONTS_PATH: &str = "/fonts";

/// Category of asset; selects which pair of roots applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Images,
    Fonts,
}

impl AssetClass {
    pub fn name(self) -> &'static str {
        match self {
            AssetClass::Images => "images",
            AssetClass::Fonts => "fonts",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Filesystem and public URL roots for images and fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Filesystem root for images (relative roots resolve against the working directory).
    pub images_path: String,
    /// Filesystem root for fonts.
    pub fonts_path: String,
    /// Public URL root for images.
    pub http_images_path: String,
    /// Public URL root for fonts.
    pub http_fonts_path: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            images_path: DEFAULT_IMAGES_PATH.to_string(),
            fonts_path: DEFAULT_FONTS_PATH.to_string(),
            http_images_path: DEFAULT_HTTP_IMAGES_PATH.to_string(),
            http_fonts_path: DEFAULT_HTTP_FONTS_PATH.to_string(),
        }
    }
}

impl PathConfig {
    pub fn fs_root(&self, class: AssetClass) -> &str {
        match class {
            AssetClass::Images => &self.images_path,
            AssetClass::Fonts => &self.fonts_path,
        }
    }

    pub fn http_root(&self, class: AssetClass) -> &str {
        match class {
            AssetClass::Images => &self.http_images_path,
            AssetClass::Fonts => &self.http_fonts_path,
        }
    }

    /// Absolute filesystem location of `filename`.
    ///
    /// Anything from the first `#` or `?` onward is dropped before resolving:
    /// `sprite.svg#arrow` and `font.eot?#iefix` both point at plain files.
    /// An absolute `filename` replaces the root entirely.
    pub fn real_path(&self, filename: &str, class: AssetClass) -> PathBuf {
        let sanitized = strip_query_and_fragment(filename);
        let joined = Path::new(self.fs_root(class)).join(sanitized);
        let absolute = std::path::absolute(&joined).unwrap_or(joined);
        normalize_fs_path(&absolute)
    }

    /// Public URL path of `filename`, fragment and query included.
    pub fn http_path(&self, filename: &str, class: AssetClass) -> String {
        join_url_path(self.http_root(class), filename)
    }
}

fn strip_query_and_fragment(filename: &str) -> &str {
    match filename.find(['#', '?']) {
        Some(idx) => &filename[..idx],
        None => filename,
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize_fs_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Join URL path segments with `/`, then normalize.
///
/// Backslashes are treated as separators so Windows-style roots still
/// produce forward-slash URLs.
pub fn join_url_path(root: &str, filename: &str) -> String {
    let joined = [root, filename]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.replace('\\', "/"))
        .collect::<Vec<_>>()
        .join("/");
    normalize_url_path(&joined)
}

/// POSIX-style normalization: collapses duplicate slashes, drops `.`,
/// resolves `..`, and keeps a trailing slash.
pub fn normalize_url_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if normalized.is_empty() && !absolute {
        normalized.push('.');
    }
    if trailing && !normalized.is_empty() {
        normalized.push('/');
    }
    if absolute {
        normalized.insert(0, '/');
    }
    normalized
}
