//! `data:` URIs for `inline-image()`.

use crate::error::AssetError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// MIME type for files with no recognizable extension.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a MIME type from the extension of `path`.
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("cur") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("eot") => "application/vnd.ms-fontobject",
        _ => OCTET_STREAM,
    }
}

/// Format bytes as `data:<mime>;base64,<data>`.
pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read `path` fully and encode it as a data URI.
///
/// `mime_override` wins over the extension lookup when given.
pub fn inline_file(path: &Path, mime_override: Option<&str>) -> Result<String, AssetError> {
    let bytes = std::fs::read(path).map_err(|e| AssetError::from_io(path, e))?;
    let mime = mime_override.unwrap_or_else(|| mime_from_path(path));
    Ok(data_uri(&bytes, mime))
}
