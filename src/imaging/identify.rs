//! Header-only dimension reads.
//!
//! | Format | Crate / function |
//! |---|---|
//! | JPEG, PNG, GIF, WebP, TIFF, BMP | `image::ImageReader::into_dimensions` |
//! | AVIF | `avif-parse` container metadata |
//!
//! Neither path decodes pixel data.

use crate::error::AssetError;
use image::{ImageError, ImageReader};
use serde::Serialize;
use std::path::Path;

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

fn is_avif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("avif"))
}

/// Read the width and height of the image at `path`.
///
/// The format is sniffed from the file's magic bytes, falling back to the
/// extension, so a mislabelled `.png` that is really a JPEG still works.
pub fn identify(path: &Path) -> Result<Dimensions, AssetError> {
    if is_avif(path) {
        return identify_avif(path);
    }
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| AssetError::from_io(path, e))?;
    let (width, height) = reader.into_dimensions().map_err(|e| match e {
        ImageError::IoError(io) => AssetError::from_io(path, io),
        other => AssetError::Format(format!(
            "Failed to read dimensions of {}: {}",
            path.display(),
            other
        )),
    })?;
    Ok(Dimensions { width, height })
}

/// Extract dimensions from an AVIF file's container metadata (no AV1 decode).
fn identify_avif(path: &Path) -> Result<Dimensions, AssetError> {
    let file_data = std::fs::read(path).map_err(|e| AssetError::from_io(path, e))?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&file_data)).map_err(|e| {
        AssetError::Format(format!("Failed to parse AVIF {}: {e:?}", path.display()))
    })?;
    let meta = avif.primary_item_metadata().map_err(|e| {
        AssetError::Format(format!(
            "Failed to read AVIF metadata {}: {e:?}",
            path.display()
        ))
    })?;
    Ok(Dimensions {
        width: meta.max_frame_width.get(),
        height: meta.max_frame_height.get(),
    })
}
