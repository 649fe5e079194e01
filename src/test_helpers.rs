//! Shared test utilities for the asset-functions test suite.
//!
//! Provides a fixture asset tree, synthetic image writers, and the three
//! reference policies the processor is exercised with:
//!
//! | Helper | Behaviour |
//! |---|---|
//! | [`query_buster`] | waits 10ms, answers `v=123` |
//! | [`path_buster`] | waits 10ms, renames `a.png` → `a-v123.png`, no query |
//! | [`example_host`] | answers `http://example.com` |
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_assets();
//! let processor = processor_for(&tmp).with_cache_buster(query_buster());
//! ```

use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

use crate::config::AssetsConfig;
use crate::policy::{BusterResult, CacheBusterPolicy, HostPolicy, buster_fn, host_fn};
use crate::processor::Processor;
use image::{ImageEncoder, RgbImage};

pub const LOGO_WIDTH: u32 = 40;
pub const LOGO_HEIGHT: u32 = 20;
pub const HERO_WIDTH: u32 = 64;
pub const HERO_HEIGHT: u32 = 48;

// =========================================================================
// Fixture setup
// =========================================================================

/// Build an asset tree in a temp directory:
///
/// ```text
/// images/logo.png         40×20
/// images/photos/hero.jpg  64×48
/// fonts/sans.woff
/// fonts/sans.ttf
/// ```
pub fn setup_assets() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let images = tmp.path().join("images");
    let fonts = tmp.path().join("fonts");
    std::fs::create_dir_all(images.join("photos")).unwrap();
    std::fs::create_dir_all(&fonts).unwrap();

    write_png(&images.join("logo.png"), LOGO_WIDTH, LOGO_HEIGHT);
    write_jpeg(&images.join("photos/hero.jpg"), HERO_WIDTH, HERO_HEIGHT);
    std::fs::write(fonts.join("sans.woff"), b"wOFF fixture").unwrap();
    std::fs::write(fonts.join("sans.ttf"), b"ttf fixture").unwrap();
    tmp
}

/// Config whose filesystem roots point into the fixture tree.
pub fn assets_config_for(tmp: &TempDir) -> AssetsConfig {
    AssetsConfig {
        images_path: tmp.path().join("images").to_string_lossy().into_owned(),
        fonts_path: tmp.path().join("fonts").to_string_lossy().into_owned(),
        ..AssetsConfig::default()
    }
}

/// Processor with no policies over the fixture tree.
pub fn processor_for(tmp: &TempDir) -> Processor {
    Processor::from_config(&assets_config_for(tmp))
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid PNG with the given dimensions.
pub fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a small valid JPEG with the given dimensions.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Reference policies
// =========================================================================

/// Deferred buster that sets the query to `v=123`.
pub fn query_buster() -> CacheBusterPolicy {
    CacheBusterPolicy::custom(buster_fn(|_, _| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(BusterResult::query("v=123"))
    }))
}

/// Deferred buster that renames `dir/name.ext` to `dir/name-v123.ext`.
pub fn path_buster() -> CacheBusterPolicy {
    CacheBusterPolicy::custom(buster_fn(|http_path: String, _| async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(BusterResult::rewrite(versioned(&http_path, "v123"), None))
    }))
}

/// Host policy that always answers `http://example.com`.
pub fn example_host() -> HostPolicy {
    HostPolicy::dynamic(host_fn(|_| async { Ok("http://example.com".to_string()) }))
}

/// `/images/a.png` → `/images/a-<version>.png`.
pub fn versioned(http_path: &str, version: &str) -> String {
    let (dir, name) = http_path.rsplit_once('/').unwrap_or(("", http_path));
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };
    format!("{dir}/{stem}-{version}{ext}")
}
