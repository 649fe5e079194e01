//! Image introspection: pure Rust, header reads only.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Identify (AVIF)** | `avif_parse::read_avif` container metadata |

mod identify;

pub use identify::{Dimensions, identify};
