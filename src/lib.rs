//! # Asset Functions
//!
//! Asset URL resolution for stylesheet preprocessors. Stylesheets refer to
//! assets by logical name (`image-url("logo.png")`,
//! `font-files("sans.woff2", "sans.woff")`); this crate turns those names
//! into the URLs that belong in compiled CSS.
//!
//! # Architecture: One Processor, Two Optional Policies
//!
//! ```text
//! filename ──► http_path ──► cache buster ──► asset host ──► URL
//!    │                          ▲
//!    └──────► real_path ────────┘   (local I/O only)
//! ```
//!
//! The [`processor::Processor`] owns immutable path roots and, optionally,
//! a cache-buster and an asset-host policy. Whether a policy is present
//! decides whether its stage runs; there are no separate code paths per
//! combination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`processor`] | The `Processor`: `image_url`, `font_url`, `image_dimensions`, `inline_image`, `font_files` |
//! | [`paths`] | Asset classes, path roots, real-path and http-path resolution |
//! | [`urls`] | Fragment/query splitting and base-URL resolution |
//! | [`policy`] | `CacheBuster` / `AssetHost` traits and closure adapters |
//! | [`cache_buster`] | Built-in SHA-256 content-hash cache buster |
//! | [`fonts`] | Font format table and `font-files()` argument parsing |
//! | [`imaging`] | Header-only image dimension reads |
//! | [`inline`] | `data:` URI encoding and MIME lookup |
//! | [`css`] | Rendering results as stylesheet values |
//! | [`config`] | `assets.toml` loading, merging, and validation |
//! | [`error`] | `AssetError` |
//!
//! # Design Decisions
//!
//! ## Policies Are Futures
//!
//! Cache busters and asset hosts may need to do work (hash a file, ask a
//! service which CDN shard to use), so both return futures. A synchronous
//! policy is just one whose future is already ready; see
//! [`policy::sync_buster_fn`]. Nothing else in the processor suspends.
//!
//! ## Busting Before Hosting
//!
//! A cache buster receives the server-relative path together with the file's
//! location on disk. Running it after the host is prepended would hand it a
//! foreign URL it cannot map back to a file.
//!
//! ## Fragments Are Set Aside
//!
//! `sprite.svg#icon` and `font.eot?#iefix` are common in stylesheets. The
//! fragment is split off before any policy runs and re-attached verbatim at
//! the end, so no policy can mangle it.

pub mod cache_buster;
pub mod config;
pub mod css;
pub mod error;
pub mod fonts;
pub mod imaging;
pub mod inline;
pub mod paths;
pub mod policy;
pub mod processor;
pub mod urls;

pub use error::AssetError;
pub use paths::{AssetClass, PathConfig};
pub use processor::Processor;

#[cfg(test)]
pub(crate) mod test_helpers;
