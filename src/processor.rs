//! The asset processor: filename in, public URL out.
//!
//! ```text
//! "sprite.svg#home"
//!   │ http_path              /images/sprite.svg#home
//!   │ split fragment         /images/sprite.svg        + "#home"
//!   │ cache buster (opt.)    /images/sprite.svg?3a7bd3e2
//!   │ asset host (opt.)      https://cdn.example.com/images/sprite.svg?3a7bd3e2
//!   ▼ restore fragment       https://cdn.example.com/images/sprite.svg?3a7bd3e2#home
//! ```
//!
//! Cache busting always runs before host resolution: busters see a
//! server-relative path they can map onto the real file, never a
//! host-qualified URL.

use crate::cache_buster::ContentHashBuster;
use crate::config::AssetsConfig;
use crate::error::AssetError;
use crate::fonts::{self, FontFile};
use crate::imaging::{self, Dimensions};
use crate::inline;
use crate::paths::{AssetClass, PathConfig};
use crate::policy::{BusterResult, CacheBuster, CacheBusterPolicy, HostPolicy};
use crate::urls;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, AssetError>;

/// Resolves asset references against immutable path roots and optional
/// host and cache-buster policies.
///
/// Holds no state between calls, so one instance can serve many concurrent
/// resolutions.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    paths: PathConfig,
    asset_host: Option<HostPolicy>,
    cache_buster: Option<CacheBusterPolicy>,
}

impl Processor {
    pub fn new(paths: PathConfig) -> Self {
        Self {
            paths,
            asset_host: None,
            cache_buster: None,
        }
    }

    /// Build from loaded configuration (static host, named buster).
    pub fn from_config(config: &AssetsConfig) -> Self {
        Self {
            paths: config.path_config(),
            asset_host: config.host_policy(),
            cache_buster: config.cache_buster_policy(),
        }
    }

    pub fn with_asset_host(mut self, host: HostPolicy) -> Self {
        self.asset_host = Some(host);
        self
    }

    pub fn with_cache_buster(mut self, buster: CacheBusterPolicy) -> Self {
        self.cache_buster = Some(buster);
        self
    }

    pub fn real_path(&self, filename: &str, class: AssetClass) -> PathBuf {
        self.paths.real_path(filename, class)
    }

    pub fn http_path(&self, filename: &str, class: AssetClass) -> String {
        self.paths.http_path(filename, class)
    }

    /// Run the configured cache buster over a fragment-free `http_path`.
    pub(crate) async fn apply_cache_buster(
        &self,
        http_path: &str,
        real_path: &Path,
    ) -> Result<String> {
        let buster: &dyn CacheBuster = match &self.cache_buster {
            Some(CacheBusterPolicy::ContentHash) => &ContentHashBuster,
            Some(CacheBusterPolicy::Custom(buster)) => buster.as_ref(),
            Some(CacheBusterPolicy::Unrecognized(name)) => {
                return Err(AssetError::Configuration(format!(
                    "asset_cache_buster '{name}' is not a cache-busting policy"
                )));
            }
            None => {
                return Err(AssetError::Configuration(
                    "asset_cache_buster is not configured".into(),
                ));
            }
        };

        let (path, query) = urls::split_query(http_path);
        let result = buster.bust(http_path, real_path).await?;
        tracing::trace!(http_path, ?result, "cache buster answered");

        Ok(match result {
            BusterResult::Query(new_query) => urls::with_query(path, Some(&new_query)),
            BusterResult::Rewrite {
                path: new_path,
                query: new_query,
            } => {
                let new_path = urls::path_component(&new_path);
                match new_query.as_deref().filter(|q| !q.is_empty()) {
                    Some(new_query) => urls::with_query(new_path, Some(new_query)),
                    None => urls::with_raw_query(new_path, query),
                }
            }
        })
    }

    /// Resolve `http_path` against the configured asset host.
    pub(crate) async fn apply_host(&self, http_path: &str) -> Result<String> {
        let host = match &self.asset_host {
            Some(HostPolicy::Static(host)) => host.clone(),
            Some(HostPolicy::Dynamic(policy)) => policy.host(http_path).await?,
            None => {
                return Err(AssetError::Configuration(
                    "asset_host is not configured".into(),
                ));
            }
        };
        tracing::trace!(http_path, %host, "asset host answered");
        urls::resolve(&host, http_path)
    }

    /// Public URL of `filename` in `class`, after busting and hosting.
    pub async fn asset_url(&self, filename: &str, class: AssetClass) -> Result<String> {
        let http_path = self.http_path(filename, class);
        let (path, fragment) = urls::split_fragment(&http_path);
        let mut url = path.to_string();

        if self.cache_buster.is_some() {
            let real_path = self.real_path(filename, class);
            url = self.apply_cache_buster(&url, &real_path).await?;
        }
        if self.asset_host.is_some() {
            url = self.apply_host(&url).await?;
        }

        url.push_str(fragment);
        tracing::debug!(filename, %class, %url, "resolved asset url");
        Ok(url)
    }

    pub async fn image_url(&self, filename: &str) -> Result<String> {
        self.asset_url(filename, AssetClass::Images).await
    }

    pub async fn font_url(&self, filename: &str) -> Result<String> {
        self.asset_url(filename, AssetClass::Fonts).await
    }

    /// Pixel size of an image, read from its header.
    pub fn image_dimensions(&self, filename: &str) -> Result<Dimensions> {
        imaging::identify(&self.real_path(filename, AssetClass::Images))
    }

    pub fn image_width(&self, filename: &str) -> Result<u32> {
        Ok(self.image_dimensions(filename)?.width)
    }

    pub fn image_height(&self, filename: &str) -> Result<u32> {
        Ok(self.image_dimensions(filename)?.height)
    }

    /// The image as a `data:` URI.
    pub fn inline_image(&self, filename: &str, mime_type: Option<&str>) -> Result<String> {
        inline::inline_file(&self.real_path(filename, AssetClass::Images), mime_type)
    }

    /// Resolve a `font-files()` argument list.
    ///
    /// URLs resolve concurrently; the output follows input order, and the
    /// first failure fails the whole list.
    pub async fn font_files<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<FontFile>> {
        let sources = fonts::plan_font_sources(tokens)?;
        let resolutions = sources.into_iter().map(|source| async move {
            let url = self.font_url(&source.file).await?;
            Ok::<_, AssetError>(FontFile {
                url,
                format: source.format,
            })
        });
        try_join_all(resolutions).await
    }
}
