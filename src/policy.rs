//! Caller-supplied rewrite policies: cache busting and asset hosts.
//!
//! Both policies are futures. A policy that answers immediately and one that
//! hashes a file on another thread look the same to the [`Processor`]:
//! it awaits either.
//!
//! Closures plug in through four adapters:
//!
//! | Adapter | Closure shape |
//! |---|---|
//! | [`buster_fn`] | `Fn(String, PathBuf) -> impl Future<Output = Result<BusterResult, _>>` |
//! | [`sync_buster_fn`] | `Fn(&str, &Path) -> Result<BusterResult, _>` |
//! | [`host_fn`] | `Fn(String) -> impl Future<Output = Result<String, _>>` |
//! | [`sync_host_fn`] | `Fn(&str) -> Result<String, _>` |
//!
//! [`Processor`]: crate::processor::Processor

use crate::error::AssetError;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the built-in content-hash cache buster in config files.
pub const CONTENT_HASH_STRATEGY: &str = "content-hash";

/// What a cache buster wants done to an HTTP path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusterResult {
    /// Keep the path, replace the query string (`v=123`).
    Query(String),
    /// Replace the path (`/images/a-v123.png`). `query: None` keeps the
    /// original query string.
    Rewrite { path: String, query: Option<String> },
}

impl BusterResult {
    pub fn query(query: impl Into<String>) -> Self {
        BusterResult::Query(query.into())
    }

    pub fn rewrite(path: impl Into<String>, query: Option<String>) -> Self {
        BusterResult::Rewrite {
            path: path.into(),
            query,
        }
    }

    /// Leave `http_path` exactly as it is.
    pub fn unchanged(http_path: &str) -> Self {
        BusterResult::rewrite(http_path, None)
    }
}

/// Rewrites a public path so clients refetch it when the file changes.
pub trait CacheBuster: Send + Sync {
    /// `http_path` is fragment-free; `real_path` is where the file lives on disk.
    fn bust<'a>(
        &'a self,
        http_path: &'a str,
        real_path: &'a Path,
    ) -> BoxFuture<'a, Result<BusterResult, AssetError>>;
}

/// Chooses the host (base URL) an HTTP path is served from.
pub trait AssetHost: Send + Sync {
    fn host<'a>(&'a self, http_path: &'a str) -> BoxFuture<'a, Result<String, AssetError>>;
}

/// Async closure cache buster. See [`buster_fn`].
pub struct BusterFn<F>(F);

/// Wrap an async closure as a [`CacheBuster`].
pub fn buster_fn<F, Fut>(f: F) -> BusterFn<F>
where
    F: Fn(String, PathBuf) -> Fut + Send + Sync,
    Fut: Future<Output = Result<BusterResult, AssetError>> + Send + 'static,
{
    BusterFn(f)
}

impl<F, Fut> CacheBuster for BusterFn<F>
where
    F: Fn(String, PathBuf) -> Fut + Send + Sync,
    Fut: Future<Output = Result<BusterResult, AssetError>> + Send + 'static,
{
    fn bust<'a>(
        &'a self,
        http_path: &'a str,
        real_path: &'a Path,
    ) -> BoxFuture<'a, Result<BusterResult, AssetError>> {
        (self.0)(http_path.to_string(), real_path.to_path_buf()).boxed()
    }
}

/// Synchronous closure cache buster. See [`sync_buster_fn`].
pub struct SyncBusterFn<F>(F);

/// Wrap a plain closure as a [`CacheBuster`] that completes immediately.
pub fn sync_buster_fn<F>(f: F) -> SyncBusterFn<F>
where
    F: Fn(&str, &Path) -> Result<BusterResult, AssetError> + Send + Sync,
{
    SyncBusterFn(f)
}

impl<F> CacheBuster for SyncBusterFn<F>
where
    F: Fn(&str, &Path) -> Result<BusterResult, AssetError> + Send + Sync,
{
    fn bust<'a>(
        &'a self,
        http_path: &'a str,
        real_path: &'a Path,
    ) -> BoxFuture<'a, Result<BusterResult, AssetError>> {
        futures::future::ready((self.0)(http_path, real_path)).boxed()
    }
}

/// Async closure asset host. See [`host_fn`].
pub struct HostFn<F>(F);

/// Wrap an async closure as an [`AssetHost`].
pub fn host_fn<F, Fut>(f: F) -> HostFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, AssetError>> + Send + 'static,
{
    HostFn(f)
}

impl<F, Fut> AssetHost for HostFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, AssetError>> + Send + 'static,
{
    fn host<'a>(&'a self, http_path: &'a str) -> BoxFuture<'a, Result<String, AssetError>> {
        (self.0)(http_path.to_string()).boxed()
    }
}

/// Synchronous closure asset host. See [`sync_host_fn`].
pub struct SyncHostFn<F>(F);

pub fn sync_host_fn<F>(f: F) -> SyncHostFn<F>
where
    F: Fn(&str) -> Result<String, AssetError> + Send + Sync,
{
    SyncHostFn(f)
}

impl<F> AssetHost for SyncHostFn<F>
where
    F: Fn(&str) -> Result<String, AssetError> + Send + Sync,
{
    fn host<'a>(&'a self, http_path: &'a str) -> BoxFuture<'a, Result<String, AssetError>> {
        futures::future::ready((self.0)(http_path)).boxed()
    }
}

/// How asset hosts are chosen.
#[derive(Clone)]
pub enum HostPolicy {
    /// One host for every asset; no policy call.
    Static(String),
    Dynamic(Arc<dyn AssetHost>),
}

impl HostPolicy {
    pub fn dynamic(host: impl AssetHost + 'static) -> Self {
        HostPolicy::Dynamic(Arc::new(host))
    }
}

impl fmt::Debug for HostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPolicy::Static(host) => f.debug_tuple("Static").field(host).finish(),
            HostPolicy::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// How cache busting is performed.
#[derive(Clone)]
pub enum CacheBusterPolicy {
    /// Built-in: SHA-256 of the file contents as the query string.
    ContentHash,
    Custom(Arc<dyn CacheBuster>),
    /// A strategy name nothing knows how to run. Fails when invoked.
    Unrecognized(String),
}

impl CacheBusterPolicy {
    pub fn custom(buster: impl CacheBuster + 'static) -> Self {
        CacheBusterPolicy::Custom(Arc::new(buster))
    }

    /// Map a strategy name from configuration to a policy.
    pub fn named(name: &str) -> Self {
        if name == CONTENT_HASH_STRATEGY {
            CacheBusterPolicy::ContentHash
        } else {
            CacheBusterPolicy::Unrecognized(name.to_string())
        }
    }
}

impl fmt::Debug for CacheBusterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheBusterPolicy::ContentHash => f.write_str("ContentHash"),
            CacheBusterPolicy::Custom(_) => f.write_str("Custom(..)"),
            CacheBusterPolicy::Unrecognized(name) => {
                f.debug_tuple("Unrecognized").field(name).finish()
            }
        }
    }
}
