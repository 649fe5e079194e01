//! Small URL algebra over public asset paths.
//!
//! HTTP paths are server-relative strings (`/images/a.png?v=1#top`) rather
//! than full URLs, so most helpers here split strings directly. Only host
//! resolution goes through [`url::Url`], which implements standard base-URL
//! resolution.

use crate::error::AssetError;
use url::{Position, Url};

/// Origin used to resolve against hosts that are not absolute URLs.
const PLACEHOLDER_BASE: &str = "https://placeholder.invalid/";
const PLACEHOLDER_HOST: &str = "placeholder.invalid";

/// Split `url` at its first `#`. The fragment half keeps its `#`.
pub fn split_fragment(url: &str) -> (&str, &str) {
    match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    }
}

/// Split a fragment-free URL into its path and query (without the `?`).
pub fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Path portion of `url`: no scheme, authority, query or fragment.
pub fn path_component(url: &str) -> &str {
    let path = match url.find("://") {
        Some(idx) if Url::parse(url).is_ok() => {
            let authority_and_path = &url[idx + 3..];
            authority_and_path
                .find(['/', '?', '#'])
                .map_or("", |start| &authority_and_path[start..])
        }
        _ => url,
    };
    path.find(['?', '#']).map_or(path, |idx| &path[..idx])
}

/// Reassemble `path[?query]`. A blank query adds nothing; a leading `?` is not doubled.
pub fn with_query(path: &str, query: Option<&str>) -> String {
    match query.map(|q| q.strip_prefix('?').unwrap_or(q)) {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    }
}

/// Reassemble `path[?query]` keeping the query exactly as split off, so an
/// empty one (`a.eot?#iefix`) still writes its `?`.
pub fn with_raw_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    }
}

/// Resolve `reference` against `base` the way a browser would.
///
/// - absolute `base` (`http://cdn.example.com`) → absolute URL
/// - protocol-relative `base` (`//cdn.example.com`) → protocol-relative URL
/// - relative `base` → server-relative result
/// - an absolute `reference` always wins
pub fn resolve(base: &str, reference: &str) -> Result<String, AssetError> {
    if let Ok(absolute) = Url::parse(reference) {
        return Ok(absolute.into());
    }
    if let Ok(base_url) = Url::parse(base) {
        return join(&base_url, reference).map(String::from);
    }

    if let Some(authority) = base.strip_prefix("//") {
        let base_url = parse(&format!("https://{authority}"))?;
        let joined = join(&base_url, reference)?;
        return Ok(format!("//{}", &joined[Position::BeforeUsername..]));
    }

    let placeholder = parse(PLACEHOLDER_BASE)?;
    let joined = join(&join(&placeholder, base)?, reference)?;
    if joined.host_str() == Some(PLACEHOLDER_HOST) {
        Ok(joined[Position::BeforePath..].to_string())
    } else {
        Ok(format!("//{}", &joined[Position::BeforeUsername..]))
    }
}

fn parse(input: &str) -> Result<Url, AssetError> {
    Url::parse(input).map_err(|source| AssetError::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

fn join(base: &Url, reference: &str) -> Result<Url, AssetError> {
    base.join(reference).map_err(|source| AssetError::InvalidUrl {
        input: format!("{base} + {reference}"),
        source,
    })
}
