//! Asset configuration module.
//!
//! Handles loading, validating, and merging `assets.toml`. Stock defaults are
//! overridden by whatever keys the user file sets; command-line flags are
//! applied on top of the loaded result by the binary.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! images_path = "public/images"     # Filesystem root for images
//! fonts_path = "public/fonts"       # Filesystem root for fonts
//! http_images_path = "/images"      # Public URL root for images
//! http_fonts_path = "/fonts"        # Public URL root for fonts
//!
//! # asset_host = "https://cdn.example.com"
//! # asset_cache_buster = true       # or "content-hash"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::paths::{
    DEFAULT_FONTS_PATH, DEFAULT_HTTP_FONTS_PATH, DEFAULT_HTTP_IMAGES_PATH, DEFAULT_IMAGES_PATH,
    PathConfig,
};
use crate::policy::{CacheBusterPolicy, HostPolicy};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Name of the config file looked up in the config directory.
pub const CONFIG_FILENAME: &str = "assets.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `assets.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Filesystem root for images.
    pub images_path: String,
    /// Filesystem root for fonts.
    pub fonts_path: String,
    /// Public URL root for images.
    pub http_images_path: String,
    /// Public URL root for fonts.
    pub http_fonts_path: String,
    /// Static host every asset URL is resolved against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_host: Option<String>,
    /// Cache busting: `true`/`false` or a strategy name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_cache_buster: Option<CacheBusterSetting>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            images_path: DEFAULT_IMAGES_PATH.to_string(),
            fonts_path: DEFAULT_FONTS_PATH.to_string(),
            http_images_path: DEFAULT_HTTP_IMAGES_PATH.to_string(),
            http_fonts_path: DEFAULT_HTTP_FONTS_PATH.to_string(),
            asset_host: None,
            asset_cache_buster: None,
        }
    }
}

/// `asset_cache_buster` as written in config: a switch or a strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheBusterSetting {
    Enabled(bool),
    Strategy(String),
}

impl FromStr for CacheBusterSetting {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "true" => CacheBusterSetting::Enabled(true),
            "false" => CacheBusterSetting::Enabled(false),
            other => CacheBusterSetting::Strategy(other.to_string()),
        })
    }
}

impl AssetsConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roots = [
            ("images_path", &self.images_path),
            ("fonts_path", &self.fonts_path),
            ("http_images_path", &self.http_images_path),
            ("http_fonts_path", &self.http_fonts_path),
        ];
        for (key, value) in roots {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains(['#', '?']) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not contain a query or fragment"
                )));
            }
        }
        if self
            .asset_host
            .as_deref()
            .is_some_and(|host| host.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "asset_host must not be empty; omit it to disable".into(),
            ));
        }
        Ok(())
    }

    /// Anchor relative filesystem roots at `dir`, the directory holding
    /// `assets.toml`. Public URL roots are untouched.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        for root in [&mut self.images_path, &mut self.fonts_path] {
            if Path::new(root.as_str()).is_relative() {
                *root = dir.join(root.as_str()).to_string_lossy().into_owned();
            }
        }
        self
    }

    pub fn path_config(&self) -> PathConfig {
        PathConfig {
            images_path: self.images_path.clone(),
            fonts_path: self.fonts_path.clone(),
            http_images_path: self.http_images_path.clone(),
            http_fonts_path: self.http_fonts_path.clone(),
        }
    }

    pub fn host_policy(&self) -> Option<HostPolicy> {
        self.asset_host.clone().map(HostPolicy::Static)
    }

    /// `true` selects the content-hash buster; unknown names are kept and
    /// fail once a URL is actually busted.
    pub fn cache_buster_policy(&self) -> Option<CacheBusterPolicy> {
        match self.asset_cache_buster.as_ref()? {
            CacheBusterSetting::Enabled(true) => Some(CacheBusterPolicy::ContentHash),
            CacheBusterSetting::Enabled(false) => None,
            CacheBusterSetting::Strategy(name) => Some(CacheBusterPolicy::named(name)),
        }
    }
}

// =============================================================================
// Loading: stock table, user keys on top, then deserialize and validate
// =============================================================================

/// The defaults as a TOML table, optional policies left out.
pub fn stock_table() -> Result<toml::Table, ConfigError> {
    let stock = toml::to_string(&AssetsConfig::default())?;
    Ok(toml::from_str(&stock)?)
}

/// Lay the keys a user set over the stock table.
///
/// Every key is a scalar, so a user value replaces its default whole; keys
/// the user leaves out keep the stock value. Misspelled keys survive the
/// overlay and are rejected when the table is deserialized.
pub fn overlay_user_keys(mut stock: toml::Table, user: toml::Table) -> toml::Table {
    stock.extend(user);
    stock
}

/// Keys set in `<dir>/assets.toml`, or `None` when the project has no file.
pub fn read_user_keys(dir: &Path) -> Result<Option<toml::Table>, ConfigError> {
    match fs::read_to_string(dir.join(CONFIG_FILENAME)) {
        Ok(content) => Ok(Some(toml::from_str(&content)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Deserialize a complete table and check its values are usable.
pub fn config_from_table(table: toml::Table) -> Result<AssetsConfig, ConfigError> {
    let config: AssetsConfig = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the project config from `assets.toml` in `dir`.
///
/// A missing file means stock defaults. Filesystem roots are returned as
/// written; see [`AssetsConfig::relative_to`].
pub fn load_config(dir: &Path) -> Result<AssetsConfig, ConfigError> {
    let table = match read_user_keys(dir)? {
        Some(user) => overlay_user_keys(stock_table()?, user),
        None => stock_table()?,
    };
    let config = config_from_table(table)?;
    tracing::debug!(dir = %dir.display(), ?config, "loaded asset config");
    Ok(config)
}

/// Returns a fully-commented stock `assets.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Asset Functions Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Filesystem roots (used to read images, inline data and hash files)
# ---------------------------------------------------------------------------
images_path = "public/images"
fonts_path = "public/fonts"

# ---------------------------------------------------------------------------
# Public URL roots (what appears in compiled CSS)
# ---------------------------------------------------------------------------
http_images_path = "/images"
http_fonts_path = "/fonts"

# ---------------------------------------------------------------------------
# Asset host
# ---------------------------------------------------------------------------
# Base URL every asset path is resolved against, e.g. a CDN origin.
# asset_host = "https://cdn.example.com"

# ---------------------------------------------------------------------------
# Cache busting
# ---------------------------------------------------------------------------
# true / "content-hash": append the first 8 hex chars of the file's SHA-256
# as the query string (files that don't exist are left alone).
# asset_cache_buster = true
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_conventional_roots() {
        let config = AssetsConfig::default();
        assert_eq!(config.images_path, "public/images");
        assert_eq!(config.fonts_path, "public/fonts");
        assert_eq!(config.http_images_path, "/images");
        assert_eq!(config.http_fonts_path, "/fonts");
        assert_eq!(config.path_config(), PathConfig::default());
        assert!(config.host_policy().is_none());
        assert!(config.cache_buster_policy().is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
http_images_path = "/static/img"
"#;
        let config: AssetsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.http_images_path, "/static/img");
        assert_eq!(config.images_path, "public/images");
    }

    #[test]
    fn parse_cache_buster_forms() {
        let enabled: AssetsConfig = toml::from_str("asset_cache_buster = true").unwrap();
        assert!(matches!(
            enabled.cache_buster_policy(),
            Some(CacheBusterPolicy::ContentHash)
        ));

        let disabled: AssetsConfig = toml::from_str("asset_cache_buster = false").unwrap();
        assert!(disabled.cache_buster_policy().is_none());

        let named: AssetsConfig =
            toml::from_str(r#"asset_cache_buster = "content-hash""#).unwrap();
        assert!(matches!(
            named.cache_buster_policy(),
            Some(CacheBusterPolicy::ContentHash)
        ));

        let unknown: AssetsConfig = toml::from_str(r#"asset_cache_buster = "mtime""#).unwrap();
        assert!(matches!(
            unknown.cache_buster_policy(),
            Some(CacheBusterPolicy::Unrecognized(ref name)) if name == "mtime"
        ));
    }

    #[test]
    fn asset_host_becomes_static_policy() {
        let config: AssetsConfig =
            toml::from_str(r#"asset_host = "https://cdn.example.com""#).unwrap();
        assert!(matches!(
            config.host_policy(),
            Some(HostPolicy::Static(ref host)) if host == "https://cdn.example.com"
        ));
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<AssetsConfig, _> = toml::from_str("image_path = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn cache_buster_setting_from_str() {
        assert_eq!(
            "true".parse::<CacheBusterSetting>().unwrap(),
            CacheBusterSetting::Enabled(true)
        );
        assert_eq!(
            "false".parse::<CacheBusterSetting>().unwrap(),
            CacheBusterSetting::Enabled(false)
        );
        assert_eq!(
            "content-hash".parse::<CacheBusterSetting>().unwrap(),
            CacheBusterSetting::Strategy("content-hash".into())
        );
    }

    #[test]
    fn validate_rejects_empty_roots() {
        let config = AssetsConfig {
            fonts_path: "  ".into(),
            ..AssetsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fonts_path"));
    }

    #[test]
    fn validate_rejects_query_in_root() {
        let config = AssetsConfig {
            http_images_path: "/images?x".into(),
            ..AssetsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_host() {
        let config = AssetsConfig {
            asset_host: Some("".into()),
            ..AssetsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Stock table and user overlay
    // =========================================================================

    #[test]
    fn user_keys_replace_defaults_and_unset_keys_survive() {
        let user: toml::Table = toml::from_str(r#"http_fonts_path = "/static/fonts""#).unwrap();
        let merged = overlay_user_keys(stock_table().unwrap(), user);
        assert_eq!(merged["http_fonts_path"].as_str(), Some("/static/fonts"));
        assert_eq!(merged["images_path"].as_str(), Some("public/images"));
    }

    #[test]
    fn stock_table_omits_optional_policies() {
        let stock = stock_table().unwrap();
        assert!(!stock.contains_key("asset_host"));
        assert!(!stock.contains_key("asset_cache_buster"));
        assert_eq!(stock["images_path"].as_str(), Some("public/images"));
    }

    #[test]
    fn misspelled_user_key_fails_deserialization() {
        let user: toml::Table = toml::from_str(r#"font_path = "x""#).unwrap();
        let merged = overlay_user_keys(stock_table().unwrap(), user);
        assert!(matches!(config_from_table(merged), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn read_user_keys_without_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(read_user_keys(tmp.path()).unwrap().is_none());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, AssetsConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
images_path = "assets/img"
asset_host = "//cdn.example.com"
asset_cache_buster = true
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.images_path, "assets/img");
        assert_eq!(config.asset_host.as_deref(), Some("//cdn.example.com"));
        assert_eq!(
            config.asset_cache_buster,
            Some(CacheBusterSetting::Enabled(true))
        );
        assert_eq!(config.fonts_path, "public/fonts");
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "images_path = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_validates() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "http_fonts_path = \"\"").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn relative_to_anchors_filesystem_roots() {
        let config = AssetsConfig {
            fonts_path: "/srv/fonts".into(),
            ..AssetsConfig::default()
        }
        .relative_to(Path::new("/site"));

        assert_eq!(Path::new(&config.images_path), Path::new("/site/public/images"));
        assert_eq!(config.fonts_path, "/srv/fonts");
        assert_eq!(config.http_images_path, "/images");
        assert_eq!(config.http_fonts_path, "/fonts");
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: AssetsConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, AssetsConfig::default());
    }
}
