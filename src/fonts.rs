//! Font formats and `font-files()` argument parsing.
//!
//! `font-files()` takes a flat list of filenames, each optionally followed by
//! a format keyword that overrides the extension:
//!
//! ```text
//! font-files("a.woff2", "b.woff", "legacy", "truetype")
//!   → a.woff2 (woff2), b.woff (woff), legacy (truetype)
//! ```

use crate::error::AssetError;
use serde::Serialize;
use std::fmt;

/// A CSS `format()` hint for `@font-face src`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontFormat {
    #[serde(rename = "woff")]
    Woff,
    #[serde(rename = "woff2")]
    Woff2,
    #[serde(rename = "opentype")]
    OpenType,
    #[serde(rename = "truetype")]
    TrueType,
    #[serde(rename = "svg")]
    Svg,
    #[serde(rename = "embedded-opentype")]
    EmbeddedOpenType,
}

/// Extensions and override keywords, mapped to their format.
pub const FONT_TYPES: &[(&str, FontFormat)] = &[
    ("woff", FontFormat::Woff),
    ("woff2", FontFormat::Woff2),
    ("otf", FontFormat::OpenType),
    ("opentype", FontFormat::OpenType),
    ("ttf", FontFormat::TrueType),
    ("truetype", FontFormat::TrueType),
    ("svg", FontFormat::Svg),
    ("eot", FontFormat::EmbeddedOpenType),
];

impl FontFormat {
    /// Look up an extension or keyword in [`FONT_TYPES`].
    pub fn from_token(token: &str) -> Option<Self> {
        FONT_TYPES
            .iter()
            .find(|(key, _)| *key == token)
            .map(|(_, format)| *format)
    }

    /// Keyword for `format('…')`.
    pub fn css_keyword(self) -> &'static str {
        match self {
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
            FontFormat::OpenType => "opentype",
            FontFormat::TrueType => "truetype",
            FontFormat::Svg => "svg",
            FontFormat::EmbeddedOpenType => "embedded-opentype",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_keyword())
    }
}

/// A font filename paired with its format, before URL resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub file: String,
    pub format: FontFormat,
}

/// A resolved entry of a `font-files()` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontFile {
    pub url: String,
    pub format: FontFormat,
}

/// Pair each filename with its format, consuming override keywords.
///
/// A token directly after a filename is an override when it is a key of
/// [`FONT_TYPES`]; it is not treated as a file of its own. Otherwise the
/// format comes from the filename's extension (query and fragment ignored,
/// case-insensitive).
pub fn plan_font_sources<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<FontSource>, AssetError> {
    let mut sources = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.iter().map(AsRef::as_ref).peekable();

    while let Some(file) = tokens.next() {
        let format = match tokens.next_if(|next| FontFormat::from_token(next).is_some()) {
            Some(keyword) => FontFormat::from_token(keyword),
            None => {
                extension(file).and_then(|ext| FontFormat::from_token(&ext.to_ascii_lowercase()))
            }
        }
        .ok_or_else(|| {
            AssetError::Format(format!(
                "cannot determine font format of '{file}': unknown extension and no format keyword"
            ))
        })?;

        sources.push(FontSource {
            file: file.to_string(),
            format,
        });
    }

    Ok(sources)
}

/// Extension of the last path segment, without the dot.
fn extension(file: &str) -> Option<&str> {
    let path = file.find(['?', '#']).map_or(file, |idx| &file[..idx]);
    let name = path.rsplit('/').next()?;
    match name.rfind('.') {
        Some(dot) if dot > 0 => Some(&name[dot + 1..]),
        _ => None,
    }
}
