//! Rendering resolved values as stylesheet text.

use crate::fonts::FontFile;

/// `url('…')`, or the bare URL when `only_path` is set.
pub fn url_value(url: &str, only_path: bool) -> String {
    if only_path {
        url.to_string()
    } else {
        format!("url('{url}')")
    }
}

/// A pixel length, e.g. `120px`.
pub fn px(value: u32) -> String {
    format!("{value}px")
}

/// The `src` value of an `@font-face` rule.
pub fn font_src(files: &[FontFile]) -> String {
    files
        .iter()
        .map(|file| format!("url('{}') format('{}')", file.url, file.format))
        .collect::<Vec<_>>()
        .join(", ")
}
