//! langdist-render: presenters for a normalized language distribution.
//!
//! Every presenter is a pure function of the shares and [`RenderOptions`].
//! [`patch`] splices any of their outputs into an existing document.

pub mod colors;
pub mod html;
pub mod patch;
pub mod svg;
pub mod text;

use chrono::{DateTime, Utc};
use langdist_core::LanguageShare;
use std::str::FromStr;

/// Label of the row that absorbs languages past `max_languages`.
pub const OTHER_LABEL: &str = "Other";

/// Output format of a rendered distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Html,
    Svg,
    Json,
}

impl Format {
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Text => "text/plain; charset=utf-8",
            Format::Html => "text/html; charset=utf-8",
            Format::Svg => "image/svg+xml",
            Format::Json => "application/json",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "html" => Ok(Format::Html),
            "svg" => Ok(Format::Svg),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format: {other} (expected text, html, svg or json)")),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Html => write!(f, "html"),
            Format::Svg => write!(f, "svg"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Presentation knobs shared by all formats.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    /// Cells in a text bar.
    pub bar_width: usize,
    /// Rows shown before the remainder collapses into [`OTHER_LABEL`].
    /// `0` shows every language.
    pub max_languages: usize,
    /// Footer timestamp; `None` omits the footer.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Most Used Languages".to_string(),
            bar_width: 25,
            max_languages: 0,
            updated_at: None,
        }
    }
}

/// Render `shares` in the requested format.
pub fn render(format: Format, shares: &[LanguageShare], options: &RenderOptions) -> String {
    let rows = limit_languages(shares, options.max_languages);
    match format {
        Format::Text => text::render(&rows, options),
        Format::Html => html::render(&rows, options),
        Format::Svg => svg::render(&rows, options),
        Format::Json => render_json(&rows),
    }
}

fn render_json(rows: &[LanguageShare]) -> String {
    let languages: Vec<serde_json::Value> = rows
        .iter()
        .map(|s| {
            serde_json::json!({
                "language": s.language,
                "raw_size": s.raw_size,
                "repo_count": s.repo_count,
                "hundredths": s.hundredths,
                "percentage": s.percentage(),
            })
        })
        .collect();
    serde_json::Value::Array(languages).to_string()
}

/// Keep the first `max` rows and fold the rest into a single
/// [`OTHER_LABEL`] row, so the rendered total is unchanged.
pub fn limit_languages(shares: &[LanguageShare], max: usize) -> Vec<LanguageShare> {
    if max == 0 || shares.len() <= max {
        return shares.to_vec();
    }
    let (kept, rest) = shares.split_at(max);
    let mut rows = kept.to_vec();
    rows.push(LanguageShare {
        language: OTHER_LABEL.to_string(),
        raw_size: rest.iter().map(|s| s.raw_size).sum(),
        repo_count: 0,
        hundredths: rest.iter().map(|s| s.hundredths).sum(),
    });
    rows
}

/// Escape text for HTML and SVG bodies and attribute values.
pub(crate) fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn share(language: &str, raw_size: u64, hundredths: u32) -> LanguageShare {
    LanguageShare {
        language: language.to_string(),
        raw_size,
        repo_count: 1,
        hundredths,
    }
}
