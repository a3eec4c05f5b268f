//! Plain text block, one bar per language.
//!
//! ```text
//! Rust    ██████████████░░░░░░░░░░░  57.20 %
//! Shell   ███░░░░░░░░░░░░░░░░░░░░░░  12.80 %
//! ```

use crate::RenderOptions;
use langdist_core::{LanguageShare, HUNDREDTHS_TOTAL};

const FILLED: char = '█';
const EMPTY: char = '░';

pub fn render(shares: &[LanguageShare], options: &RenderOptions) -> String {
    let name_width = shares
        .iter()
        .map(|s| s.language.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = shares
        .iter()
        .map(|s| {
            format!(
                "{:<name_width$}  {}  {:>6.2} %",
                s.language,
                bar(s.hundredths, options.bar_width),
                s.percentage(),
            )
        })
        .collect();

    if let Some(ts) = options.updated_at {
        lines.push(String::new());
        lines.push(format!("Last updated: {}", ts.to_rfc3339()));
    }
    lines.join("\n")
}

/// A bar of `width` cells with the filled part rounded to the nearest cell.
fn bar(hundredths: u32, width: usize) -> String {
    let total = u64::from(HUNDREDTHS_TOTAL);
    let filled = (u64::from(hundredths) * width as u64 + total / 2) / total;
    let filled = (filled as usize).min(width);
    let mut out = String::with_capacity(width * FILLED.len_utf8());
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(width - filled));
    out
}
