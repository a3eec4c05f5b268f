//! SVG card: a title, one stacked bar and a legend row per language.

use crate::colors::language_color;
use crate::{escape_markup, RenderOptions};
use langdist_core::{LanguageShare, HUNDREDTHS_TOTAL};

const WIDTH: u32 = 400;
const PADDING_X: f64 = 25.0;
const BAR_Y: u32 = 55;
const BAR_HEIGHT: u32 = 8;
const LEGEND_Y: u32 = 85;
const ROW_HEIGHT: u32 = 22;
const FONT: &str = "'Segoe UI', Ubuntu, Sans-Serif";

/// Card height for `rows` legend rows, plus room for the footer if present.
fn card_height(rows: usize, footer: bool) -> u32 {
    let rows = u32::try_from(rows).unwrap_or(u32::MAX / ROW_HEIGHT);
    LEGEND_Y + rows * ROW_HEIGHT + if footer { 20 } else { 0 }
}

pub fn render(shares: &[LanguageShare], options: &RenderOptions) -> String {
    let height = card_height(shares.len(), options.updated_at.is_some());
    let title = escape_markup(&options.title);
    let bar_width = f64::from(WIDTH) - 2.0 * PADDING_X;

    let mut lines = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" role="img" aria-label="{title}">"#
        ),
        format!("  <title>{title}</title>"),
        format!(
            r##"  <rect x="0.5" y="0.5" width="{}" height="{}" rx="4.5" fill="#fffefe" stroke="#e4e2e2"/>"##,
            WIDTH - 1,
            height - 1
        ),
        format!(
            r##"  <text x="{PADDING_X}" y="35" font-family="{FONT}" font-size="18" font-weight="600" fill="#2f80ed">{title}</text>"##
        ),
        format!(
            r#"  <mask id="bar-mask"><rect x="{PADDING_X}" y="{BAR_Y}" width="{bar_width}" height="{BAR_HEIGHT}" rx="5" fill="white"/></mask>"#
        ),
    ];

    // Segment edges come from cumulative hundredths so rounding never drifts.
    let mut cumulative: u64 = 0;
    for s in shares {
        let start = PADDING_X + bar_width * cumulative as f64 / f64::from(HUNDREDTHS_TOTAL);
        cumulative += u64::from(s.hundredths);
        let end = PADDING_X + bar_width * cumulative as f64 / f64::from(HUNDREDTHS_TOTAL);
        lines.push(format!(
            r#"  <rect mask="url(#bar-mask)" x="{:.2}" y="{BAR_Y}" width="{:.2}" height="{BAR_HEIGHT}" fill="{}"/>"#,
            start,
            end - start,
            language_color(&s.language)
        ));
    }

    for (i, s) in shares.iter().enumerate() {
        let y = LEGEND_Y as usize + i * ROW_HEIGHT as usize;
        lines.push(format!(
            r#"  <circle cx="{}" cy="{y}" r="5" fill="{}"/>"#,
            PADDING_X + 5.0,
            language_color(&s.language)
        ));
        lines.push(format!(
            r##"  <text x="{}" y="{}" font-family="{FONT}" font-size="12" fill="#434d58">{} {:.2}%</text>"##,
            PADDING_X + 17.0,
            y + 4,
            escape_markup(&s.language),
            s.percentage()
        ));
    }

    if let Some(ts) = options.updated_at {
        lines.push(format!(
            r##"  <text x="{PADDING_X}" y="{}" font-family="{FONT}" font-size="10" fill="#8a8a8a">Last updated: {}</text>"##,
            height - 12,
            ts.to_rfc3339()
        ));
    }
    lines.push("</svg>".to_string());
    lines.join("\n")
}
