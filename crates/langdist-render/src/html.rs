//! HTML table presenter.

use crate::{escape_markup, RenderOptions};
use langdist_core::LanguageShare;

pub fn render(shares: &[LanguageShare], options: &RenderOptions) -> String {
    let mut out = String::from("<table>\n");
    if !options.title.is_empty() {
        out.push_str(&format!("  <caption>{}</caption>\n", escape_markup(&options.title)));
    }
    out.push_str("  <thead>\n    <tr><th>Language</th><th>Share</th></tr>\n  </thead>\n");
    out.push_str("  <tbody>\n");
    for s in shares {
        out.push_str(&format!(
            "    <tr><td>{}</td><td>{:.2}%</td></tr>\n",
            escape_markup(&s.language),
            s.percentage()
        ));
    }
    out.push_str("  </tbody>\n</table>");

    if let Some(ts) = options.updated_at {
        out.push_str(&format!("\n<p><sub>Last updated: {}</sub></p>", ts.to_rfc3339()));
    }
    out
}
