//! langdist: language distribution for a GitHub account.
//!
//! Collects per-repository language byte counts, normalizes them into
//! percentages that sum to exactly 100.00, and renders the result as text,
//! HTML, SVG or JSON. This crate is the glue shared by every delivery
//! surface: the one-shot `render` command and the `serve` HTTP worker.
//!
//! # Architecture
//!
//! ```text
//! LanguageSource ──► weighting ──► normalizer ──► renderer ──► stdout / README / HTTP
//! ```

pub mod server;

pub use langdist_core::{LanguageShare, NormalizeError, Weights};
pub use langdist_render::Format;

use chrono::Utc;
use langdist_core::config::OutputConfig;
use langdist_core::normalize_weighted;
use langdist_render::RenderOptions;
use langdist_sources::{LanguageSource, SourceError};
use thiserror::Error;

/// Anything that can stop the pipeline before rendering.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Fetch `username`'s languages from `source` and normalize them.
pub async fn distribution<S: LanguageSource>(
    source: &S,
    username: &str,
    weights: Weights,
) -> Result<Vec<LanguageShare>, PipelineError> {
    let totals = source.fetch(username).await?;
    tracing::debug!(
        username,
        languages = totals.len(),
        repositories = totals.repositories,
        "normalizing"
    );
    Ok(normalize_weighted(totals.entries(), weights)?)
}

/// Fetch, normalize and render in one step.
pub async fn render_distribution<S: LanguageSource>(
    source: &S,
    username: &str,
    weights: Weights,
    format: Format,
    options: &RenderOptions,
) -> Result<String, PipelineError> {
    let shares = distribution(source, username, weights).await?;
    Ok(langdist_render::render(format, &shares, options))
}

/// Presentation options from the `[output]` section, stamping the current
/// time when `show_updated` is set.
pub fn render_options(output: &OutputConfig) -> RenderOptions {
    RenderOptions {
        title: output.title.clone(),
        bar_width: output.bar_width,
        max_languages: output.max_languages,
        updated_at: output.show_updated.then(Utc::now),
    }
}
