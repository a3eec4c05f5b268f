//! HTTP worker: renders a distribution per request.
//!
//! - `GET /health` - liveness check
//! - `GET /languages?username=U&format=svg&max=N` - rendered distribution
//!
//! Each request runs the whole pipeline independently; nothing is cached or
//! shared between requests except the read-only [`AppState`].

use crate::{distribution, render_options, PipelineError};
use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use langdist_core::config::OutputConfig;
use langdist_core::{NormalizeError, Weights};
use langdist_render::Format;
use langdist_sources::{LanguageSource, SourceError};
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};

/// GitHub login: alphanumerics and single inner hyphens, at most 39 chars.
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9]|-[A-Za-z0-9]){0,38}$").expect("username pattern is valid")
});

/// Read-only state shared by every request.
pub struct AppState<S> {
    pub source: S,
    pub weights: Weights,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
struct LanguagesQuery {
    username: Option<String>,
    format: Option<String>,
    max: Option<usize>,
}

/// Build the worker router around `state`.
pub fn router<S: LanguageSource + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/languages", get(languages::<S>))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<S: LanguageSource + 'static>(state: AppState<S>, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "langdist worker listening");

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

pub fn is_valid_username(username: &str) -> bool {
    username.len() <= 39 && USERNAME_RE.is_match(username)
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn health() -> &'static str {
    "ok"
}

async fn languages<S: LanguageSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<LanguagesQuery>,
) -> Response {
    let Some(username) = query.username.filter(|u| !u.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "missing username").into_response();
    };
    if !is_valid_username(&username) {
        return (StatusCode::BAD_REQUEST, "invalid username").into_response();
    }

    let format = match query.format.as_deref().map(str::parse::<Format>).transpose() {
        Ok(Some(format)) => format,
        Ok(None) => state.output.format.parse().unwrap_or_default(),
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let mut options = render_options(&state.output);
    if let Some(max) = query.max {
        options.max_languages = max;
    }

    match distribution(&state.source, &username, state.weights).await {
        Ok(shares) => {
            let body = langdist_render::render(format, &shares, &options);
            (
                [
                    (header::CONTENT_TYPE, format.content_type()),
                    (header::CACHE_CONTROL, "public, max-age=1800"),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(username = %username, error = %err, "request failed");
            error_response(&err)
        }
    }
}

fn error_response(err: &PipelineError) -> Response {
    let status = match err {
        PipelineError::Normalize(NormalizeError::EmptyDistribution) => StatusCode::NOT_FOUND,
        PipelineError::Source(SourceError::UserNotFound(_)) => StatusCode::NOT_FOUND,
        PipelineError::Source(SourceError::MissingUsername) => StatusCode::BAD_REQUEST,
        PipelineError::Source(SourceError::RateLimited { .. }) => StatusCode::TOO_MANY_REQUESTS,
        PipelineError::Source(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string()).into_response()
}
