//! GitHub REST API source.
//!
//! Lists the account's repositories page by page, then fetches each
//! repository's `language -> bytes` map and folds them into
//! [`LanguageTotals`]. Language requests run concurrently but are collected
//! in listing order, so the totals (and therefore tie-breaks downstream) are
//! deterministic.

use crate::sizes::LanguageSizes;
use crate::{LanguageSource, SourceError};
use futures::stream::{self, StreamExt};
use langdist_core::config::SourceConfig;
use langdist_core::LanguageTotals;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const PER_PAGE: usize = 100;
const API_VERSION: &str = "2022-11-28";
const MAX_ERROR_MESSAGE_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Repository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    message: String,
}

// ---------------------------------------------------------------------------
// Repository filter
// ---------------------------------------------------------------------------

/// Which repositories contribute to the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoFilter {
    pub include_forks: bool,
    pub include_archived: bool,
    /// Repository names (`repo` or `owner/repo`) to skip, ignoring case.
    pub exclude_repos: Vec<String>,
}

impl RepoFilter {
    pub(crate) fn accepts(&self, repo: &Repository) -> bool {
        if repo.fork && !self.include_forks {
            return false;
        }
        if repo.archived && !self.include_archived {
            return false;
        }
        !self.exclude_repos.iter().any(|x| {
            x.eq_ignore_ascii_case(&repo.name) || x.eq_ignore_ascii_case(&repo.full_name)
        })
    }
}

// ---------------------------------------------------------------------------
// GitHubSource
// ---------------------------------------------------------------------------

/// [`LanguageSource`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: reqwest::Client,
    api_base_url: String,
    token: Option<String>,
    include_private: bool,
    filter: RepoFilter,
    exclude_languages: Vec<String>,
    concurrency: usize,
}

impl GitHubSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.resolved_token(),
            include_private: config.include_private,
            filter: RepoFilter {
                include_forks: config.include_forks,
                include_archived: config.include_archived,
                exclude_repos: config.exclude_repos.clone(),
            },
            exclude_languages: config.exclude_languages.clone(),
            concurrency: config.concurrency.max(1),
        })
    }

    fn list_url(&self, username: &str, page: usize) -> String {
        if self.include_private && self.token.is_some() {
            format!(
                "{}/user/repos?affiliation=owner&per_page={PER_PAGE}&page={page}",
                self.api_base_url
            )
        } else {
            format!(
                "{}/users/{username}/repos?type=owner&per_page={PER_PAGE}&page={page}",
                self.api_base_url
            )
        }
    }

    /// Every repository owned by `username` that passes the filter.
    pub(crate) async fn repositories(&self, username: &str) -> Result<Vec<Repository>, SourceError> {
        let mut accepted = Vec::new();
        let mut page = 1;
        loop {
            let batch: Vec<Repository> = match self.get_json(&self.list_url(username, page)).await {
                Err(SourceError::Status { status: 404, .. }) => {
                    return Err(SourceError::UserNotFound(username.to_string()));
                }
                other => other?,
            };
            let len = batch.len();
            tracing::debug!(username, page, repos = len, "listed repositories");
            accepted.extend(batch.into_iter().filter(|r| {
                let keep = self.filter.accepts(r);
                if !keep {
                    tracing::debug!(repo = %r.full_name, "skipping repository");
                }
                keep
            }));
            if len < PER_PAGE {
                break;
            }
            page += 1;
        }
        Ok(accepted)
    }

    async fn repo_languages(&self, repo: &Repository) -> Result<LanguageSizes, SourceError> {
        let url = format!("{}/repos/{}/languages", self.api_base_url, repo.full_name);
        match self.get_json(&url).await {
            // Repositories can disappear between listing and lookup.
            Err(SourceError::Status { status: 404, .. }) => {
                tracing::warn!(repo = %repo.full_name, "languages not found, skipping");
                Ok(LanguageSizes::default())
            }
            other => other,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, "langdist")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let resp = request.send().await?;
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        let headers = resp.headers().clone();
        let body = resp.text().await.unwrap_or_default();
        Err(classify_error(status, &headers, &body))
    }
}

impl LanguageSource for GitHubSource {
    async fn fetch(&self, username: &str) -> Result<LanguageTotals, SourceError> {
        if username.trim().is_empty() && !(self.include_private && self.token.is_some()) {
            return Err(SourceError::MissingUsername);
        }

        let repos = self.repositories(username).await?;
        tracing::info!(username, repos = repos.len(), "fetching repository languages");

        // Futures are built up front; a closure over `&Repository` inside the
        // stream is not general enough for the `Send` bound on `fetch`.
        let lookups: Vec<_> = repos.iter().map(|repo| self.repo_languages(repo)).collect();
        let maps: Vec<Result<LanguageSizes, SourceError>> = stream::iter(lookups)
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut totals = LanguageTotals::new();
        for map in maps {
            totals.record_repository(map?);
        }
        totals.exclude_languages(&self.exclude_languages);
        tracing::info!(
            username,
            repositories = totals.repositories,
            languages = totals.len(),
            "aggregated languages"
        );
        Ok(totals)
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Map a non-success response onto a [`SourceError`].
pub(crate) fn classify_error(status: StatusCode, headers: &HeaderMap, body: &str) -> SourceError {
    let exhausted = header_u64(headers, "x-ratelimit-remaining") == Some(0);
    match status {
        StatusCode::UNAUTHORIZED => SourceError::Unauthorized(api_message(body)),
        StatusCode::TOO_MANY_REQUESTS => SourceError::RateLimited {
            reset: header_u64(headers, "x-ratelimit-reset"),
        },
        StatusCode::FORBIDDEN if exhausted => SourceError::RateLimited {
            reset: header_u64(headers, "x-ratelimit-reset"),
        },
        _ => SourceError::Status {
            status: status.as_u16(),
            message: api_message(body),
        },
    }
}

/// The `message` of a GitHub error body, else the body itself, truncated.
fn api_message(body: &str) -> String {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string());
    if message.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = message.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}... (truncated)")
    } else {
        message
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
