//! Fake GitHub REST API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /users/{user}/repos` - paginated repository listing
//! - `GET /user/repos` - the authenticated user's repositories
//! - `GET /repos/{owner}/{repo}/languages` - language byte counts
//!
//! Point a `GitHubSource` at [`FakeGitHubApi::base_url`] through
//! `SourceConfig::api_base_url`.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeGitHubApi::start().await.unwrap();
//! api.add_repo("octocat", RepoSpec::new("hello").language("Rust", 1200)).await;
//! let config = SourceConfigBuilder::new(&api.base_url()).build();
//! ```

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// A repository as the fake API reports it.
#[derive(Debug, Clone)]
pub struct RepoSpec {
    pub name: String,
    pub fork: bool,
    pub archived: bool,
    /// Served in insertion order, like GitHub's own listing.
    pub languages: Vec<(String, u64)>,
}

impl RepoSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fork: false,
            archived: false,
            languages: Vec::new(),
        }
    }

    pub fn language(mut self, language: &str, bytes: u64) -> Self {
        self.languages.push((language.to_string(), bytes));
        self
    }

    pub fn fork(mut self) -> Self {
        self.fork = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// A canned failure returned instead of the normal response.
#[derive(Debug, Clone)]
pub struct Failure {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Failure {
    pub fn status(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: serde_json::json!({ "message": message }).to_string(),
        }
    }

    /// GitHub's primary rate limit: 403 with an exhausted quota.
    pub fn rate_limited(reset: u64) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            headers: vec![
                ("x-ratelimit-remaining", "0".to_string()),
                ("x-ratelimit-reset", reset.to_string()),
            ],
            body: serde_json::json!({ "message": "API rate limit exceeded" }).to_string(),
        }
    }

    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        for (name, value) in self.headers {
            if let Ok(value) = value.parse() {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}

#[derive(Default)]
struct ApiState {
    /// Owner -> repositories, in listing order.
    repos: HashMap<String, Vec<RepoSpec>>,
    /// Owner whose repositories `/user/repos` returns.
    authenticated_user: Option<String>,
    /// Applies to every route when set.
    failure: Option<Failure>,
    /// `owner/repo` -> failure for that repository's languages only.
    language_failures: HashMap<String, Failure>,
    /// Paths requested, in arrival order.
    requests: Vec<String>,
    /// `Authorization` header values seen.
    auth_headers: Vec<String>,
}

type Shared = Arc<Mutex<ApiState>>;

/// Handle to the running fake GitHub API server.
pub struct FakeGitHubApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeGitHubApi {
    /// Start the server on a random port. Returns once the listener is bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/users/{user}/repos", get(list_user_repos))
            .route("/user/repos", get(list_own_repos))
            .route("/repos/{owner}/{repo}/languages", get(repo_languages))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn add_repo(&self, owner: &str, repo: RepoSpec) {
        let mut state = self.state.lock().await;
        state.repos.entry(owner.to_string()).or_default().push(repo);
    }

    /// Add `count` single-language repositories named `repo-0`, `repo-1`, ...
    pub async fn add_many_repos(&self, owner: &str, count: usize, language: &str, bytes: u64) {
        let mut state = self.state.lock().await;
        let repos = state.repos.entry(owner.to_string()).or_default();
        for i in 0..count {
            repos.push(RepoSpec::new(&format!("repo-{i}")).language(language, bytes));
        }
    }

    /// Serve `owner`'s repositories from `/user/repos` as well.
    pub async fn authenticate_as(&self, owner: &str) {
        self.state.lock().await.authenticated_user = Some(owner.to_string());
    }

    /// Fail every request with `failure`.
    pub async fn fail_all(&self, failure: Failure) {
        self.state.lock().await.failure = Some(failure);
    }

    /// Fail only the languages lookup of `full_name`.
    pub async fn fail_languages(&self, full_name: &str, failure: Failure) {
        self.state
            .lock()
            .await
            .language_failures
            .insert(full_name.to_string(), failure);
    }

    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }

    pub async fn auth_headers(&self) -> Vec<String> {
        self.state.lock().await.auth_headers.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PageQuery {
    per_page: Option<usize>,
    page: Option<usize>,
}

async fn record(state: &Shared, path: String, headers: &HeaderMap) -> Option<Failure> {
    let mut state = state.lock().await;
    state.requests.push(path);
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.push(auth.to_string());
    }
    state.failure.clone()
}

fn page_of(repos: &[RepoSpec], owner: &str, query: &PageQuery) -> Vec<serde_json::Value> {
    let per_page = query.per_page.unwrap_or(30).max(1);
    let page = query.page.unwrap_or(1).max(1);
    repos
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|r| {
            serde_json::json!({
                "name": r.name,
                "full_name": format!("{owner}/{}", r.name),
                "fork": r.fork,
                "archived": r.archived,
                "private": false,
            })
        })
        .collect()
}

async fn list_user_repos(
    Path(user): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    State(state): State<Shared>,
) -> Response {
    if let Some(failure) = record(&state, format!("/users/{user}/repos"), &headers).await {
        return failure.into_response();
    }
    let state = state.lock().await;
    match state.repos.get(&user) {
        Some(repos) => Json(page_of(repos, &user, &query)).into_response(),
        None => Failure::status(StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

async fn list_own_repos(
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    State(state): State<Shared>,
) -> Response {
    if let Some(failure) = record(&state, "/user/repos".to_string(), &headers).await {
        return failure.into_response();
    }
    let state = state.lock().await;
    let Some(owner) = state.authenticated_user.clone() else {
        return Failure::status(StatusCode::UNAUTHORIZED, "Requires authentication").into_response();
    };
    let repos = state.repos.get(&owner).cloned().unwrap_or_default();
    Json(page_of(&repos, &owner, &query)).into_response()
}

async fn repo_languages(
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    State(state): State<Shared>,
) -> Response {
    let full_name = format!("{owner}/{repo}");
    if let Some(failure) = record(&state, format!("/repos/{full_name}/languages"), &headers).await {
        return failure.into_response();
    }
    let state = state.lock().await;
    if let Some(failure) = state.language_failures.get(&full_name) {
        return failure.clone().into_response();
    }
    match state
        .repos
        .get(&owner)
        .and_then(|repos| repos.iter().find(|r| r.name == repo))
    {
        Some(spec) => (
            [(header::CONTENT_TYPE, "application/json")],
            languages_body(&spec.languages),
        )
            .into_response(),
        None => Failure::status(StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// A JSON object with keys in the given order.
fn languages_body(languages: &[(String, u64)]) -> String {
    let fields: Vec<String> = languages
        .iter()
        .map(|(language, bytes)| format!("{}:{bytes}", serde_json::Value::from(language.as_str())))
        .collect();
    format!("{{{}}}", fields.join(","))
}
