use thiserror::Error;

/// Errors raised while collecting language data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no username configured")]
    MissingUsername,
    #[error("GitHub user not found: {0}")]
    UserNotFound(String),
    #[error("GitHub rejected the credentials: {0}")]
    Unauthorized(String),
    #[error("GitHub rate limit exceeded{}", reset_hint(.reset))]
    RateLimited {
        /// Unix time at which the limit resets, from `x-ratelimit-reset`.
        reset: Option<u64>,
    },
    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

fn reset_hint(reset: &Option<u64>) -> String {
    match reset {
        Some(epoch) => format!(" (resets at unix time {epoch})"),
        None => String::new(),
    }
}
