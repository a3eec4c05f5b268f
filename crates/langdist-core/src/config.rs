//! Configuration types for langdist.
//!
//! [`Config::load`] layers, lowest priority first: the embedded defaults,
//! `~/.config/langdist/config.toml` (or an explicit path), and `LANGDIST_*`
//! environment variables (`LANGDIST_SOURCE__USERNAME=octocat`). The CLI applies
//! its own flags on top. [`Config::defaults`] returns the embedded defaults
//! without touching the filesystem or environment (useful in tests).

use crate::weighting::Weights;
use anyhow::bail;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
username          = ""
api_base_url      = "https://api.github.com"
include_forks     = false
include_archived  = false
include_private   = false
exclude_repos     = []
exclude_languages = []
concurrency       = 8
timeout_secs      = 30

[weights]
size_exponent  = 1.0
count_exponent = 0.0

[output]
format        = "text"
max_languages = 0
bar_width     = 25
show_updated  = false
title         = "Most Used Languages"

[patch]
start_marker = "<!--START_SECTION:languages-->"
end_marker   = "<!--END_SECTION:languages-->"

[server]
bind = "127.0.0.1:8080"
"#;

const ENV_PREFIX: &str = "LANGDIST";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub patch: PatchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[source]` section: which account to read and which repositories count.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub username: String,
    /// API token. Falls back to `GITHUB_TOKEN` when unset.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub include_forks: bool,
    #[serde(default)]
    pub include_archived: bool,
    /// List the authenticated user's private repositories too. Needs a token.
    #[serde(default)]
    pub include_private: bool,
    #[serde(default)]
    pub exclude_repos: Vec<String>,
    #[serde(default)]
    pub exclude_languages: Vec<String>,
    /// Language requests in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String { "https://api.github.com".to_string() }
fn default_concurrency() -> usize { 8 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: None,
            api_base_url: default_api_base_url(),
            include_forks: false,
            include_archived: false,
            include_private: false,
            exclude_repos: Vec::new(),
            exclude_languages: Vec::new(),
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    /// Configured token, else a non-empty `GITHUB_TOKEN`.
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()))
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    /// Rows shown before the rest collapse into "Other". `0` shows everything.
    #[serde(default)]
    pub max_languages: usize,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
    #[serde(default)]
    pub show_updated: bool,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_format() -> String { "text".to_string() }
fn default_bar_width() -> usize { 25 }
fn default_title() -> String { "Most Used Languages".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            max_languages: 0,
            bar_width: default_bar_width(),
            show_updated: false,
            title: default_title(),
        }
    }
}

/// `[patch]` section: markers delimiting the generated block in a document.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_start_marker")]
    pub start_marker: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

fn default_start_marker() -> String { "<!--START_SECTION:languages-->".to_string() }
fn default_end_marker() -> String { "<!--END_SECTION:languages-->".to_string() }

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            file: None,
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8080".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`, layered on
    /// top of the built-in defaults and under `LANGDIST_*` environment
    /// variables. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("source.exclude_repos")
                    .with_list_parse_key("source.exclude_languages")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Parse a TOML document layered over the built-in defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> anyhow::Result<Self> {
        if let Err(e) = self.weights.validate() {
            bail!("invalid [weights]: {e}");
        }
        Ok(self)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("langdist")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
