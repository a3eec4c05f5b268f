//! Test builders: ergonomic constructors for configs, totals and sources.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use langdist_core::config::{Config, SourceConfig};
use langdist_core::LanguageTotals;
use langdist_sources::{GitHubSource, StaticSource};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SourceConfigBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`SourceConfig`] pointed at a fake API.
///
/// # Example
///
/// ```rust
/// let source = SourceConfigBuilder::new(&api.base_url())
///     .include_forks()
///     .exclude_language("HTML")
///     .into_source();
/// ```
pub struct SourceConfigBuilder {
    config: SourceConfig,
}

impl SourceConfigBuilder {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            config: SourceConfig {
                api_base_url: api_base_url.to_string(),
                // Never let an ambient GITHUB_TOKEN leak into a test.
                token: Some("test-token".to_string()),
                timeout_secs: 5,
                ..SourceConfig::default()
            },
        }
    }

    pub fn token(mut self, token: &str) -> Self {
        self.config.token = Some(token.to_string());
        self
    }

    pub fn include_forks(mut self) -> Self {
        self.config.include_forks = true;
        self
    }

    pub fn include_archived(mut self) -> Self {
        self.config.include_archived = true;
        self
    }

    pub fn include_private(mut self) -> Self {
        self.config.include_private = true;
        self
    }

    pub fn exclude_repo(mut self, repo: &str) -> Self {
        self.config.exclude_repos.push(repo.to_string());
        self
    }

    pub fn exclude_language(mut self, language: &str) -> Self {
        self.config.exclude_languages.push(language.to_string());
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    pub fn build(self) -> SourceConfig {
        self.config
    }

    pub fn into_source(self) -> GitHubSource {
        GitHubSource::new(&self.config).expect("client builds")
    }
}

// ---------------------------------------------------------------------------
// Totals and sources
// ---------------------------------------------------------------------------

/// Totals with one repository per language.
pub fn totals(sizes: &[(&str, u64)]) -> LanguageTotals {
    sizes.iter().copied().collect()
}

/// Totals with explicit repository counts.
pub fn totals_with_repos(sizes: &[(&str, u64, u32)]) -> LanguageTotals {
    let mut totals = LanguageTotals::new();
    for &(language, bytes, repos) in sizes {
        totals.add(language, bytes, repos);
    }
    totals
}

pub fn static_source(sizes: &[(&str, u64)]) -> StaticSource {
    StaticSource::new(totals(sizes))
}

/// Embedded defaults, without reading the filesystem or environment.
pub fn default_config() -> Config {
    Config::defaults()
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Write `contents` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}
