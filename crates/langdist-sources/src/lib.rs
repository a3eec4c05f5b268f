//! langdist-sources: language data sources for langdist.
//!
//! Each source resolves a username into [`LanguageTotals`]: bytes per
//! language summed across repositories, plus how many repositories
//! contributed to each language.

pub mod error;
pub mod file;
pub mod github;
pub mod sizes;

pub use error::SourceError;
pub use file::JsonFileSource;
pub use github::{GitHubSource, RepoFilter};
pub use sizes::LanguageSizes;

use langdist_core::LanguageTotals;
use std::future::Future;

/// Trait implemented by each language data source.
pub trait LanguageSource: Send + Sync {
    /// Aggregate language sizes for `username`.
    fn fetch(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<LanguageTotals, SourceError>> + Send;
}

/// A source that always returns the same totals, whatever the username.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    totals: LanguageTotals,
}

impl StaticSource {
    pub fn new(totals: LanguageTotals) -> Self {
        Self { totals }
    }
}

impl LanguageSource for StaticSource {
    async fn fetch(&self, _username: &str) -> Result<LanguageTotals, SourceError> {
        Ok(self.totals.clone())
    }
}
