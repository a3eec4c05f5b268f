//! JSON file source: language sizes recorded ahead of time.
//!
//! Accepts either a flat map:
//!
//! ```json
//! { "Rust": 120000, "Shell": 800 }
//! ```
//!
//! or a list carrying repository counts:
//!
//! ```json
//! { "repositories": 4, "languages": [{ "language": "Rust", "size": 120000, "repos": 3 }] }
//! ```
//!
//! The flat form counts each language as coming from one repository.

use crate::sizes::LanguageSizes;
use crate::{LanguageSource, SourceError};
use langdist_core::LanguageTotals;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct LanguageRecord {
    language: String,
    size: u64,
    #[serde(default = "default_repos")]
    repos: u32,
}

fn default_repos() -> u32 { 1 }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Detailed {
        #[serde(default)]
        repositories: Option<u32>,
        languages: Vec<LanguageRecord>,
    },
    Flat(LanguageSizes),
}

/// Parse a language document from a JSON string.
pub fn parse_totals(src: &str) -> Result<LanguageTotals, SourceError> {
    let mut totals = LanguageTotals::new();
    match serde_json::from_str::<Document>(src)? {
        Document::Detailed { repositories, languages } => {
            for record in languages {
                totals.add(record.language, record.size, record.repos);
            }
            totals.repositories = repositories
                .unwrap_or_else(|| totals.entries().iter().map(|e| e.repo_count).max().unwrap_or(0));
        }
        Document::Flat(map) => {
            for (language, size) in map {
                totals.add(language, size, 1);
            }
            totals.repositories = u32::from(!totals.is_empty());
        }
    }
    Ok(totals)
}

/// [`LanguageSource`] reading a JSON document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LanguageSource for JsonFileSource {
    async fn fetch(&self, username: &str) -> Result<LanguageTotals, SourceError> {
        tracing::debug!(path = %self.path.display(), username, "reading language file");
        let src = tokio::fs::read_to_string(&self.path).await?;
        parse_totals(&src)
    }
}
