//! Core types for langdist-core.
//!
//! [`LanguageTotals`] is what a language source hands to the pipeline;
//! [`LanguageShare`] is what the normalizer hands to the renderers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A full distribution, expressed in hundredths of a percent.
pub const HUNDREDTHS_TOTAL: u32 = 10_000;

/// Aggregate size of one language across every counted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTotal {
    /// Language name exactly as reported upstream (case-sensitive).
    pub language: String,
    /// Summed byte count.
    pub raw_size: u64,
    /// Number of repositories that contributed bytes to this language.
    pub repo_count: u32,
}

impl LanguageTotal {
    pub fn new(language: impl Into<String>, raw_size: u64, repo_count: u32) -> Self {
        Self {
            language: language.into(),
            raw_size,
            repo_count,
        }
    }
}

/// Per-language totals for one account, in first-observed order.
///
/// Insertion order matters: it is the tie-break when two languages have the
/// same size, so aggregation must be deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTotals {
    entries: Vec<LanguageTotal>,
    index: HashMap<String, usize>,
    /// Number of repositories folded in via [`LanguageTotals::record_repository`].
    pub repositories: u32,
}

impl LanguageTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one repository's `language -> bytes` map into the totals.
    ///
    /// Every language listed counts the repository once, even with zero bytes.
    pub fn record_repository<I, S>(&mut self, languages: I)
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        self.repositories += 1;
        for (language, bytes) in languages {
            self.add(language, bytes, 1);
        }
    }

    /// Add bytes and repository count to a language, creating it if needed.
    pub fn add(&mut self, language: impl Into<String>, bytes: u64, repos: u32) {
        let language = language.into();
        match self.index.get(&language) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.raw_size = entry.raw_size.saturating_add(bytes);
                entry.repo_count = entry.repo_count.saturating_add(repos);
            }
            None => {
                self.index.insert(language.clone(), self.entries.len());
                self.entries.push(LanguageTotal::new(language, bytes, repos));
            }
        }
    }

    /// Drop every language whose name matches one of `excluded`,
    /// ignoring ASCII case.
    pub fn exclude_languages(&mut self, excluded: &[String]) {
        if excluded.is_empty() {
            return;
        }
        self.entries
            .retain(|e| !excluded.iter().any(|x| x.eq_ignore_ascii_case(&e.language)));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.language.clone(), i))
            .collect();
    }

    pub fn entries(&self) -> &[LanguageTotal] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, language: &str) -> Option<&LanguageTotal> {
        self.index.get(language).map(|&i| &self.entries[i])
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LanguageTotals {
    /// Build totals from a flat `language -> bytes` listing, each counted as
    /// coming from a single repository.
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut totals = LanguageTotals::new();
        for (language, bytes) in iter {
            totals.add(language, bytes, 1);
        }
        totals
    }
}

/// One row of a normalized distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    /// Pre-weight byte count; the output is ordered by this.
    pub raw_size: u64,
    pub repo_count: u32,
    /// Percentage scaled by 100, so `5720` is `57.20 %`.
    pub hundredths: u32,
}

impl LanguageShare {
    /// Percentage with two fractional digits of precision.
    pub fn percentage(&self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }
}

impl std::fmt::Display for LanguageShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.2}%", self.language, self.percentage())
    }
}
