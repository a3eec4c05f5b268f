//! Ranking weight applied to each language before normalization.
//!
//! `weighted = raw_size ^ size_exponent * repo_count ^ count_exponent`.
//! The defaults (`1`, `0`) make this the identity, so plain byte shares come
//! out unless the caller asks for something else.

use serde::Deserialize;

/// Exponents of the ranking weight. Both must be finite and non-negative;
/// see [`check_exponent`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Weights {
    #[serde(default = "default_size_exponent")]
    pub size_exponent: f64,
    #[serde(default = "default_count_exponent")]
    pub count_exponent: f64,
}

fn default_size_exponent() -> f64 { 1.0 }
fn default_count_exponent() -> f64 { 0.0 }

impl Default for Weights {
    fn default() -> Self {
        Self {
            size_exponent: default_size_exponent(),
            count_exponent: default_count_exponent(),
        }
    }
}

impl Weights {
    pub fn new(size_exponent: f64, count_exponent: f64) -> Self {
        Self { size_exponent, count_exponent }
    }

    /// Reject exponents that [`check_exponent`] would.
    pub fn validate(&self) -> Result<(), String> {
        check_exponent(self.size_exponent).map_err(|e| format!("size_exponent: {e}"))?;
        check_exponent(self.count_exponent).map_err(|e| format!("count_exponent: {e}"))?;
        Ok(())
    }

    /// True when [`Weights::weigh`] returns the raw size unchanged.
    pub fn is_identity(&self) -> bool {
        self.size_exponent == 1.0 && self.count_exponent == 0.0
    }

    /// Weighted size of one language. May be zero or non-finite at degenerate
    /// exponents; the normalizer drops those entries.
    pub fn weigh(&self, raw_size: u64, repo_count: u32) -> f64 {
        let size = raw_size as f64;
        if self.is_identity() {
            return size;
        }
        size.powf(self.size_exponent) * f64::from(repo_count).powf(self.count_exponent)
    }
}

/// Accept `value` as a weighting exponent.
pub fn check_exponent(value: f64) -> Result<f64, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("exponent must be a non-negative number, got {value}"))
    }
}
