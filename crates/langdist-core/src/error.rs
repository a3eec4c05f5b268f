use thiserror::Error;

/// Failure modes of the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// No language had a positive (weighted) size, so there is nothing to
    /// distribute. Callers report this as "no data found".
    #[error("no language data found")]
    EmptyDistribution,
}
