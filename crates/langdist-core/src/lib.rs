//! langdist-core: language distribution core library.
//!
//! This crate holds the pure part of the pipeline: the shared types, the
//! ranking weight pre-step and the percentage normalizer, plus the layered
//! configuration every delivery surface reads.
//!
//! # Architecture
//!
//! ```text
//! LanguageSource ──► weighting ──► normalizer ──► renderer
//!                                                   │
//!                                                   └──► patcher / HTTP body
//! ```
//!
//! Nothing in here performs I/O except [`config::Config::load`].

pub mod config;
pub mod error;
pub mod normalizer;
pub mod types;
pub mod weighting;

pub use error::NormalizeError;
pub use normalizer::{normalize, normalize_weighted};
pub use types::{LanguageShare, LanguageTotal, LanguageTotals, HUNDREDTHS_TOTAL};
pub use weighting::Weights;
