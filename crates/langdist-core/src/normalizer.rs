//! Normalizer: turns language sizes into a percentage distribution.
//!
//! Percentages carry two decimals and always sum to exactly `100.00`. Every
//! language with a positive size keeps at least `0.01`, however small its
//! true share.
//!
//! All arithmetic after the initial division happens in integer hundredths:
//!
//! 1. ceil each share to the next hundredth (never below one);
//! 2. the ceiling overshoots, so walk the entries from the largest true share
//!    down and take one hundredth from each until the excess is gone, never
//!    taking an entry below one hundredth;
//! 3. order the result by descending raw size, ties in input order.
//!
//! Concentrating the correction on the largest entries keeps the visible
//! rounding error where it matters least.

use crate::error::NormalizeError;
use crate::types::{LanguageShare, LanguageTotal, LanguageTotals, HUNDREDTHS_TOTAL};
use crate::weighting::Weights;

/// Float noise tolerated before ceiling, in hundredths. Keeps exact shares
/// such as `50.0` from being pushed up to `50.01` by representation error.
const CEIL_EPSILON: f64 = 1e-7;

struct Candidate<'a> {
    total: &'a LanguageTotal,
    raw_pct: f64,
    hundredths: i64,
}

/// Normalize a flat `language -> bytes` mapping with identity weights.
///
/// Iteration order of `sizes` is the tie-break for equal sizes. Repeated
/// language names are summed.
pub fn normalize<I, S>(sizes: I) -> Result<Vec<LanguageShare>, NormalizeError>
where
    I: IntoIterator<Item = (S, u64)>,
    S: Into<String>,
{
    let totals: LanguageTotals = sizes.into_iter().collect();
    normalize_weighted(totals.entries(), Weights::default())
}

/// Normalize language totals after applying the ranking `weights`.
///
/// Shares are computed from weighted sizes; the output order and the
/// reported `raw_size` stay pre-weight.
pub fn normalize_weighted(
    entries: &[LanguageTotal],
    weights: Weights,
) -> Result<Vec<LanguageShare>, NormalizeError> {
    let weighted: Vec<(&LanguageTotal, f64)> = entries
        .iter()
        .filter(|e| e.raw_size > 0)
        .map(|e| (e, weights.weigh(e.raw_size, e.repo_count)))
        .filter(|(_, w)| w.is_finite() && *w > 0.0)
        .collect();

    // Scale by the largest weight first so large exponents cannot overflow
    // the sum.
    let max = weighted.iter().map(|(_, w)| *w).fold(0.0_f64, f64::max);
    if weighted.is_empty() || max <= 0.0 {
        return Err(NormalizeError::EmptyDistribution);
    }
    let total: f64 = weighted.iter().map(|(_, w)| w / max).sum();

    let mut candidates: Vec<Candidate<'_>> = weighted
        .into_iter()
        .map(|(total_entry, w)| {
            let raw_pct = (w / max) / total * 100.0;
            Candidate {
                total: total_entry,
                raw_pct,
                hundredths: ceil_hundredths(raw_pct),
            }
        })
        .collect();

    rebalance(&mut candidates);

    candidates.retain(|c| c.hundredths > 0);
    // `sort_by` is stable, which keeps input order among equal sizes.
    candidates.sort_by(|a, b| b.total.raw_size.cmp(&a.total.raw_size));

    Ok(candidates
        .into_iter()
        .map(|c| LanguageShare {
            language: c.total.language.clone(),
            raw_size: c.total.raw_size,
            repo_count: c.total.repo_count,
            hundredths: u32::try_from(c.hundredths).unwrap_or(HUNDREDTHS_TOTAL),
        })
        .collect())
}

/// Ceiling of `pct` in hundredths, floored at one for any positive share.
fn ceil_hundredths(pct: f64) -> i64 {
    let scaled = pct * 100.0;
    ((scaled - CEIL_EPSILON).ceil() as i64).max(1)
}

/// Move the sum back to [`HUNDREDTHS_TOTAL`] one hundredth at a time,
/// largest true share first.
///
/// Passes repeat only while they still make progress, so this always
/// terminates. It can fail to reach the exact total only when every entry is
/// already at one hundredth, i.e. with more than ten thousand languages.
fn rebalance(candidates: &mut [Candidate<'_>]) {
    let sum: i64 = candidates.iter().map(|c| c.hundredths).sum();
    let mut excess = sum - i64::from(HUNDREDTHS_TOTAL);
    if excess == 0 {
        return;
    }

    let mut by_share: Vec<usize> = (0..candidates.len()).collect();
    by_share.sort_by(|&a, &b| candidates[b].raw_pct.total_cmp(&candidates[a].raw_pct));

    while excess != 0 {
        let mut changed = false;
        for &i in &by_share {
            if excess == 0 {
                break;
            }
            let c = &mut candidates[i];
            if excess > 0 {
                if c.hundredths <= 1 {
                    continue;
                }
                c.hundredths -= 1;
                excess -= 1;
            } else {
                c.hundredths += 1;
                excess += 1;
            }
            changed = true;
        }
        if !changed {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
