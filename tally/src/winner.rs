//! Winner selection under quorum and optional strict-majority rules.

use crate::error::TallyError;
use crate::weights::validate_quorum;

/// The result of tallying a proposal's option totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TallyOutcome {
    /// Index of the leading option.
    pub winner: usize,
    /// The leading option's accumulated weight.
    pub winner_total: u128,
    /// Whether the result meets quorum (and strict majority, if required).
    pub valid: bool,
}

/// Pick the winning option in a single pass over the totals.
///
/// Tracks the highest and second-highest totals plus the index of the
/// highest. Validity requires `highest * 100 > total_weight_cast *
/// quorum_percent` (strictly exceeds) and, when `require_strict_majority`
/// is set, `highest > second`.
///
/// Under strict majority an exact tie between the top two options is
/// always invalid — ties are never broken by index order in that mode.
/// With strict majority disabled, a tie resolves to the lowest index:
/// the comparison is strictly-greater, so the first maximum encountered
/// keeps the lead.
pub fn pick_winner(
    option_totals: &[u128],
    total_weight_cast: u128,
    quorum_percent: u8,
    require_strict_majority: bool,
) -> Result<TallyOutcome, TallyError> {
    validate_quorum(quorum_percent)?;

    let mut winner = 0usize;
    let mut highest = 0u128;
    let mut second = 0u128;
    for (index, &total) in option_totals.iter().enumerate() {
        if total > highest {
            second = highest;
            highest = total;
            winner = index;
        } else if total > second {
            second = total;
        }
    }

    // Cross-multiplied percentage compare, overflow-checked on both sides.
    let lhs = highest.checked_mul(100).ok_or(TallyError::Overflow)?;
    let rhs = total_weight_cast
        .checked_mul(quorum_percent as u128)
        .ok_or(TallyError::Overflow)?;
    let mut valid = lhs > rhs;
    if require_strict_majority && highest == second {
        valid = false;
    }

    Ok(TallyOutcome {
        winner,
        winner_total: highest,
        valid,
    })
}
