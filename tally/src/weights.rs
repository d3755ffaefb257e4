//! Ballot weight-distribution and quorum-percentage validation.

use crate::error::TallyError;
use agora_types::{BALLOT_BUDGET, MAX_OPTIONS};

/// Validate a ballot's weight distribution against an option count.
///
/// One mechanism covers both single-choice ballots (the full budget on one
/// option) and split/preference ballots. Duplicate option selection is
/// tracked with a bitmask over the option count, which is why the option
/// cap is 32 — well within the `u64` mask.
///
/// Fails with:
/// - [`TallyError::LengthMismatch`] if the two slices differ in length,
/// - [`TallyError::InvalidIndex`] if an index is out of range,
/// - [`TallyError::DuplicateIndex`] if an option is selected twice,
/// - [`TallyError::InvalidWeight`] if any single weight exceeds the budget,
/// - [`TallyError::WeightSumNot100`] if the weights do not sum exactly to
///   the budget.
pub fn validate_weights(
    option_indices: &[usize],
    weights: &[u64],
    option_count: usize,
) -> Result<(), TallyError> {
    if option_indices.len() != weights.len() {
        return Err(TallyError::LengthMismatch {
            indices: option_indices.len(),
            weights: weights.len(),
        });
    }
    debug_assert!(option_count <= MAX_OPTIONS);

    let mut seen: u64 = 0;
    let mut sum: u64 = 0;
    for (&index, &weight) in option_indices.iter().zip(weights) {
        if index >= option_count {
            return Err(TallyError::InvalidIndex {
                index,
                count: option_count,
            });
        }
        let bit = 1u64 << index;
        if seen & bit != 0 {
            return Err(TallyError::DuplicateIndex(index));
        }
        seen |= bit;
        if weight > BALLOT_BUDGET {
            return Err(TallyError::InvalidWeight(weight));
        }
        sum = sum.checked_add(weight).ok_or(TallyError::Overflow)?;
    }
    if sum != BALLOT_BUDGET {
        return Err(TallyError::WeightSumNot100(sum));
    }
    Ok(())
}

/// Validate a quorum percentage: must be in `1..=100`.
pub fn validate_quorum(pct: u8) -> Result<(), TallyError> {
    if pct == 0 || pct > 100 {
        return Err(TallyError::InvalidQuorum(pct));
    }
    Ok(())
}
