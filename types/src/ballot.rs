//! Ballot constants shared by the tally and voting crates.

/// The fixed per-ballot weight budget.
///
/// Every ballot distributes exactly this total across its chosen options,
/// which lets one mechanism cover single-choice ballots (all 100 on one
/// option) and split/preference ballots alike.
pub const BALLOT_BUDGET: u64 = 100;

/// Hard cap on the number of options a proposal may carry.
///
/// Bounded so the duplicate-index bitmask fits in a `u64` and so per-option
/// iteration at finalize stays cheap.
pub const MAX_OPTIONS: usize = 32;
