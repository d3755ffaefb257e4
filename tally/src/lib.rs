//! Pure vote math for the agora governance engine.
//!
//! Stateless validation and tallying: ballot weight-distribution checks,
//! quorum-percentage validation, and winner selection under quorum and
//! optional strict-majority rules. All accumulation is u128 with checked
//! arithmetic; any overflow aborts the whole call.

pub mod error;
pub mod weights;
pub mod winner;

pub use error::TallyError;
pub use weights::{validate_quorum, validate_weights};
pub use winner::{pick_winner, TallyOutcome};
