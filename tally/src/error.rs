use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TallyError {
    #[error("option index {0} selected more than once")]
    DuplicateIndex(usize),

    #[error("option index {index} out of range (option count {count})")]
    InvalidIndex { index: usize, count: usize },

    #[error("weight {0} exceeds the per-ballot budget")]
    InvalidWeight(u64),

    #[error("ballot weights sum to {0}, expected exactly the per-ballot budget")]
    WeightSumNot100(u64),

    #[error("option indices and weights differ in length: {indices} vs {weights}")]
    LengthMismatch { indices: usize, weights: usize },

    #[error("quorum percentage {0} must be in 1..=100")]
    InvalidQuorum(u8),

    #[error("arithmetic overflow during tally")]
    Overflow,
}
