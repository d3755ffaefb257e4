use agora_types::OrgAddress;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProposalError {
    #[error("invalid proposal id {0}")]
    UnknownProposal(u64),

    #[error("proposal voting window has closed")]
    VotingClosed,

    #[error("proposal is still open — cannot finalize yet")]
    StillOpen,

    #[error("proposal has already been finalized")]
    AlreadyFinalized,

    #[error("{0} has already voted on this proposal")]
    AlreadyVoted(OrgAddress),

    #[error("proposal metadata must not be empty")]
    EmptyMetadata,

    #[error("duration {got} minutes outside allowed range [{min}, {max}]")]
    DurationOutOfBounds { got: u64, min: u64, max: u64 },

    #[error("proposal must carry at least one option")]
    NoOptions,

    #[error("{got} options exceeds the maximum of {max}")]
    TooManyOptions { got: usize, max: usize },

    #[error("{options} options but {batches} action batches")]
    LengthMismatch { options: usize, batches: usize },

    #[error("batch of {got} calls exceeds the maximum of {max}")]
    TooManyCalls { got: usize, max: usize },

    #[error("call target {0} is not allow-listed")]
    TargetNotAllowed(OrgAddress),

    #[error("call target {0} is the voting module itself")]
    SelfTarget(OrgAddress),

    #[error("option index {0} out of range for this proposal")]
    OptionOutOfRange(usize),

    #[error("arithmetic overflow while accumulating vote weight")]
    Overflow,

    #[error("state snapshot could not be decoded: {0}")]
    BadSnapshot(String),
}
