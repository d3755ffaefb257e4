use crate::gateway::GatewayError;
use agora_proposals::ProposalError;
use agora_tally::TallyError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("caller is not the governing authority")]
    NotAuthorized,

    #[error("caller holds none of the required roles")]
    MissingRole,

    #[error("voting module is paused")]
    Paused,

    #[error("balance {have} below the minimum voting floor {need}")]
    BelowBalanceFloor { have: u128, need: u128 },

    #[error("finalize already in progress")]
    FinalizeInProgress,

    #[error("restricted poll requires at least one role")]
    EmptyRestriction,

    #[error("power class shares sum to {0}, expected exactly 100")]
    InvalidShareSplit(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Tally(#[from] TallyError),

    #[error(transparent)]
    Proposal(#[from] ProposalError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("state snapshot could not be decoded: {0}")]
    BadSnapshot(String),
}
