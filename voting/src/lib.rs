//! The agora voting module.
//!
//! Composes the role-set manager, the pure vote math, and the proposal
//! store into one engine with variant-specific vote-power computation:
//! flat per-voter weight (direct democracy), balance-derived weight with
//! an optional diminishing curve (participation), or a blended mix
//! (hybrid). Creation and voting are role-gated and pausable; finalize
//! hands the winning action batch to the execution gateway behind a
//! reentrancy guard; cleanup reclaims per-voter storage in bounded pages.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod gateway;
pub mod power;

pub use config::VotingConfig;
pub use engine::VotingEngine;
pub use error::VotingError;
pub use event::Event;
pub use gateway::{ExecutionGateway, GatewayError, RecordingGateway};
pub use power::{
    BalancePower, BalanceSource, BlendedPower, FlatPower, MemoryBalances, PowerClass, VotePower,
};
