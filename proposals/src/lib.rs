//! Proposal records and their lifecycle for the agora governance engine.
//!
//! The per-proposal record (options, accumulators, voter markers, action
//! batches, optional restriction set), the allow-list of approved call
//! targets, the id-keyed store with snapshot persistence, and the
//! page-bounded cleanup pass that reclaims per-voter storage.

pub mod allowlist;
pub mod error;
pub mod proposal;
pub mod store;

pub use allowlist::AllowedTargets;
pub use error::ProposalError;
pub use proposal::{validate_batches, CleanupPass, CreateSpec, Proposal, ProposalStatus};
pub use store::ProposalStore;
