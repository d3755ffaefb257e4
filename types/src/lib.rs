//! Fundamental types for the agora governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, proposal ids, role ids, timestamps, action calls,
//! and the ballot constants.

pub mod action;
pub mod address;
pub mod ballot;
pub mod id;
pub mod role;
pub mod time;

pub use action::ActionCall;
pub use address::OrgAddress;
pub use ballot::{BALLOT_BUDGET, MAX_OPTIONS};
pub use id::ProposalId;
pub use role::RoleId;
pub use time::Timestamp;
