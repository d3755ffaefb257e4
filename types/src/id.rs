//! Proposal identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a proposal within one voting module instance.
///
/// Ids are assigned by the proposal store, starting at 1 and strictly
/// increasing; 0 is never a live id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ProposalId(u64);

impl ProposalId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
