//! The set of destinations approved for proposal action calls.

use agora_types::OrgAddress;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Targets pre-approved for any proposal's action batches.
///
/// Mutated only through the authority-gated admin surface, and consulted
/// twice per proposal — at creation and again at finalization — so an
/// allow-list change made while a vote is open still bites.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedTargets {
    targets: HashSet<OrgAddress>,
}

impl AllowedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approve a target. Returns true if the set changed.
    pub fn allow(&mut self, target: OrgAddress) -> bool {
        self.targets.insert(target)
    }

    /// Revoke a target. Returns true if the set changed.
    pub fn revoke(&mut self, target: &OrgAddress) -> bool {
        self.targets.remove(target)
    }

    pub fn is_allowed(&self, target: &OrgAddress) -> bool {
        self.targets.contains(target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
