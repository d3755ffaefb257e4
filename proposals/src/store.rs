//! Id-keyed proposal storage with snapshot persistence.

use crate::error::ProposalError;
use crate::proposal::Proposal;
use agora_types::ProposalId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// In-memory store of proposals, keyed by id.
///
/// Ids are assigned monotonically starting at 1. The store never forgets a
/// proposal — cleanup prunes a proposal's heavy interior (voter markers,
/// batches), not the record itself, so finalized outcomes stay queryable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: HashMap<ProposalId, Proposal>,
    next_id: u64,
}

impl Default for ProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalStore {
    pub fn new() -> Self {
        Self {
            proposals: HashMap::new(),
            next_id: 1,
        }
    }

    /// The id the next inserted proposal should carry. Pure read — the
    /// counter only advances when the proposal is actually committed, so a
    /// failed creation leaves no trace.
    pub fn next_id(&self) -> ProposalId {
        ProposalId::new(self.next_id)
    }

    /// Commit a proposal, advancing the id counter past it.
    pub fn insert(&mut self, proposal: Proposal) -> Result<(), ProposalError> {
        let raw = proposal.id.as_u64();
        self.proposals.insert(proposal.id, proposal);
        if raw >= self.next_id {
            self.next_id = raw.checked_add(1).ok_or(ProposalError::Overflow)?;
        }
        Ok(())
    }

    pub fn get(&self, id: ProposalId) -> Result<&Proposal, ProposalError> {
        self.proposals
            .get(&id)
            .ok_or(ProposalError::UnknownProposal(id.as_u64()))
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, ProposalError> {
        self.proposals
            .get_mut(&id)
            .ok_or(ProposalError::UnknownProposal(id.as_u64()))
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    /// Serialize the store for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    /// Restore a store from serialized bytes.
    pub fn load_state(data: &[u8]) -> Result<Self, ProposalError> {
        bincode::deserialize(data).map_err(|e| ProposalError::BadSnapshot(e.to_string()))
    }
}
