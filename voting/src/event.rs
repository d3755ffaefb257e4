//! Events emitted by the voting engine, for external indexing.

use agora_types::{OrgAddress, ProposalId, RoleId, Timestamp};
use serde::{Deserialize, Serialize};

/// Everything externally observable about engine state changes.
///
/// Events are appended on successful operations only — a failed call
/// emits nothing, matching the all-or-nothing commit model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    ProposalCreated {
        id: ProposalId,
        creator: OrgAddress,
        options: usize,
        ends_at: Timestamp,
    },
    /// Restricted, non-executing poll variant of proposal creation.
    PollCreated {
        id: ProposalId,
        creator: OrgAddress,
        options: usize,
        roles: Vec<RoleId>,
        ends_at: Timestamp,
    },
    VoteCast {
        id: ProposalId,
        voter: OrgAddress,
        power: u128,
    },
    WinnerAnnounced {
        id: ProposalId,
        winner: usize,
        winner_total: u128,
        total_weight_cast: u128,
        valid: bool,
        executed: bool,
    },
    ProposalCleaned {
        id: ProposalId,
        markers_removed: usize,
        batches_removed: bool,
    },
    Paused,
    Unpaused,
    TargetAllowed(OrgAddress),
    TargetRevoked(OrgAddress),
    QuorumChanged {
        from: u8,
        to: u8,
    },
    CreatorRoleAdded(RoleId),
    CreatorRoleRemoved(RoleId),
    VoterRoleAdded(RoleId),
    VoterRoleRemoved(RoleId),
}
