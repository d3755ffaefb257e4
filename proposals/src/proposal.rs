//! The per-proposal record and its lifecycle.

use crate::allowlist::AllowedTargets;
use crate::error::ProposalError;
use agora_roles::RoleSet;
use agora_types::{ActionCall, OrgAddress, ProposalId, Timestamp, BALLOT_BUDGET, MAX_OPTIONS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle state of a proposal. No state is revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Voting window is open (now ≤ end timestamp).
    Open,
    /// Window closed, winner not yet computed.
    Expired,
    /// Winner computed; batch executed or validly rejected.
    Finalized,
    /// Voter markers and batch storage have been reclaimed.
    Cleaned,
}

/// Bounds a proposal must satisfy at creation, taken from the engine config.
#[derive(Clone, Copy, Debug)]
pub struct CreateSpec {
    pub min_duration_minutes: u64,
    pub max_duration_minutes: u64,
    pub max_options: usize,
    pub max_calls_per_batch: usize,
}

/// Result of one paginated cleanup pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanupPass {
    /// Voter markers removed by this call.
    pub markers_removed: usize,
    /// Whether this call deleted the stored action batches.
    pub batches_removed: bool,
}

/// A weighted-vote proposal.
///
/// The end timestamp is fixed at creation. While open, the record is
/// mutated only by ballot casts; at finalize it becomes read-only apart
/// from the recorded outcome; cleanup later prunes voter markers and
/// batch storage irreversibly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub metadata: String,
    pub creator: OrgAddress,
    pub created_at: Timestamp,
    /// Immutable end of the voting window.
    pub ends_at: Timestamp,
    /// Option labels; count is fixed at creation (1..=32).
    pub options: Vec<String>,
    /// Per-option weight accumulators.
    pub totals: Vec<u128>,
    /// Sum of every voter's computed power.
    pub total_weight_cast: u128,
    /// Addresses that have voted ("has voted" markers).
    pub voters: HashSet<OrgAddress>,
    /// Per-option action batches; empty vectors for poll-mode proposals.
    pub batches: Vec<Vec<ActionCall>>,
    /// Poll mode: eligibility is this role list instead of the module-wide
    /// voter set. O(1) membership via the role set's reverse index.
    pub restricted_to: Option<RoleSet>,
    pub finalized: bool,
    /// Winning option index, recorded at finalize.
    pub winner: Option<usize>,
    /// Whether the outcome met quorum/majority, recorded at finalize.
    pub valid: Option<bool>,
    pub voters_cleared: bool,
    pub batches_cleared: bool,
}

/// Validate every call in every batch against the allow-list and against
/// self-reference.
///
/// The self-target check stops a passing proposal from rewriting the
/// voting module's own configuration as a side effect of execution.
pub fn validate_batches(
    batches: &[Vec<ActionCall>],
    allowed: &AllowedTargets,
    module_address: &OrgAddress,
    max_calls_per_batch: usize,
) -> Result<(), ProposalError> {
    for batch in batches {
        if batch.len() > max_calls_per_batch {
            return Err(ProposalError::TooManyCalls {
                got: batch.len(),
                max: max_calls_per_batch,
            });
        }
        for call in batch {
            if call.target == *module_address {
                return Err(ProposalError::SelfTarget(call.target.clone()));
            }
            if !allowed.is_allowed(&call.target) {
                return Err(ProposalError::TargetNotAllowed(call.target.clone()));
            }
        }
    }
    Ok(())
}

impl Proposal {
    /// Validate and build a new proposal. No mutation happens anywhere on
    /// failure — the record only exists once every check has passed.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: ProposalId,
        metadata: String,
        creator: OrgAddress,
        now: Timestamp,
        duration_minutes: u64,
        options: Vec<String>,
        batches: Vec<Vec<ActionCall>>,
        restricted_to: Option<RoleSet>,
        spec: &CreateSpec,
        allowed: &AllowedTargets,
        module_address: &OrgAddress,
    ) -> Result<Self, ProposalError> {
        if metadata.trim().is_empty() {
            return Err(ProposalError::EmptyMetadata);
        }
        if duration_minutes < spec.min_duration_minutes
            || duration_minutes > spec.max_duration_minutes
        {
            return Err(ProposalError::DurationOutOfBounds {
                got: duration_minutes,
                min: spec.min_duration_minutes,
                max: spec.max_duration_minutes,
            });
        }
        if options.is_empty() {
            return Err(ProposalError::NoOptions);
        }
        let max_options = spec.max_options.min(MAX_OPTIONS);
        if options.len() > max_options {
            return Err(ProposalError::TooManyOptions {
                got: options.len(),
                max: max_options,
            });
        }
        if batches.len() != options.len() {
            return Err(ProposalError::LengthMismatch {
                options: options.len(),
                batches: batches.len(),
            });
        }
        validate_batches(&batches, allowed, module_address, spec.max_calls_per_batch)?;

        let option_count = options.len();
        Ok(Self {
            id,
            metadata,
            creator,
            created_at: now,
            ends_at: now.plus_minutes(duration_minutes),
            options,
            totals: vec![0; option_count],
            total_weight_cast: 0,
            voters: HashSet::new(),
            batches,
            restricted_to,
            finalized: false,
            winner: None,
            valid: None,
            voters_cleared: false,
            batches_cleared: false,
        })
    }

    pub fn status(&self, now: Timestamp) -> ProposalStatus {
        if self.voters_cleared && self.batches_cleared {
            ProposalStatus::Cleaned
        } else if self.finalized {
            ProposalStatus::Finalized
        } else if self.ends_at.is_past(now) {
            ProposalStatus::Expired
        } else {
            ProposalStatus::Open
        }
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        !self.finalized && !self.ends_at.is_past(now)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Apply one validated ballot.
    ///
    /// `option_indices`/`weights` must already have passed the tally
    /// crate's weight validation. Each chosen option receives
    /// `power * weight / 100` (truncating); the total gains `power`. All
    /// new values are computed before anything is written, so a failure
    /// leaves the record untouched.
    pub fn record_ballot(
        &mut self,
        voter: &OrgAddress,
        option_indices: &[usize],
        weights: &[u64],
        power: u128,
    ) -> Result<(), ProposalError> {
        if self.voters.contains(voter) {
            return Err(ProposalError::AlreadyVoted(voter.clone()));
        }
        let mut updated: Vec<(usize, u128)> = Vec::with_capacity(option_indices.len());
        for (&index, &weight) in option_indices.iter().zip(weights) {
            let current = *self
                .totals
                .get(index)
                .ok_or(ProposalError::OptionOutOfRange(index))?;
            let share = power
                .checked_mul(weight as u128)
                .ok_or(ProposalError::Overflow)?
                / BALLOT_BUDGET as u128;
            let new_total = current.checked_add(share).ok_or(ProposalError::Overflow)?;
            updated.push((index, new_total));
        }
        let new_cast = self
            .total_weight_cast
            .checked_add(power)
            .ok_or(ProposalError::Overflow)?;

        for (index, total) in updated {
            self.totals[index] = total;
        }
        self.total_weight_cast = new_cast;
        self.voters.insert(voter.clone());
        Ok(())
    }

    /// Record the finalize outcome. The proposal becomes read-only apart
    /// from cleanup.
    pub fn record_outcome(&mut self, winner: usize, valid: bool) {
        self.finalized = true;
        self.winner = Some(winner);
        self.valid = Some(valid);
    }

    /// One paginated cleanup pass — permissionless, post-expiry only.
    ///
    /// Clears at most `page_size` voter markers from `voter_page`. Batch
    /// storage is deleted only on a call that starts with no markers left,
    /// so reclamation cost stays bounded per call. Re-running a page that
    /// was already cleared removes zero markers and succeeds.
    pub fn cleanup(
        &mut self,
        voter_page: &[OrgAddress],
        page_size: usize,
        now: Timestamp,
    ) -> Result<CleanupPass, ProposalError> {
        if !self.ends_at.is_past(now) {
            return Err(ProposalError::StillOpen);
        }

        if !self.voters.is_empty() {
            let mut removed = 0usize;
            for voter in voter_page {
                if removed >= page_size {
                    break;
                }
                if self.voters.remove(voter) {
                    removed += 1;
                }
            }
            if self.voters.is_empty() {
                self.voters_cleared = true;
            }
            return Ok(CleanupPass {
                markers_removed: removed,
                batches_removed: false,
            });
        }

        self.voters_cleared = true;
        let mut batches_removed = false;
        if !self.batches_cleared {
            for batch in &mut self.batches {
                batches_removed |= !batch.is_empty();
                batch.clear();
            }
            self.batches_cleared = true;
        }
        Ok(CleanupPass {
            markers_removed: 0,
            batches_removed,
        })
    }
}
