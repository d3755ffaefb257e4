//! The voting engine — proposal lifecycle, weighted voting, and the
//! authority-gated admin surface.
//!
//! Every operation is all-or-nothing: validation runs to completion before
//! the first mutation, so a typed failure leaves no partial state behind
//! and emits no event.

use crate::config::VotingConfig;
use crate::error::VotingError;
use crate::event::Event;
use crate::gateway::ExecutionGateway;
use crate::power::VotePower;
use agora_proposals::{
    validate_batches, AllowedTargets, CleanupPass, Proposal, ProposalError, ProposalStore,
};
use agora_roles::{RoleRegistry, RoleSet};
use agora_tally::{pick_winner, validate_quorum, validate_weights, TallyOutcome};
use agora_types::{ActionCall, OrgAddress, ProposalId, RoleId, Timestamp};
use serde::{Deserialize, Serialize};

/// One voting module instance.
///
/// Owns the proposal store, the creator/voter role sets, the allow-list,
/// and the variant's vote-power strategy. Collaborators that live outside
/// the module — the role credential registry and the execution gateway —
/// are passed in at the call sites that need them.
pub struct VotingEngine {
    /// The module's own address; proposals may never target it.
    address: OrgAddress,
    /// The governing authority — sole caller of the admin surface.
    authority: OrgAddress,
    config: VotingConfig,
    paused: bool,
    creator_roles: RoleSet,
    voter_roles: RoleSet,
    allowed: AllowedTargets,
    store: ProposalStore,
    power: Box<dyn VotePower>,
    /// Mutual-exclusion flag around the gateway call at finalize. The
    /// gateway could call back into the module before the outcome is
    /// recorded; any call observing the flag fails.
    finalize_in_progress: bool,
    events: Vec<Event>,
}

impl VotingEngine {
    pub fn new(
        address: OrgAddress,
        authority: OrgAddress,
        config: VotingConfig,
        power: Box<dyn VotePower>,
    ) -> Result<Self, VotingError> {
        config.validate()?;
        Ok(Self {
            address,
            authority,
            config,
            paused: false,
            creator_roles: RoleSet::new(),
            voter_roles: RoleSet::new(),
            allowed: AllowedTargets::new(),
            store: ProposalStore::new(),
            power,
            finalize_in_progress: false,
            events: Vec::new(),
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Submit an executing proposal with one action batch per option.
    pub fn create_proposal(
        &mut self,
        caller: &OrgAddress,
        registry: &dyn RoleRegistry,
        metadata: String,
        duration_minutes: u64,
        options: Vec<String>,
        batches: Vec<Vec<ActionCall>>,
        now: Timestamp,
    ) -> Result<ProposalId, VotingError> {
        self.check_not_finalizing()?;
        self.check_creator(caller, registry)?;

        let id = self.store.next_id();
        let proposal = Proposal::create(
            id,
            metadata,
            caller.clone(),
            now,
            duration_minutes,
            options,
            batches,
            None,
            &self.config.create_spec(),
            &self.allowed,
            &self.address,
        )?;
        let ends_at = proposal.ends_at;
        let options = proposal.option_count();
        self.store.insert(proposal)?;
        tracing::info!(%id, creator = %caller, options, "proposal created");
        self.emit(Event::ProposalCreated {
            id,
            creator: caller.clone(),
            options,
            ends_at,
        });
        Ok(id)
    }

    /// Submit a restricted, non-executing poll scoped to an explicit role
    /// list instead of the module-wide voter set.
    pub fn create_poll(
        &mut self,
        caller: &OrgAddress,
        registry: &dyn RoleRegistry,
        metadata: String,
        duration_minutes: u64,
        options: Vec<String>,
        restriction_roles: Vec<RoleId>,
        now: Timestamp,
    ) -> Result<ProposalId, VotingError> {
        self.check_not_finalizing()?;
        self.check_creator(caller, registry)?;
        if restriction_roles.is_empty() {
            return Err(VotingError::EmptyRestriction);
        }

        let id = self.store.next_id();
        let batches = vec![Vec::new(); options.len()];
        let proposal = Proposal::create(
            id,
            metadata,
            caller.clone(),
            now,
            duration_minutes,
            options,
            batches,
            Some(RoleSet::from_ids(restriction_roles.clone())),
            &self.config.create_spec(),
            &self.allowed,
            &self.address,
        )?;
        let ends_at = proposal.ends_at;
        let options = proposal.option_count();
        self.store.insert(proposal)?;
        tracing::info!(%id, creator = %caller, options, "restricted poll created");
        self.emit(Event::PollCreated {
            id,
            creator: caller.clone(),
            options,
            roles: restriction_roles,
            ends_at,
        });
        Ok(id)
    }

    /// Cast a weighted ballot. The weights must distribute exactly the
    /// per-ballot budget across distinct options.
    pub fn vote(
        &mut self,
        caller: &OrgAddress,
        registry: &dyn RoleRegistry,
        id: ProposalId,
        option_indices: &[usize],
        weights: &[u64],
        now: Timestamp,
    ) -> Result<(), VotingError> {
        self.check_not_finalizing()?;
        if self.paused {
            return Err(VotingError::Paused);
        }

        let proposal = self.store.get(id)?;
        if !proposal.is_open(now) {
            return Err(ProposalError::VotingClosed.into());
        }
        if proposal.voters.contains(caller) {
            return Err(ProposalError::AlreadyVoted(caller.clone()).into());
        }
        let eligible = match &proposal.restricted_to {
            Some(restriction) => restriction.held_by(registry, caller),
            None => self.voter_roles.held_by(registry, caller),
        };
        if !eligible {
            return Err(VotingError::MissingRole);
        }
        let option_count = proposal.option_count();

        validate_weights(option_indices, weights, option_count)?;
        let power = self.power.power_of(caller)?;

        self.store
            .get_mut(id)?
            .record_ballot(caller, option_indices, weights, power)?;
        tracing::debug!(%id, voter = %caller, power, "vote cast");
        self.emit(Event::VoteCast {
            id,
            voter: caller.clone(),
            power,
        });
        Ok(())
    }

    /// Compute the winner once the voting window has closed, and — if the
    /// outcome is valid and the winning batch non-empty — forward the
    /// batch to the execution gateway.
    ///
    /// Permissionless. Every batch target is re-checked against the
    /// *current* allow-list, defeating allow-list changes made mid-vote.
    /// A gateway failure aborts the whole call: the proposal stays
    /// expired and unfinalized, and the guard is released.
    pub fn finalize(
        &mut self,
        id: ProposalId,
        gateway: &mut dyn ExecutionGateway,
        now: Timestamp,
    ) -> Result<TallyOutcome, VotingError> {
        self.check_not_finalizing()?;

        let proposal = self.store.get(id)?;
        if proposal.finalized {
            return Err(ProposalError::AlreadyFinalized.into());
        }
        if !proposal.ends_at.is_past(now) {
            return Err(ProposalError::StillOpen.into());
        }

        let outcome = pick_winner(
            &proposal.totals,
            proposal.total_weight_cast,
            self.config.quorum_percent,
            self.config.require_strict_majority,
        )?;
        let total_weight_cast = proposal.total_weight_cast;
        let batch: Vec<ActionCall> = if outcome.valid {
            proposal
                .batches
                .get(outcome.winner)
                .cloned()
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let mut executed = false;
        if !batch.is_empty() {
            validate_batches(
                std::slice::from_ref(&batch),
                &self.allowed,
                &self.address,
                self.config.max_calls_per_batch,
            )?;

            self.finalize_in_progress = true;
            let result = gateway.execute(id, &batch);
            self.finalize_in_progress = false;
            if let Err(e) = result {
                tracing::warn!(%id, error = %e, "gateway rejected winning batch");
                return Err(e.into());
            }
            executed = true;
        }

        self.store
            .get_mut(id)?
            .record_outcome(outcome.winner, outcome.valid);
        tracing::info!(
            %id,
            winner = outcome.winner,
            valid = outcome.valid,
            executed,
            "winner announced"
        );
        self.emit(Event::WinnerAnnounced {
            id,
            winner: outcome.winner,
            winner_total: outcome.winner_total,
            total_weight_cast,
            valid: outcome.valid,
            executed,
        });
        Ok(outcome)
    }

    /// Reclaim per-voter storage in bounded pages. Permissionless and
    /// allowed any time after the voting window closes.
    pub fn cleanup(
        &mut self,
        id: ProposalId,
        voter_page: &[OrgAddress],
        now: Timestamp,
    ) -> Result<CleanupPass, VotingError> {
        self.check_not_finalizing()?;
        let page_size = self.config.cleanup_page_size;
        let pass = self.store.get_mut(id)?.cleanup(voter_page, page_size, now)?;
        tracing::debug!(
            %id,
            markers = pass.markers_removed,
            batches = pass.batches_removed,
            "cleanup pass"
        );
        self.emit(Event::ProposalCleaned {
            id,
            markers_removed: pass.markers_removed,
            batches_removed: pass.batches_removed,
        });
        Ok(pass)
    }

    // ── Admin surface (governing authority only) ─────────────────────────

    pub fn pause(&mut self, caller: &OrgAddress) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if !self.paused {
            self.paused = true;
            self.emit(Event::Paused);
        }
        Ok(())
    }

    pub fn unpause(&mut self, caller: &OrgAddress) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.paused {
            self.paused = false;
            self.emit(Event::Unpaused);
        }
        Ok(())
    }

    pub fn allow_target(
        &mut self,
        caller: &OrgAddress,
        target: OrgAddress,
    ) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.allowed.allow(target.clone()) {
            self.emit(Event::TargetAllowed(target));
        }
        Ok(())
    }

    pub fn revoke_target(
        &mut self,
        caller: &OrgAddress,
        target: &OrgAddress,
    ) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.allowed.revoke(target) {
            self.emit(Event::TargetRevoked(target.clone()));
        }
        Ok(())
    }

    pub fn set_quorum(&mut self, caller: &OrgAddress, pct: u8) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        validate_quorum(pct)?;
        let from = self.config.quorum_percent;
        self.config.quorum_percent = pct;
        self.emit(Event::QuorumChanged { from, to: pct });
        Ok(())
    }

    pub fn add_creator_role(
        &mut self,
        caller: &OrgAddress,
        role: RoleId,
    ) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.creator_roles.add(role.clone()) {
            self.emit(Event::CreatorRoleAdded(role));
        }
        Ok(())
    }

    pub fn remove_creator_role(
        &mut self,
        caller: &OrgAddress,
        role: &RoleId,
    ) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.creator_roles.remove(role) {
            self.emit(Event::CreatorRoleRemoved(role.clone()));
        }
        Ok(())
    }

    pub fn add_voter_role(
        &mut self,
        caller: &OrgAddress,
        role: RoleId,
    ) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.voter_roles.add(role.clone()) {
            self.emit(Event::VoterRoleAdded(role));
        }
        Ok(())
    }

    pub fn remove_voter_role(
        &mut self,
        caller: &OrgAddress,
        role: &RoleId,
    ) -> Result<(), VotingError> {
        self.check_authority(caller)?;
        if self.voter_roles.remove(role) {
            self.emit(Event::VoterRoleRemoved(role.clone()));
        }
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &VotingConfig {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, VotingError> {
        Ok(self.store.get(id)?)
    }

    /// Drain the accumulated events.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Internal ─────────────────────────────────────────────────────────

    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    fn check_not_finalizing(&self) -> Result<(), VotingError> {
        if self.finalize_in_progress {
            return Err(VotingError::FinalizeInProgress);
        }
        Ok(())
    }

    fn check_authority(&self, caller: &OrgAddress) -> Result<(), VotingError> {
        if caller != &self.authority {
            return Err(VotingError::NotAuthorized);
        }
        Ok(())
    }

    fn check_creator(
        &self,
        caller: &OrgAddress,
        registry: &dyn RoleRegistry,
    ) -> Result<(), VotingError> {
        if self.paused {
            return Err(VotingError::Paused);
        }
        if caller == &self.authority || self.creator_roles.held_by(registry, caller) {
            return Ok(());
        }
        Err(VotingError::MissingRole)
    }
}

/// Serializable snapshot of everything but the power strategy and the
/// transient guard/event buffers.
#[derive(Serialize, Deserialize)]
struct EngineSnapshot {
    address: OrgAddress,
    authority: OrgAddress,
    config: VotingConfig,
    paused: bool,
    creator_roles: RoleSet,
    voter_roles: RoleSet,
    allowed: AllowedTargets,
    store: ProposalStore,
}

impl VotingEngine {
    /// Serialize engine state for persistence.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = EngineSnapshot {
            address: self.address.clone(),
            authority: self.authority.clone(),
            config: self.config.clone(),
            paused: self.paused,
            creator_roles: self.creator_roles.clone(),
            voter_roles: self.voter_roles.clone(),
            allowed: self.allowed.clone(),
            store: self.store.clone(),
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore an engine from serialized bytes. The power strategy is not
    /// serializable and must be supplied again.
    pub fn load_state(data: &[u8], power: Box<dyn VotePower>) -> Result<Self, VotingError> {
        let snapshot: EngineSnapshot =
            bincode::deserialize(data).map_err(|e| VotingError::BadSnapshot(e.to_string()))?;
        snapshot.config.validate()?;
        Ok(Self {
            address: snapshot.address,
            authority: snapshot.authority,
            config: snapshot.config,
            paused: snapshot.paused,
            creator_roles: snapshot.creator_roles,
            voter_roles: snapshot.voter_roles,
            allowed: snapshot.allowed,
            store: snapshot.store,
            power,
            finalize_in_progress: false,
            events: Vec::new(),
        })
    }
}
