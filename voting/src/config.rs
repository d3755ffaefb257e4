//! Voting module configuration.

use crate::error::VotingError;
use agora_proposals::CreateSpec;
use agora_tally::validate_quorum;
use agora_types::MAX_OPTIONS;
use serde::{Deserialize, Serialize};

/// Explicit configuration owned by the voting engine.
///
/// Mutated only through the authority-gated admin surface; never ambient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Minimum share of total cast weight the leading option must
    /// strictly exceed, in percent (1..=100).
    pub quorum_percent: u8,
    /// Whether the leading option must strictly beat the runner-up.
    pub require_strict_majority: bool,
    /// Allowed proposal duration range, in minutes.
    pub min_duration_minutes: u64,
    pub max_duration_minutes: u64,
    /// Per-proposal option cap (clamped to the hard cap of 32).
    pub max_options: usize,
    /// Per-option action batch call cap.
    pub max_calls_per_batch: usize,
    /// Voter markers reclaimed per cleanup call.
    pub cleanup_page_size: usize,
}

impl VotingConfig {
    pub fn validate(&self) -> Result<(), VotingError> {
        validate_quorum(self.quorum_percent)?;
        if self.min_duration_minutes == 0 || self.min_duration_minutes > self.max_duration_minutes
        {
            return Err(VotingError::InvalidConfig(
                "duration bounds must satisfy 0 < min <= max".into(),
            ));
        }
        if self.max_options == 0 || self.max_options > MAX_OPTIONS {
            return Err(VotingError::InvalidConfig(format!(
                "max_options must be in 1..={MAX_OPTIONS}"
            )));
        }
        if self.max_calls_per_batch == 0 {
            return Err(VotingError::InvalidConfig(
                "max_calls_per_batch must be nonzero".into(),
            ));
        }
        if self.cleanup_page_size == 0 {
            return Err(VotingError::InvalidConfig(
                "cleanup_page_size must be nonzero".into(),
            ));
        }
        Ok(())
    }

    /// Creation bounds derived from this configuration.
    pub fn create_spec(&self) -> CreateSpec {
        CreateSpec {
            min_duration_minutes: self.min_duration_minutes,
            max_duration_minutes: self.max_duration_minutes,
            max_options: self.max_options,
            max_calls_per_batch: self.max_calls_per_batch,
        }
    }
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            quorum_percent: 50,
            require_strict_majority: true,
            min_duration_minutes: 10,
            max_duration_minutes: 60 * 24 * 30, // 30 days
            max_options: 16,
            max_calls_per_batch: 8,
            cleanup_page_size: 50,
        }
    }
}
