//! Seam to the external execution gateway.

use agora_types::{ActionCall, ProposalId};
use thiserror::Error;

/// Failure reported by the execution gateway. Any failure aborts the whole
/// finalize call — there is no partial execution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("gateway execution failed: {0}")]
pub struct GatewayError(pub String);

/// The trusted collaborator that performs a winning proposal's approved
/// action batch, atomically.
pub trait ExecutionGateway {
    fn execute(&mut self, proposal: ProposalId, calls: &[ActionCall]) -> Result<(), GatewayError>;
}

/// Gateway test double that records every batch it receives.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    pub executed: Vec<(ProposalId, Vec<ActionCall>)>,
    /// When set, every `execute` fails with this message.
    pub fail_with: Option<String>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            executed: Vec::new(),
            fail_with: Some(message.into()),
        }
    }
}

impl ExecutionGateway for RecordingGateway {
    fn execute(&mut self, proposal: ProposalId, calls: &[ActionCall]) -> Result<(), GatewayError> {
        if let Some(message) = &self.fail_with {
            return Err(GatewayError(message.clone()));
        }
        self.executed.push((proposal, calls.to_vec()));
        Ok(())
    }
}
