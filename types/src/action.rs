//! External action calls attached to proposal options.

use crate::address::OrgAddress;
use serde::{Deserialize, Serialize};

/// One external call in a proposal's per-option action batch.
///
/// If the option wins and the proposal is valid, the whole batch is handed
/// to the execution gateway as an atomic unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCall {
    /// Destination of the call — must be allow-listed.
    pub target: OrgAddress,
    /// Value transferred with the call.
    pub value: u128,
    /// Opaque call payload, interpreted by the gateway.
    pub payload: Vec<u8>,
}

impl ActionCall {
    pub fn new(target: OrgAddress, value: u128, payload: Vec<u8>) -> Self {
        Self {
            target,
            value,
            payload,
        }
    }
}
