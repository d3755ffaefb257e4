//! Seam to the external role credential registry.

use agora_types::{OrgAddress, RoleId};
use std::collections::{HashMap, HashSet};

/// Authoritative source of "does address X hold role Y".
///
/// Membership queries have no failure mode: an unknown address or role is
/// simply not a holder. `has_any` exists so a multi-role eligibility check
/// costs one batched round trip instead of N single queries.
pub trait RoleRegistry {
    /// Single-pair membership query.
    fn has_role(&self, address: &OrgAddress, role: &RoleId) -> bool;

    /// Batched multi-pair query, short-circuiting on first match.
    fn has_any(&self, address: &OrgAddress, roles: &[RoleId]) -> bool {
        roles.iter().any(|role| self.has_role(address, role))
    }
}

/// In-memory registry, for composition and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryRoleRegistry {
    grants: HashMap<OrgAddress, HashSet<RoleId>>,
}

impl MemoryRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, address: OrgAddress, role: RoleId) {
        self.grants.entry(address).or_default().insert(role);
    }

    pub fn revoke(&mut self, address: &OrgAddress, role: &RoleId) {
        if let Some(roles) = self.grants.get_mut(address) {
            roles.remove(role);
            if roles.is_empty() {
                self.grants.remove(address);
            }
        }
    }
}

impl RoleRegistry for MemoryRoleRegistry {
    fn has_role(&self, address: &OrgAddress, role: &RoleId) -> bool {
        self.grants
            .get(address)
            .is_some_and(|roles| roles.contains(role))
    }
}
