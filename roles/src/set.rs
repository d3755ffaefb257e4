//! A deduplicated, enumerable set of role ids.

use crate::registry::RoleRegistry;
use agora_types::{OrgAddress, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered set of role ids with O(1) membership.
///
/// Ids are kept in a vector for enumeration plus a reverse index for
/// membership. Removal swaps the victim with the last element and
/// truncates, so removal is O(1) but does not preserve order.
///
/// Invariant: every id appears at most once; `ids` and `index` always
/// describe the same set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSet {
    ids: Vec<RoleId>,
    index: HashMap<RoleId, usize>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of ids, ignoring duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = RoleId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.add(id);
        }
        set
    }

    /// Append `id` if absent. Returns true if the set changed.
    pub fn add(&mut self, id: RoleId) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        true
    }

    /// Remove `id` via swap-with-last-then-truncate. Returns true if the
    /// set changed. O(1); enumeration order is not preserved.
    pub fn remove(&mut self, id: &RoleId) -> bool {
        let Some(pos) = self.index.remove(id) else {
            return false;
        };
        self.ids.swap_remove(pos);
        if let Some(moved) = self.ids.get(pos) {
            self.index.insert(moved.clone(), pos);
        }
        true
    }

    /// O(1) membership test.
    pub fn contains(&self, id: &RoleId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[RoleId] {
        &self.ids
    }

    /// Whether `address` holds any role in this set, per the registry.
    ///
    /// A single-id set costs one direct query; a multi-id set costs one
    /// batched query (the registry short-circuits on first match). An
    /// empty set never matches.
    pub fn held_by(&self, registry: &dyn RoleRegistry, address: &OrgAddress) -> bool {
        match self.ids.as_slice() {
            [] => false,
            [only] => registry.has_role(address, only),
            many => registry.has_any(address, many),
        }
    }
}
