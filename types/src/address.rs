//! Organization address type with `org_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An address inside an organization, always prefixed with `org_`.
///
/// One address type covers every actor the engine talks about: proposal
/// creators, voters, the governing authority, and the destinations of
/// proposal-approved action calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgAddress(String);

impl OrgAddress {
    /// The standard prefix for all agora addresses.
    pub const PREFIX: &'static str = "org_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `org_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with org_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for OrgAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrgAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
