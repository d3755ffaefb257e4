//! Role eligibility for the agora governance engine.
//!
//! Two pieces: a mutable, deduplicated [`RoleSet`] with O(1) membership and
//! swap-remove deletion, and the [`RoleRegistry`] seam to the external
//! credential registry that knows which address actually holds which role.

pub mod registry;
pub mod set;

pub use registry::{MemoryRoleRegistry, RoleRegistry};
pub use set::RoleSet;
