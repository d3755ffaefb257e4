//! Vote-power strategies — "power of address at cast time".
//!
//! The proposal store and vote math are written once; everything variant-
//! specific lives behind [`VotePower`]. Direct democracy uses a flat
//! per-ballot budget, participation derives power from a fungible balance
//! (optionally square-rooted), and the hybrid variant blends classes
//! under percentage splits.

use crate::error::VotingError;
use agora_types::{OrgAddress, BALLOT_BUDGET};
use std::collections::HashMap;

/// Point-in-time fungible balance query. Not snapshotted — power reflects
/// the balance at the moment of casting only.
pub trait BalanceSource {
    fn balance_of(&self, address: &OrgAddress) -> u128;
}

/// In-memory balance source, for composition and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryBalances {
    balances: HashMap<OrgAddress, u128>,
}

impl MemoryBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, address: OrgAddress, balance: u128) {
        self.balances.insert(address, balance);
    }
}

impl BalanceSource for MemoryBalances {
    fn balance_of(&self, address: &OrgAddress) -> u128 {
        self.balances.get(address).copied().unwrap_or(0)
    }
}

/// Variant-specific vote-power computation at cast time.
pub trait VotePower {
    fn power_of(&self, voter: &OrgAddress) -> Result<u128, VotingError>;
}

/// Direct democracy: every eligible ballot is worth the fixed budget,
/// regardless of holdings.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatPower;

impl VotePower for FlatPower {
    fn power_of(&self, _voter: &OrgAddress) -> Result<u128, VotingError> {
        Ok(BALLOT_BUDGET as u128)
    }
}

/// Participation: power derives from a fungible balance read at cast time,
/// subject to a minimum-balance floor that deters low-cost sybil voting.
/// With `diminishing` set, the balance is square-rooted first.
pub struct BalancePower {
    source: Box<dyn BalanceSource>,
    floor: u128,
    diminishing: bool,
}

impl BalancePower {
    pub fn new(source: Box<dyn BalanceSource>, floor: u128, diminishing: bool) -> Self {
        Self {
            source,
            floor,
            diminishing,
        }
    }
}

impl VotePower for BalancePower {
    fn power_of(&self, voter: &OrgAddress) -> Result<u128, VotingError> {
        let balance = self.source.balance_of(voter);
        if balance < self.floor {
            return Err(VotingError::BelowBalanceFloor {
                have: balance,
                need: self.floor,
            });
        }
        if self.diminishing {
            Ok(integer_sqrt(balance))
        } else {
            Ok(balance)
        }
    }
}

/// One weighting class inside a blended strategy.
pub struct PowerClass {
    pub strategy: Box<dyn VotePower>,
    /// Share of the blended power this class contributes, in percent.
    pub share_percent: u8,
}

/// Hybrid: blends multiple weighting classes under percentage splits that
/// must sum to exactly 100. Each class computes its power independently;
/// the blend is `Σ class_power * share / 100` (truncating).
pub struct BlendedPower {
    classes: Vec<PowerClass>,
}

impl std::fmt::Debug for BlendedPower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlendedPower")
            .field(
                "shares",
                &self
                    .classes
                    .iter()
                    .map(|c| c.share_percent)
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl BlendedPower {
    pub fn new(classes: Vec<PowerClass>) -> Result<Self, VotingError> {
        let sum: u64 = classes.iter().map(|c| c.share_percent as u64).sum();
        if sum != 100 {
            return Err(VotingError::InvalidShareSplit(sum));
        }
        Ok(Self { classes })
    }
}

impl VotePower for BlendedPower {
    fn power_of(&self, voter: &OrgAddress) -> Result<u128, VotingError> {
        let mut blended = 0u128;
        for class in &self.classes {
            let power = class.strategy.power_of(voter)?;
            let share = power
                .checked_mul(class.share_percent as u128)
                .ok_or(VotingError::Tally(agora_tally::TallyError::Overflow))?
                / 100;
            blended = blended
                .checked_add(share)
                .ok_or(VotingError::Tally(agora_tally::TallyError::Overflow))?;
        }
        Ok(blended)
    }
}

/// Integer square root via Newton's method.
fn integer_sqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut next = (x >> 1) + 1;
    while next < x {
        x = next;
        next = (x + n / x) >> 1;
    }
    x
}
