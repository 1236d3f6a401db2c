//! The [`ResourceLedger`]: balances, inventory, and progression.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use verdant_types::{ActionFailure, CropId, LedgerSnapshot, ResourceKind};

use crate::level_threshold;

/// Global player resource state.
///
/// The ledger exposes atomic operations only: every mutating method either
/// applies fully or returns a failure code with state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLedger {
    /// Coin balance. Never negative.
    currency: Decimal,
    /// Water balance. Never negative.
    water: Decimal,
    /// Sunlight balance. Never negative.
    sun: Decimal,
    /// Player level, 1-based.
    level: u32,
    /// Experience toward the next level. Reset to zero on level-up;
    /// overflow past the threshold is discarded.
    experience: u32,
    /// Seed counts by crop id. Zero-count entries are removed.
    inventory: BTreeMap<CropId, u32>,
    /// Whether the global sunlight boost is switched on.
    sunlight_boost_enabled: bool,
}

impl ResourceLedger {
    /// Create a ledger with the given starting balances and inventory.
    ///
    /// Negative starting balances are clamped to zero.
    pub fn new(
        currency: Decimal,
        water: Decimal,
        sun: Decimal,
        inventory: BTreeMap<CropId, u32>,
    ) -> Self {
        Self {
            currency: currency.max(Decimal::ZERO),
            water: water.max(Decimal::ZERO),
            sun: sun.max(Decimal::ZERO),
            level: 1,
            experience: 0,
            inventory,
            sunlight_boost_enabled: false,
        }
    }

    // -----------------------------------------------------------------------
    // Balances
    // -----------------------------------------------------------------------

    /// Current balance of the given resource.
    pub const fn balance(&self, kind: ResourceKind) -> Decimal {
        match kind {
            ResourceKind::Currency => self.currency,
            ResourceKind::Water => self.water,
            ResourceKind::Sun => self.sun,
        }
    }

    /// Current coin balance.
    pub const fn currency(&self) -> Decimal {
        self.currency
    }

    /// Current water balance.
    pub const fn water(&self) -> Decimal {
        self.water
    }

    /// Current sunlight balance.
    pub const fn sun(&self) -> Decimal {
        self.sun
    }

    /// Unconditionally add `amount` to a balance.
    ///
    /// Negative amounts are ignored; removal goes through [`debit`].
    ///
    /// [`debit`]: ResourceLedger::debit
    pub fn credit(&mut self, kind: ResourceKind, amount: Decimal) {
        if amount <= Decimal::ZERO {
            return;
        }
        let slot = self.balance_mut(kind);
        *slot = slot.saturating_add(amount);
        debug!(?kind, %amount, "Credited");
    }

    /// Remove `amount` from a balance, all or nothing.
    ///
    /// Fails with [`ActionFailure::InsufficientFunds`] for currency and
    /// [`ActionFailure::InsufficientResource`] for water and sun; the
    /// balance is untouched on failure.
    pub fn debit(&mut self, kind: ResourceKind, amount: Decimal) -> Result<(), ActionFailure> {
        if amount < Decimal::ZERO {
            // A negative debit would be a disguised credit.
            return Ok(());
        }
        let slot = self.balance_mut(kind);
        if *slot < amount {
            return Err(match kind {
                ResourceKind::Currency => ActionFailure::InsufficientFunds,
                ResourceKind::Water | ResourceKind::Sun => {
                    ActionFailure::InsufficientResource(kind)
                }
            });
        }
        *slot = slot.saturating_sub(amount);
        debug!(?kind, %amount, "Debited");
        Ok(())
    }

    const fn balance_mut(&mut self, kind: ResourceKind) -> &mut Decimal {
        match kind {
            ResourceKind::Currency => &mut self.currency,
            ResourceKind::Water => &mut self.water,
            ResourceKind::Sun => &mut self.sun,
        }
    }

    // -----------------------------------------------------------------------
    // Inventory
    // -----------------------------------------------------------------------

    /// Number of seeds of the given crop in the inventory.
    pub fn item_count(&self, crop: &CropId) -> u32 {
        self.inventory.get(crop).copied().unwrap_or(0)
    }

    /// Seed counts by crop id.
    pub const fn inventory(&self) -> &BTreeMap<CropId, u32> {
        &self.inventory
    }

    /// Add `amount` seeds of `crop` to the inventory.
    pub fn grant_item(&mut self, crop: CropId, amount: u32) {
        if amount == 0 {
            return;
        }
        let entry = self.inventory.entry(crop).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Remove one seed of `crop` from the inventory.
    ///
    /// Fails with [`ActionFailure::InsufficientInventory`] if none remain.
    /// The entry is dropped entirely when its count reaches zero.
    pub fn consume_item(&mut self, crop: &CropId) -> Result<(), ActionFailure> {
        match self.inventory.get_mut(crop) {
            None | Some(0) => Err(ActionFailure::InsufficientInventory),
            Some(count) => {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    self.inventory.remove(crop);
                }
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Progression
    // -----------------------------------------------------------------------

    /// Player level, 1-based.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated toward the next level.
    pub const fn experience(&self) -> u32 {
        self.experience
    }

    /// Experience required to reach the next level from here.
    pub const fn next_level_threshold(&self) -> u32 {
        level_threshold(self.level)
    }

    /// Award experience, possibly leveling up.
    ///
    /// On crossing the threshold the level increments and experience resets
    /// to zero; the overflow past the threshold is discarded, matching the
    /// original progression behavior. Returns the new level if one was
    /// reached.
    pub fn add_experience(&mut self, amount: u32) -> Option<u32> {
        self.experience = self.experience.saturating_add(amount);
        if self.experience >= self.next_level_threshold() {
            self.level = self.level.saturating_add(1);
            self.experience = 0;
            info!(level = self.level, "Level up");
            return Some(self.level);
        }
        None
    }

    // -----------------------------------------------------------------------
    // Sunlight boost toggle
    // -----------------------------------------------------------------------

    /// Whether the global sunlight boost is switched on.
    pub const fn sunlight_boost_enabled(&self) -> bool {
        self.sunlight_boost_enabled
    }

    /// Switch the sunlight boost on.
    ///
    /// Fails with [`ActionFailure::InsufficientResource`] when less than one
    /// unit of sun remains; the toggle stays off in that case.
    pub fn enable_sunlight_boost(&mut self) -> Result<(), ActionFailure> {
        if self.sun < Decimal::ONE {
            return Err(ActionFailure::InsufficientResource(ResourceKind::Sun));
        }
        self.sunlight_boost_enabled = true;
        Ok(())
    }

    /// Switch the sunlight boost off. Always succeeds.
    pub const fn disable_sunlight_boost(&mut self) {
        self.sunlight_boost_enabled = false;
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the ledger as a snapshot record.
    pub fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            currency: self.currency,
            water: self.water,
            sun: self.sun,
            level: self.level,
            experience: self.experience,
            inventory: self.inventory.clone(),
            sunlight_boost_enabled: self.sunlight_boost_enabled,
        }
    }

    /// Rebuild a ledger from a snapshot record.
    ///
    /// Out-of-range values from tampered or corrupted saves are clamped
    /// rather than rejected: negative balances become zero and a zero
    /// level becomes one.
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        Self {
            currency: snapshot.currency.max(Decimal::ZERO),
            water: snapshot.water.max(Decimal::ZERO),
            sun: snapshot.sun.max(Decimal::ZERO),
            level: snapshot.level.max(1),
            experience: snapshot.experience,
            inventory: snapshot.inventory.clone(),
            sunlight_boost_enabled: snapshot.sunlight_boost_enabled,
        }
    }
}
