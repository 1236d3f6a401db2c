//! One grid cell of land: lock gate, soil moisture, and the plant slot.
//!
//! A plot exclusively owns at most one [`Plant`]. A locked plot is inert:
//! it never updates moisture or growth and rejects every action. Payment
//! for watering, sowing, and unlocking is delegated to closures so the
//! plot mediates plant lifecycle without reaching into the ledger; the
//! engine supplies the closures and guarantees all-or-nothing semantics
//! by checking local preconditions before any resource moves.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use verdant_types::{ActionFailure, PlantDef, PlotDelta, PlotSnapshot};

use crate::plant::Plant;

/// One lockable cell of the garden grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plot {
    /// Stable position in the grid, 0-based.
    index: usize,
    /// Whether the plot is still locked. Unlocking is one-way.
    is_locked: bool,
    /// Whether the soil is currently wet.
    is_wet: bool,
    /// Seconds until the soil dries out again.
    wet_secs_remaining: u64,
    /// The plant growing here, if any.
    plant: Option<Plant>,
}

impl Plot {
    /// Create an empty, dry plot.
    pub const fn new(index: usize, is_locked: bool) -> Self {
        Self {
            index,
            is_locked,
            is_wet: false,
            wet_secs_remaining: 0,
            plant: None,
        }
    }

    /// Grid position of this plot.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether the plot is locked.
    pub const fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Whether the soil is currently wet.
    pub const fn is_wet(&self) -> bool {
        self.is_wet
    }

    /// Seconds of soak time remaining.
    pub const fn wet_secs_remaining(&self) -> u64 {
        self.wet_secs_remaining
    }

    /// The plant growing here, if any.
    pub const fn plant(&self) -> Option<&Plant> {
        self.plant.as_ref()
    }

    /// Advance moisture and growth by one simulation step.
    ///
    /// Locked plots are inert. Moisture counts down before the plant
    /// advances, so a plot that dries out this step contributes no growth
    /// this step.
    pub fn advance(&mut self, seconds: u64, growth_multiplier: u32) {
        if self.is_locked {
            return;
        }

        if self.is_wet {
            self.wet_secs_remaining = self.wet_secs_remaining.saturating_sub(seconds);
            if self.wet_secs_remaining == 0 {
                self.is_wet = false;
            }
        }

        if let Some(plant) = self.plant.as_mut() {
            plant.advance(seconds, self.is_wet, growth_multiplier);
        }
    }

    /// Soak the plot.
    ///
    /// Fails on a locked or already-wet plot, or when `pay` cannot cover
    /// the water cost; nothing changes on failure. On success the soak
    /// timer resets to `soak_secs` regardless of any remaining moisture.
    pub fn water(
        &mut self,
        soak_secs: u64,
        pay: impl FnOnce() -> Result<(), ActionFailure>,
    ) -> Result<(), ActionFailure> {
        if self.is_locked {
            return Err(ActionFailure::PlotLocked);
        }
        if self.is_wet {
            return Err(ActionFailure::PlotAlreadyWet);
        }
        pay()?;
        self.is_wet = true;
        self.wet_secs_remaining = soak_secs;
        debug!(plot = self.index, soak_secs, "Plot watered");
        Ok(())
    }

    /// Sow a seed, creating a zero-growth plant.
    ///
    /// Fails on a locked or occupied plot, or when `spend_seed` cannot
    /// take a seed from the inventory; nothing changes on failure.
    pub fn sow(
        &mut self,
        crop: Arc<PlantDef>,
        now: DateTime<Utc>,
        spend_seed: impl FnOnce() -> Result<(), ActionFailure>,
    ) -> Result<(), ActionFailure> {
        if self.is_locked {
            return Err(ActionFailure::PlotLocked);
        }
        if self.plant.is_some() {
            return Err(ActionFailure::PlotOccupied);
        }
        spend_seed()?;
        debug!(plot = self.index, crop = %crop.id, "Seed planted");
        self.plant = Some(Plant::new(crop, now));
        Ok(())
    }

    /// Harvest the mature plant, clearing the slot.
    ///
    /// Returns the crop's sell price; crediting currency and firing task
    /// progress is the caller's job. Fails on an empty plot or an
    /// immature plant.
    pub fn harvest(&mut self) -> Result<Decimal, ActionFailure> {
        let plant = self.plant.as_ref().ok_or(ActionFailure::PlotEmpty)?;
        if !plant.is_mature() {
            return Err(ActionFailure::PlotNotMature);
        }
        let payout = plant.crop().sell_price;
        debug!(plot = self.index, %payout, "Plant harvested");
        self.plant = None;
        Ok(payout)
    }

    /// Clear the lock, permanently.
    ///
    /// Sequential-order enforcement lives in the engine, which knows the
    /// whole grid; this only rejects plots that are not locked and
    /// payments that fail.
    pub fn unlock(
        &mut self,
        pay: impl FnOnce() -> Result<(), ActionFailure>,
    ) -> Result<(), ActionFailure> {
        if !self.is_locked {
            return Err(ActionFailure::UnlockOutOfOrder);
        }
        pay()?;
        self.is_locked = false;
        debug!(plot = self.index, "Plot unlocked");
        Ok(())
    }

    /// Assemble the per-tick visual delta for this plot.
    pub fn delta(&self) -> PlotDelta {
        PlotDelta {
            index: self.index,
            is_locked: self.is_locked,
            is_wet: self.is_wet,
            wet_secs_remaining: self.wet_secs_remaining,
            plant: self.plant.as_ref().map(Plant::delta),
        }
    }

    /// Capture the plot as a snapshot record.
    pub fn to_snapshot(&self) -> PlotSnapshot {
        PlotSnapshot {
            index: self.index,
            is_wet: self.is_wet,
            wet_secs_remaining: self.wet_secs_remaining,
            is_locked: self.is_locked,
            plant: self.plant.as_ref().map(Plant::to_snapshot),
        }
    }

    /// Rebuild a plot from its persisted state.
    ///
    /// The grid position comes from the caller rather than the record:
    /// plots restore by position in the snapshot list, so a save with a
    /// stale stored index cannot scramble the grid. The plant slot is
    /// restored separately by the caller, which owns the crop definition
    /// table needed to resolve crop ids. A dry record's soak counter is
    /// discarded: only a wet plot drains it, so a stale value would
    /// otherwise persist indefinitely.
    pub const fn from_snapshot_shell(index: usize, snapshot: &PlotSnapshot) -> Self {
        let wet_secs_remaining = if snapshot.is_wet {
            snapshot.wet_secs_remaining
        } else {
            0
        };
        Self {
            index,
            is_locked: snapshot.is_locked,
            is_wet: snapshot.is_wet,
            wet_secs_remaining,
            plant: None,
        }
    }

    /// Place a restored plant into the slot.
    pub fn restore_plant(&mut self, plant: Plant) {
        self.plant = Some(plant);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use verdant_types::CropId;

    use super::*;

    fn carrot() -> Arc<PlantDef> {
        Arc::new(PlantDef {
            id: CropId::new("carrot"),
            name: "Carrot".to_owned(),
            icon: "\u{1f955}".to_owned(),
            cost: dec!(10),
            sell_price: dec!(20),
            growth_secs: 10,
            water_req: 2,
            sun_req: 2,
            stages: 3,
        })
    }

    fn pay_ok() -> Result<(), ActionFailure> {
        Ok(())
    }

    #[test]
    fn locked_plot_ignores_advance() {
        // A locked-while-wet plot can only come from a restored save;
        // advance must still leave it untouched.
        let snapshot = verdant_types::PlotSnapshot {
            index: 0,
            is_wet: true,
            wet_secs_remaining: 5,
            is_locked: true,
            plant: None,
        };
        let mut plot = Plot::from_snapshot_shell(snapshot.index, &snapshot);
        plot.advance(10, 1);
        assert!(plot.is_wet());
        assert_eq!(plot.wet_secs_remaining(), 5);
    }

    #[test]
    fn locked_plot_rejects_actions() {
        let mut plot = Plot::new(0, true);
        assert_eq!(plot.water(20, pay_ok), Err(ActionFailure::PlotLocked));
        assert_eq!(
            plot.sow(carrot(), Utc::now(), pay_ok),
            Err(ActionFailure::PlotLocked),
        );
    }

    #[test]
    fn watering_sets_and_resets_the_soak_timer() {
        let mut plot = Plot::new(0, false);
        assert!(plot.water(20, pay_ok).is_ok());
        assert!(plot.is_wet());
        assert_eq!(plot.wet_secs_remaining(), 20);

        plot.advance(5, 1);
        assert_eq!(plot.wet_secs_remaining(), 15);

        // Already wet: a second watering fails before payment is attempted.
        assert_eq!(plot.water(20, pay_ok), Err(ActionFailure::PlotAlreadyWet));
        assert_eq!(plot.wet_secs_remaining(), 15);
    }

    #[test]
    fn moisture_drains_and_clears_wetness() {
        let mut plot = Plot::new(0, false);
        assert!(plot.water(3, pay_ok).is_ok());
        plot.advance(2, 1);
        assert!(plot.is_wet());
        plot.advance(2, 1);
        assert!(!plot.is_wet());
        assert_eq!(plot.wet_secs_remaining(), 0);
    }

    #[test]
    fn failed_payment_leaves_plot_dry() {
        let mut plot = Plot::new(0, false);
        let result = plot.water(20, || {
            Err(ActionFailure::InsufficientResource(
                verdant_types::ResourceKind::Water,
            ))
        });
        assert!(result.is_err());
        assert!(!plot.is_wet());
    }

    #[test]
    fn sow_rejects_occupied_plot() {
        let mut plot = Plot::new(0, false);
        assert!(plot.sow(carrot(), Utc::now(), pay_ok).is_ok());
        assert_eq!(
            plot.sow(carrot(), Utc::now(), pay_ok),
            Err(ActionFailure::PlotOccupied),
        );
    }

    #[test]
    fn failed_seed_spend_leaves_plot_empty() {
        let mut plot = Plot::new(0, false);
        let result = plot.sow(carrot(), Utc::now(), || {
            Err(ActionFailure::InsufficientInventory)
        });
        assert!(result.is_err());
        assert!(plot.plant().is_none());
    }

    #[test]
    fn harvest_requires_a_mature_plant() {
        let mut plot = Plot::new(0, false);
        assert_eq!(plot.harvest(), Err(ActionFailure::PlotEmpty));

        assert!(plot.sow(carrot(), Utc::now(), pay_ok).is_ok());
        assert_eq!(plot.harvest(), Err(ActionFailure::PlotNotMature));

        assert!(plot.water(20, pay_ok).is_ok());
        plot.advance(10, 1);
        assert_eq!(plot.harvest(), Ok(dec!(20)));
        assert!(plot.plant().is_none());
    }

    #[test]
    fn dry_plot_stalls_growth() {
        let mut plot = Plot::new(0, false);
        assert!(plot.sow(carrot(), Utc::now(), pay_ok).is_ok());
        plot.advance(10, 1);
        let plant = plot.plant().unwrap();
        assert_eq!(plant.accumulated_growth(), 0);
    }

    #[test]
    fn drying_tick_contributes_no_growth() {
        let mut plot = Plot::new(0, false);
        assert!(plot.sow(carrot(), Utc::now(), pay_ok).is_ok());
        assert!(plot.water(1, pay_ok).is_ok());
        // Moisture hits zero this step; the plant sees a dry plot.
        plot.advance(1, 1);
        assert_eq!(plot.plant().unwrap().accumulated_growth(), 0);
    }

    #[test]
    fn unlock_is_one_way() {
        let mut plot = Plot::new(3, true);
        assert!(plot.unlock(pay_ok).is_ok());
        assert!(!plot.is_locked());
        assert_eq!(plot.unlock(pay_ok), Err(ActionFailure::UnlockOutOfOrder));
    }

    #[test]
    fn failed_unlock_payment_keeps_the_lock() {
        let mut plot = Plot::new(3, true);
        let result = plot.unlock(|| Err(ActionFailure::InsufficientFunds));
        assert!(result.is_err());
        assert!(plot.is_locked());
    }

    #[test]
    fn snapshot_roundtrip_without_plant() {
        let mut plot = Plot::new(1, false);
        assert!(plot.water(20, pay_ok).is_ok());
        let snapshot = plot.to_snapshot();
        let restored = Plot::from_snapshot_shell(snapshot.index, &snapshot);
        assert_eq!(restored.index(), 1);
        assert!(restored.is_wet());
        assert_eq!(restored.wet_secs_remaining(), 20);
    }

    #[test]
    fn restoring_a_dry_record_discards_a_stale_soak_counter() {
        let snapshot = PlotSnapshot {
            index: 0,
            is_wet: false,
            wet_secs_remaining: 15,
            is_locked: false,
            plant: None,
        };
        let restored = Plot::from_snapshot_shell(0, &snapshot);
        assert!(!restored.is_wet());
        assert_eq!(restored.wet_secs_remaining(), 0);
        assert_eq!(restored.to_snapshot().wet_secs_remaining, 0);
    }
}
