//! The growth state machine for one crop instance.
//!
//! A plant accumulates effective growth-seconds while its plot is wet.
//! Growth is monotonically non-decreasing and freezes permanently at
//! maturity -- no overflow past the requirement, no decay. Everything else
//! here (percentage, stage, icon, scale) is a pure derived view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use verdant_types::{PlantDef, PlantDelta, PlantSnapshot};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Icon shown while growth is below [`SEEDLING_PCT_CUTOFF`].
pub const SEEDLING_ICON: &str = "\u{1f331}";

/// Growth percentage at which the display switches from the seedling icon
/// to the crop's own icon, and the scale curve changes slope.
pub const SEEDLING_PCT_CUTOFF: u64 = 60;

// ---------------------------------------------------------------------------
// Plant
// ---------------------------------------------------------------------------

/// One crop instance growing on a plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    /// The static crop definition, shared with every plant of this type.
    crop: Arc<PlantDef>,
    /// When the seed was planted. Informational only; growth is driven by
    /// accumulated effective seconds, never by wall-clock time.
    planted_at: DateTime<Utc>,
    /// Effective growth-seconds accumulated so far.
    accumulated_growth: u64,
}

impl Plant {
    /// Create a freshly planted seed with zero accumulated growth.
    pub const fn new(crop: Arc<PlantDef>, planted_at: DateTime<Utc>) -> Self {
        Self {
            crop,
            planted_at,
            accumulated_growth: 0,
        }
    }

    /// Rebuild a plant from its persisted state.
    pub const fn from_snapshot(crop: Arc<PlantDef>, snapshot: &PlantSnapshot) -> Self {
        Self {
            crop,
            planted_at: match snapshot.planted_at {
                Some(at) => at,
                None => DateTime::UNIX_EPOCH,
            },
            accumulated_growth: snapshot.accumulated_growth,
        }
    }

    /// The static crop definition.
    pub fn crop(&self) -> &Arc<PlantDef> {
        &self.crop
    }

    /// When the seed was planted.
    pub const fn planted_at(&self) -> DateTime<Utc> {
        self.planted_at
    }

    /// Effective growth-seconds accumulated so far.
    pub const fn accumulated_growth(&self) -> u64 {
        self.accumulated_growth
    }

    /// Advance growth by one simulation step.
    ///
    /// Mature plants never accumulate further. Growth only occurs while
    /// the owning plot is wet; a dry plot stalls the plant regardless of
    /// the multiplier. The multiplier is decided by the engine (2 while
    /// the sunlight boost is active and funded, else 1) so that sun is
    /// consumed once globally rather than once per plant.
    pub fn advance(&mut self, seconds: u64, plot_is_wet: bool, growth_multiplier: u32) {
        if self.is_mature() || !plot_is_wet {
            return;
        }
        let gained = seconds.saturating_mul(u64::from(growth_multiplier));
        self.accumulated_growth = self.accumulated_growth.saturating_add(gained);
    }

    /// Whether accumulated growth has reached the crop's requirement.
    pub fn is_mature(&self) -> bool {
        self.accumulated_growth >= self.crop.growth_secs
    }

    /// Growth progress in percent, clamped to 100.
    pub fn growth_percentage(&self) -> Decimal {
        if self.crop.growth_secs == 0 {
            return Decimal::ONE_HUNDRED;
        }
        let raw = Decimal::from(self.accumulated_growth)
            .saturating_mul(Decimal::ONE_HUNDRED)
            .checked_div(Decimal::from(self.crop.growth_secs))
            .unwrap_or(Decimal::ONE_HUNDRED);
        raw.min(Decimal::ONE_HUNDRED)
    }

    /// Discrete growth stage in `1..=stages`.
    ///
    /// The final stage is reserved for maturity; immature progress maps
    /// onto `1..stages` proportionally.
    pub fn stage(&self) -> u32 {
        if self.is_mature() || self.crop.growth_secs == 0 {
            return self.crop.stages;
        }
        // floor(progress-fraction * (stages - 1)) + 1, in exact integer math.
        let sub_stages = u64::from(self.crop.stages.saturating_sub(1));
        let index = self
            .accumulated_growth
            .saturating_mul(sub_stages)
            .checked_div(self.crop.growth_secs)
            .unwrap_or(0);
        u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Icon to display: a seedling early on, the crop's icon from 60%.
    pub fn display_icon(&self) -> &str {
        if self.growth_percentage() < Decimal::from(SEEDLING_PCT_CUTOFF) {
            SEEDLING_ICON
        } else {
            &self.crop.icon
        }
    }

    /// Render scale for a smooth size transition.
    ///
    /// Interpolates linearly from 0.5 to 0.8 over the seedling phase
    /// (below 60%), then from 0.8 to 1.0 over the rest.
    pub fn visual_scale(&self) -> Decimal {
        let pct = self.growth_percentage();
        let cutoff = Decimal::from(SEEDLING_PCT_CUTOFF);
        if pct < cutoff {
            // 0.5 + (pct / 60) * 0.3
            let ramp = pct
                .saturating_mul(Decimal::new(3, 1))
                .checked_div(cutoff)
                .unwrap_or(Decimal::ZERO);
            Decimal::new(5, 1).saturating_add(ramp)
        } else {
            // 0.8 + ((pct - 60) / 40) * 0.2
            let span = Decimal::ONE_HUNDRED.saturating_sub(cutoff);
            let ramp = pct
                .saturating_sub(cutoff)
                .saturating_mul(Decimal::new(2, 1))
                .checked_div(span)
                .unwrap_or(Decimal::ZERO);
            Decimal::new(8, 1).saturating_add(ramp)
        }
    }

    /// Assemble the per-tick visual delta for this plant.
    pub fn delta(&self) -> PlantDelta {
        PlantDelta {
            crop: self.crop.id.clone(),
            growth_pct: self.growth_percentage(),
            stage: self.stage(),
            icon: self.display_icon().to_owned(),
            scale: self.visual_scale(),
            mature: self.is_mature(),
        }
    }

    /// Capture the plant as a snapshot record.
    pub fn to_snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            crop: self.crop.id.clone(),
            accumulated_growth: self.accumulated_growth,
            planted_at: Some(self.planted_at),
        }
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

    fn corn() -> Arc<PlantDef> {
        Arc::new(PlantDef {
            id: CropId::new("corn"),
            name: "Corn".to_owned(),
            icon: "\u{1f33d}".to_owned(),
            cost: dec!(50),
            sell_price: dec!(120),
            growth_secs: 60,
            water_req: 8,
            sun_req: 8,
            stages: 4,
        })
    }

    #[test]
    fn no_growth_while_dry() {
        let mut plant = Plant::new(carrot(), Utc::now());
        plant.advance(5, false, 1);
        assert_eq!(plant.accumulated_growth(), 0);
        plant.advance(5, false, 2);
        assert_eq!(plant.accumulated_growth(), 0);
    }

    #[test]
    fn growth_accumulates_while_wet() {
        let mut plant = Plant::new(carrot(), Utc::now());
        plant.advance(1, true, 1);
        plant.advance(1, true, 1);
        assert_eq!(plant.accumulated_growth(), 2);
        assert!(!plant.is_mature());
    }

    #[test]
    fn boost_multiplier_doubles_growth() {
        let mut plant = Plant::new(carrot(), Utc::now());
        plant.advance(3, true, 2);
        assert_eq!(plant.accumulated_growth(), 6);
    }

    #[test]
    fn growth_freezes_at_maturity() {
        let mut plant = Plant::new(carrot(), Utc::now());
        plant.advance(10, true, 1);
        assert!(plant.is_mature());
        let at_maturity = plant.accumulated_growth();
        plant.advance(100, true, 2);
        assert_eq!(plant.accumulated_growth(), at_maturity);
    }

    #[test]
    fn growth_is_monotonic() {
        let mut plant = Plant::new(corn(), Utc::now());
        let mut last = 0;
        for tick in 0..80 {
            plant.advance(1, tick % 3 != 0, 1);
            assert!(plant.accumulated_growth() >= last);
            last = plant.accumulated_growth();
        }
    }

    #[test]
    fn percentage_is_clamped_to_one_hundred() {
        let mut plant = Plant::new(carrot(), Utc::now());
        assert_eq!(plant.growth_percentage(), Decimal::ZERO);
        plant.advance(7, true, 2); // overshoots 10 required seconds
        assert_eq!(plant.growth_percentage(), dec!(100));
    }

    #[test]
    fn stage_maps_progress_onto_substages() {
        // Carrot: 3 stages, 10 growth seconds. Stage 3 is maturity-only.
        let mut plant = Plant::new(carrot(), Utc::now());
        assert_eq!(plant.stage(), 1);
        plant.advance(5, true, 1); // 50%
        assert_eq!(plant.stage(), 2);
        plant.advance(4, true, 1); // 90%, still immature
        assert_eq!(plant.stage(), 2);
        plant.advance(1, true, 1); // mature
        assert_eq!(plant.stage(), 3);
    }

    #[test]
    fn icon_switches_at_sixty_percent() {
        let mut plant = Plant::new(carrot(), Utc::now());
        plant.advance(5, true, 1); // 50%
        assert_eq!(plant.display_icon(), SEEDLING_ICON);
        plant.advance(1, true, 1); // 60%
        assert_eq!(plant.display_icon(), "\u{1f955}");
    }

    #[test]
    fn scale_interpolates_in_two_segments() {
        let mut plant = Plant::new(carrot(), Utc::now());
        assert_eq!(plant.visual_scale(), dec!(0.5));
        plant.advance(3, true, 1); // 30%: 0.5 + 0.15
        assert_eq!(plant.visual_scale(), dec!(0.65));
        plant.advance(3, true, 1); // 60%: start of the second segment
        assert_eq!(plant.visual_scale(), dec!(0.8));
        plant.advance(2, true, 1); // 80%: 0.8 + 0.1
        assert_eq!(plant.visual_scale(), dec!(0.9));
        plant.advance(2, true, 1); // 100%
        assert_eq!(plant.visual_scale(), dec!(1.0));
    }

    #[test]
    fn snapshot_roundtrip() {
        let mut plant = Plant::new(carrot(), Utc::now());
        plant.advance(4, true, 1);
        let snapshot = plant.to_snapshot();
        let restored = Plant::from_snapshot(carrot(), &snapshot);
        assert_eq!(restored.accumulated_growth(), 4);
        assert_eq!(restored.crop().id, CropId::new("carrot"));
    }
}
