//! Event and summary types emitted by the engine.
//!
//! The core separates mutation from presentation: every mutating operation
//! returns its result plus the list of events it produced, and a dispatcher
//! outside the core forwards those events to rendering or notification
//! collaborators. Nothing here performs a side effect.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{CropId, StoryId, TaskId};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A discrete signal for render and notification collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GardenEvent {
    /// The plot grid changed structurally (plant created or removed, plot
    /// unlocked, state restored); a full re-render is required.
    PlotsChanged,

    /// A task reached its goal; its reward has been paid.
    TaskCompleted {
        /// The completed task.
        task: TaskId,
    },

    /// A task completion unlocked a story entry.
    StoryUnlocked {
        /// The unlocked story.
        story: StoryId,
    },

    /// Accumulated experience crossed the level threshold.
    LevelUp {
        /// The level just reached.
        level: u32,
    },

    /// The sunlight boost ran out of sun and was forced off.
    BoostExhausted,
}

// ---------------------------------------------------------------------------
// Per-tick deltas
// ---------------------------------------------------------------------------

/// Visual state of the plant on one plot, derived for incremental updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDelta {
    /// The crop growing here.
    pub crop: CropId,
    /// Growth progress in percent, clamped to 100.
    pub growth_pct: Decimal,
    /// Discrete growth stage, `1..=stages`.
    pub stage: u32,
    /// Icon to display (seedling early, crop icon later).
    pub icon: String,
    /// Render scale for a smooth size transition.
    pub scale: Decimal,
    /// Whether the plant is harvestable.
    pub mature: bool,
}

/// Lightweight per-plot state for incremental re-render after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotDelta {
    /// Grid position of the plot.
    pub index: usize,
    /// Whether the plot is locked.
    pub is_locked: bool,
    /// Whether the soil is currently wet.
    pub is_wet: bool,
    /// Seconds of soak time remaining.
    pub wet_secs_remaining: u64,
    /// The plant on this plot, if any.
    pub plant: Option<PlantDelta>,
}

/// Summary of one executed tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// The tick number that was executed (1-based after the first tick).
    pub tick: u64,
    /// The uniform growth multiplier applied to every plot this tick.
    pub growth_multiplier: u32,
    /// Whether the boost debited sun this tick.
    pub sun_consumed: bool,
    /// Per-plot visual state after the tick.
    pub deltas: Vec<PlotDelta>,
    /// Discrete events raised during the tick.
    pub events: Vec<GardenEvent>,
}

// ---------------------------------------------------------------------------
// Action receipts
// ---------------------------------------------------------------------------

/// Successful outcome of a player action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReceipt {
    /// Currency credited by the action (harvest payout), if any.
    #[serde(default)]
    pub payout: Option<Decimal>,
    /// Events raised by the action, in emission order.
    #[serde(default)]
    pub events: Vec<GardenEvent>,
}

impl ActionReceipt {
    /// A receipt with no payout and no events.
    pub const fn empty() -> Self {
        Self {
            payout: None,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_by_kind() {
        let event = GardenEvent::TaskCompleted { task: TaskId::new(3) };
        let json = serde_json::to_string(&event).ok();
        assert_eq!(
            json.as_deref(),
            Some(r#"{"kind":"task_completed","task":3}"#),
        );
    }

    #[test]
    fn empty_receipt_has_no_events() {
        let receipt = ActionReceipt::empty();
        assert!(receipt.events.is_empty());
        assert!(receipt.payout.is_none());
    }
}
