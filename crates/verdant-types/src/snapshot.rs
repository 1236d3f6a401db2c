//! Persistence snapshot records.
//!
//! A snapshot is a plain structured record of everything needed to resume a
//! garden: plots, ledger, task progress, and unlocked stories. The engine
//! produces and consumes these; reading and writing them (local storage,
//! disk, anywhere) is a collaborator's job.
//!
//! # Compatibility
//!
//! Restoring must tolerate snapshots written by older versions: every
//! optional field defaults (absent lock flag means unlocked, absent
//! experience means zero), and a snapshot with fewer plots than the
//! configured grid is backfilled with locked, empty plots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{CropId, StoryId, TaskId};

/// Serde default for the ledger level field: level is 1-based.
const fn default_level() -> u32 {
    1
}

/// Persisted state of one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    /// The crop type. Restores referencing a crop id absent from the
    /// current plant table drop the plant rather than failing.
    pub crop: CropId,
    /// Effective growth-seconds accumulated so far.
    #[serde(default)]
    pub accumulated_growth: u64,
    /// When the seed was planted. Informational only.
    #[serde(default)]
    pub planted_at: Option<DateTime<Utc>>,
}

/// Persisted state of one plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    /// Grid position.
    pub index: usize,
    /// Whether the soil is wet.
    #[serde(default)]
    pub is_wet: bool,
    /// Seconds of soak time remaining.
    #[serde(default)]
    pub wet_secs_remaining: u64,
    /// Whether the plot is locked. Absent in legacy saves, which predate
    /// locking and therefore default to unlocked.
    #[serde(default)]
    pub is_locked: bool,
    /// The plant on this plot, if any.
    #[serde(default)]
    pub plant: Option<PlantSnapshot>,
}

/// Persisted state of the resource ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Currency balance.
    #[serde(default)]
    pub currency: Decimal,
    /// Water balance.
    #[serde(default)]
    pub water: Decimal,
    /// Sunlight balance.
    #[serde(default)]
    pub sun: Decimal,
    /// Player level, 1-based.
    #[serde(default = "default_level")]
    pub level: u32,
    /// Experience toward the next level. Absent in legacy saves.
    #[serde(default)]
    pub experience: u32,
    /// Seed counts by crop id.
    #[serde(default)]
    pub inventory: BTreeMap<CropId, u32>,
    /// Whether the sunlight boost toggle was on.
    #[serde(default)]
    pub sunlight_boost_enabled: bool,
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            currency: Decimal::ZERO,
            water: Decimal::ZERO,
            sun: Decimal::ZERO,
            level: default_level(),
            experience: 0,
            inventory: BTreeMap::new(),
            sunlight_boost_enabled: false,
        }
    }
}

/// Persisted progress of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// The task this progress belongs to.
    pub id: TaskId,
    /// Progress toward the goal, clamped to it.
    #[serde(default)]
    pub progress: u32,
    /// Whether the reward has been paid. Guards exactly-once payout
    /// across save and reload.
    #[serde(default)]
    pub completed: bool,
}

/// Complete persisted state of a garden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenSnapshot {
    /// When the snapshot was taken. Informational only.
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    /// Tick counter at save time.
    #[serde(default)]
    pub tick: u64,
    /// All plots, in index order. May be shorter than the configured grid.
    #[serde(default)]
    pub plots: Vec<PlotSnapshot>,
    /// Ledger state.
    #[serde(default)]
    pub ledger: LedgerSnapshot,
    /// Task progress. Tasks absent here restore with zero progress.
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
    /// Stories already unlocked, in unlock order.
    #[serde(default)]
    pub completed_stories: Vec<StoryId>,
}
