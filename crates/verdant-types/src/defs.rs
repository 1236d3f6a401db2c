//! Static content definitions: crops, tasks, stories, and the shop catalog.
//!
//! These are loaded once from configuration at startup and shared immutably
//! for the lifetime of the engine. No simulation operation mutates them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::TaskCategory;
use crate::ids::{CropId, StoryId, TaskId};

// ---------------------------------------------------------------------------
// Crops
// ---------------------------------------------------------------------------

/// Static definition of one crop type.
///
/// Instances are shared by reference (`Arc<PlantDef>`) across every plant
/// of the same crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantDef {
    /// Identifier, matching the key in the plant table.
    pub id: CropId,
    /// Display name.
    pub name: String,
    /// Icon shown once the plant is past the seedling phase.
    pub icon: String,
    /// Purchase cost of one seed in the shop.
    pub cost: Decimal,
    /// Currency credited when a mature plant is harvested.
    pub sell_price: Decimal,
    /// Effective growth-seconds required to reach maturity.
    pub growth_secs: u64,
    /// Declared water requirement. Part of the schema but not consulted
    /// by growth or planting logic.
    #[serde(default)]
    pub water_req: u32,
    /// Declared sunlight requirement. Part of the schema but not consulted
    /// by growth or planting logic.
    #[serde(default)]
    pub sun_req: u32,
    /// Number of discrete growth stages; the final stage is reserved for
    /// the mature state.
    pub stages: u32,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Resources paid out exactly once when a task completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBundle {
    /// Water credited on completion.
    #[serde(default)]
    pub water: Decimal,
    /// Sunlight credited on completion.
    #[serde(default)]
    pub sun: Decimal,
    /// Currency credited on completion.
    #[serde(default)]
    pub currency: Decimal,
}

/// Static definition of one progression task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
    /// Identifier, unique within the task table.
    pub id: TaskId,
    /// Display description.
    pub description: String,
    /// Which player action advances this task.
    pub category: TaskCategory,
    /// Number of actions required to complete the task.
    pub goal: u32,
    /// Resources paid on completion (a fixed experience bonus is paid
    /// in addition by the tracker).
    #[serde(default)]
    pub reward: RewardBundle,
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

/// Static definition of one narrative entry.
///
/// Stories are purely presentational; the engine records which ones have
/// been unlocked so a front end can show a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDef {
    /// Identifier, unique within the story table.
    pub id: StoryId,
    /// Display title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// The task whose completion unlocks this story. The intro story uses
    /// trigger id 0, which no real task carries.
    pub trigger_task: TaskId,
    /// Optional hint at the task the player should pursue next.
    #[serde(default)]
    pub next_task: Option<TaskId>,
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

/// One row of the shop catalog as presented to a front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopListing {
    /// The purchasable crop.
    pub crop: CropId,
    /// Display name, copied from the crop definition.
    pub name: String,
    /// Icon, copied from the crop definition.
    pub icon: String,
    /// Seed price.
    pub cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_def_requirement_fields_default() {
        // Older content tables may omit the inert requirement fields.
        let json = r#"{
            "id": "carrot",
            "name": "Carrot",
            "icon": "X",
            "cost": "10",
            "sell_price": "20",
            "growth_secs": 10,
            "stages": 3
        }"#;
        let def: Result<PlantDef, _> = serde_json::from_str(json);
        let def = def.ok();
        assert!(def.is_some());
        if let Some(def) = def {
            assert_eq!(def.water_req, 0);
            assert_eq!(def.sun_req, 0);
        }
    }

    #[test]
    fn reward_bundle_defaults_to_zero() {
        let bundle: Result<RewardBundle, _> = serde_json::from_str("{}");
        assert_eq!(bundle.ok(), Some(RewardBundle::default()));
    }
}
