//! Configuration loading and typed config structures.
//!
//! The engine reads everything tunable from a [`GameConfig`]: timing,
//! starting balances, grid layout, the plant table, the shop catalog, and
//! the task and story content tables. The built-in [`Default`] mirrors the
//! reference content (carrot/rose/corn on a 4x3 grid); a YAML file can
//! override any section.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use verdant_types::{
    CropId, PlantDef, RewardBundle, StoryDef, StoryId, TaskCategory, TaskDef, TaskId,
};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// The configuration parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSettings {
    /// Simulated seconds per tick.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
        }
    }
}

const fn default_tick_secs() -> u64 {
    1
}

/// Starting balances and passive regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceSettings {
    /// Currency at the start of a fresh game.
    #[serde(default = "default_initial_currency")]
    pub initial_currency: Decimal,
    /// Water at the start of a fresh game.
    #[serde(default = "default_initial_water")]
    pub initial_water: Decimal,
    /// Sunlight at the start of a fresh game.
    #[serde(default = "default_initial_sun")]
    pub initial_sun: Decimal,
    /// Simulated seconds per unit of passive water regeneration.
    /// Zero disables regeneration. Sunlight never regenerates.
    #[serde(default = "default_water_regen_secs")]
    pub water_regen_secs: u64,
    /// Seeds granted at the start of a fresh game.
    #[serde(default = "default_starting_inventory")]
    pub starting_inventory: BTreeMap<CropId, u32>,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            initial_currency: default_initial_currency(),
            initial_water: default_initial_water(),
            initial_sun: default_initial_sun(),
            water_regen_secs: default_water_regen_secs(),
            starting_inventory: default_starting_inventory(),
        }
    }
}

fn default_initial_currency() -> Decimal {
    Decimal::new(100, 0)
}

fn default_initial_water() -> Decimal {
    Decimal::new(50, 0)
}

fn default_initial_sun() -> Decimal {
    Decimal::new(50, 0)
}

const fn default_water_regen_secs() -> u64 {
    60
}

fn default_starting_inventory() -> BTreeMap<CropId, u32> {
    let mut inventory = BTreeMap::new();
    inventory.insert(CropId::new("carrot"), 2);
    inventory
}

/// Grid layout and land costs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GardenSettings {
    /// Grid rows.
    #[serde(default = "default_rows")]
    pub rows: u32,
    /// Grid columns.
    #[serde(default = "default_cols")]
    pub cols: u32,
    /// How many plots start unlocked, counted from index 0.
    #[serde(default = "default_initial_unlocked")]
    pub initial_unlocked: u32,
    /// Seconds a watered plot stays wet.
    #[serde(default = "default_soak_secs")]
    pub soak_secs: u64,
    /// Water debited per watering.
    #[serde(default = "default_water_cost")]
    pub water_cost: Decimal,
    /// Currency cost of the first locked plot.
    #[serde(default = "default_unlock_base_cost")]
    pub unlock_base_cost: Decimal,
    /// Additional cost per plot index past the first locked one.
    #[serde(default = "default_unlock_step_cost")]
    pub unlock_step_cost: Decimal,
}

impl Default for GardenSettings {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            initial_unlocked: default_initial_unlocked(),
            soak_secs: default_soak_secs(),
            water_cost: default_water_cost(),
            unlock_base_cost: default_unlock_base_cost(),
            unlock_step_cost: default_unlock_step_cost(),
        }
    }
}

const fn default_rows() -> u32 {
    4
}

const fn default_cols() -> u32 {
    3
}

const fn default_initial_unlocked() -> u32 {
    3
}

const fn default_soak_secs() -> u64 {
    20
}

fn default_water_cost() -> Decimal {
    Decimal::new(10, 0)
}

fn default_unlock_base_cost() -> Decimal {
    Decimal::new(50, 0)
}

fn default_unlock_step_cost() -> Decimal {
    Decimal::new(10, 0)
}

// ---------------------------------------------------------------------------
// Top-level configuration
// ---------------------------------------------------------------------------

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Timing settings.
    #[serde(default)]
    pub game: GameSettings,
    /// Starting balances and regeneration.
    #[serde(default)]
    pub resources: ResourceSettings,
    /// Grid layout and land costs.
    #[serde(default)]
    pub garden: GardenSettings,
    /// The plant table, keyed by crop id.
    #[serde(default = "default_plants")]
    pub plants: BTreeMap<CropId, PlantDef>,
    /// Crop ids purchasable in the shop.
    #[serde(default = "default_shop")]
    pub shop: Vec<CropId>,
    /// The task table.
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskDef>,
    /// The story table.
    #[serde(default = "default_stories")]
    pub stories: Vec<StoryDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            resources: ResourceSettings::default(),
            garden: GardenSettings::default(),
            plants: default_plants(),
            shop: default_shop(),
            tasks: default_tasks(),
            stories: default_stories(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn plant(
    id: &str,
    name: &str,
    icon: &str,
    cost: i64,
    sell: i64,
    growth_secs: u64,
    req: u32,
    stages: u32,
) -> (CropId, PlantDef) {
    (
        CropId::new(id),
        PlantDef {
            id: CropId::new(id),
            name: name.to_owned(),
            icon: icon.to_owned(),
            cost: Decimal::new(cost, 0),
            sell_price: Decimal::new(sell, 0),
            growth_secs,
            water_req: req,
            sun_req: req,
            stages,
        },
    )
}

fn default_plants() -> BTreeMap<CropId, PlantDef> {
    BTreeMap::from([
        plant("carrot", "Carrot", "\u{1f955}", 10, 20, 10, 2, 3),
        plant("rose", "Rose", "\u{1f339}", 30, 60, 30, 5, 3),
        plant("corn", "Corn", "\u{1f33d}", 50, 120, 60, 8, 4),
    ])
}

fn default_shop() -> Vec<CropId> {
    vec![CropId::new("carrot"), CropId::new("rose"), CropId::new("corn")]
}

fn task(
    id: u32,
    description: &str,
    category: TaskCategory,
    goal: u32,
    water: i64,
    sun: i64,
    currency: i64,
) -> TaskDef {
    TaskDef {
        id: TaskId::new(id),
        description: description.to_owned(),
        category,
        goal,
        reward: RewardBundle {
            water: Decimal::new(water, 0),
            sun: Decimal::new(sun, 0),
            currency: Decimal::new(currency, 0),
        },
    }
}

fn default_tasks() -> Vec<TaskDef> {
    vec![
        task(1, "First sowing: plant 3 crops", TaskCategory::Planting, 3, 20, 20, 10),
        task(2, "Diligent watering: water 5 times", TaskCategory::Watering, 5, 30, 10, 5),
        task(3, "Harvest time: harvest 2 crops", TaskCategory::Harvesting, 2, 10, 10, 50),
        task(4, "Room to grow: plant 10 crops", TaskCategory::Planting, 10, 50, 50, 100),
        task(5, "Bumper crop: harvest 10 crops", TaskCategory::Harvesting, 10, 50, 50, 200),
    ]
}

fn story(id: u32, title: &str, body: &str, trigger: u32, next: Option<u32>) -> StoryDef {
    StoryDef {
        id: StoryId::new(id),
        title: title.to_owned(),
        body: body.to_owned(),
        trigger_task: TaskId::new(trigger),
        next_task: next.map(TaskId::new),
    }
}

fn default_stories() -> Vec<StoryDef> {
    vec![
        story(
            1,
            "A New Beginning",
            "Welcome to your little garden. It has lain fallow for years, \
             but it is full of promise. Plant three carrots to get started.",
            0,
            Some(1),
        ),
        story(
            2,
            "The Source of Life",
            "Well done, the seeds are in the ground. Now they need water \
             to grow. Pick up your watering can and give them a drink.",
            1,
            Some(2),
        ),
        story(
            3,
            "The Joy of Harvest",
            "Look how fast they grow! Time to enjoy the fruits of your \
             labor. Go harvest some ripe carrots.",
            2,
            Some(3),
        ),
        story(
            4,
            "Scaling Up",
            "Excellent. You have the basics down. Let's make this garden \
             livelier: try planting a lot more crops.",
            3,
            Some(4),
        ),
    ]
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it does not parse, or
    /// [`ConfigError::Invalid`] if it fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of plots in the grid.
    pub fn plot_count(&self) -> usize {
        usize::try_from(self.garden.rows.saturating_mul(self.garden.cols)).unwrap_or(usize::MAX)
    }

    /// Currency cost to unlock the plot at `index`.
    ///
    /// Plots inside the initially-unlocked range cost nothing; beyond it
    /// the cost rises linearly with the index.
    pub fn unlock_cost(&self, index: usize) -> Decimal {
        let initial = usize::try_from(self.garden.initial_unlocked).unwrap_or(usize::MAX);
        if index < initial {
            return Decimal::ZERO;
        }
        let steps = u64::try_from(index.saturating_sub(initial)).unwrap_or(u64::MAX);
        self.garden
            .unlock_base_cost
            .saturating_add(self.garden.unlock_step_cost.saturating_mul(Decimal::from(steps)))
    }

    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.tick_secs == 0 {
            return Err(invalid("game.tick_secs must be at least 1"));
        }
        if self.garden.rows == 0 || self.garden.cols == 0 {
            return Err(invalid("garden grid must have at least one plot"));
        }
        let initial = usize::try_from(self.garden.initial_unlocked).unwrap_or(usize::MAX);
        if initial > self.plot_count() {
            return Err(invalid(
                "garden.initial_unlocked exceeds the number of plots",
            ));
        }

        for (key, def) in &self.plants {
            if *key != def.id {
                return Err(ConfigError::Invalid {
                    reason: format!("plant table key {key} does not match def id {}", def.id),
                });
            }
            if def.growth_secs == 0 {
                return Err(ConfigError::Invalid {
                    reason: format!("plant {key} must have a non-zero growth time"),
                });
            }
            if def.stages < 2 {
                return Err(ConfigError::Invalid {
                    reason: format!("plant {key} needs at least 2 stages"),
                });
            }
        }

        for crop in &self.shop {
            if !self.plants.contains_key(crop) {
                return Err(ConfigError::Invalid {
                    reason: format!("shop catalog references unknown crop {crop}"),
                });
            }
        }
        for crop in self.resources.starting_inventory.keys() {
            if !self.plants.contains_key(crop) {
                return Err(ConfigError::Invalid {
                    reason: format!("starting inventory references unknown crop {crop}"),
                });
            }
        }

        let mut task_ids = std::collections::BTreeSet::new();
        for def in &self.tasks {
            if def.goal == 0 {
                return Err(ConfigError::Invalid {
                    reason: format!("task {} must have a non-zero goal", def.id),
                });
            }
            if !task_ids.insert(def.id) {
                return Err(ConfigError::Invalid {
                    reason: format!("duplicate task id {}", def.id),
                });
            }
        }

        for def in &self.stories {
            // Trigger 0 is the reserved intro trigger; anything else must
            // name a real task or the story could never unlock.
            if def.trigger_task.into_inner() != 0 && !task_ids.contains(&def.trigger_task) {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "story {} is triggered by unknown task {}",
                        def.id, def.trigger_task
                    ),
                });
            }
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}
