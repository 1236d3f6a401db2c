//! The garden engine: owns all state and serializes every mutation.
//!
//! # Design
//!
//! The engine is the only place where plots, ledger, tasks, and stories
//! meet. All mutation goes through it: the tick pipeline advances the
//! world, and each player action validates, moves resources atomically,
//! and reports what happened as a list of [`GardenEvent`]s for outside
//! collaborators to render. The engine itself never renders, schedules,
//! or touches storage; persistence is a pair of snapshot conversions.
//!
//! # Tick pipeline
//!
//! Each tick runs a fixed order: advance the clock, regenerate water,
//! settle the sunlight boost (one global sun debit for the whole garden,
//! not one per plant), then advance every plot with the uniform growth
//! multiplier the boost produced. The boost qualifies only when some
//! unlocked plot holds a wet, immature plant; a debit that cannot be
//! covered forces the toggle off and raises [`GardenEvent::BoostExhausted`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use verdant_ledger::ResourceLedger;
use verdant_types::{
    ActionFailure, ActionReceipt, CropId, GardenEvent, GardenSnapshot, PlantDef, ResourceKind,
    ShopListing, TaskCategory, TickSummary,
};
use verdant_world::{Plant, Plot};

use crate::clock::{ClockError, GardenClock};
use crate::config::{ConfigError, GameConfig};
use crate::shop;
use crate::story::{StoryLog, INTRO_TRIGGER};
use crate::tasks::TaskTracker;

/// Experience awarded per harvested plant.
pub const HARVEST_XP: u32 = 5;

/// Sun debited per tick while the boost is active and a plant qualifies.
const BOOST_SUN_COST: Decimal = Decimal::ONE;

/// Growth multiplier while the boost is paid for.
const BOOST_MULTIPLIER: u32 = 2;

/// Errors that can occur while constructing or running an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The clock rejected an operation.
    #[error(transparent)]
    Clock(#[from] ClockError),
}

// ---------------------------------------------------------------------------
// GardenEngine
// ---------------------------------------------------------------------------

/// Owns the complete simulation state and serializes every mutation.
#[derive(Debug)]
pub struct GardenEngine {
    config: GameConfig,
    defs: BTreeMap<CropId, Arc<PlantDef>>,
    clock: GardenClock,
    plots: Vec<Plot>,
    ledger: ResourceLedger,
    tasks: TaskTracker,
    stories: StoryLog,
    /// Seconds accumulated toward the next unit of water regeneration.
    regen_carry: u64,
}

impl GardenEngine {
    /// Build a fresh garden from configuration: starting balances and
    /// seeds in the ledger, the first plots unlocked, everything else
    /// locked, no progress anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration fails
    /// validation.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let defs: BTreeMap<CropId, Arc<PlantDef>> = config
            .plants
            .iter()
            .map(|(id, def)| (id.clone(), Arc::new(def.clone())))
            .collect();

        let ledger = ResourceLedger::new(
            config.resources.initial_currency,
            config.resources.initial_water,
            config.resources.initial_sun,
            config.resources.starting_inventory.clone(),
        );

        let initial = usize::try_from(config.garden.initial_unlocked).unwrap_or(usize::MAX);
        let plots = (0..config.plot_count())
            .map(|index| Plot::new(index, index >= initial))
            .collect();

        let clock = GardenClock::new(config.game.tick_secs)?;
        let tasks = TaskTracker::new(config.tasks.clone());
        let stories = StoryLog::new(config.stories.clone());

        info!(
            plots = config.plot_count(),
            unlocked = config.garden.initial_unlocked,
            "Garden created"
        );

        Ok(Self {
            config,
            defs,
            clock,
            plots,
            ledger,
            tasks,
            stories,
            regen_carry: 0,
        })
    }

    /// Begin play. On a fresh garden this unlocks the intro story; on a
    /// restored garden that already saw it, nothing new unlocks. Always
    /// ends with [`GardenEvent::PlotsChanged`] so the full grid renders.
    pub fn start(&mut self) -> Vec<GardenEvent> {
        let mut events = Vec::new();
        if let Some(story) = self.stories.trigger(INTRO_TRIGGER) {
            events.push(GardenEvent::StoryUnlocked { story });
        }
        events.push(GardenEvent::PlotsChanged);
        events
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The active configuration.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The clock.
    pub const fn clock(&self) -> &GardenClock {
        &self.clock
    }

    /// All plots in grid order.
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// The resource ledger.
    pub const fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// The task tracker.
    pub const fn tasks(&self) -> &TaskTracker {
        &self.tasks
    }

    /// The story log.
    pub const fn stories(&self) -> &StoryLog {
        &self.stories
    }

    /// The seed shop catalog.
    pub fn shop_listings(&self) -> Vec<ShopListing> {
        shop::listings(&self.config)
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Execute one simulation tick covering `seconds` of simulated time.
    ///
    /// The scheduler normally passes the configured tick period (see
    /// [`GardenClock::tick_secs`]), but a catch-up tick after a pause may
    /// cover more.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Clock`] if the tick counter would overflow.
    pub fn tick(&mut self, seconds: u64) -> Result<TickSummary, EngineError> {
        let tick = self.clock.advance()?;
        let mut events = Vec::new();

        self.regenerate_water(seconds);

        // The boost debits sun once for the whole garden, and only while
        // something can actually use the doubled growth.
        let had_sun = self.ledger.sun() >= BOOST_SUN_COST;
        let mut sun_consumed = false;
        if self.ledger.sunlight_boost_enabled() && self.any_boostable_plant() {
            if self.ledger.debit(ResourceKind::Sun, BOOST_SUN_COST).is_ok() {
                sun_consumed = true;
            } else {
                self.ledger.disable_sunlight_boost();
                warn!(tick, "Sunlight boost exhausted; toggle forced off");
                events.push(GardenEvent::BoostExhausted);
            }
        }
        let growth_multiplier = if self.ledger.sunlight_boost_enabled() && had_sun {
            BOOST_MULTIPLIER
        } else {
            1
        };

        for plot in &mut self.plots {
            plot.advance(seconds, growth_multiplier);
        }

        Ok(TickSummary {
            tick,
            growth_multiplier,
            sun_consumed,
            deltas: self.plots.iter().map(Plot::delta).collect(),
            events,
        })
    }

    /// Accumulate tick seconds toward passive water regeneration and credit
    /// any whole units earned. The remainder carries to the next tick.
    fn regenerate_water(&mut self, seconds: u64) {
        let period = self.config.resources.water_regen_secs;
        if period == 0 {
            return;
        }
        self.regen_carry = self.regen_carry.saturating_add(seconds);
        let units = self.regen_carry.checked_div(period).unwrap_or(0);
        self.regen_carry = self.regen_carry.checked_rem(period).unwrap_or(0);
        if units > 0 {
            self.ledger.credit(ResourceKind::Water, Decimal::from(units));
        }
    }

    /// Whether any unlocked plot holds a wet, immature plant.
    fn any_boostable_plant(&self) -> bool {
        self.plots.iter().any(|plot| {
            !plot.is_locked()
                && plot.is_wet()
                && plot.plant().is_some_and(|plant| !plant.is_mature())
        })
    }

    // -----------------------------------------------------------------------
    // Player actions
    // -----------------------------------------------------------------------

    /// Plant a seed from the inventory on the plot at `index`.
    ///
    /// # Errors
    ///
    /// Fails with the specific [`ActionFailure`] when the index is out of
    /// range, the crop is unknown, the plot is locked or occupied, or the
    /// inventory holds no seed. Nothing changes on failure.
    pub fn plant_seed(
        &mut self,
        index: usize,
        crop: &CropId,
    ) -> Result<ActionReceipt, ActionFailure> {
        if index >= self.plots.len() {
            return Err(ActionFailure::InvalidPlotIndex);
        }
        let def = Arc::clone(self.defs.get(crop).ok_or(ActionFailure::UnknownCrop)?);
        let ledger = &mut self.ledger;
        let plot = self
            .plots
            .get_mut(index)
            .ok_or(ActionFailure::InvalidPlotIndex)?;
        plot.sow(def, Utc::now(), || ledger.consume_item(crop))?;

        let mut events = vec![GardenEvent::PlotsChanged];
        events.extend(self.progress_events(TaskCategory::Planting, 1));
        Ok(ActionReceipt {
            payout: None,
            events,
        })
    }

    /// Water the plot at `index`, debiting the configured water cost.
    ///
    /// # Errors
    ///
    /// Fails on a bad index, a locked or already-wet plot, or insufficient
    /// water. Nothing changes on failure.
    pub fn water_plot(&mut self, index: usize) -> Result<ActionReceipt, ActionFailure> {
        let cost = self.config.garden.water_cost;
        let soak_secs = self.config.garden.soak_secs;
        let ledger = &mut self.ledger;
        let plot = self
            .plots
            .get_mut(index)
            .ok_or(ActionFailure::InvalidPlotIndex)?;
        plot.water(soak_secs, || ledger.debit(ResourceKind::Water, cost))?;

        Ok(ActionReceipt {
            payout: None,
            events: self.progress_events(TaskCategory::Watering, 1),
        })
    }

    /// Harvest the mature plant on the plot at `index`, crediting its sell
    /// price and awarding harvest experience.
    ///
    /// # Errors
    ///
    /// Fails on a bad index, an empty plot, or an immature plant. Nothing
    /// changes on failure.
    pub fn harvest_plot(&mut self, index: usize) -> Result<ActionReceipt, ActionFailure> {
        let plot = self
            .plots
            .get_mut(index)
            .ok_or(ActionFailure::InvalidPlotIndex)?;
        let payout = plot.harvest()?;
        self.ledger.credit(ResourceKind::Currency, payout);

        let mut events = vec![GardenEvent::PlotsChanged];
        if let Some(level) = self.ledger.add_experience(HARVEST_XP) {
            events.push(GardenEvent::LevelUp { level });
        }
        events.extend(self.progress_events(TaskCategory::Harvesting, 1));
        Ok(ActionReceipt {
            payout: Some(payout),
            events,
        })
    }

    /// Unlock the plot at `index`, debiting its unlock cost.
    ///
    /// Plots unlock strictly in index order: only the lowest-index locked
    /// plot is purchasable.
    ///
    /// # Errors
    ///
    /// Fails on a bad index, an out-of-order target, or insufficient
    /// currency. Nothing changes on failure.
    pub fn unlock_plot(&mut self, index: usize) -> Result<ActionReceipt, ActionFailure> {
        if index >= self.plots.len() {
            return Err(ActionFailure::InvalidPlotIndex);
        }
        if self.plots.iter().position(Plot::is_locked) != Some(index) {
            return Err(ActionFailure::UnlockOutOfOrder);
        }
        let cost = self.config.unlock_cost(index);
        let ledger = &mut self.ledger;
        let plot = self
            .plots
            .get_mut(index)
            .ok_or(ActionFailure::InvalidPlotIndex)?;
        plot.unlock(|| ledger.debit(ResourceKind::Currency, cost))?;

        Ok(ActionReceipt {
            payout: None,
            events: vec![GardenEvent::PlotsChanged],
        })
    }

    /// Buy one seed of `crop` from the shop.
    ///
    /// # Errors
    ///
    /// Fails when the crop is not in the catalog or currency cannot cover
    /// the cost. Nothing changes on failure.
    pub fn buy_seed(&mut self, crop: &CropId) -> Result<ActionReceipt, ActionFailure> {
        shop::buy_seed(&self.config, &mut self.ledger, crop)?;
        Ok(ActionReceipt::empty())
    }

    /// Turn the sunlight boost on or off.
    ///
    /// # Errors
    ///
    /// Enabling fails with [`ActionFailure::InsufficientResource`] when no
    /// whole unit of sun is available. Disabling always succeeds.
    pub fn set_sunlight_boost(&mut self, enabled: bool) -> Result<ActionReceipt, ActionFailure> {
        if enabled {
            self.ledger.enable_sunlight_boost()?;
        } else {
            self.ledger.disable_sunlight_boost();
        }
        Ok(ActionReceipt::empty())
    }

    /// Run task progress and interleave any story unlock directly after
    /// the completion that triggered it.
    fn progress_events(&mut self, category: TaskCategory, amount: u32) -> Vec<GardenEvent> {
        let raw = self.tasks.record_progress(category, amount, &mut self.ledger);
        let mut events = Vec::with_capacity(raw.len());
        for event in raw {
            let completed = match event {
                GardenEvent::TaskCompleted { task } => Some(task),
                _ => None,
            };
            events.push(event);
            if let Some(task) = completed {
                if let Some(story) = self.stories.trigger(task) {
                    events.push(GardenEvent::StoryUnlocked { story });
                }
            }
        }
        events
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the complete garden state as a snapshot record.
    pub fn snapshot(&self) -> GardenSnapshot {
        GardenSnapshot {
            saved_at: Some(Utc::now()),
            tick: self.clock.tick(),
            plots: self.plots.iter().map(Plot::to_snapshot).collect(),
            ledger: self.ledger.to_snapshot(),
            tasks: self.tasks.to_snapshots(),
            completed_stories: self.stories.history().to_vec(),
        }
    }

    /// Rebuild a garden from configuration plus a saved snapshot.
    ///
    /// Plots restore by position in the snapshot list. A snapshot with
    /// fewer plots than the configured grid backfills the tail with
    /// locked, empty plots; extra records are dropped. A plant whose crop
    /// id is missing from the plant table is dropped with a warning. The
    /// regeneration carry restarts at zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration fails
    /// validation.
    pub fn restore(config: GameConfig, snapshot: &GardenSnapshot) -> Result<Self, EngineError> {
        let mut engine = Self::new(config)?;
        engine.clock = GardenClock::from_parts(snapshot.tick, engine.config.game.tick_secs)?;
        engine.ledger = ResourceLedger::from_snapshot(&snapshot.ledger);
        engine.tasks.apply_snapshots(&snapshot.tasks);
        engine.stories.apply_snapshot(&snapshot.completed_stories);

        let count = engine.config.plot_count();
        let mut plots = Vec::with_capacity(count);
        for (index, record) in snapshot.plots.iter().take(count).enumerate() {
            let mut plot = Plot::from_snapshot_shell(index, record);
            if let Some(plant) = &record.plant {
                engine.defs.get(&plant.crop).map_or_else(
                    || {
                        warn!(
                            plot = index,
                            crop = %plant.crop,
                            "Dropping plant with unknown crop id from save"
                        );
                    },
                    |def| plot.restore_plant(Plant::from_snapshot(Arc::clone(def), plant)),
                );
            }
            plots.push(plot);
        }
        // Saves written against a smaller grid backfill with locked plots.
        for index in plots.len()..count {
            plots.push(Plot::new(index, true));
        }
        engine.plots = plots;
        engine.regen_carry = 0;

        info!(tick = engine.clock.tick(), "Garden restored from snapshot");
        Ok(engine)
    }
}
