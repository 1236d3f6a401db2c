//! Tick cycle, configuration, progression, and the engine for the Verdant
//! garden simulation.
//!
//! This crate owns the [`engine::GardenEngine`], the single owner of all
//! simulation state. The engine serializes every mutation: the tick
//! pipeline (clock, water regeneration, sunlight boost, plot growth) and
//! each player action run to completion before the next begins, and both
//! report what happened as events rather than performing side effects.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter with the configured tick period.
//! - [`config`] -- Configuration loading from YAML into strongly-typed
//!   structs, with built-in defaults for every content table.
//! - [`engine`] -- The garden engine: tick pipeline, player actions,
//!   snapshot and restore.
//! - [`shop`] -- The seed shop catalog and purchases.
//! - [`story`] -- Narrative unlocks keyed by task completion.
//! - [`tasks`] -- Progression tasks with exactly-once reward payout.

pub mod clock;
pub mod config;
pub mod engine;
pub mod shop;
pub mod story;
pub mod tasks;
