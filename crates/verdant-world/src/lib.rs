//! Plots and plant growth for the Verdant garden simulation.
//!
//! This crate models the grid of land the player works: each [`Plot`] holds
//! soil moisture state, a lock gate, and at most one [`Plant`] accumulating
//! growth while the soil is wet.
//!
//! # Modules
//!
//! - [`plant`] -- The growth state machine for one crop instance, plus the
//!   derived views (percentage, stage, icon, render scale) a front end needs.
//! - [`plot`] -- Soil moisture countdown, the lock gate, and the plant
//!   lifecycle (sow, water, harvest, unlock).
//!
//! Growth-rate policy lives above this crate: the engine decides the
//! uniform growth multiplier per tick (sunlight boost) and passes it down,
//! because sun consumption is accounted once globally, not once per plant.

pub mod plant;
pub mod plot;

pub use plant::{Plant, SEEDLING_ICON, SEEDLING_PCT_CUTOFF};
pub use plot::Plot;
