//! Shared type definitions for the Verdant garden simulation.
//!
//! This crate is the single source of truth for the types used across the
//! workspace: identifiers, content definitions, event payloads, failure
//! codes, and persistence records. It holds no behavior beyond derived
//! views and serde.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`enums`] -- Resource kinds, task categories, and failure codes
//! - [`defs`] -- Static content definitions (crops, tasks, stories, shop)
//! - [`events`] -- Events, per-tick deltas, and action receipts
//! - [`snapshot`] -- Persistence snapshot records

pub mod defs;
pub mod enums;
pub mod events;
pub mod ids;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use defs::{PlantDef, RewardBundle, ShopListing, StoryDef, TaskDef};
pub use enums::{ActionFailure, ResourceKind, TaskCategory};
pub use events::{ActionReceipt, GardenEvent, PlantDelta, PlotDelta, TickSummary};
pub use ids::{CropId, StoryId, TaskId};
pub use snapshot::{GardenSnapshot, LedgerSnapshot, PlantSnapshot, PlotSnapshot, TaskSnapshot};
