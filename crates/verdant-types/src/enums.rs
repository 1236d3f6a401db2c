//! Enumeration types for the garden simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resource kinds
// ---------------------------------------------------------------------------

/// A spendable global resource tracked by the ledger.
///
/// Seeds are inventory items, not resources; experience and level are
/// progression state with their own operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Coins earned by harvesting and spent in the shop and on land.
    Currency,
    /// Water spent to soak plots; regenerates passively over time.
    Water,
    /// Sunlight consumed by the global growth boost; does not regenerate.
    Sun,
}

// ---------------------------------------------------------------------------
// Task categories
// ---------------------------------------------------------------------------

/// The kind of player action a task counts.
///
/// One player action advances every open task of the matching category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Counts seeds planted.
    Planting,
    /// Counts plots watered.
    Watering,
    /// Counts mature plants harvested.
    Harvesting,
}

// ---------------------------------------------------------------------------
// Action failures
// ---------------------------------------------------------------------------

/// Reason code for a rejected player action.
///
/// Every failure is an expected, recoverable condition: state is left
/// untouched and the code is purely informational. A front end maps these
/// to user-facing messages; the core never produces display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ActionFailure {
    /// Not enough currency to pay a cost.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Not enough of a non-currency resource (water or sun).
    #[error("insufficient {0:?}")]
    InsufficientResource(ResourceKind),

    /// No seed of the requested crop in the inventory.
    #[error("insufficient inventory")]
    InsufficientInventory,

    /// The crop id is not present in the configured plant table
    /// or shop catalog.
    #[error("unknown crop")]
    UnknownCrop,

    /// The plot is locked and ignores the action.
    #[error("plot is locked")]
    PlotLocked,

    /// The plot already holds a plant.
    #[error("plot is occupied")]
    PlotOccupied,

    /// The plot holds no plant.
    #[error("plot is empty")]
    PlotEmpty,

    /// The plant has not finished growing.
    #[error("plant is not mature")]
    PlotNotMature,

    /// The plot is already soaked.
    #[error("plot is already wet")]
    PlotAlreadyWet,

    /// The plot index is outside the grid.
    #[error("invalid plot index")]
    InvalidPlotIndex,

    /// Plots must be unlocked in ascending index order.
    #[error("plots unlock in order")]
    UnlockOutOfOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_codes_roundtrip_serde() {
        let original = ActionFailure::InsufficientResource(ResourceKind::Sun);
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<ActionFailure, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn category_names_are_snake_case() {
        let json = serde_json::to_string(&TaskCategory::Harvesting).ok();
        assert_eq!(json.as_deref(), Some("\"harvesting\""));
    }
}
