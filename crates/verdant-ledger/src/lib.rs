//! Resource accounting for the Verdant garden simulation.
//!
//! The [`ResourceLedger`] is the single holder of all global player state:
//! currency, water, sunlight, the seed inventory, experience and level, and
//! the sunlight-boost toggle.
//!
//! # Design
//!
//! - **All-or-nothing**: a spend that cannot be covered fails without
//!   mutating anything. There is never a partial deduction.
//! - **Never negative**: no operation can drive a balance below zero.
//! - **Precision**: balances use [`Decimal`] -- no floating point.
//! - **Serialized mutation**: the ledger is plain `&mut self` state. The
//!   engine owns exactly one instance and interleaves actions and ticks on
//!   a single logical thread; under real threads, callers must serialize
//!   access (one mutation lock or a single-consumer command queue).
//!
//! [`Decimal`]: rust_decimal::Decimal

pub mod ledger;

pub use ledger::ResourceLedger;

/// Experience required to advance from `level` to `level + 1`.
///
/// The formula is linear in the current level: `100 * level`.
pub const fn level_threshold(level: u32) -> u32 {
    100u32.saturating_mul(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_scale_linearly() {
        assert_eq!(level_threshold(1), 100);
        assert_eq!(level_threshold(2), 200);
        assert_eq!(level_threshold(10), 1000);
    }
}
