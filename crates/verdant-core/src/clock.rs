//! The garden clock: tick counter and tick period.
//!
//! The clock is the single source of truth for simulation time. It counts
//! ticks with checked arithmetic and carries the configured tick period so
//! the engine can translate ticks into simulated seconds. Wall-clock time
//! never drives the simulation; an external scheduler decides when a tick
//! happens, the clock only records that it did.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid timing configuration.
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tick counter for the garden simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GardenClock {
    /// Current tick number, 0 before the first tick.
    tick: u64,
    /// Simulated seconds per tick (from configuration).
    tick_secs: u64,
}

impl GardenClock {
    /// Create a clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `tick_secs` is zero.
    pub fn new(tick_secs: u64) -> Result<Self, ClockError> {
        Self::from_parts(0, tick_secs)
    }

    /// Create a clock from explicit parts (state restoration, tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `tick_secs` is zero.
    pub fn from_parts(tick: u64, tick_secs: u64) -> Result<Self, ClockError> {
        if tick_secs == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "tick_secs must be at least 1".to_owned(),
            });
        }
        Ok(Self { tick, tick_secs })
    }

    /// Current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds per tick.
    pub const fn tick_secs(&self) -> u64 {
        self.tick_secs
    }

    /// Advance the clock by one tick, returning the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] at `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero_and_counts() {
        let clock = GardenClock::new(1).ok();
        assert!(clock.is_some());
        if let Some(mut clock) = clock {
            assert_eq!(clock.tick(), 0);
            assert_eq!(clock.advance().ok(), Some(1));
            assert_eq!(clock.advance().ok(), Some(2));
        }
    }

    #[test]
    fn zero_period_is_rejected() {
        assert!(GardenClock::new(0).is_err());
    }

    #[test]
    fn advance_detects_overflow() {
        let clock = GardenClock::from_parts(u64::MAX, 1).ok();
        assert!(clock.is_some());
        if let Some(mut clock) = clock {
            assert!(clock.advance().is_err());
        }
    }
}
