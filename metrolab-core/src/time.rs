//! Time handling for result and project stamping
//!
//! Results and project snapshots carry wall-clock timestamps, but the
//! core never reads ambient time directly. Callers inject a [`Clock`]
//! so the engine stays deterministic under test and usable on hosts
//! without a system clock.

/// Timestamp in milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Source of timestamps for result and project stamping.
pub trait Clock {
    /// Get the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// System clock (requires std).
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed clock for tests and hosts that stamp time externally.
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    /// Create a clock pinned to `timestamp`.
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Pin the clock to a new timestamp.
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}
