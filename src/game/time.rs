//! Game clock
//!
//! Turns wall-clock frame deltas into enemy-phase ticks. The clock only
//! decides *when* a tick is due; the tick itself is run by the session.

use std::time::Duration;

/// Fixed-cadence tick scheduler
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Interval between ticks
    tick_interval: Duration,
    /// Time accumulated since the last tick
    since_last_tick: Duration,
    /// Ticks completed so far
    ticks: u64,
    /// Set once the session is over; no further ticks fire
    stopped: bool,
}

impl GameClock {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            since_last_tick: Duration::ZERO,
            ticks: 0,
            stopped: false,
        }
    }

    /// Advance time and return how many ticks have come due. The
    /// remainder below one interval carries over to the next call.
    pub fn update(&mut self, delta: Duration) -> u32 {
        if self.stopped {
            return 0;
        }
        self.since_last_tick += delta;

        let mut due = 0;
        while self.since_last_tick >= self.tick_interval {
            self.since_last_tick -= self.tick_interval;
            due += 1;
        }
        due
    }

    /// Record a completed tick
    pub fn record_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Stop the scheduler for good
    pub fn stop(&mut self) {
        self.stopped = true;
        self.since_last_tick = Duration::ZERO;
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1)) // Default: tick every second
    }
}
