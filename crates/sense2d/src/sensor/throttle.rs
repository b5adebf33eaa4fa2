//! Check-frequency throttling
//!
//! A full check cycle runs only every `frequency` scheduler ticks. Frame
//! numbers are the clock: the accumulator advances by the frame delta, and a
//! frame number that goes backwards means the scheduler restarted, which
//! resynchronizes the throttle without firing a cycle.

/// Frame-count accumulator gating check cycles.
#[derive(Debug, Clone)]
pub struct FrequencyThrottle {
    frequency: u64,
    last_frame: u64,
    accumulator: u64,
}

impl FrequencyThrottle {
    /// Create a throttle firing every `frequency` ticks (clamped to at
    /// least 1)
    pub fn new(frequency: u32) -> Self {
        Self {
            frequency: u64::from(frequency.max(1)),
            last_frame: 0,
            accumulator: 0,
        }
    }

    /// Advance with the scheduler's frame number; returns `true` when a full
    /// check cycle should run now.
    pub fn should_run(&mut self, frame: u64) -> bool {
        if frame < self.last_frame {
            // Scheduler restarted
            self.last_frame = 0;
            self.accumulator = 0;
            return false;
        }

        self.accumulator += frame - self.last_frame;
        self.last_frame = frame;

        if self.accumulator >= self.frequency {
            self.accumulator = 0;
            return true;
        }
        false
    }

    /// Reset the accumulator state; registrations are not this type's concern
    pub fn reset(&mut self) {
        self.last_frame = 0;
        self.accumulator = 0;
    }

    /// Configured tick interval
    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}
