//! Frame time accounting
//!
//! Everything here is driven by the `delta_time` the frame driver hands to the
//! systems, never by the wall clock, so simulations replay identically.

/// Cooldown gate driven by accumulated frame time
///
/// A freshly created cooldown is ready: the first [`Cooldown::try_trigger`]
/// succeeds immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Cooldown {
    duration: f32,
    elapsed: f32,
}

impl Cooldown {
    /// Create a ready cooldown of `duration` seconds
    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            duration,
            elapsed: duration,
        }
    }

    /// Advance the clock by one frame
    pub fn tick(&mut self, delta_time: f32) {
        if self.elapsed < self.duration {
            self.elapsed += delta_time.max(0.0);
        }
    }

    /// Whether the cooldown interval has fully elapsed since the last trigger
    pub fn is_ready(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Trigger the gate if ready, restarting the interval
    ///
    /// Returns `true` when the trigger was accepted.
    pub fn try_trigger(&mut self) -> bool {
        if self.is_ready() {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Seconds left until the gate opens again
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Configured interval in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Make the gate ready again
    pub fn reset(&mut self) {
        self.elapsed = self.duration;
    }
}

/// Running frame counter and accumulated simulation time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    total_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock at frame zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.total_time += delta_time.max(0.0);
        self.frame_count += 1;
    }

    /// Total simulated seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames recorded
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per simulated second
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
