//! Elapsed working-time counter.
//!
//! The clock is driven by an external one-second tick (the Presentation
//! Layer's timer); it never reads the wall clock itself and is never loaded
//! from persisted state; every process starts at zero.

/// Monotonic elapsed-seconds counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionClock {
    elapsed: u64,
}

impl SessionClock {
    pub fn new() -> Self {
        SessionClock::default()
    }

    /// Seconds elapsed since process start (or the last reset).
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Advance by one second. Called once per wall-clock second; no upper
    /// bound.
    pub fn tick(&mut self) {
        self.elapsed += 1;
    }

    /// Set elapsed time back to zero.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Render as zero-padded `HH:MM:SS` with an unbounded hour count.
    pub fn format(&self) -> String {
        let hours = self.elapsed / 3600;
        let minutes = (self.elapsed % 3600) / 60;
        let seconds = self.elapsed % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}
