use std::num::NonZeroU32;

use super::DEFAULT_FALL_INTERVAL;

/// Turns a frame counter into gravity events every `interval` frames.
#[derive(Clone, Debug)]
pub struct TickScheduler {
    interval: NonZeroU32,
    frame: u64,
}

impl TickScheduler {
    pub fn new(interval: NonZeroU32) -> Self {
        Self { interval, frame: 0 }
    }

    /// Reports whether gravity fires on the current frame, then moves to the
    /// next one. Frame 0 fires.
    pub fn advance(&mut self) -> bool {
        let fires = self.frame % u64::from(self.interval.get()) == 0;
        self.frame += 1;
        fires
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn interval(&self) -> NonZeroU32 {
        self.interval
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FALL_INTERVAL)
    }
}
