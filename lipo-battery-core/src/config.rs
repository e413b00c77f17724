use crate::battery::{CRITICAL_THRESHOLD, FULL_THRESHOLD, LevelThresholds};
use crate::errors::BatteryError;

/// fixed once the monitor is initialized
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// minimum time between samples
    pub poll_interval_ms: u32,
    /// raw reading that is 0%
    pub min_level: u16,
    /// raw reading that is 100%
    pub max_level: u16,
    /// the sense pin sits behind a 100K/100K divider, so the calibrated pin voltage is half the battery
    pub divider_ratio: f32,
    pub thresholds: LevelThresholds,
    /// the first sample always moves out of `Unknown`. set this to get callbacks for that move too
    pub notify_on_first_sample: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            min_level: CRITICAL_THRESHOLD,
            max_level: FULL_THRESHOLD,
            divider_ratio: 2.0,
            thresholds: LevelThresholds::default(),
            notify_on_first_sample: false,
        }
    }
}

impl MonitorConfig {
    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u32) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    pub fn with_levels(mut self, min_level: u16, max_level: u16) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    pub fn validate<E>(&self) -> Result<(), BatteryError<E>> {
        if self.min_level == self.max_level {
            return Err(BatteryError::InvalidLevelBounds {
                min: self.min_level,
                max: self.max_level,
            });
        }

        Ok(())
    }
}
