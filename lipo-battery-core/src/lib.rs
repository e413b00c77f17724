//! LiPo state of charge from a raw ADC reading, with edge-triggered callbacks when the battery changes state.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod battery;
pub mod clock;
pub mod config;
pub mod errors;
pub mod level;
pub mod logging;
pub mod monitor;
pub mod sensor;

pub use battery::{BatteryState, LevelThresholds};
pub use config::MonitorConfig;
pub use errors::{BatteryError, BatteryResult};
pub use monitor::{BatteryMonitor, BatteryReading};
