//! Battery monitor for a Feather ESP32. VBAT is on GPIO35 (A13) through a 100K/100K divider.
//! TODO: put the monitor on its own thread once there is something else in this loop
mod adc;

use std::thread::sleep;
use std::time::Duration;

use esp_idf_svc::hal::prelude::Peripherals;
use lipo_battery_core::{clock::StdClock, BatteryMonitor, MonitorConfig};
use log::{error, info, warn};

use crate::adc::IdfBatterySensor;

/// how often we call tick. the monitor decides when to actually sample
const LOOP_MS: u64 = 50;

fn main() -> eyre::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("Hello, battery!");

    let peripherals = Peripherals::take()?;

    let sensor = IdfBatterySensor::new(peripherals.adc1, peripherals.pins.gpio35);
    let channel = sensor.channel();

    let mut monitor = BatteryMonitor::new(sensor, StdClock::new());

    monitor.set_changed_handler(|m| {
        info!(
            "battery {} -> {}: {}% {}mV",
            m.previous_state(),
            m.state(),
            m.percentage(),
            m.millivolts()
        );
    });
    monitor.set_low_handler(|m| warn!("battery low: {}%", m.percentage()));
    monitor.set_critical_handler(|m| error!("battery critical: {}mV", m.millivolts()));
    monitor.set_charging_handler(|_| info!("charging"));

    monitor.initialize(channel, MonitorConfig::default())?;

    info!("battery: {:?}", monitor.reading());

    loop {
        // a failed read is retried on the next poll. nothing else on this board depends on the battery
        if let Err(err) = monitor.tick() {
            error!("battery tick failed: {err}");
        }

        sleep(Duration::from_millis(LOOP_MS));
    }
}
