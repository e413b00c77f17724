//! Poll an ADC channel and classify the battery.
//!
//! Call [`BatteryMonitor::tick`] from your main loop as often as you like. It only samples once `poll_interval_ms` has
//! passed, and it calls the registered handlers on the sample where the state changes.
use alloc::boxed::Box;

use crate::battery::BatteryState;
use crate::clock::{Clock, elapsed_since};
use crate::config::MonitorConfig;
use crate::errors::{BatteryError, BatteryResult};
use crate::level::level_to_percentage;
use crate::logging::{debug, info, warn};
use crate::sensor::AnalogSource;

// TODO: why does the linter think this is unused when math functions on f32 are used. something about std being enabled in the linter?
#[allow(unused_imports)]
use micromath::F32Ext;

/// handlers only get a shared reference, so they can read the monitor but never tick it
pub type Handler<S, C> = Box<dyn FnMut(&BatteryMonitor<S, C>)>;

/// everything from the most recent sample
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatteryReading {
    pub raw_level: u16,
    /// battery voltage (after the divider is undone)
    pub millivolts: u32,
    pub percentage: u8,
    pub state: BatteryState,
}

#[derive(Copy, Clone)]
enum Slot {
    Changed,
    Low,
    Critical,
    Charging,
}

pub struct BatteryMonitor<S: AnalogSource, C: Clock> {
    sensor: S,
    clock: C,
    /// None until initialized. sampling is skipped while this is None
    channel: Option<S::Channel>,
    config: MonitorConfig,
    last_read_ms: u32,
    raw_level: u16,
    voltage: f32,
    percentage: u8,
    state: BatteryState,
    previous_state: BatteryState,
    on_changed: Option<Handler<S, C>>,
    on_low: Option<Handler<S, C>>,
    on_critical: Option<Handler<S, C>>,
    on_charging: Option<Handler<S, C>>,
}

impl<S: AnalogSource, C: Clock> BatteryMonitor<S, C> {
    /// not bound to a channel yet. nothing is sampled until [`Self::initialize`]
    pub fn new(sensor: S, clock: C) -> Self {
        Self {
            sensor,
            clock,
            channel: None,
            config: MonitorConfig::default(),
            last_read_ms: 0,
            raw_level: 0,
            voltage: 0.0,
            percentage: 0,
            state: BatteryState::Unknown,
            previous_state: BatteryState::Unknown,
            on_changed: None,
            on_low: None,
            on_critical: None,
            on_charging: None,
        }
    }

    /// [`Self::new`] and [`Self::initialize`] in one go
    pub fn with_channel(
        sensor: S,
        clock: C,
        channel: S::Channel,
        config: MonitorConfig,
    ) -> BatteryResult<Self, S::Error> {
        let mut monitor = Self::new(sensor, clock);

        monitor.initialize(channel, config)?;

        Ok(monitor)
    }

    /// bind the channel, set up the ADC, and take the first sample right away so the getters are valid before the
    /// first tick.
    ///
    /// equal min/max levels are rejected before the hardware is touched. if the ADC setup fails, the channel stays
    /// unbound.
    pub fn initialize(
        &mut self,
        channel: S::Channel,
        config: MonitorConfig,
    ) -> BatteryResult<(), S::Error> {
        config.validate::<S::Error>()?;

        self.sensor.configure(channel).map_err(Self::sensor_error)?;

        self.channel = Some(channel);
        self.config = config;

        info!(
            "battery monitor polling every {}ms. {}..{} is 0..100%",
            config.poll_interval_ms, config.min_level, config.max_level
        );

        self.sample().map(|_| ())
    }

    /// cheap enough to call every loop. returns true if a sample was taken.
    ///
    /// handlers run inline before this returns.
    pub fn tick(&mut self) -> BatteryResult<bool, S::Error> {
        if elapsed_since(self.clock.now_ms(), self.last_read_ms) <= self.config.poll_interval_ms {
            return Ok(false);
        }

        self.sample()
    }

    /// false when no channel is bound.
    ///
    /// the timestamp is recorded before reading, so a failed read is retried on the next due tick, not the next call
    fn sample(&mut self) -> BatteryResult<bool, S::Error> {
        let Some(channel) = self.channel else {
            return Ok(false);
        };

        self.last_read_ms = self.clock.now_ms();

        self.raw_level = self
            .sensor
            .read_raw(channel)
            .map_err(Self::sensor_error)?;

        let pin_millivolts = self
            .sensor
            .raw_to_millivolts(channel, self.raw_level)
            .map_err(Self::sensor_error)?;

        self.voltage = pin_millivolts as f32 * self.config.divider_ratio / 1000.0;

        self.percentage =
            level_to_percentage(self.raw_level, self.config.min_level, self.config.max_level);

        self.update_state();

        debug!(
            "battery raw={} voltage={} percentage={} state={}",
            self.raw_level, self.voltage, self.percentage, self.state
        );

        Ok(true)
    }

    /// memoryless. a level bouncing across a threshold fires on every crossing
    fn update_state(&mut self) {
        let previous = self.state;
        let state = self.config.thresholds.classify(self.raw_level);

        // previous_state is "before this sample", not "last different state"
        self.previous_state = previous;
        self.state = state;

        if state == previous {
            return;
        }

        if previous == BatteryState::Unknown && !self.config.notify_on_first_sample {
            debug!("first battery state is {}", state);
            return;
        }

        info!("battery state {} -> {}", previous, state);

        self.notify(Slot::Changed);

        match state {
            BatteryState::Charging => self.notify(Slot::Charging),
            BatteryState::Critical => self.notify(Slot::Critical),
            BatteryState::Low => self.notify(Slot::Low),
            BatteryState::Ok | BatteryState::Full | BatteryState::Unknown => {}
        }
    }

    fn handler_mut(&mut self, slot: Slot) -> &mut Option<Handler<S, C>> {
        match slot {
            Slot::Changed => &mut self.on_changed,
            Slot::Low => &mut self.on_low,
            Slot::Critical => &mut self.on_critical,
            Slot::Charging => &mut self.on_charging,
        }
    }

    fn notify(&mut self, slot: Slot) {
        // take it out so the handler can borrow the whole monitor
        if let Some(mut handler) = self.handler_mut(slot).take() {
            handler(&*self);

            *self.handler_mut(slot) = Some(handler);
        }
    }

    fn sensor_error(err: S::Error) -> BatteryError<S::Error> {
        warn!("battery sensor unavailable");

        BatteryError::SensorUnavailable(err)
    }

    /// read the ADC right now. skips the poll timer and does NOT update any cached values or fire handlers
    pub fn read_raw_now(&mut self) -> BatteryResult<Option<u16>, S::Error> {
        let Some(channel) = self.channel else {
            return Ok(None);
        };

        self.sensor
            .read_raw(channel)
            .map(Some)
            .map_err(Self::sensor_error)
    }

    /// fires on every state change
    pub fn set_changed_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Self) + 'static,
    {
        self.on_changed = Some(Box::new(handler));
    }

    /// fires after the changed handler when the new state is `Low`
    pub fn set_low_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Self) + 'static,
    {
        self.on_low = Some(Box::new(handler));
    }

    /// fires after the changed handler when the new state is `Critical`
    pub fn set_critical_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Self) + 'static,
    {
        self.on_critical = Some(Box::new(handler));
    }

    /// fires after the changed handler when the new state is `Charging`
    pub fn set_charging_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Self) + 'static,
    {
        self.on_charging = Some(Box::new(handler));
    }

    pub fn channel(&self) -> Option<S::Channel> {
        self.channel
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn last_read_ms(&self) -> u32 {
        self.last_read_ms
    }

    /// volts at the battery
    pub fn voltage(&self) -> f32 {
        self.voltage
    }

    pub fn millivolts(&self) -> u32 {
        (self.voltage * 1000.0).round() as u32
    }

    pub fn raw_level(&self) -> u16 {
        self.raw_level
    }

    /// 0..=100
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn state(&self) -> BatteryState {
        self.state
    }

    /// the state before the most recent sample. `Unknown` right after the first one
    pub fn previous_state(&self) -> BatteryState {
        self.previous_state
    }

    pub fn reading(&self) -> BatteryReading {
        BatteryReading {
            raw_level: self.raw_level,
            millivolts: self.millivolts(),
            percentage: self.percentage,
            state: self.state,
        }
    }
}
