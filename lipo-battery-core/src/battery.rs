use core::fmt;

/// lower boundary
pub const CHARGING_THRESHOLD: u16 = 840;
/// lower boundary
pub const FULL_THRESHOLD: u16 = 645;
/// picked value. where a rested battery usually sits. not used for classifying
pub const NOMINAL_OK_LEVEL: u16 = 620;
/// upper boundary
pub const LOW_THRESHOLD: u16 = 561;
/// upper boundary
pub const CRITICAL_THRESHOLD: u16 = 526;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BatteryState {
    /// nothing has been sampled yet
    #[default]
    Unknown = 0,
    Critical = 1,
    Low = 2,
    Ok = 3,
    Full = 4,
    /// the charger pulls the sense pin above anything a battery alone can reach
    Charging = 5,
}

impl BatteryState {
    pub const fn as_str(self) -> &'static str {
        match self {
            BatteryState::Ok => "OK",
            BatteryState::Full => "FULL",
            BatteryState::Charging => "CHARGING",
            BatteryState::Critical => "CRITICAL",
            BatteryState::Low => "LOW",
            BatteryState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BatteryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for BatteryState {
    type Error = u8;

    /// only the named states convert. `Unknown` is never a valid input
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BatteryState::Critical),
            2 => Ok(BatteryState::Low),
            3 => Ok(BatteryState::Ok),
            4 => Ok(BatteryState::Full),
            5 => Ok(BatteryState::Charging),
            x => Err(x),
        }
    }
}

/// stringify a state that came over the wire or out of storage as a plain number
pub fn state_to_str(state: u8) -> &'static str {
    BatteryState::try_from(state)
        .map(BatteryState::as_str)
        .unwrap_or("UNKNOWN")
}

/// raw ADC readings that bound each state
///
/// the bands overlap if you configure them badly, so [`LevelThresholds::classify`] checks them top-down and the first match wins
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LevelThresholds {
    /// at or above this is charging
    pub charging: u16,
    /// at or above this is full
    pub full: u16,
    /// at or below this is low
    pub low: u16,
    /// at or below this is critical
    pub critical: u16,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            charging: CHARGING_THRESHOLD,
            full: FULL_THRESHOLD,
            low: LOW_THRESHOLD,
            critical: CRITICAL_THRESHOLD,
        }
    }
}

impl LevelThresholds {
    /// never returns `Unknown`
    pub fn classify(&self, raw_level: u16) -> BatteryState {
        if raw_level >= self.charging {
            BatteryState::Charging
        } else if raw_level >= self.full {
            BatteryState::Full
        } else if raw_level <= self.critical {
            BatteryState::Critical
        } else if raw_level <= self.low {
            BatteryState::Low
        } else {
            BatteryState::Ok
        }
    }
}
