use thiserror::Error;

/// `E` is whatever the analog source's driver returns
#[derive(Error, Debug)]
pub enum BatteryError<E> {
    #[error("sensor unavailable: {0:?}")]
    SensorUnavailable(E),
    /// min and max level are used as a divisor when computing the percentage
    #[error("min level and max level must differ (both are {min})")]
    InvalidLevelBounds { min: u16, max: u16 },
}

pub type BatteryResult<T, E> = Result<T, BatteryError<E>>;
