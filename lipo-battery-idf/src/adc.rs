use esp_idf_svc::hal::{
    adc::{
        attenuation,
        oneshot::{config::AdcChannelConfig, AdcChannelDriver, AdcDriver},
        Resolution,
    },
    gpio::ADCPin,
    peripheral::Peripheral,
};
use esp_idf_svc::sys::{adc_channel_t, EspError, ESP_ERR_INVALID_ARG, ESP_ERR_INVALID_STATE};
use lipo_battery_core::sensor::AnalogSource;
use log::info;

/// One ADC1 pin with curve-fitting calibration.
///
/// The drivers aren't built until the monitor calls `configure`. That way a broken ADC shows up as an error from
/// `BatteryMonitor::initialize` like every other sensor failure.
pub struct IdfBatterySensor<A, T>
where
    A: Peripheral<P = T::Adc> + 'static,
    T: ADCPin,
{
    peripherals: Option<(A, T)>,
    driver: Option<AdcChannelDriver<'static, T, AdcDriver<'static, T::Adc>>>,
}

impl<A, T> IdfBatterySensor<A, T>
where
    A: Peripheral<P = T::Adc> + 'static,
    T: ADCPin,
{
    pub fn new(adc: A, pin: T) -> Self {
        Self {
            peripherals: Some((adc, pin)),
            driver: None,
        }
    }

    /// the id to hand to `BatteryMonitor::initialize`
    pub fn channel(&self) -> adc_channel_t {
        T::CHANNEL
    }

    fn driver(
        &mut self,
    ) -> Result<&mut AdcChannelDriver<'static, T, AdcDriver<'static, T::Adc>>, EspError> {
        self.driver
            .as_mut()
            .ok_or(EspError::from_infallible::<ESP_ERR_INVALID_STATE>())
    }
}

impl<A, T> AnalogSource for IdfBatterySensor<A, T>
where
    A: Peripheral<P = T::Adc> + 'static,
    T: ADCPin,
{
    type Channel = adc_channel_t;
    type Error = EspError;

    fn configure(&mut self, channel: adc_channel_t) -> Result<(), EspError> {
        if channel != T::CHANNEL {
            return Err(EspError::from_infallible::<ESP_ERR_INVALID_ARG>());
        }

        // configuring twice is fine. the drivers are already up
        let Some((adc, pin)) = self.peripherals.take() else {
            return Ok(());
        };

        // DB_11 is the same setting newer IDF calls 12dB. it gives the full ~0-3100mV range
        let channel_config = AdcChannelConfig {
            resolution: Resolution::Resolution12Bit,
            attenuation: attenuation::DB_11,
            calibration: true,
            ..AdcChannelConfig::default()
        };

        let adc_driver = AdcDriver::new(adc)?;

        self.driver = Some(AdcChannelDriver::new(adc_driver, pin, &channel_config)?);

        info!("battery adc ready on channel {}", channel);

        Ok(())
    }

    fn read_raw(&mut self, _channel: adc_channel_t) -> Result<u16, EspError> {
        self.driver()?.read_raw()
    }

    fn raw_to_millivolts(&mut self, _channel: adc_channel_t, raw: u16) -> Result<u16, EspError> {
        self.driver()?.raw_to_mv(raw)
    }
}
