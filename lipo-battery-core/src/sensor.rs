/// Everything the monitor needs from the ADC driver.
///
/// Boards implement this over their HAL's oneshot driver. Tests implement it with a number in a cell.
pub trait AnalogSource {
    /// which pin/channel to sample. the monitor holds an `Option` of this, and `None` disables sampling
    type Channel: Copy + PartialEq;
    type Error;

    /// one-time setup of attenuation, bit width, and calibration scheme
    fn configure(&mut self, channel: Self::Channel) -> Result<(), Self::Error>;

    /// unconverted sample. 0..=4095 on a 12-bit converter
    fn read_raw(&mut self, channel: Self::Channel) -> Result<u16, Self::Error>;

    /// apply the device's calibration curve. this is the voltage at the pin, before any divider
    fn raw_to_millivolts(&mut self, channel: Self::Channel, raw: u16) -> Result<u16, Self::Error>;
}
