use crate::compensation::CompensationMode;
use crate::register::ctrl_meas::Oversampling;

/// Settings applied when the driver is constructed.
///
/// ```rust
/// use bmp180_rs::config::Configuration;
/// use bmp180_rs::compensation::CompensationMode;
/// use bmp180_rs::register::ctrl_meas::Oversampling;
///
/// let config = Configuration::default()
///     .oversampling(Oversampling::UltraHighResolution)
///     .compensation(CompensationMode::FloatingPoint);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) oversampling: Oversampling,
    pub(crate) compensation: CompensationMode,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            oversampling: Oversampling::Standard,
            compensation: CompensationMode::FixedPoint,
        }
    }
}

impl Configuration {
    /// Pressure oversampling used by [`Bmp180::read_sensor_data`](crate::Bmp180::read_sensor_data).
    /// Can be changed later with [`Bmp180::set_oversampling`](crate::Bmp180::set_oversampling).
    pub fn oversampling(mut self, oversampling: Oversampling) -> Self {
        self.oversampling = oversampling;

        self
    }

    pub fn compensation(mut self, compensation: CompensationMode) -> Self {
        self.compensation = compensation;

        self
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::LowPower => Configuration::default().oversampling(Oversampling::UltraLowPower),
            Preset::Standard => Configuration::default(),
            Preset::HighResolution => {
                Configuration::default().oversampling(Oversampling::UltraHighResolution)
            }
        }
    }
}

/// Starting points for common use cases, see datasheet table 3.
pub enum Preset {
    /// Fastest conversion, highest noise (0.06 hPa RMS).
    LowPower,
    /// The power-on default of most BMP180 libraries.
    Standard,
    /// Slowest conversion, lowest noise (0.03 hPa RMS).
    HighResolution,
}
