//! Conversion of raw ADC counts into temperature and pressure.
//!
//! Two strategies are available, selected once through [`CompensationMode`]:
//!
//! - [`FixedPoint`]: the integer algorithm from the datasheet, bit exact.
//! - [`FloatingPoint`]: the same model evaluated as polynomials in `f64`.
//!
//! Both keep an intermediate from the temperature step (B5, or the temperature itself) that the
//! pressure step needs. A pressure compensation with nothing cached fails with
//! [`CompensationError::TemperatureNotCompensated`].
mod fixed_point;
mod floating_point;

pub use fixed_point::FixedPoint;
pub use floating_point::FloatingPoint;

use crate::calibration::CalibrationData;
use crate::register::ctrl_meas::Oversampling;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompensationError {
    /// No temperature has been compensated since the calibration was loaded.
    TemperatureNotCompensated,
    /// An intermediate left the range the algorithm is defined for.
    Overflow,
}

/// Which compensation strategy a driver instance uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompensationMode {
    #[default]
    FixedPoint,
    FloatingPoint,
}

/// A compensation strategy bound to one calibration set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Compensator {
    FixedPoint(FixedPoint),
    FloatingPoint(FloatingPoint),
}

impl Compensator {
    pub fn new(mode: CompensationMode, calibration: &CalibrationData) -> Self {
        match mode {
            CompensationMode::FixedPoint => Compensator::FixedPoint(FixedPoint::new(*calibration)),
            CompensationMode::FloatingPoint => {
                Compensator::FloatingPoint(FloatingPoint::new(calibration))
            }
        }
    }

    pub fn mode(&self) -> CompensationMode {
        match self {
            Compensator::FixedPoint(_) => CompensationMode::FixedPoint,
            Compensator::FloatingPoint(_) => CompensationMode::FloatingPoint,
        }
    }

    /// Compensates a raw temperature, returning °C.
    pub fn compensate_temperature(&mut self, raw: u16) -> Result<f32, CompensationError> {
        match self {
            Compensator::FixedPoint(c) => Ok(c.compensate_temperature(raw)? as f32 / 10.0),
            Compensator::FloatingPoint(c) => Ok(c.compensate_temperature(raw)? as f32),
        }
    }

    /// Compensates a raw pressure, returning Pa.
    pub fn compensate_pressure(
        &self,
        raw: u32,
        oversampling: Oversampling,
    ) -> Result<f32, CompensationError> {
        match self {
            Compensator::FixedPoint(c) => Ok(c.compensate_pressure(raw, oversampling)? as f32),
            Compensator::FloatingPoint(c) => Ok(c.compensate_pressure(raw, oversampling)? as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::datasheet_calibration;

    #[test]
    fn fixed_point_units() {
        let mut c = Compensator::new(CompensationMode::FixedPoint, &datasheet_calibration());

        assert_eq!(CompensationMode::FixedPoint, c.mode());
        assert_eq!(15.0, c.compensate_temperature(27898).unwrap());
        assert_eq!(
            69964.0,
            c.compensate_pressure(23843, Oversampling::UltraLowPower).unwrap()
        );
    }

    #[test]
    fn floating_point_units() {
        let mut c = Compensator::new(CompensationMode::FloatingPoint, &datasheet_calibration());

        assert_eq!(CompensationMode::FloatingPoint, c.mode());
        let t = c.compensate_temperature(27898).unwrap();
        let p = c.compensate_pressure(23843, Oversampling::UltraLowPower).unwrap();
        assert!((t - 15.0).abs() < 0.01, "{}", t);
        assert!((p - 69964.0).abs() < 5.0, "{}", p);
    }

    #[test]
    fn pressure_before_temperature() {
        for mode in [CompensationMode::FixedPoint, CompensationMode::FloatingPoint] {
            let c = Compensator::new(mode, &datasheet_calibration());

            assert_eq!(
                Err(CompensationError::TemperatureNotCompensated),
                c.compensate_pressure(23843, Oversampling::UltraLowPower)
            );
        }
    }
}
