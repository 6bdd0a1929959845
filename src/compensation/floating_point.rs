//! Floating point compensation.
//!
//! The integer algorithm rewritten as two polynomials in the temperature offset from 25 °C, with
//! coefficients precomputed by [`DerivedCoefficients`]. Agrees with [`FixedPoint`](super::FixedPoint)
//! to well within 0.2 °C and 50 Pa over the operating range, without its truncation steps.
use crate::calibration::{CalibrationData, DerivedCoefficients};
use crate::compensation::CompensationError;
use crate::register::ctrl_meas::Oversampling;

fn finite(value: f64) -> Result<f64, CompensationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CompensationError::Overflow)
    }
}

/// Floating point compensation. Temperature in °C, pressure in Pa.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FloatingPoint {
    coefficients: DerivedCoefficients,
    temperature: Option<f64>,
}

impl FloatingPoint {
    pub fn new(calibration: &CalibrationData) -> Self {
        Self {
            coefficients: DerivedCoefficients::new(calibration),
            temperature: None,
        }
    }

    pub fn coefficients(&self) -> &DerivedCoefficients {
        &self.coefficients
    }

    /// The last compensated temperature, if there was one.
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Compensates an uncompensated temperature (UT). Returns °C and caches it for the following
    /// pressure compensation.
    pub fn compensate_temperature(&mut self, raw: u16) -> Result<f64, CompensationError> {
        self.temperature = None;

        let c = &self.coefficients;
        let alpha = c.c5 * (f64::from(raw) - c.c6);
        let temperature = finite(alpha + c.mc / (alpha + c.md))?;

        self.temperature = Some(temperature);

        Ok(temperature)
    }

    /// Compensates an uncompensated pressure (UP), already shifted right by `8 - oss`. Returns Pa.
    ///
    /// A result that is not strictly positive is reported as [`CompensationError::Overflow`].
    pub fn compensate_pressure(
        &self,
        raw: u32,
        oversampling: Oversampling,
    ) -> Result<f64, CompensationError> {
        let temperature = self
            .temperature
            .ok_or(CompensationError::TemperatureNotCompensated)?;
        let c = &self.coefficients;

        let s = temperature - 25.0;
        let s_squared = s * s;
        let x = c.x2 * s_squared + c.x1 * s + c.x0;
        let y = c.y2 * s_squared + c.y1 * s + c.y0;
        let z = (f64::from(raw) / f64::from(1u32 << oversampling.shift()) - x) / y;

        // The polynomial yields hPa.
        let pressure = finite((c.p2 * z * z + c.p1 * z + c.p0) * 100.0)?;
        if pressure <= 0.0 {
            return Err(CompensationError::Overflow);
        }

        Ok(pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::tests::datasheet_calibration;
    use crate::compensation::FixedPoint;

    #[test]
    fn datasheet_temperature() {
        let mut fp = FloatingPoint::new(&datasheet_calibration());

        let t = fp.compensate_temperature(27898).unwrap();
        assert!((t - 14.997124).abs() < 1e-5, "{}", t);
        assert_eq!(Some(t), fp.temperature());
    }

    #[test]
    fn datasheet_pressure() {
        let mut fp = FloatingPoint::new(&datasheet_calibration());
        fp.compensate_temperature(27898).unwrap();

        let p = fp.compensate_pressure(23843, Oversampling::UltraLowPower).unwrap();
        assert!((p - 69962.696).abs() < 1e-2, "{}", p);
    }

    #[test]
    fn oversampling_normalises_raw_value() {
        let mut fp = FloatingPoint::new(&datasheet_calibration());
        fp.compensate_temperature(27898).unwrap();

        let p0 = fp.compensate_pressure(23843, Oversampling::UltraLowPower).unwrap();
        let p3 = fp
            .compensate_pressure(23843 << 3, Oversampling::UltraHighResolution)
            .unwrap();
        assert!((p0 - p3).abs() < 1e-6);
    }

    #[test]
    fn pressure_requires_temperature() {
        let fp = FloatingPoint::new(&datasheet_calibration());

        assert_eq!(
            Err(CompensationError::TemperatureNotCompensated),
            fp.compensate_pressure(23843, Oversampling::UltraLowPower)
        );
    }

    #[test]
    fn non_physical_pressure_is_reported() {
        let mut fp = FloatingPoint::new(&datasheet_calibration());
        fp.compensate_temperature(27898).unwrap();

        assert_eq!(
            Err(CompensationError::Overflow),
            fp.compensate_pressure(0, Oversampling::UltraLowPower)
        );
        assert_eq!(
            Err(CompensationError::Overflow),
            fp.compensate_pressure(0, Oversampling::UltraHighResolution)
        );
    }

    #[test]
    fn deterministic() {
        let mut fp = FloatingPoint::new(&datasheet_calibration());

        let t = fp.compensate_temperature(27898).unwrap();
        let p = fp.compensate_pressure(23843, Oversampling::Standard).unwrap();

        for _ in 0..3 {
            assert_eq!(t, fp.compensate_temperature(27898).unwrap());
            assert_eq!(p, fp.compensate_pressure(23843, Oversampling::Standard).unwrap());
        }
    }

    #[test]
    fn singular_temperature_is_reported() {
        let mut cb = datasheet_calibration();
        cb.md = 0;
        let mut fp = FloatingPoint::new(&cb);

        assert_eq!(
            Err(CompensationError::Overflow),
            fp.compensate_temperature(cb.ac6)
        );
        assert_eq!(None, fp.temperature());
    }

    #[test]
    fn agrees_with_fixed_point() {
        let calibration = datasheet_calibration();
        let mut fixed = FixedPoint::new(calibration);
        let mut floating = FloatingPoint::new(&calibration);

        let oversampling = [
            Oversampling::UltraLowPower,
            Oversampling::Standard,
            Oversampling::HighResolution,
            Oversampling::UltraHighResolution,
        ];

        let mut compared = 0;
        for ut in (20000u16..36000).step_by(250) {
            let t_fixed = fixed.compensate_temperature(ut).unwrap();
            let t_floating = floating.compensate_temperature(ut).unwrap();
            if !(-40.0..=85.0).contains(&t_floating) {
                continue;
            }
            assert!(
                (f64::from(t_fixed) / 10.0 - t_floating).abs() <= 0.2,
                "UT {}: {} vs {}",
                ut,
                t_fixed,
                t_floating
            );

            for up in (15000u32..45000).step_by(500) {
                for oss in oversampling {
                    let raw = up << oss.shift();
                    let Ok(p_fixed) = fixed.compensate_pressure(raw, oss) else {
                        continue;
                    };
                    if !(30000..=110000).contains(&p_fixed) {
                        continue;
                    }
                    let p_floating = floating.compensate_pressure(raw, oss).unwrap();
                    assert!(
                        (f64::from(p_fixed) - p_floating).abs() <= 50.0,
                        "UT {} UP {} {:?}: {} vs {}",
                        ut,
                        raw,
                        oss,
                        p_fixed,
                        p_floating
                    );
                    compared += 1;
                }
            }
        }

        assert!(compared > 1000);
    }
}
