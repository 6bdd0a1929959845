//! Integer compensation exactly as given in the datasheet (section 3.5).
//!
//! All intermediates are 32 bit. Right shifts of signed values are arithmetic and divisions
//! truncate toward zero, as the datasheet algorithm assumes. Where the datasheet code
//! would silently wrap, this implementation reports [`CompensationError::Overflow`] instead.
use crate::calibration::CalibrationData;
use crate::compensation::CompensationError;
use crate::register::ctrl_meas::Oversampling;

fn mul(a: i32, b: i32) -> Result<i32, CompensationError> {
    a.checked_mul(b).ok_or(CompensationError::Overflow)
}

fn add(a: i32, b: i32) -> Result<i32, CompensationError> {
    a.checked_add(b).ok_or(CompensationError::Overflow)
}

fn sub(a: i32, b: i32) -> Result<i32, CompensationError> {
    a.checked_sub(b).ok_or(CompensationError::Overflow)
}

fn div(a: i32, b: i32) -> Result<i32, CompensationError> {
    a.checked_div(b).ok_or(CompensationError::Overflow)
}

/// Fixed point compensation. Temperature in 0.1 °C, pressure in Pa.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedPoint {
    calibration: CalibrationData,
    b5: Option<i32>,
}

impl FixedPoint {
    pub fn new(calibration: CalibrationData) -> Self {
        Self { calibration, b5: None }
    }

    /// The B5 term of the last temperature compensation, if there was one.
    pub fn b5(&self) -> Option<i32> {
        self.b5
    }

    /// Compensates an uncompensated temperature (UT). Returns 0.1 °C.
    ///
    /// Caches B5 for the following [`compensate_pressure`](Self::compensate_pressure). On error the
    /// previous B5 is dropped, so a stale value can never feed a pressure compensation.
    pub fn compensate_temperature(&mut self, raw: u16) -> Result<i32, CompensationError> {
        self.b5 = None;

        let cb = &self.calibration;
        let x1 = mul(i32::from(raw) - i32::from(cb.ac6), i32::from(cb.ac5))? >> 15;
        let x2 = div(i32::from(cb.mc) << 11, add(x1, i32::from(cb.md))?)?;
        let b5 = add(x1, x2)?;

        self.b5 = Some(b5);

        Ok(add(b5, 8)? >> 4)
    }

    /// Compensates an uncompensated pressure (UP), already shifted right by `8 - oss`. Returns Pa.
    ///
    /// Uses B5 from the most recent temperature compensation.
    pub fn compensate_pressure(
        &self,
        raw: u32,
        oversampling: Oversampling,
    ) -> Result<i32, CompensationError> {
        let b5 = self.b5.ok_or(CompensationError::TemperatureNotCompensated)?;
        let cb = &self.calibration;
        let oss = oversampling.shift();

        let b6 = sub(b5, 4000)?;
        let b6_squared = mul(b6, b6)? >> 12;

        let x1 = mul(i32::from(cb.b2), b6_squared)? >> 11;
        let x2 = mul(i32::from(cb.ac2), b6)? >> 11;
        let x3 = add(x1, x2)?;
        let b3 = add(add(mul(i32::from(cb.ac1), 4)?, x3)? << oss, 2)? >> 2;

        let x1 = mul(i32::from(cb.ac3), b6)? >> 13;
        let x2 = mul(i32::from(cb.b1), b6_squared)? >> 16;
        let x3 = add(add(x1, x2)?, 2)? >> 2;

        let x3 = u32::try_from(add(x3, 32768)?).map_err(|_| CompensationError::Overflow)?;
        let b4 = u32::from(cb.ac4)
            .checked_mul(x3)
            .ok_or(CompensationError::Overflow)?
            >> 15;

        // UP - B3 is evaluated unsigned; a negative difference would wrap.
        let difference = i64::from(raw) - i64::from(b3);
        let b7 = u32::try_from(difference)
            .ok()
            .and_then(|d| d.checked_mul(50000 >> oss))
            .ok_or(CompensationError::Overflow)?;

        if b4 == 0 {
            return Err(CompensationError::Overflow);
        }

        // Doubling first keeps one more bit of precision, but only while B7 * 2 fits in 32 bits.
        let p = if b7 < 0x8000_0000 {
            (b7 * 2) / b4
        } else {
            (b7 / b4).checked_mul(2).ok_or(CompensationError::Overflow)?
        };
        let p = i32::try_from(p).map_err(|_| CompensationError::Overflow)?;

        let x1 = mul(p >> 8, p >> 8)?;
        let x1 = mul(x1, 3038)? >> 16;
        let x2 = mul(-7357, p)? >> 16;

        add(p, add(add(x1, x2)?, 3791)? >> 4)
    }
}
