//! Errors that can occur when using the BMP180 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with BMP180.
//! It is generic over the underlying bus error type.

use core::fmt::{Debug, Display, Formatter};

use crate::compensation::CompensationError;
use crate::register::InvalidRegisterField;

/// This represents all possible errors that can occur when using the BMP180 device.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp180Error<BusError> {
    /// An error has occurred in the I2C driver.
    ///
    /// The driver never retries on its own. A failed step leaves the last published measurement untouched,
    /// so retrying the whole acquisition is safe.
    Bus(BusError),

    /// The ID register did not contain `0x55`. Holds the value that was read instead.
    ///
    /// Could indicate a different chip at address 0x77, or a wiring problem.
    IdentityMismatch(u8),

    /// An altitude was requested before a reference pressure was captured.
    NoReferencePressure,

    /// An intermediate of the compensation left the range the algorithm is defined for.
    ///
    /// Points at corrupted calibration data or a raw sample that cannot come from a working sensor.
    ComputationOverflow,

    /// Pressure compensation was asked for before any temperature was compensated.
    TemperatureNotCompensated,

    /// A register returned a value a working device never produces, such as a calibration word of
    /// `0x0000` or `0xFFFF`. Usually a wiring or pull-up problem.
    UnexpectedRegisterData(InvalidRegisterField),
}

impl<BusError> From<CompensationError> for Bmp180Error<BusError> {
    fn from(error: CompensationError) -> Self {
        match error {
            CompensationError::TemperatureNotCompensated => Bmp180Error::TemperatureNotCompensated,
            CompensationError::Overflow => Bmp180Error::ComputationOverflow,
        }
    }
}

impl<BusError: Debug> Display for Bmp180Error<BusError> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Bmp180Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Bmp180Error::IdentityMismatch(id) => {
                write!(f, "unexpected chip id 0x{:02X}, expected 0x55", id)
            }
            Bmp180Error::NoReferencePressure => f.write_str("no reference pressure captured"),
            Bmp180Error::ComputationOverflow => f.write_str("compensation overflowed"),
            Bmp180Error::TemperatureNotCompensated => {
                f.write_str("pressure compensated before temperature")
            }
            Bmp180Error::UnexpectedRegisterData(field) => write!(
                f,
                "unexpected value 0x{:04X} in register 0x{:02X}",
                field.value, field.register
            ),
        }
    }
}

impl<BusError: Debug> core::error::Error for Bmp180Error<BusError> {}
