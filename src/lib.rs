//! Platform agnostic driver for the Bosch BMP180 barometric pressure and temperature sensor.
//!
//! Built on the blocking [`embedded-hal`](embedded_hal) 1.0 traits. The driver owns an I2C bus
//! and a delay provider; every measurement writes a conversion command, waits out the conversion
//! time and reads the result back.
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::I2c;
//! # use bmp180_rs::Bmp180Result;
//! use bmp180_rs::{Bmp180, ResetPolicy};
//! use bmp180_rs::config::{Configuration, Preset};
//!
//! # fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Bmp180Result<(), I::Error> {
//! let config = Configuration::from_preset(Preset::HighResolution);
//! let mut device = Bmp180::new_i2c(i2c, config, ResetPolicy::Soft, delay)?;
//!
//! device.capture_reference_pressure()?;
//! let measurement = device.read_sensor_data()?;
//! let altitude = device.altitude()?;
//! # Ok(()) }
//! ```
//!
//! Compensation follows the datasheet integer algorithm by default. The floating point variant can
//! be selected with [`Configuration::compensation`](config::Configuration::compensation).
#![no_std]

pub mod acquisition;
pub mod altitude;
mod bmp180;
pub mod bus;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod error;
pub mod register;

#[cfg(test)]
mod testing;

pub use bmp180::*;
pub use error::Bmp180Error;
