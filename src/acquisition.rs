//! One temperature + pressure measurement cycle, as a typestate.
//!
//! The BMP180 has a single result register and pressure compensation depends on an intermediate
//! of the temperature compensation, so a cycle must run in this order:
//!
//! 1. [`AwaitingTemperature`]: start a temperature conversion, wait 5 ms, read and compensate it.
//! 2. [`AwaitingPressure`]: start a pressure conversion with the oversampling captured when the
//!    cycle began, wait for it, read and compensate it.
//! 3. Ready: the resulting [`Measurement`] is published on the driver and returned.
//!
//! An [`Acquisition`] holds the driver mutably for the whole cycle, so nothing else can touch the
//! device between the two steps, and the pressure step can only be reached through the temperature
//! step. If a step fails the acquisition is consumed and the last published measurement stays as
//! it was.
//!
//! ```rust,no_run
//! # use bmp180_rs::{Bmp180, Bmp180Result};
//! # use bmp180_rs::bus::Bus;
//! # use embedded_hal::delay::DelayNs;
//! # fn demo<B: Bus, D: DelayNs>(mut device: Bmp180<B, D>) -> Bmp180Result<(), B::Error> {
//! let step = device.acquire().temperature()?;
//! let temperature = step.temperature_celsius();
//! let measurement = step.pressure()?;
//! assert_eq!(temperature, measurement.temperature);
//! # Ok(()) }
//! ```
use embedded_hal::delay::DelayNs;

use crate::bus::Bus;
use crate::register::ctrl_meas::Oversampling;
use crate::{Bmp180, Bmp180Result, Measurement};

/// Nothing converted yet.
pub struct AwaitingTemperature;

/// Temperature compensated, pressure still to do.
pub struct AwaitingPressure {
    temperature: f32,
}

pub struct Acquisition<'a, B, D, State> {
    device: &'a mut Bmp180<B, D>,
    oversampling: Oversampling,
    state: State,
}

impl<B, D, State> Acquisition<'_, B, D, State> {
    /// Oversampling this cycle uses for its pressure conversion.
    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }
}

impl<'a, B, D> Acquisition<'a, B, D, AwaitingTemperature>
where
    B: Bus,
    D: DelayNs,
{
    pub(crate) fn new(device: &'a mut Bmp180<B, D>) -> Self {
        let oversampling = device.oversampling();

        Self { device, oversampling, state: AwaitingTemperature }
    }

    /// Runs the temperature conversion and its compensation.
    pub fn temperature(self) -> Bmp180Result<Acquisition<'a, B, D, AwaitingPressure>, B::Error> {
        let raw = self.device.measure_temperature()?;
        let temperature = self.device.compensate_temperature(raw)?;

        Ok(Acquisition {
            device: self.device,
            oversampling: self.oversampling,
            state: AwaitingPressure { temperature },
        })
    }
}

impl<'a, B, D> Acquisition<'a, B, D, AwaitingPressure>
where
    B: Bus,
    D: DelayNs,
{
    /// Temperature of this cycle in °C.
    pub fn temperature_celsius(&self) -> f32 {
        self.state.temperature
    }

    /// Runs the pressure conversion and its compensation, then publishes the measurement.
    pub fn pressure(self) -> Bmp180Result<Measurement, B::Error> {
        let raw = self.device.measure_pressure(self.oversampling)?;
        let pressure = self.device.compensate_pressure(raw, self.oversampling)?;

        let measurement = Measurement {
            temperature: self.state.temperature,
            pressure,
        };
        self.device.publish(measurement);

        Ok(measurement)
    }
}
