use crate::acquisition::{Acquisition, AwaitingTemperature};
use crate::altitude;
use crate::bus::{Bus, I2c};
use crate::calibration::{is_valid_device, CalibrationData};
use crate::compensation::{CompensationMode, Compensator};
use crate::config::Configuration;
use crate::error::Bmp180Error;
use crate::register::chip_id::ChipId;
use crate::register::ctrl_meas::{Conversion, CtrlMeas, Oversampling};
use crate::register::out::{OutPressure, OutTemperature};
use crate::register::soft_reset::{ResetCommand, SoftReset};
use crate::register::{Readable, Writable};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

/// Type alias for a Bmp180 chip communicating over I2C
pub type Bmp180I2c<T, D> = Bmp180<I2c<T>, D>;

/// Fixed I2C address of the BMP180. The chip has no address select pin.
pub const BMP180_ADDRESS: SevenBitAddress = 0x77;

/// Conversion time of a temperature measurement, datasheet table 8 rounded up.
const TEMPERATURE_CONVERSION_MS: u32 = 5;

/// Start-up time after power-on or soft reset, datasheet table 1.
const STARTUP_TIME_MS: u32 = 10;

/// Main Bmp180 driver struct
///
/// Owns the bus and a delay provider, since every conversion is started with a command write and
/// finished after a fixed wait.
pub struct Bmp180<B, D> {
    bus: B,
    delay: D,
    calibration: CalibrationData,
    compensator: Compensator,
    oversampling: Oversampling,
    last_measurement: Option<Measurement>,
    reference_pressure: Option<f32>,
}

/// Type alias used to simplify return types throughout the driver
pub type Bmp180Result<T, BusError> = Result<T, Bmp180Error<BusError>>;

impl<T, D> Bmp180I2c<T, D>
where
    T: embedded_hal::i2c::I2c,
    D: DelayNs,
{
    /// Constructs a new Bmp180 driver instance with a given configuration that communicates over I2C
    ///
    /// This function will:
    /// - Check that the device at [`BMP180_ADDRESS`] identifies as a BMP180.
    /// - Perform a soft reset if `reset` == [`ResetPolicy::Soft`]
    /// - Load the calibration coefficients from the EEPROM
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::i2c::I2c;
    /// # use bmp180_rs::Bmp180Result;
    ///  use bmp180_rs::{Bmp180, ResetPolicy};
    ///  use bmp180_rs::config::Configuration;
    /// # fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Bmp180Result<(), I::Error> {
    ///
    ///  let mut device = Bmp180::new_i2c(
    ///     i2c,
    ///     Configuration::default(),
    ///     ResetPolicy::None,
    ///     delay
    ///  )?;
    ///  let measurement = device.read_sensor_data()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_i2c(
        i2c: T,
        config: Configuration,
        reset: ResetPolicy,
        delay: D,
    ) -> Bmp180Result<Self, T::Error> {
        Self::new(I2c::new(i2c, BMP180_ADDRESS), config, reset, delay)
    }
}

impl<B, D> Bmp180<B, D>
where
    B: Bus,
    D: DelayNs,
{
    /// Creates a new instance of the Bmp180 driver struct with the given configuration.
    pub(crate) fn new(
        mut bus: B,
        config: Configuration,
        reset: ResetPolicy,
        mut delay: D,
    ) -> Bmp180Result<Self, B::Error> {
        Self::check_identity(&mut bus)?;

        if reset == ResetPolicy::Soft {
            Self::reset_device(&mut bus, &mut delay)?;
        }

        let calibration = CalibrationData::read(&mut bus)?;
        log::debug!(
            "bmp180: ready, oversampling {:?}, {:?} compensation",
            config.oversampling,
            config.compensation
        );

        Ok(Bmp180 {
            bus,
            delay,
            calibration,
            compensator: Compensator::new(config.compensation, &calibration),
            oversampling: config.oversampling,
            last_measurement: None,
            reference_pressure: None,
        })
    }

    fn check_identity(bus: &mut B) -> Bmp180Result<(), B::Error> {
        let id = bus.read::<ChipId>()?;

        if is_valid_device(id) {
            Ok(())
        } else {
            log::warn!("bmp180: unexpected chip id 0x{:02X}", id);
            Err(Bmp180Error::IdentityMismatch(id))
        }
    }

    fn reset_device(bus: &mut B, delay: &mut D) -> Bmp180Result<(), B::Error> {
        log::debug!("bmp180: soft reset");
        bus.write::<SoftReset>(&ResetCommand)?;
        delay.delay_ms(STARTUP_TIME_MS);

        Self::check_identity(bus)
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// You pass a marker type from [`crate::register`] and get back its decoded value (`R::Out`).
    /// The bus transfer length and address come from `R::N` and `R::ADDR`.
    ///
    /// # Examples
    /// Read a single calibration word:
    /// ```rust,no_run
    /// # use bmp180_rs::{Bmp180, Bmp180Result};
    /// # use bmp180_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Bmp180<B, D>) -> Bmp180Result<(), B::Error> {
    /// use bmp180_rs::register::calibration::Ac1;
    /// let ac1 = device.read::<Ac1>()? as i16;
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Bmp180Result<R::Out, B::Error> {
        self.bus.read::<R>()
    }

    /// Write a register using a **typed marker**.
    ///
    /// Writing [`CtrlMeas`] by hand starts a conversion the driver does not know about, so the
    /// result has to be read back with [`read`](Self::read) as well.
    pub fn write<W: Writable>(&mut self, v: &W::In) -> Bmp180Result<(), B::Error> {
        self.bus.write::<W>(v)
    }

    /// Reads the ID (0xD0) register.
    pub fn id(&mut self) -> Bmp180Result<u8, B::Error> {
        self.bus.read::<ChipId>()
    }

    /// Determines if the device answering on the bus still identifies as a BMP180.
    pub fn has_valid_id(&mut self) -> Bmp180Result<bool, B::Error> {
        Ok(is_valid_device(self.id()?))
    }

    /// Triggers a soft reset and waits out the start-up time.
    ///
    /// Afterwards the identity is checked again, the calibration is re-read and the compensator is
    /// rebuilt, so the next pressure compensation needs a fresh temperature first. The last
    /// measurement and the reference pressure are kept.
    pub fn soft_reset(&mut self) -> Bmp180Result<(), B::Error> {
        Self::reset_device(&mut self.bus, &mut self.delay)?;

        let calibration = CalibrationData::read(&mut self.bus)?;
        self.compensator = Compensator::new(self.compensator.mode(), &calibration);
        self.calibration = calibration;

        Ok(())
    }

    /// Runs a temperature conversion and returns the raw 16 bit value (UT).
    pub fn measure_temperature(&mut self) -> Bmp180Result<u16, B::Error> {
        self.bus.write::<CtrlMeas>(&Conversion::Temperature)?;
        self.delay.delay_ms(TEMPERATURE_CONVERSION_MS);

        let raw = self.bus.read::<OutTemperature>()?;
        log::trace!("bmp180: UT = {}", raw);

        Ok(raw)
    }

    /// Runs a pressure conversion with the given oversampling and returns the raw value (UP).
    ///
    /// UP has 16 to 19 significant bits, depending on `oversampling`.
    pub fn measure_pressure(&mut self, oversampling: Oversampling) -> Bmp180Result<u32, B::Error> {
        self.bus.write::<CtrlMeas>(&Conversion::Pressure(oversampling))?;
        self.delay.delay_ms(oversampling.conversion_time_ms());

        let raw = self.bus.read::<OutPressure>()? >> (8 - oversampling.shift());
        log::trace!("bmp180: UP = {} ({:?})", raw, oversampling);

        Ok(raw)
    }

    /// Converts a raw temperature into °C and keeps the intermediate pressure compensation needs.
    pub fn compensate_temperature(&mut self, raw: u16) -> Bmp180Result<f32, B::Error> {
        Ok(self.compensator.compensate_temperature(raw)?)
    }

    /// Converts a raw pressure into Pa.
    ///
    /// `oversampling` must be the one `raw` was measured with. Fails with
    /// [`Bmp180Error::TemperatureNotCompensated`] until a temperature has been compensated.
    pub fn compensate_pressure(
        &self,
        raw: u32,
        oversampling: Oversampling,
    ) -> Bmp180Result<f32, B::Error> {
        Ok(self.compensator.compensate_pressure(raw, oversampling)?)
    }

    /// Oversampling used by the next [`acquire`](Self::acquire).
    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    pub fn set_oversampling(&mut self, oversampling: Oversampling) {
        self.oversampling = oversampling;
    }

    pub fn compensation_mode(&self) -> CompensationMode {
        self.compensator.mode()
    }

    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration
    }

    /// Starts a measurement cycle, one step at a time.
    ///
    /// See [`crate::acquisition`] for the steps. [`read_sensor_data`](Self::read_sensor_data) runs
    /// all of them in one call.
    pub fn acquire(&mut self) -> Acquisition<'_, B, D, AwaitingTemperature> {
        Acquisition::new(self)
    }

    /// Measures temperature and pressure, compensates them and publishes the result.
    ///
    /// Blocks for the conversion times of both measurements, 10 to 31 ms depending on the
    /// oversampling.
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use bmp180_rs::{Bmp180, Bmp180Result};
    /// # use bmp180_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Bmp180<B, D>) -> Bmp180Result<(), B::Error> {
    /// let data = device.read_sensor_data()?;
    /// println!("The current pressure and temperature is {} and {}", data.pressure, data.temperature);
    /// # Ok(()) };
    /// ```
    pub fn read_sensor_data(&mut self) -> Bmp180Result<Measurement, B::Error> {
        self.acquire().temperature()?.pressure()
    }

    /// Stores the pressure of a fresh measurement as the zero level for [`altitude`](Self::altitude).
    ///
    /// Returns the captured pressure in Pa. A pressure that is not strictly positive is never
    /// stored.
    pub fn capture_reference_pressure(&mut self) -> Bmp180Result<f32, B::Error> {
        let measurement = self.read_sensor_data()?;
        if measurement.pressure <= 0.0 {
            return Err(Bmp180Error::ComputationOverflow);
        }
        self.reference_pressure = Some(measurement.pressure);
        log::debug!("bmp180: reference pressure {} Pa", measurement.pressure);

        Ok(measurement.pressure)
    }

    pub fn reference_pressure(&self) -> Option<f32> {
        self.reference_pressure
    }

    /// Altitude in metres of the last published pressure relative to the reference pressure.
    ///
    /// Does not touch the bus. Fails with [`Bmp180Error::NoReferencePressure`] until
    /// [`capture_reference_pressure`](Self::capture_reference_pressure) has succeeded once, and
    /// with [`Bmp180Error::ComputationOverflow`] if the pressures give no finite altitude.
    pub fn altitude(&self) -> Bmp180Result<f32, B::Error> {
        let reference = self.reference_pressure.ok_or(Bmp180Error::NoReferencePressure)?;
        let pressure = self.last_measurement.map_or(reference, |m| m.pressure);

        let altitude = altitude::altitude(pressure, reference);
        if altitude.is_finite() {
            Ok(altitude)
        } else {
            Err(Bmp180Error::ComputationOverflow)
        }
    }

    /// The most recent successful measurement, if any.
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last_measurement
    }

    pub(crate) fn publish(&mut self, measurement: Measurement) {
        self.last_measurement = Some(measurement);
    }

    /// Gives back the bus and the delay provider.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    #[cfg(test)]
    pub(crate) fn bus(&mut self) -> &mut B {
        &mut self.bus
    }
}

/// Compensated measurement
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in °C
    pub temperature: f32,
    /// Pressure in Pa
    pub pressure: f32,
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::pressure::Pressure::new::<uom::si::pressure::pascal>(self.pressure)
    }

    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::thermodynamic_temperature::ThermodynamicTemperature::new::<
            uom::si::thermodynamic_temperature::degree_celsius,
        >(self.temperature)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolicy {
    /// Write 0xB6 to SOFT_RESET and wait 10 ms before reading the calibration.
    Soft,
    /// Don't reset; leave the chip as-is.
    None,
}
