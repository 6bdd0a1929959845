//! ### CTRL_MEAS - Measurement control (`0xF4`, 1 byte, W)
//!
//! Writing a command to this register starts a single conversion. Bits 0-4 select the measurement,
//! bit 5 (SCO) stays set while the conversion runs and bits 6-7 (OSS) carry the pressure
//! oversampling ratio.
//!
//! | Measurement                 | Command                | Max. conversion time |
//! |-----------------------------|------------------------|----------------------|
//! | Temperature                 | `0x2E`                 | 4.5 ms               |
//! | Pressure, ultra low power   | `0x34`                 | 4.5 ms               |
//! | Pressure, standard          | `0x74`                 | 7.5 ms               |
//! | Pressure, high resolution   | `0xB4`                 | 13.5 ms              |
//! | Pressure, ultra high res.   | `0xF4`                 | 25.5 ms              |
#![doc(alias = "CTRL_MEAS")]
use crate::register::{Reg, UnexpectedValue, Writable};

/// Marker type for the CTRL_MEAS (0xF4) register
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

/// Conversion to start.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Conversion {
    Temperature,
    /// Pressure, tagged with the oversampling ratio that is encoded into the same command byte.
    Pressure(Oversampling),
}

impl From<Conversion> for u8 {
    fn from(conversion: Conversion) -> u8 {
        match conversion {
            Conversion::Temperature => 0x2E,
            Conversion::Pressure(oss) => 0x34 | (u8::from(oss) << 6),
        }
    }
}

impl Writable for CtrlMeas {
    type In = Conversion;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}

/// Pressure oversampling ratio (OSS).
///
/// Higher settings average more internal samples: lower noise, longer conversion, more current.
/// See datasheet section 3.3.1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// 1 sample, 4.5 ms
    UltraLowPower,
    /// 2 samples, 7.5 ms
    #[default]
    Standard,
    /// 4 samples, 13.5 ms
    HighResolution,
    /// 8 samples, 25.5 ms
    UltraHighResolution,
}

impl Oversampling {
    /// Milliseconds to wait between starting a pressure conversion and reading its result.
    pub fn conversion_time_ms(&self) -> u32 {
        match self {
            Oversampling::UltraLowPower => 5,
            Oversampling::Standard => 8,
            Oversampling::HighResolution => 14,
            Oversampling::UltraHighResolution => 26,
        }
    }

    /// The OSS field as a shift amount, 0 to 3.
    pub fn shift(&self) -> u32 {
        u8::from(*self) as u32
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0 => Ok(Oversampling::UltraLowPower),
            1 => Ok(Oversampling::Standard),
            2 => Ok(Oversampling::HighResolution),
            3 => Ok(Oversampling::UltraHighResolution),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(oss: Oversampling) -> u8 {
        match oss {
            Oversampling::UltraLowPower => 0,
            Oversampling::Standard => 1,
            Oversampling::HighResolution => 2,
            Oversampling::UltraHighResolution => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_meas_encode() {
        let mut buffer = [0u8; 1];
        CtrlMeas::encode(&Conversion::Temperature, &mut buffer);
        assert_eq!([0x2E], buffer);

        CtrlMeas::encode(&Conversion::Pressure(Oversampling::UltraLowPower), &mut buffer);
        assert_eq!([0x34], buffer);

        CtrlMeas::encode(&Conversion::Pressure(Oversampling::Standard), &mut buffer);
        assert_eq!([0x74], buffer);

        CtrlMeas::encode(&Conversion::Pressure(Oversampling::HighResolution), &mut buffer);
        assert_eq!([0xB4], buffer);

        CtrlMeas::encode(&Conversion::Pressure(Oversampling::UltraHighResolution), &mut buffer);
        assert_eq!([0xF4], buffer);
    }

    #[test]
    fn oversampling_from_field() {
        assert_eq!(Ok(Oversampling::UltraLowPower), Oversampling::try_from(0));
        assert_eq!(Ok(Oversampling::UltraHighResolution), Oversampling::try_from(3));
        assert_eq!(Err(UnexpectedValue(4)), Oversampling::try_from(4));
    }

    #[test]
    fn oversampling_conversion_times() {
        assert_eq!(5, Oversampling::UltraLowPower.conversion_time_ms());
        assert_eq!(8, Oversampling::Standard.conversion_time_ms());
        assert_eq!(14, Oversampling::HighResolution.conversion_time_ms());
        assert_eq!(26, Oversampling::UltraHighResolution.conversion_time_ms());
    }
}
