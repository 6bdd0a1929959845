use crate::bus::Bus;
use crate::register::calibration::{Ac1, Ac2, Ac3, Ac4, Ac5, Ac6, Mb, Mc, Md, B1, B2};
use crate::register::chip_id::BMP180_CHIP_ID;
use crate::Bmp180Result;

/// Returns true if `id`, as read from the ID register, identifies a BMP180.
pub fn is_valid_device(id: u8) -> bool {
    id == BMP180_CHIP_ID
}

/// The eleven factory calibration constants of one device.
///
/// Read once per session and immutable afterwards. A soft reset re-reads them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl CalibrationData {
    /// Reads all eleven words from the EEPROM, one register at a time, in address order.
    pub fn read<B: Bus>(bus: &mut B) -> Bmp180Result<Self, B::Error> {
        let words = [
            bus.read::<Ac1>()?,
            bus.read::<Ac2>()?,
            bus.read::<Ac3>()?,
            bus.read::<Ac4>()?,
            bus.read::<Ac5>()?,
            bus.read::<Ac6>()?,
            bus.read::<B1>()?,
            bus.read::<B2>()?,
            bus.read::<Mb>()?,
            bus.read::<Mc>()?,
            bus.read::<Md>()?,
        ];

        let calibration = Self::from_words(words);
        log::debug!("bmp180: loaded calibration {:?}", calibration);

        Ok(calibration)
    }

    /// Interprets raw EEPROM words, in address order AC1..MD.
    ///
    /// AC4, AC5 and AC6 are unsigned, every other word is two's complement.
    pub fn from_words(words: [u16; 11]) -> Self {
        Self {
            ac1: words[0] as i16,
            ac2: words[1] as i16,
            ac3: words[2] as i16,
            ac4: words[3],
            ac5: words[4],
            ac6: words[5],
            b1: words[6] as i16,
            b2: words[7] as i16,
            mb: words[8] as i16,
            mc: words[9] as i16,
            md: words[10] as i16,
        }
    }
}

/// Coefficients of the floating point form of the compensation polynomials.
///
/// Derived once from a [`CalibrationData`]. Never reuse them with a different calibration set,
/// build a new instance instead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DerivedCoefficients {
    pub c3: f64,
    pub c4: f64,
    pub b1: f64,
    pub c5: f64,
    pub c6: f64,
    pub mc: f64,
    pub md: f64,
    pub x0: f64,
    pub x1: f64,
    pub x2: f64,
    pub y0: f64,
    pub y1: f64,
    pub y2: f64,
    pub p0: f64,
    pub p1: f64,
    pub p2: f64,
}

// Powers of two of the polynomial decomposition.
const P2_11: f64 = 2048.0;
const P2_13: f64 = 8192.0;
const P2_15: f64 = 32768.0;
const P2_20: f64 = 1_048_576.0;
const P2_25: f64 = 33_554_432.0;
const P2_30: f64 = 1_073_741_824.0;
const P2_36: f64 = 68_719_476_736.0;

impl DerivedCoefficients {
    pub fn new(calibration: &CalibrationData) -> Self {
        let c3 = 160.0 * f64::from(calibration.ac3) / P2_15;
        let c4 = 1e-3 * f64::from(calibration.ac4) / P2_15;
        let b1 = 160.0 * 160.0 * f64::from(calibration.b1) / P2_30;

        Self {
            c3,
            c4,
            b1,
            c5: f64::from(calibration.ac5) / P2_15 / 160.0,
            c6: f64::from(calibration.ac6),
            mc: P2_11 / (160.0 * 160.0) * f64::from(calibration.mc),
            md: f64::from(calibration.md) / 160.0,
            x0: f64::from(calibration.ac1),
            x1: 160.0 * f64::from(calibration.ac2) / P2_13,
            x2: 160.0 * 160.0 * f64::from(calibration.b2) / P2_25,
            y0: c4 * P2_15,
            y1: c4 * c3,
            y2: c4 * b1,
            p0: (3791.0 - 8.0) / 1600.0,
            p1: 1.0 - 7357.0 / P2_20,
            p2: 3038.0 * 100.0 / P2_36,
        }
    }
}

impl From<&CalibrationData> for DerivedCoefficients {
    fn from(calibration: &CalibrationData) -> Self {
        Self::new(calibration)
    }
}
