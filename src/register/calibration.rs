//! ### Calibration EEPROM (`0xAA` - `0xBF`, 11 x 2 bytes, R)
//!
//! Eleven factory-programmed 16 bit words, stored big-endian (MSB at the lower address).
//! Signedness is not part of the register, it is applied by
//! [`CalibrationData`](crate::calibration::CalibrationData).
//!
//! No word of a working device is `0x0000` or `0xFFFF` (datasheet section 3.4). Reading either
//! means the bus returned floating or grounded data, so decoding rejects them.
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for a single calibration word starting at address `A`.
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct CalibrationWord<const A: u8>;
impl<const A: u8> Reg for CalibrationWord<A> { const ADDR: u8 = A; }

impl<const A: u8> Readable for CalibrationWord<A> {
    type Out = u16;

    const N: usize = 2;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        match u16::from_be_bytes([b[0], b[1]]) {
            word @ (0x0000 | 0xFFFF) => Err(InvalidRegisterField::new(A, word)),
            word => Ok(word),
        }
    }
}

pub type Ac1 = CalibrationWord<0xAA>;
pub type Ac2 = CalibrationWord<0xAC>;
pub type Ac3 = CalibrationWord<0xAE>;
pub type Ac4 = CalibrationWord<0xB0>;
pub type Ac5 = CalibrationWord<0xB2>;
pub type Ac6 = CalibrationWord<0xB4>;
pub type B1 = CalibrationWord<0xB6>;
pub type B2 = CalibrationWord<0xB8>;
pub type Mb = CalibrationWord<0xBA>;
pub type Mc = CalibrationWord<0xBC>;
pub type Md = CalibrationWord<0xBE>;
