use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the OUT_MSB and OUT_LSB (0xF6 - 0xF7) registers holding an uncompensated
/// temperature.
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
///
/// Only meaningful after a [`Conversion::Temperature`](crate::register::ctrl_meas::Conversion)
/// has finished.
pub struct OutTemperature;
impl Reg for OutTemperature { const ADDR: u8 = 0xF6; }

impl Readable for OutTemperature {
    type Out = u16;

    const N: usize = 2;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }
}

/// Marker struct for the OUT_MSB, OUT_LSB and OUT_XLSB (0xF6 - 0xF8) registers holding an
/// uncompensated pressure.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
///
/// The decoded value is the full 24-bit word. Only the upper `16 + oss` bits carry data, so
/// callers shift it right by `8 - oss`.
pub struct OutPressure;
impl Reg for OutPressure { const ADDR: u8 = 0xF6; }

impl Readable for OutPressure {
    type Out = u32;

    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }
}
