//! Register catalog for the BMP180.
//!
//! Every register (or fixed-size register block) is represented by a marker type that knows its
//! address and transfer length. Readable registers decode the bytes the device returns, writable
//! registers encode a typed value into the bytes sent after the register address.
//!
//! | Address       | Marker                                 | Access |
//! |---------------|----------------------------------------|--------|
//! | `0xAA`-`0xBF` | [`calibration::CalibrationWord`]       | R      |
//! | `0xD0`        | [`chip_id::ChipId`]                    | R      |
//! | `0xE0`        | [`soft_reset::SoftReset`]              | W      |
//! | `0xF4`        | [`ctrl_meas::CtrlMeas`]                | W      |
//! | `0xF6`-`0xF8` | [`out::OutTemperature`], [`out::OutPressure`] | R |
pub mod calibration;
pub mod chip_id;
pub mod ctrl_meas;
pub mod out;
pub mod soft_reset;

/// Returned when a register holds a value the device never produces, which points at a failed
/// transfer rather than real data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    /// Address of the first register of the block.
    pub register: u8,
    /// The decoded value, as read.
    pub value: u16,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u16) -> Self {
        Self { register, value }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnexpectedValue(pub u8);

pub trait Reg {
    const ADDR: u8;
}

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
