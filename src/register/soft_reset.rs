//! ### SOFT_RESET - Soft reset (`0xE0`, 1 byte, W)
//!
//! Writing `0xB6` performs the same sequence as a power-on reset. Any other value has no effect.
//! The device needs its start-up time (10 ms) before it answers again.
//!
//! See also: [`Bmp180::soft_reset()`](crate::Bmp180::soft_reset)
#![doc(alias = "SOFT_RESET")]
use crate::register::{Reg, Writable};

/// Marker type for the SOFT_RESET (0xE0) register
pub struct SoftReset;
impl Reg for SoftReset { const ADDR: u8 = 0xE0; }

/// The only payload the SOFT_RESET register acts on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResetCommand;

impl From<ResetCommand> for u8 {
    fn from(_: ResetCommand) -> u8 {
        0xB6
    }
}

impl Writable for SoftReset {
    type In = ResetCommand;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}
