use crate::bus::{Bus, MAX_REG_BYTES};
use crate::error::Bmp180Error;
use crate::register::calibration::{Ac1, Ac2, Ac3, Ac4, Ac5, Ac6, Mb, Mc, Md, B1, B2};
use crate::register::{Readable, Writable};
use embedded_hal::delay::DelayNs;
use heapless::{LinearMap, Vec};

#[derive(Debug)]
enum RegisterValue {
    Data { bytes: [u8; MAX_REG_BYTES], len: usize },
    Failure,
}

/// In-memory stand-in for a BMP180 on a bus.
///
/// Reads are answered from canned responses keyed by register address and transfer length.
/// Every read address and every write is recorded.
pub struct FakeBus<const N: usize> {
    regs: LinearMap<(u8, usize), RegisterValue, N>,
    reads: Vec<u8, 128>,
    writes: Vec<(u8, u8), 32>,
}

pub struct FakeDelay {
    delays_ms: Vec<u32, 64>,
}

impl FakeDelay {
    pub fn new() -> Self {
        FakeDelay { delays_ms: Vec::new() }
    }

    /// Every delay requested so far, in milliseconds.
    pub fn delays_ms(&self) -> &[u32] {
        &self.delays_ms
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns.div_ceil(1_000_000)).unwrap();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms).unwrap();
    }
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }

    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs
            .insert((R::ADDR, R::N), RegisterValue::Data { bytes: register_value, len: data.len() })
            .unwrap();
    }

    /// Makes every following read of `R` fail as if the device did not acknowledge.
    pub fn with_failure<R: Readable>(&mut self) {
        self.regs.insert((R::ADDR, R::N), RegisterValue::Failure).unwrap();
    }

    /// Makes every following write to `W` fail.
    pub fn with_write_failure<W: Writable>(&mut self) {
        self.regs.insert((W::ADDR, W::N), RegisterValue::Failure).unwrap();
    }

    /// Answers the eleven calibration registers with `words`, in address order.
    pub fn with_calibration(&mut self, words: &[u16; 11]) {
        self.with_response::<Ac1>(&words[0].to_be_bytes());
        self.with_response::<Ac2>(&words[1].to_be_bytes());
        self.with_response::<Ac3>(&words[2].to_be_bytes());
        self.with_response::<Ac4>(&words[3].to_be_bytes());
        self.with_response::<Ac5>(&words[4].to_be_bytes());
        self.with_response::<Ac6>(&words[5].to_be_bytes());
        self.with_response::<B1>(&words[6].to_be_bytes());
        self.with_response::<B2>(&words[7].to_be_bytes());
        self.with_response::<Mb>(&words[8].to_be_bytes());
        self.with_response::<Mc>(&words[9].to_be_bytes());
        self.with_response::<Md>(&words[10].to_be_bytes());
    }

    /// Addresses of every register read so far.
    pub fn reads(&self) -> &[u8] {
        &self.reads
    }

    /// (register, value) of every write so far.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub fn clear_log(&mut self) {
        self.reads.clear();
        self.writes.clear();
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp180Error<Self::Error>> {
        self.reads.push(R::ADDR).unwrap();

        match self.regs.get(&(R::ADDR, R::N)) {
            Some(RegisterValue::Data { bytes, len }) if *len == R::N => {
                R::decode(&bytes[..R::N]).map_err(Bmp180Error::UnexpectedRegisterData)
            }
            Some(RegisterValue::Failure) => Err(Bmp180Error::Bus(())),
            _ => panic!("No mocked value for register 0x{:x} and length {}", R::ADDR, R::N),
        }
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp180Error<Self::Error>> {
        if let Some(RegisterValue::Failure) = self.regs.get(&(W::ADDR, W::N)) {
            return Err(Bmp180Error::Bus(()));
        }

        let mut buffer = [0u8; MAX_REG_BYTES];
        W::encode(v, &mut buffer[..W::N]);
        self.writes.push((W::ADDR, buffer[0])).unwrap();

        Ok(())
    }
}
