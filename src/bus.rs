use embedded_hal::i2c::SevenBitAddress;

use crate::register::{Readable, Writable};
use crate::Bmp180Error;

/// Largest register block the driver transfers in one go (OUT_MSB..OUT_XLSB).
pub const MAX_REG_BYTES: usize = 3;

/// Register level access to a BMP180.
///
/// Every transfer is either "select register, then read 1 to 3 bytes" or "write register address
/// followed by one value byte". Implemented for [`I2c`], and by fakes in tests.
pub trait Bus {
    type Error;

    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp180Error<Self::Error>>;

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp180Error<Self::Error>>;
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Gives back the wrapped I2C peripheral.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = <I2cType as embedded_hal::i2c::ErrorType>::Error;

    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp180Error<Self::Error>> {
        let mut buffer = [0u8; MAX_REG_BYTES];
        let data = &mut buffer[..R::N];

        self.i2c
            .write_read(self.address, &[R::ADDR], data)
            .map_err(Bmp180Error::Bus)?;

        R::decode(data).map_err(Bmp180Error::UnexpectedRegisterData)
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp180Error<Self::Error>> {
        let mut buffer = [0u8; MAX_REG_BYTES + 1];
        buffer[0] = W::ADDR;
        W::encode(v, &mut buffer[1..=W::N]);

        self.i2c
            .write(self.address, &buffer[..=W::N])
            .map_err(Bmp180Error::Bus)
    }
}
