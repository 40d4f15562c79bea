//! I2C bus abstractions
//!
//! Provides the write-only transport used to push controller commands and
//! framebuffer data to the display.

/// I2C bus master
///
/// The display never reads back from the controller, so only writes are
/// required. Implementations must complete the whole transfer before
/// returning; partial writes are reported as errors, not retried.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as one transaction
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }
}

/// Adapter from an `embedded-hal` 1.0 blocking I2C master
///
/// Lets any HAL that implements [`embedded_hal::i2c::I2c`] act as the
/// display transport. Errors are passed through untouched.
#[derive(Debug)]
pub struct BlockingI2c<T> {
    i2c: T,
}

impl<T> BlockingI2c<T> {
    /// Wrap an I2C master
    pub const fn new(i2c: T) -> Self {
        Self { i2c }
    }

    /// Borrow the wrapped master
    pub fn inner(&mut self) -> &mut T {
        &mut self.i2c
    }

    /// Release the wrapped master
    pub fn release(self) -> T {
        self.i2c
    }
}

impl<T: embedded_hal::i2c::I2c> I2cBus for BlockingI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write(&mut self.i2c, address, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    /// Records every write transaction, optionally failing them all
    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl embedded_hal::i2c::I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Bus);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_adapter_forwards_writes() {
        let mut bus = BlockingI2c::new(MockI2c::default());
        bus.write(0x3C, &[0x80, 0xAE]).unwrap();
        bus.write(0x3D, &[0x40, 1, 2, 3]).unwrap();

        let mock = bus.release();
        assert_eq!(mock.writes.len(), 2);
        assert_eq!(mock.writes[0], (0x3C, vec![0x80, 0xAE]));
        assert_eq!(mock.writes[1], (0x3D, vec![0x40, 1, 2, 3]));
    }

    #[test]
    fn test_adapter_passes_errors_through() {
        let mut bus = BlockingI2c::new(MockI2c {
            fail: true,
            ..Default::default()
        });
        assert_eq!(bus.write(0x3C, &[0x80, 0xAF]), Err(ErrorKind::Bus));
        assert!(bus.inner().writes.is_empty());
    }

    #[test]
    fn test_mut_ref_is_a_bus() {
        fn send<B: I2cBus>(mut bus: B) -> Result<(), B::Error> {
            bus.write(0x3C, &[0x00])
        }

        let mut bus = BlockingI2c::new(MockI2c::default());
        send(&mut bus).unwrap();
        send(&mut bus).unwrap();
        assert_eq!(bus.inner().writes.len(), 2);
    }
}
