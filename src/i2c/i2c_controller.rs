// Licensed under the Apache-2.0 license

//! High-level I2C controller abstraction for i.MX `SoCs`.
//!
//! Wraps a register-addressed master engine together with the bus
//! configuration its transactions run with, and exposes the standard
//! `embedded_hal::i2c::I2c` interface on top.

use crate::common::{LogLevel, Logger, NoOpLogger};
use crate::i2c::common::{Error, I2cBusConfig};
use crate::i2c::traits::I2cMaster;
use embedded_hal::i2c::{Operation, SevenBitAddress};

/// Owns a master engine plus the configuration applied to every
/// transaction. The device address passed per embedded-hal call replaces
/// the configured one; everything else is reused, and the engine still
/// receives a fresh configuration value per transaction.
pub struct I2cController<H: I2cMaster, L: Logger = NoOpLogger> {
    pub hardware: H,
    pub config: I2cBusConfig,
    pub logger: L,
}

impl<H: I2cMaster, L: Logger> I2cController<H, L> {
    pub fn new(hardware: H, config: I2cBusConfig, logger: L) -> Self {
        Self {
            hardware,
            config,
            logger,
        }
    }
}

impl<H: I2cMaster<Error = Error>, L: Logger> embedded_hal::i2c::ErrorType for I2cController<H, L> {
    type Error = Error;
}

/// The controller family transfers data against a device register, so only
/// the transaction shapes with a leading register address are expressible:
/// a single write whose first byte is the register address, or a one-byte
/// register write followed by a read (the engine generates the repeated
/// start). Anything else is rejected before any hardware access.
impl<H: I2cMaster<Error = Error>, L: Logger> embedded_hal::i2c::I2c for I2cController<H, L> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let config = I2cBusConfig {
            slave_address: address,
            ..self.config
        };

        match operations {
            [Operation::Write(bytes)] => {
                let Some((register_address, payload)) = bytes.split_first() else {
                    self.logger.log(
                        LogLevel::Error,
                        format_args!("i2c: empty write carries no register address"),
                    );
                    return Err(Error::InvalidParameter);
                };
                self.hardware
                    .write_register(&config, *register_address, payload)
            }
            [Operation::Write(bytes), Operation::Read(buffer)] => {
                let Some((register_address, [])) = bytes.split_first() else {
                    self.logger.log(
                        LogLevel::Error,
                        format_args!("i2c: register address must be a single byte"),
                    );
                    return Err(Error::InvalidParameter);
                };
                self.hardware
                    .read_register(&config, *register_address, buffer)
            }
            _ => {
                self.logger.log(
                    LogLevel::Error,
                    format_args!("i2c: unsupported transaction shape"),
                );
                Err(Error::InvalidParameter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i2c::common::I2cBusConfigBuilder;
    use embedded_hal::i2c::I2c;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Read {
            address: u8,
            register: u8,
            len: usize,
        },
        Write {
            address: u8,
            register: u8,
            bytes: Vec<u8>,
        },
    }

    #[derive(Default)]
    struct MockMaster {
        calls: Vec<Call>,
    }

    impl I2cMaster for MockMaster {
        type Error = Error;

        fn read_register(
            &mut self,
            config: &I2cBusConfig,
            register_address: u8,
            buffer: &mut [u8],
        ) -> Result<(), Error> {
            self.calls.push(Call::Read {
                address: config.slave_address,
                register: register_address,
                len: buffer.len(),
            });
            buffer.fill(0x5A);
            Ok(())
        }

        fn write_register(
            &mut self,
            config: &I2cBusConfig,
            register_address: u8,
            bytes: &[u8],
        ) -> Result<(), Error> {
            self.calls.push(Call::Write {
                address: config.slave_address,
                register: register_address,
                bytes: bytes.to_vec(),
            });
            Ok(())
        }
    }

    fn controller() -> I2cController<MockMaster> {
        I2cController::new(
            MockMaster::default(),
            I2cBusConfigBuilder::new().build(),
            NoOpLogger,
        )
    }

    #[test]
    fn write_splits_register_address_from_payload() {
        let mut controller = controller();
        controller.write(0x50, &[0x04, 0xAA, 0xBB]).unwrap();

        assert_eq!(
            controller.hardware.calls,
            vec![Call::Write {
                address: 0x50,
                register: 0x04,
                bytes: vec![0xAA, 0xBB],
            }]
        );
    }

    #[test]
    fn write_read_maps_to_a_register_read() {
        let mut controller = controller();
        let mut buffer = [0u8; 3];
        controller.write_read(0x50, &[0x10], &mut buffer).unwrap();

        assert_eq!(buffer, [0x5A; 3]);
        assert_eq!(
            controller.hardware.calls,
            vec![Call::Read {
                address: 0x50,
                register: 0x10,
                len: 3,
            }]
        );
    }

    #[test]
    fn unsupported_shapes_are_rejected_before_hardware() {
        let mut controller = controller();

        let mut buffer = [0u8; 2];
        assert_eq!(
            controller.read(0x50, &mut buffer),
            Err(Error::InvalidParameter)
        );
        assert_eq!(controller.write(0x50, &[]), Err(Error::InvalidParameter));
        assert_eq!(
            controller.write_read(0x50, &[0x01, 0x02], &mut buffer),
            Err(Error::InvalidParameter)
        );
        assert!(controller.hardware.calls.is_empty());
    }
}
