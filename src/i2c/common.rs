// Licensed under the Apache-2.0 license

//! Common types for the i.MX I2C driver: per-transaction configuration,
//! bus speed presets, and the error taxonomy.

use fugit::MicrosDurationU32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum I2cSpeed {
    Standard = 100_000,
    Fast = 400_000,
    FastPlus = 1_000_000,
}

/// Transaction outcome taxonomy.
///
/// `InvalidParameter` is detected before the transaction touches the bus;
/// every hardware-interaction failure (busy bit stuck, arbitration lost, a
/// status bit never observed within the timeout) is `DeviceError`. Failures
/// are terminal for the in-flight transaction; retrying is the caller's
/// decision.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    InvalidParameter,
    DeviceError,
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match self {
            Error::InvalidParameter | Error::DeviceError => embedded_hal::i2c::ErrorKind::Other,
        }
    }
}

/// Per-transaction controller configuration.
///
/// Constructed by the caller for every transaction and never retained by the
/// driver; the hardware registers are the only state that persists between
/// calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct I2cBusConfig {
    /// 7-bit address the controller itself answers to when addressed as a
    /// slave. Programmed once during setup.
    pub controller_slave_address: u8,
    /// Input reference clock in Hz. Zero keeps the divider programmed by an
    /// earlier boot stage.
    pub reference_freq: u32,
    /// Desired bus clock in Hz.
    pub target_freq: u32,
    /// 7-bit address of the target device for this transaction.
    pub slave_address: u8,
    /// Budget applied independently to every polling wait in the
    /// transaction, not an end-to-end deadline.
    pub timeout: MicrosDurationU32,
}

pub struct I2cBusConfigBuilder {
    controller_slave_address: u8,
    reference_freq: u32,
    target_freq: u32,
    slave_address: u8,
    timeout: MicrosDurationU32,
}

impl Default for I2cBusConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cBusConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller_slave_address: 0,
            reference_freq: 0,
            target_freq: I2cSpeed::Standard as u32,
            slave_address: 0,
            timeout: MicrosDurationU32::micros(1_000),
        }
    }
    #[must_use]
    pub fn controller_slave_address(mut self, address: u8) -> Self {
        self.controller_slave_address = address;
        self
    }
    #[must_use]
    pub fn reference_freq(mut self, freq: u32) -> Self {
        self.reference_freq = freq;
        self
    }
    #[must_use]
    pub fn target_freq(mut self, freq: u32) -> Self {
        self.target_freq = freq;
        self
    }
    #[must_use]
    pub fn speed(mut self, speed: I2cSpeed) -> Self {
        self.target_freq = speed as u32;
        self
    }
    #[must_use]
    pub fn slave_address(mut self, address: u8) -> Self {
        self.slave_address = address;
        self
    }
    #[must_use]
    pub fn timeout(mut self, timeout: MicrosDurationU32) -> Self {
        self.timeout = timeout;
        self
    }
    #[must_use]
    pub fn build(self) -> I2cBusConfig {
        I2cBusConfig {
            controller_slave_address: self.controller_slave_address,
            reference_freq: self.reference_freq,
            target_freq: self.target_freq,
            slave_address: self.slave_address,
            timeout: self.timeout,
        }
    }
}
