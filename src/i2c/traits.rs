// Licensed under the Apache-2.0 license

//! Hardware abstraction trait for I2C master engines.
//!
//! The i.MX controller family performs register-addressed transfers: every
//! transaction opens with a write phase carrying the target device's
//! register address, and reads then re-address the device with a repeated
//! start. The trait captures exactly that surface so higher layers stay
//! generic over the concrete engine.

use crate::i2c::common::I2cBusConfig;

/// Register-addressed I2C master operations.
pub trait I2cMaster {
    /// Engine-specific error type compatible with embedded-hal error
    /// classification.
    type Error: embedded_hal::i2c::Error + core::fmt::Debug;

    /// Read `buffer.len()` bytes starting at `register_address` on the
    /// device selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the transaction cannot be completed; no
    /// partial-success state exists — either every requested byte was
    /// transferred or the transaction aborted.
    fn read_register(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write `bytes` starting at `register_address` on the device selected
    /// by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the transaction cannot be completed.
    fn write_register(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        bytes: &[u8],
    ) -> Result<(), Self::Error>;
}
