// Licensed under the Apache-2.0 license

//! i.MX I2C master transaction engine.
//!
//! Drives the memory-mapped controller through complete master-mode
//! transactions: clock divider selection, start and address phase, byte
//! transfers with status polling, read completion sequencing, and stop
//! generation. Every wait is an active poll at 1 us granularity, bounded by
//! the per-wait budget in [`I2cBusConfig`]; the budget is re-applied
//! independently at every wait, it is not an end-to-end deadline.
//!
//! The engine holds no state between transactions. Each `read`/`write`
//! re-initializes the controller from scratch, and the caller is responsible
//! for serializing access to one controller instance.

use embedded_hal::delay::DelayNs;

use crate::common::{LogLevel, Logger};
use crate::i2c::common::{Error, I2cBusConfig};
use crate::i2c::hardware_interface::RegisterInterface;
use crate::i2c::registers::{
    select_divider, I2CR, I2CR_IEN, I2CR_MSTA, I2CR_MTX, I2CR_RSTA, I2CR_TXAK, I2DR, I2SR,
    I2SR_IAL, I2SR_IBB, I2SR_ICF, I2SR_IIF, IADR, IFDR,
};
use crate::i2c::traits::I2cMaster;

/// Settling time after the controller enable bit is set.
const ENABLE_SETTLE_US: u32 = 100;

/// Master transaction engine over one controller register block.
pub struct ImxI2c<R, D, L> {
    regs: R,
    delay: D,
    logger: L,
}

impl<R: RegisterInterface, D: DelayNs, L: Logger> ImxI2c<R, D, L> {
    pub fn new(regs: R, delay: D, logger: L) -> Self {
        Self { regs, delay, logger }
    }

    /// Hand the register interface, delay source, and logger back to the
    /// caller.
    pub fn release(self) -> (R, D, L) {
        (self.regs, self.delay, self.logger)
    }

    /// Master-mode register read.
    ///
    /// Establishes the start + address + register phase, re-addresses the
    /// device in read direction with a repeated start, then receives
    /// `buffer.len()` bytes. The stop condition is generated before the last
    /// byte is read, while it is still being clocked, and generated again
    /// unconditionally on the way out; the double stop is harmless and
    /// releases the bus on the error path too.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` when no clock divider covers the requested
    /// ratio, `Error::DeviceError` for any hardware-interaction failure. A
    /// cleanup-stop failure never replaces an earlier transfer error.
    pub fn read(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        let result = self.read_transfer(config, register_address, buffer);
        self.complete_with_stop(config, result)
    }

    /// Master-mode register write.
    ///
    /// Establishes the start + address + register phase, then sends every
    /// byte of `bytes` in order, aborting on the first failure. The bus is
    /// released on success and on failure alike.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ImxI2c::read`].
    pub fn write(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        bytes: &[u8],
    ) -> Result<(), Error> {
        let result = self.write_transfer(config, register_address, bytes);
        self.complete_with_stop(config, result)
    }

    /// Unconditional cleanup stop. The transfer's own error, if any, wins
    /// over a stop failure; the stop result only decides the outcome of an
    /// otherwise successful transaction.
    fn complete_with_stop(
        &mut self,
        config: &I2cBusConfig,
        result: Result<(), Error>,
    ) -> Result<(), Error> {
        let stop = self.generate_stop(config);
        match result {
            Ok(()) => stop,
            Err(error) => Err(error),
        }
    }

    /// Bring the controller up into master mode with the bus taken.
    ///
    /// The controller is disabled and its status cleared first, so setup
    /// does not depend on whatever state an earlier transaction or boot
    /// stage left behind. A zero reference frequency skips divider
    /// programming and keeps the value installed by an earlier boot stage.
    fn setup_controller(&mut self, config: &I2cBusConfig) -> Result<(), Error> {
        self.regs.write16(I2CR, 0);
        self.regs.write16(I2SR, 0);

        if config.reference_freq != 0 {
            if config.target_freq == 0 {
                self.logger
                    .log(LogLevel::Error, format_args!("i2c: target frequency is zero"));
                return Err(Error::InvalidParameter);
            }
            let ratio = config.reference_freq / config.target_freq;
            let Some(entry) = select_divider(ratio) else {
                self.logger.log(
                    LogLevel::Error,
                    format_args!("i2c: no divider covers ratio {ratio}"),
                );
                return Err(Error::InvalidParameter);
            };
            self.logger.log(
                LogLevel::Debug,
                format_args!("i2c: divider {} code {:#04x}", entry.divider, entry.code),
            );
            self.regs.write16(IFDR, entry.code);
        }

        self.regs
            .write16(IADR, u16::from(config.controller_slave_address) << 1);

        // IEN must be set before any other control bit has an effect.
        let mut i2cr = self.regs.read16(I2CR);
        i2cr |= I2CR_IEN;
        self.regs.write16(I2CR, i2cr);
        self.delay.delay_us(ENABLE_SETTLE_US);

        self.regs.write16(I2SR, 0);

        if let Err(status) = self.wait_status_clear(config, I2SR_IBB) {
            self.logger.log(
                LogLevel::Error,
                format_args!("i2c: controller remains busy, status {status:#06x}"),
            );
            return Err(Error::DeviceError);
        }

        i2cr |= I2CR_MSTA;
        self.regs.write16(I2CR, i2cr);

        if let Err(status) = self.wait_status_set(config, I2SR_IBB) {
            self.logger.log(
                LogLevel::Error,
                format_args!("i2c: controller remains idle, status {status:#06x}"),
            );
            return Err(Error::DeviceError);
        }

        Ok(())
    }

    /// Take the bus and send the address + register phase. Every transaction
    /// re-initializes the controller; there is no already-configured fast
    /// path.
    fn generate_start(&mut self, config: &I2cBusConfig, register_address: u8) -> Result<(), Error> {
        self.setup_controller(config)?;

        let i2cr = self.regs.read16(I2CR) | I2CR_MTX;
        self.regs.write16(I2CR, i2cr);

        // The address phase is a write even when a read follows.
        if !self.send_byte(config, config.slave_address << 1) {
            let status = self.regs.read16(I2SR);
            self.logger.log(
                LogLevel::Error,
                format_args!("i2c: slave address transfer failed, status {status:#06x}"),
            );
            return Err(Error::DeviceError);
        }

        if !self.send_byte(config, register_address) {
            let status = self.regs.read16(I2SR);
            self.logger.log(
                LogLevel::Error,
                format_args!("i2c: register address transfer failed, status {status:#06x}"),
            );
            return Err(Error::DeviceError);
        }

        Ok(())
    }

    /// Release the bus and wait for it to report idle.
    fn generate_stop(&mut self, config: &I2cBusConfig) -> Result<(), Error> {
        let i2cr = self.regs.read16(I2CR) & !(I2CR_MSTA | I2CR_MTX);
        self.regs.write16(I2CR, i2cr);

        if let Err(status) = self.wait_status_clear(config, I2SR_IBB) {
            self.logger.log(
                LogLevel::Error,
                format_args!("i2c: bus did not go idle after stop, status {status:#06x}"),
            );
            return Err(Error::DeviceError);
        }

        Ok(())
    }

    fn read_transfer(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        self.generate_start(config, register_address)?;

        // Re-address the device in read direction without releasing the bus.
        let i2cr = self.regs.read16(I2CR) | I2CR_RSTA;
        self.regs.write16(I2CR, i2cr);

        if !self.send_byte(config, (config.slave_address << 1) | 1) {
            let status = self.regs.read16(I2SR);
            self.logger.log(
                LogLevel::Error,
                format_args!("i2c: read address transfer failed, status {status:#06x}"),
            );
            return Err(Error::DeviceError);
        }

        let mut i2cr = self.regs.read16(I2CR);

        // NXP application note AN4481: a single-byte read must not
        // acknowledge its only byte, so the stop condition can be generated
        // before that byte is latched.
        if buffer.len() == 1 {
            i2cr |= I2CR_TXAK;
        } else {
            i2cr &= !I2CR_TXAK;
        }

        i2cr &= !I2CR_MTX;
        self.regs.write16(I2CR, i2cr);

        // Reading the data register kicks off reception of the first byte.
        self.regs.write16(I2SR, 0);
        let _ = self.regs.read16(I2DR);

        let len = buffer.len();
        for (index, slot) in buffer.iter_mut().enumerate() {
            let remaining = len - index;

            if let Err(status) = self.wait_status_set(config, I2SR_IIF) {
                self.logger.log(
                    LogLevel::Error,
                    format_args!("i2c: read transfer did not complete, status {status:#06x}"),
                );
                return Err(Error::DeviceError);
            }
            if let Err(status) = self.wait_status_set(config, I2SR_ICF) {
                self.logger.log(
                    LogLevel::Error,
                    format_args!("i2c: read data not ready, status {status:#06x}"),
                );
                return Err(Error::DeviceError);
            }

            // The stop condition must be asserted while the last byte is
            // still being clocked, not after it has been read.
            if remaining == 1 {
                self.generate_stop(config)?;
            }

            // The byte after the one now in flight is the last; stop
            // acknowledging from here on.
            if remaining == 2 {
                let value = self.regs.read16(I2CR) | I2CR_TXAK;
                self.regs.write16(I2CR, value);
            }

            self.regs.write16(I2SR, 0);
            *slot = self.regs.read8(I2DR);
        }

        Ok(())
    }

    fn write_transfer(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        bytes: &[u8],
    ) -> Result<(), Error> {
        self.generate_start(config, register_address)?;

        for &byte in bytes {
            if !self.send_byte(config, byte) {
                let status = self.regs.read16(I2SR);
                self.logger.log(
                    LogLevel::Error,
                    format_args!("i2c: data byte transfer failed, status {status:#06x}"),
                );
                return Err(Error::DeviceError);
            }
        }

        Ok(())
    }

    /// Send one byte and poll for its completion. Returns `false` on
    /// arbitration loss or when no completion is observed within the budget.
    fn send_byte(&mut self, config: &I2cBusConfig, data: u8) -> bool {
        // Clear status, then transfer the byte.
        self.regs.write16(I2SR, 0);
        self.regs.write16(I2DR, u16::from(data));

        let mut budget = config.timeout.ticks();
        let mut status = 0;
        while budget != 0 {
            status = self.regs.read16(I2SR);
            if status & I2SR_IIF != 0 {
                return true;
            }
            if status & I2SR_IAL != 0 {
                self.logger.log(
                    LogLevel::Error,
                    format_args!("i2c: arbitration lost, status {status:#06x}"),
                );
                return false;
            }
            self.delay.delay_us(1);
            budget -= 1;
        }

        self.logger.log(
            LogLevel::Error,
            format_args!("i2c: send byte timeout, status {status:#06x}"),
        );
        false
    }

    /// Poll until every bit of `bits` is set in the status register. On
    /// timeout, the last observed status is returned for diagnosis.
    fn wait_status_set(&mut self, config: &I2cBusConfig, bits: u16) -> Result<(), u16> {
        let mut budget = config.timeout.ticks();
        let mut status = 0;
        while budget != 0 {
            status = self.regs.read16(I2SR);
            if status & bits == bits {
                return Ok(());
            }
            self.delay.delay_us(1);
            budget -= 1;
        }
        Err(status)
    }

    /// Poll until every bit of `bits` is clear in the status register.
    fn wait_status_clear(&mut self, config: &I2cBusConfig, bits: u16) -> Result<(), u16> {
        let mut budget = config.timeout.ticks();
        let mut status = 0;
        while budget != 0 {
            status = self.regs.read16(I2SR);
            if status & bits == 0 {
                return Ok(());
            }
            self.delay.delay_us(1);
            budget -= 1;
        }
        Err(status)
    }
}

impl<R: RegisterInterface, D: DelayNs, L: Logger> I2cMaster for ImxI2c<R, D, L> {
    type Error = Error;

    fn read_register(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        self.read(config, register_address, buffer)
    }

    fn write_register(
        &mut self,
        config: &I2cBusConfig,
        register_address: u8,
        bytes: &[u8],
    ) -> Result<(), Error> {
        self.write(config, register_address, bytes)
    }
}
