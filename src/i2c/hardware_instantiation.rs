// Licensed under the Apache-2.0 license

//! Ready-made controller instances for the supported `SoCs`.
//!
//! Each `SoC` exposes a fixed set of I2C controllers at silicon-assigned
//! base addresses. The constructors here claim a controller's register block
//! and wire it to the caller's delay source and logger. Because every
//! controller is reached through the same [`MmioRegisterInterface`] type,
//! instances for different buses share one type and can live in ordinary
//! arrays.

use embedded_hal::delay::DelayNs;

use crate::common::{Logger, NoOpLogger};
use crate::i2c::common::I2cBusConfig;
use crate::i2c::hardware_interface::MmioRegisterInterface;
use crate::i2c::i2c_controller::I2cController;
use crate::i2c::imx_i2c::ImxI2c;

/// I2C controller base addresses on i.MX6 (Quad/Dual/Solo).
pub mod imx6 {
    pub const I2C1_BASE: usize = 0x021A_0000;
    pub const I2C2_BASE: usize = 0x021A_4000;
    pub const I2C3_BASE: usize = 0x021A_8000;
}

/// I2C controller base addresses on i.MX8M.
pub mod imx8m {
    pub const I2C1_BASE: usize = 0x30A2_0000;
    pub const I2C2_BASE: usize = 0x30A3_0000;
    pub const I2C3_BASE: usize = 0x30A4_0000;
    pub const I2C4_BASE: usize = 0x30A5_0000;
}

/// Engine type produced by the instantiation helpers.
pub type MmioI2c<D, L> = ImxI2c<MmioRegisterInterface, D, L>;

/// Build the transaction engine for the controller at `base`.
///
/// # Safety
///
/// `base` must be one of the `SoC`'s I2C controller base addresses, the
/// register block must be mapped device memory, and the caller must hold
/// exclusive access to that controller for the lifetime of the returned
/// value.
#[must_use]
pub unsafe fn engine_at<D: DelayNs, L: Logger>(base: usize, delay: D, logger: L) -> MmioI2c<D, L> {
    let regs = unsafe { MmioRegisterInterface::new(base) };
    ImxI2c::new(regs, delay, logger)
}

/// Build an embedded-hal [`I2cController`] for the controller at `base`.
///
/// The logger goes to the transaction engine, where the diagnostics are
/// produced; the wrapper itself stays quiet.
///
/// # Safety
///
/// Same requirements as [`engine_at`].
#[must_use]
pub unsafe fn controller_at<D: DelayNs, L: Logger>(
    base: usize,
    config: I2cBusConfig,
    delay: D,
    logger: L,
) -> I2cController<MmioI2c<D, L>> {
    let engine = unsafe { engine_at(base, delay, logger) };
    I2cController::new(engine, config, NoOpLogger)
}
