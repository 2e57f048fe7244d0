// Licensed under the Apache-2.0 license

//! i.MX I2C driver module.
//!
//! This module drives the I2C controller found on i.MX6 and i.MX8M `SoCs`
//! through complete master-mode transactions, for bare-metal and `no_std`
//! environments. The transaction engine is generic over an injected register
//! interface, delay source, and logger, so the same code runs against real
//! hardware and against a simulated register file in tests.

pub mod common;
pub mod hardware_instantiation;
pub mod hardware_interface;
pub mod i2c_controller;
pub mod imx_i2c;
pub mod registers;
pub mod traits;

pub use common::{Error, I2cBusConfig, I2cBusConfigBuilder, I2cSpeed};
pub use hardware_interface::{MmioRegisterInterface, RegisterInterface};
pub use i2c_controller::I2cController;
pub use imx_i2c::ImxI2c;
pub use traits::I2cMaster;
