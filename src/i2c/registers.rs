// Licensed under the Apache-2.0 license

//! Register layout of the i.MX I2C controller.
//!
//! Five 16-bit registers at a 4-byte stride from the controller base. The
//! offsets, widths, and bit positions are fixed by the `SoC` silicon and must
//! never be reordered or resized.

/// Slave-mode address register (IADR), byte offset from the controller base.
pub const IADR: usize = 0x00;
/// Frequency divider register (IFDR).
pub const IFDR: usize = 0x04;
/// Control register (I2CR).
pub const I2CR: usize = 0x08;
/// Status register (I2SR).
pub const I2SR: usize = 0x0C;
/// Data register (I2DR).
pub const I2DR: usize = 0x10;

// I2CR bits
pub const I2CR_RSTA: u16 = 1 << 2; // repeated start
pub const I2CR_TXAK: u16 = 1 << 3; // suppress acknowledge on receive
pub const I2CR_MTX: u16 = 1 << 4; // transmit mode
pub const I2CR_MSTA: u16 = 1 << 5; // master mode
pub const I2CR_IIEN: u16 = 1 << 6; // interrupt enable
pub const I2CR_IEN: u16 = 1 << 7; // controller enable

// I2SR bits
pub const I2SR_RXAK: u16 = 0x0001; // received acknowledge
pub const I2SR_IIF: u16 = 0x0002; // transfer complete
pub const I2SR_SRW: u16 = 0x0004; // slave read/write direction
pub const I2SR_IAL: u16 = 0x0010; // arbitration lost
pub const I2SR_IBB: u16 = 0x0020; // bus busy
pub const I2SR_IAAS: u16 = 0x0040; // addressed as slave
pub const I2SR_ICF: u16 = 0x0080; // data transfer complete

/// One selectable bus-clock divider: the division ratio and the IFDR code
/// that programs it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DividerEntry {
    pub divider: u32,
    pub code: u16,
}

const fn entry(divider: u32, code: u16) -> DividerEntry {
    DividerEntry { divider, code }
}

/// Selectable dividers, ascending by ratio. The IFDR codes interleave the
/// controller's two prescaler banks, so they are not monotonic themselves.
pub const DIVIDER_TABLE: [DividerEntry; 50] = [
    entry(22, 0x20),
    entry(24, 0x21),
    entry(26, 0x22),
    entry(28, 0x23),
    entry(30, 0x00),
    entry(32, 0x24),
    entry(36, 0x25),
    entry(40, 0x26),
    entry(42, 0x03),
    entry(44, 0x27),
    entry(48, 0x28),
    entry(52, 0x05),
    entry(56, 0x29),
    entry(60, 0x06),
    entry(64, 0x2A),
    entry(72, 0x2B),
    entry(80, 0x2C),
    entry(88, 0x09),
    entry(96, 0x2D),
    entry(104, 0x0A),
    entry(112, 0x2E),
    entry(128, 0x2F),
    entry(144, 0x0C),
    entry(160, 0x30),
    entry(192, 0x31),
    entry(224, 0x32),
    entry(240, 0x0F),
    entry(256, 0x33),
    entry(288, 0x10),
    entry(320, 0x34),
    entry(384, 0x35),
    entry(448, 0x36),
    entry(480, 0x13),
    entry(512, 0x37),
    entry(576, 0x14),
    entry(640, 0x38),
    entry(768, 0x39),
    entry(896, 0x3A),
    entry(960, 0x17),
    entry(1024, 0x3B),
    entry(1152, 0x18),
    entry(1280, 0x3C),
    entry(1536, 0x3D),
    entry(1792, 0x3E),
    entry(1920, 0x1B),
    entry(2048, 0x3F),
    entry(2304, 0x1C),
    entry(2560, 0x1D),
    entry(3072, 0x1E),
    entry(3840, 0x1F),
];

/// Select the entry for the smallest tabulated ratio that is >= `ratio`.
///
/// Rounding is always upward so the resulting bus clock lands at or below
/// the target frequency, never above it. `None` means the requested ratio
/// exceeds the largest representable divider.
pub fn select_divider(ratio: u32) -> Option<DividerEntry> {
    DIVIDER_TABLE
        .iter()
        .copied()
        .find(|entry| entry.divider >= ratio)
}
