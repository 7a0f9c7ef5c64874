//! Processor status register (P).
//!
//! The 2A03 keeps the decimal flag as a plain storage bit: ADC and SBC
//! are always binary.

/// Carry.
pub const C: u8 = 0x01;

/// Zero.
pub const Z: u8 = 0x02;

/// Interrupt disable. While set, the IRQ line is ignored.
pub const I: u8 = 0x04;

/// Decimal. Settable by SED/PLP, no effect on arithmetic.
pub const D: u8 = 0x08;

/// Break. Only exists in copies of P pushed to the stack: set by BRK and
/// PHP, clear for NMI and IRQ.
pub const B: u8 = 0x10;

/// Unused. Always 1 when pushed.
pub const U: u8 = 0x20;

/// Overflow.
pub const V: u8 = 0x40;

/// Negative.
pub const N: u8 = 0x80;

/// Processor status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.set_if(N, value & 0x80 != 0);
        self.set_if(Z, value == 0);
    }

    /// Byte written to the stack. `software` marks BRK/PHP pushes.
    #[must_use]
    pub const fn pushed(self, software: bool) -> u8 {
        let p = (self.0 | U) & !B;
        if software { p | B } else { p }
    }

    /// Status restored from a stack byte by PLP or RTI. B never survives.
    #[must_use]
    pub const fn pulled(value: u8) -> Self {
        Self((value | U) & !B)
    }
}
