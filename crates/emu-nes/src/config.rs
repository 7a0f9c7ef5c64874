//! NES configuration.

/// NTSC CPU clock in Hz (crystal / 12).
pub const CPU_HZ: u64 = 1_789_773;

/// NES configuration. Only NTSC timing is modelled.
#[derive(Debug, Clone, Default)]
pub struct NesConfig {
    /// iNES file contents.
    pub rom_data: Vec<u8>,
}

impl NesConfig {
    #[must_use]
    pub fn new(rom_data: Vec<u8>) -> Self {
        Self { rom_data }
    }
}
