//! NTSC lookup tables and the non-linear mixer tables.

/// Length counter load values, indexed by the top five bits of a
/// length-load register write.
pub const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96,
    22, 192, 24, 72, 26, 16, 28, 32, 30,
];

/// Noise timer periods in CPU cycles.
pub const NOISE_PERIOD_TABLE: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

/// DMC output rates in CPU cycles per bit.
pub const DMC_RATE_TABLE: [u16; 16] = [
    428, 380, 340, 320, 286, 254, 226, 214, 190, 160, 142, 128, 106, 84, 72, 54,
];

/// Pulse duty waveforms, 8 steps each: 12.5%, 25%, 50%, 75% (negated 25%).
pub const DUTY_TABLE: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 0, 0, 0],
    [1, 0, 0, 1, 1, 1, 1, 1],
];

/// Triangle waveform: 15 down to 0, then back up.
pub const TRIANGLE_TABLE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10,
    11, 12, 13, 14, 15,
];

/// Combined pulse output, indexed by `pulse1 + pulse2` (0-30).
pub static PULSE_MIX: [f32; 31] = pulse_mix();

/// Combined triangle/noise/DMC output, indexed by
/// `3 * triangle + 2 * noise + dmc` (0-202).
pub static TND_MIX: [f32; 203] = tnd_mix();

const fn pulse_mix() -> [f32; 31] {
    let mut table = [0.0; 31];
    let mut n = 1;
    while n < 31 {
        table[n] = 95.52 / (8128.0 / n as f32 + 100.0);
        n += 1;
    }
    table
}

const fn tnd_mix() -> [f32; 203] {
    let mut table = [0.0; 203];
    let mut n = 1;
    while n < 203 {
        table[n] = 163.67 / (24329.0 / n as f32 + 100.0);
        n += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixer_tables_start_silent_and_rise() {
        assert!(PULSE_MIX[0].abs() < f32::EPSILON);
        assert!(TND_MIX[0].abs() < f32::EPSILON);
        assert!(PULSE_MIX.windows(2).all(|w| w[0] < w[1]));
        assert!(TND_MIX.windows(2).all(|w| w[0] < w[1]));
        assert!((PULSE_MIX[30] - 0.2575).abs() < 0.001);
        assert!((TND_MIX[202] - 0.7425).abs() < 0.001);
    }
}
