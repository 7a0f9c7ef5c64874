//! Conformance harness for ROMs that report through `$6000`.
//!
//! The protocol used by blargg's test ROMs:
//! - `$6001-$6003` hold `DE B0 61` once the ROM has initialised the area.
//! - `$6000` is the status: `$80` while running, `$81` when the ROM wants
//!   the reset button pressed (no sooner than 100 ms later), anything
//!   below `$80` when finished. `$00` is a pass.
//! - `$6004` onward is a NUL-terminated text report.

use std::path::Path;

use emu_core::Bus;
use nes_cartridge::CartridgeError;
use thiserror::Error;

use crate::config::{CPU_HZ, NesConfig};
use crate::nes::Nes;

const STATUS: u16 = 0x6000;
const SIGNATURE: [u8; 3] = [0xDE, 0xB0, 0x61];
const MESSAGE: u16 = 0x6004;
const MESSAGE_END: u16 = 0x7FFF;

/// Status while the test is running.
pub const RUNNING: u8 = 0x80;
/// Status asking for a reset.
pub const NEEDS_RESET: u8 = 0x81;

/// Emulated delay before answering a reset request.
const RESET_DELAY_CYCLES: u64 = CPU_HZ / 10;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
    #[error("ROM never reported a running test at $6000")]
    NeverSignalled,
    #[error("test did not finish (last status ${last_status:02X})")]
    Timeout { last_status: u8 },
    #[error("cannot read ROM: {0}")]
    Io(#[from] std::io::Error),
}

/// Final report of a finished test ROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    /// Final `$6000` value. Zero is a pass.
    pub status: u8,
    /// Text the ROM left at `$6004`.
    pub message: String,
}

impl TestOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == 0
    }
}

/// Load an iNES file and run it through the harness.
pub fn run_file(path: impl AsRef<Path>, max_frames: u64) -> Result<TestOutcome, HarnessError> {
    let rom_data = std::fs::read(path)?;
    let mut nes = Nes::new(&NesConfig::new(rom_data))?;
    run(&mut nes, max_frames)
}

/// Run `nes` frame by frame until its ROM reports a final status or
/// `max_frames` have passed.
pub fn run(nes: &mut Nes, max_frames: u64) -> Result<TestOutcome, HarnessError> {
    let mut running = false;
    let mut last_status = 0;

    for _ in 0..max_frames {
        nes.run_frame();
        if !signed(nes) {
            continue;
        }

        let status = nes.bus().peek(STATUS);
        last_status = status;
        match status {
            RUNNING => running = true,
            NEEDS_RESET => {
                log::warn!("ROM requested reset: {}", read_message(nes));
                let deadline = nes.bus().clock().total().get() + RESET_DELAY_CYCLES;
                while nes.bus().clock().total().get() < deadline {
                    nes.step();
                }
                nes.reset();
                running = true;
            }
            _ if running => {
                return Ok(TestOutcome {
                    status,
                    message: read_message(nes),
                });
            }
            _ => {}
        }
    }

    if running {
        Err(HarnessError::Timeout { last_status })
    } else {
        Err(HarnessError::NeverSignalled)
    }
}

fn signed(nes: &Nes) -> bool {
    let bus = nes.bus();
    (0..3u16).all(|i| bus.peek(STATUS + 1 + i) == SIGNATURE[usize::from(i)])
}

/// NUL-terminated text at `$6004`.
fn read_message(nes: &Nes) -> String {
    let bus = nes.bus();
    let bytes: Vec<u8> = (MESSAGE..=MESSAGE_END)
        .map(|addr| bus.peek(addr))
        .take_while(|&b| b != 0)
        .collect();
    String::from_utf8_lossy(&bytes).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nes_cartridge::{Mirroring, Nrom};

    /// Assemble a ROM that writes the signature, a message, status `$80`,
    /// idles for `delay_frames` vblanks, then writes `final_status`.
    fn reporting_rom(final_status: u8, delay_frames: u8) -> Nes {
        let mut code = vec![
            0x78, // SEI
            0xA9, 0xDE, 0x8D, 0x01, 0x60, // LDA #$DE; STA $6001
            0xA9, 0xB0, 0x8D, 0x02, 0x60, // LDA #$B0; STA $6002
            0xA9, 0x61, 0x8D, 0x03, 0x60, // LDA #$61; STA $6003
            0xA9, b'o', 0x8D, 0x04, 0x60, // LDA #'o'; STA $6004
            0xA9, b'k', 0x8D, 0x05, 0x60, // LDA #'k'; STA $6005
            0xA9, 0x0A, 0x8D, 0x06, 0x60, // LDA #'\n'; STA $6006
            0xA9, 0x00, 0x8D, 0x07, 0x60, // LDA #0; STA $6007
            0xA9, 0x80, 0x8D, 0x00, 0x60, // LDA #$80; STA $6000
            0xA2, delay_frames, // LDX #delay
        ];
        // wait: BIT $2002; BPL wait; DEX; BNE wait
        code.extend_from_slice(&[0x2C, 0x02, 0x20, 0x10, 0xFB, 0xCA, 0xD0, 0xF8]);
        code.extend_from_slice(&[0xA9, final_status, 0x8D, 0x00, 0x60]);
        let spin = 0x8000 + code.len() as u16;
        code.extend_from_slice(&[0x4C, spin as u8, (spin >> 8) as u8]);

        let mut prg = vec![0xEA; 0x8000];
        prg[..code.len()].copy_from_slice(&code);
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        Nes::from_mapper(Box::new(Nrom::new(
            prg,
            vec![0; 0x2000],
            Mirroring::Vertical,
        )))
    }

    #[test]
    fn reports_pass_with_message() {
        let mut nes = reporting_rom(0x00, 3);
        let outcome = run(&mut nes, 60).expect("finishes");
        assert!(outcome.passed());
        assert_eq!(outcome.message, "ok");
    }

    #[test]
    fn reports_failure_code() {
        let mut nes = reporting_rom(0x03, 3);
        let outcome = run(&mut nes, 60).expect("finishes");
        assert_eq!(outcome.status, 3);
        assert!(!outcome.passed());
    }

    #[test]
    fn times_out_while_running() {
        let mut nes = reporting_rom(0x00, 200);
        match run(&mut nes, 20) {
            Err(HarnessError::Timeout { last_status }) => assert_eq!(last_status, RUNNING),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn silent_rom_never_signals() {
        let mut prg = vec![0xEA; 0x8000];
        prg[..3].copy_from_slice(&[0x4C, 0x00, 0x80]);
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        let mut nes = Nes::from_mapper(Box::new(Nrom::new(
            prg,
            vec![0; 0x2000],
            Mirroring::Vertical,
        )));
        assert!(matches!(run(&mut nes, 5), Err(HarnessError::NeverSignalled)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = run_file("/nonexistent/rom.nes", 1).expect_err("no file");
        assert!(matches!(err, HarnessError::Io(_)));
    }
}
