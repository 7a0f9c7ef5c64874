//! blargg's hardware test ROMs, driven through the `$6000` harness.
//!
//! The ROMs are not distributed with the repository. Put them under
//! `test-roms/` at the workspace root; missing files are skipped.

use std::path::PathBuf;

use emu_nes::harness;

/// Frames to wait before declaring a ROM hung. The longest suites run for
/// about 25 emulated seconds.
const MAX_FRAMES: u64 = 60 * 40;

fn rom_path(relative: &str) -> Option<PathBuf> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-roms")
        .join(relative);
    path.exists().then_some(path)
}

fn run_blargg(relative: &str) {
    let Some(path) = rom_path(relative) else {
        eprintln!("Skipping {relative}: not found");
        return;
    };
    let outcome =
        harness::run_file(&path, MAX_FRAMES).unwrap_or_else(|e| panic!("{relative}: {e}"));
    assert!(
        outcome.passed(),
        "{relative}: status {:02X}\n{}",
        outcome.status,
        outcome.message
    );
}

#[test]
#[ignore]
fn instr_test_official() {
    run_blargg("instr_test-v5/official_only.nes");
}

#[test]
#[ignore]
fn instr_timing() {
    run_blargg("instr_timing/instr_timing.nes");
}

#[test]
#[ignore]
fn cpu_dummy_reads() {
    run_blargg("cpu_dummy_reads/cpu_dummy_reads.nes");
}

#[test]
#[ignore]
fn cpu_interrupts() {
    run_blargg("cpu_interrupts_v2/cpu_interrupts.nes");
}

#[test]
#[ignore]
fn apu_test() {
    run_blargg("apu_test/apu_test.nes");
}

#[test]
#[ignore]
fn ppu_vbl_nmi() {
    run_blargg("ppu_vbl_nmi/ppu_vbl_nmi.nes");
}

#[test]
#[ignore]
fn oam_read() {
    run_blargg("oam_read/oam_read.nes");
}
