//! Dummy reads reach real registers and their side effects land.

use emu_core::{Bus, Observable, Value};
use emu_nes::Nes;
use nes_cartridge::{Mirroring, Nrom};

#[rustfmt::skip]
const PROGRAM: &[u8] = &[
    0xA2, 0x10,       // $8000  LDX #$10
    0x4C, 0x02, 0x80, // $8002  JMP $8002
    0xBD, 0xF2, 0x3F, // $8005  LDA $3FF2,X
    0xAD, 0x02, 0x40, // $8008  LDA $4002
];

/// Idle in the JMP loop until vblank, then latch the first `$2005` write
/// so the write toggle is set.
fn in_vblank_with_toggle_set() -> Nes {
    let mut prg = vec![0xEA; 0x8000];
    prg[..PROGRAM.len()].copy_from_slice(PROGRAM);
    prg[0x7FFC..0x7FFE].copy_from_slice(&[0x00, 0x80]);
    let mut nes = Nes::from_mapper(Box::new(Nrom::new(
        prg,
        vec![0; 0x2000],
        Mirroring::Horizontal,
    )));

    while !nes.bus().ppu().in_vblank() {
        nes.step();
    }
    nes.bus_mut().write(0x2005, 0x00);
    assert_eq!(nes.query("ppu.w"), Some(Value::Bool(true)));
    nes
}

#[test]
fn page_cross_dummy_read_acknowledges_vblank() {
    let mut nes = in_vblank_with_toggle_set();
    nes.cpu_mut().regs.pc = 0x8005;

    // $3FF2 + $10 = $4002; the dummy read hits $3F02, a mirror of $2002.
    assert_eq!(nes.step(), 5);
    assert_eq!(nes.query("ppu.vblank"), Some(Value::Bool(false)));
    assert_eq!(nes.query("ppu.w"), Some(Value::Bool(false)));
}

#[test]
fn target_read_alone_leaves_vblank_set() {
    let mut nes = in_vblank_with_toggle_set();
    nes.cpu_mut().regs.pc = 0x8008;

    assert_eq!(nes.step(), 4);
    assert_eq!(nes.query("ppu.vblank"), Some(Value::Bool(true)));
    assert_eq!(nes.query("ppu.w"), Some(Value::Bool(true)));
}
