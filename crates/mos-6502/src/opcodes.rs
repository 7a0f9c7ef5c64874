//! The 2A03 opcode table.
//!
//! One immutable descriptor per opcode byte, including the unofficial
//! opcodes. Cycle counts are the documented base costs; the page-cross
//! bonus applies only to read instructions using an indexed mode that can
//! carry into the high byte.

/// Operand addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
    Relative,
}

/// Operation performed by an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Unofficial
    Ahx,
    Alr,
    Anc,
    Arr,
    Axs,
    Dcp,
    Isb,
    Kil,
    Las,
    Lax,
    Rla,
    Rra,
    Sax,
    Shx,
    Shy,
    Slo,
    Sre,
    Tas,
    Xaa,
}

/// How an instruction uses its memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandUse {
    /// No memory operand, or the operand is only an address (jumps).
    None,
    Read,
    Write,
    ReadModifyWrite,
}

impl Instruction {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Ahx => "AHX",
            Self::Alr => "ALR",
            Self::Anc => "ANC",
            Self::Arr => "ARR",
            Self::Axs => "AXS",
            Self::Dcp => "DCP",
            Self::Isb => "ISB",
            Self::Kil => "KIL",
            Self::Las => "LAS",
            Self::Lax => "LAX",
            Self::Rla => "RLA",
            Self::Rra => "RRA",
            Self::Sax => "SAX",
            Self::Shx => "SHX",
            Self::Shy => "SHY",
            Self::Slo => "SLO",
            Self::Sre => "SRE",
            Self::Tas => "TAS",
            Self::Xaa => "XAA",
        }
    }

    /// How the instruction touches its operand.
    #[must_use]
    pub const fn operand_use(self) -> OperandUse {
        match self {
            Self::Sta | Self::Stx | Self::Sty | Self::Sax | Self::Ahx | Self::Shx
            | Self::Shy | Self::Tas => OperandUse::Write,
            Self::Asl | Self::Lsr | Self::Rol | Self::Ror | Self::Inc | Self::Dec
            | Self::Slo | Self::Rla | Self::Sre | Self::Rra | Self::Dcp | Self::Isb => {
                OperandUse::ReadModifyWrite
            }
            Self::Adc | Self::And | Self::Bit | Self::Cmp | Self::Cpx | Self::Cpy
            | Self::Eor | Self::Lda | Self::Ldx | Self::Ldy | Self::Ora | Self::Sbc
            | Self::Nop | Self::Lax | Self::Las | Self::Anc | Self::Alr | Self::Arr
            | Self::Axs | Self::Xaa => OperandUse::Read,
            _ => OperandUse::None,
        }
    }

    /// Unofficial opcodes with no modelled effect.
    #[must_use]
    pub const fn is_stub(self) -> bool {
        matches!(
            self,
            Self::Kil | Self::Xaa | Self::Ahx | Self::Tas | Self::Las | Self::Shx | Self::Shy
        )
    }
}

/// Immutable per-opcode metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub instruction: Instruction,
    pub mode: Mode,
    /// Base cycle count, including the opcode fetch.
    pub cycles: u8,
    /// One extra cycle when the indexed address crosses a page.
    pub page_cycle: bool,
}

impl Descriptor {
    /// Writes and read-modify-writes always take the indexed dummy read,
    /// whether or not the index carries.
    #[must_use]
    pub const fn forces_dummy_read(&self) -> bool {
        matches!(
            self.instruction.operand_use(),
            OperandUse::Write | OperandUse::ReadModifyWrite
        )
    }

    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        self.instruction.mnemonic()
    }
}

const fn op(instruction: Instruction, mode: Mode, cycles: u8) -> Descriptor {
    let indexed = matches!(
        mode,
        Mode::AbsoluteX | Mode::AbsoluteY | Mode::IndirectIndexed
    );
    let reads = matches!(instruction.operand_use(), OperandUse::Read);
    Descriptor {
        instruction,
        mode,
        cycles,
        page_cycle: indexed && reads,
    }
}

const IMP: Mode = Mode::Implied;
const ACC: Mode = Mode::Accumulator;
const IMM: Mode = Mode::Immediate;
const ZP: Mode = Mode::ZeroPage;
const ZPX: Mode = Mode::ZeroPageX;
const ZPY: Mode = Mode::ZeroPageY;
const ABS: Mode = Mode::Absolute;
const ABSX: Mode = Mode::AbsoluteX;
const ABSY: Mode = Mode::AbsoluteY;
const IND: Mode = Mode::Indirect;
const INDX: Mode = Mode::IndexedIndirect;
const INDY: Mode = Mode::IndirectIndexed;
const REL: Mode = Mode::Relative;

#[allow(clippy::enum_glob_use)]
use Instruction::*;

/// Descriptor for every opcode byte.
pub static OPCODES: [Descriptor; 256] = [
    // $0x
    op(Brk, IMP, 7), // $00
    op(Ora, INDX, 6), // $01
    op(Kil, IMP, 2), // $02
    op(Slo, INDX, 8), // $03
    op(Nop, ZP, 3), // $04
    op(Ora, ZP, 3), // $05
    op(Asl, ZP, 5), // $06
    op(Slo, ZP, 5), // $07
    op(Php, IMP, 3), // $08
    op(Ora, IMM, 2), // $09
    op(Asl, ACC, 2), // $0A
    op(Anc, IMM, 2), // $0B
    op(Nop, ABS, 4), // $0C
    op(Ora, ABS, 4), // $0D
    op(Asl, ABS, 6), // $0E
    op(Slo, ABS, 6), // $0F
    // $1x
    op(Bpl, REL, 2), // $10
    op(Ora, INDY, 5), // $11
    op(Kil, IMP, 2), // $12
    op(Slo, INDY, 8), // $13
    op(Nop, ZPX, 4), // $14
    op(Ora, ZPX, 4), // $15
    op(Asl, ZPX, 6), // $16
    op(Slo, ZPX, 6), // $17
    op(Clc, IMP, 2), // $18
    op(Ora, ABSY, 4), // $19
    op(Nop, IMP, 2), // $1A
    op(Slo, ABSY, 7), // $1B
    op(Nop, ABSX, 4), // $1C
    op(Ora, ABSX, 4), // $1D
    op(Asl, ABSX, 7), // $1E
    op(Slo, ABSX, 7), // $1F
    // $2x
    op(Jsr, ABS, 6), // $20
    op(And, INDX, 6), // $21
    op(Kil, IMP, 2), // $22
    op(Rla, INDX, 8), // $23
    op(Bit, ZP, 3), // $24
    op(And, ZP, 3), // $25
    op(Rol, ZP, 5), // $26
    op(Rla, ZP, 5), // $27
    op(Plp, IMP, 4), // $28
    op(And, IMM, 2), // $29
    op(Rol, ACC, 2), // $2A
    op(Anc, IMM, 2), // $2B
    op(Bit, ABS, 4), // $2C
    op(And, ABS, 4), // $2D
    op(Rol, ABS, 6), // $2E
    op(Rla, ABS, 6), // $2F
    // $3x
    op(Bmi, REL, 2), // $30
    op(And, INDY, 5), // $31
    op(Kil, IMP, 2), // $32
    op(Rla, INDY, 8), // $33
    op(Nop, ZPX, 4), // $34
    op(And, ZPX, 4), // $35
    op(Rol, ZPX, 6), // $36
    op(Rla, ZPX, 6), // $37
    op(Sec, IMP, 2), // $38
    op(And, ABSY, 4), // $39
    op(Nop, IMP, 2), // $3A
    op(Rla, ABSY, 7), // $3B
    op(Nop, ABSX, 4), // $3C
    op(And, ABSX, 4), // $3D
    op(Rol, ABSX, 7), // $3E
    op(Rla, ABSX, 7), // $3F
    // $4x
    op(Rti, IMP, 6), // $40
    op(Eor, INDX, 6), // $41
    op(Kil, IMP, 2), // $42
    op(Sre, INDX, 8), // $43
    op(Nop, ZP, 3), // $44
    op(Eor, ZP, 3), // $45
    op(Lsr, ZP, 5), // $46
    op(Sre, ZP, 5), // $47
    op(Pha, IMP, 3), // $48
    op(Eor, IMM, 2), // $49
    op(Lsr, ACC, 2), // $4A
    op(Alr, IMM, 2), // $4B
    op(Jmp, ABS, 3), // $4C
    op(Eor, ABS, 4), // $4D
    op(Lsr, ABS, 6), // $4E
    op(Sre, ABS, 6), // $4F
    // $5x
    op(Bvc, REL, 2), // $50
    op(Eor, INDY, 5), // $51
    op(Kil, IMP, 2), // $52
    op(Sre, INDY, 8), // $53
    op(Nop, ZPX, 4), // $54
    op(Eor, ZPX, 4), // $55
    op(Lsr, ZPX, 6), // $56
    op(Sre, ZPX, 6), // $57
    op(Cli, IMP, 2), // $58
    op(Eor, ABSY, 4), // $59
    op(Nop, IMP, 2), // $5A
    op(Sre, ABSY, 7), // $5B
    op(Nop, ABSX, 4), // $5C
    op(Eor, ABSX, 4), // $5D
    op(Lsr, ABSX, 7), // $5E
    op(Sre, ABSX, 7), // $5F
    // $6x
    op(Rts, IMP, 6), // $60
    op(Adc, INDX, 6), // $61
    op(Kil, IMP, 2), // $62
    op(Rra, INDX, 8), // $63
    op(Nop, ZP, 3), // $64
    op(Adc, ZP, 3), // $65
    op(Ror, ZP, 5), // $66
    op(Rra, ZP, 5), // $67
    op(Pla, IMP, 4), // $68
    op(Adc, IMM, 2), // $69
    op(Ror, ACC, 2), // $6A
    op(Arr, IMM, 2), // $6B
    op(Jmp, IND, 5), // $6C
    op(Adc, ABS, 4), // $6D
    op(Ror, ABS, 6), // $6E
    op(Rra, ABS, 6), // $6F
    // $7x
    op(Bvs, REL, 2), // $70
    op(Adc, INDY, 5), // $71
    op(Kil, IMP, 2), // $72
    op(Rra, INDY, 8), // $73
    op(Nop, ZPX, 4), // $74
    op(Adc, ZPX, 4), // $75
    op(Ror, ZPX, 6), // $76
    op(Rra, ZPX, 6), // $77
    op(Sei, IMP, 2), // $78
    op(Adc, ABSY, 4), // $79
    op(Nop, IMP, 2), // $7A
    op(Rra, ABSY, 7), // $7B
    op(Nop, ABSX, 4), // $7C
    op(Adc, ABSX, 4), // $7D
    op(Ror, ABSX, 7), // $7E
    op(Rra, ABSX, 7), // $7F
    // $8x
    op(Nop, IMM, 2), // $80
    op(Sta, INDX, 6), // $81
    op(Nop, IMM, 2), // $82
    op(Sax, INDX, 6), // $83
    op(Sty, ZP, 3), // $84
    op(Sta, ZP, 3), // $85
    op(Stx, ZP, 3), // $86
    op(Sax, ZP, 3), // $87
    op(Dey, IMP, 2), // $88
    op(Nop, IMM, 2), // $89
    op(Txa, IMP, 2), // $8A
    op(Xaa, IMM, 2), // $8B
    op(Sty, ABS, 4), // $8C
    op(Sta, ABS, 4), // $8D
    op(Stx, ABS, 4), // $8E
    op(Sax, ABS, 4), // $8F
    // $9x
    op(Bcc, REL, 2), // $90
    op(Sta, INDY, 6), // $91
    op(Kil, IMP, 2), // $92
    op(Ahx, INDY, 6), // $93
    op(Sty, ZPX, 4), // $94
    op(Sta, ZPX, 4), // $95
    op(Stx, ZPY, 4), // $96
    op(Sax, ZPY, 4), // $97
    op(Tya, IMP, 2), // $98
    op(Sta, ABSY, 5), // $99
    op(Txs, IMP, 2), // $9A
    op(Tas, ABSY, 5), // $9B
    op(Shy, ABSX, 5), // $9C
    op(Sta, ABSX, 5), // $9D
    op(Shx, ABSY, 5), // $9E
    op(Ahx, ABSY, 5), // $9F
    // $Ax
    op(Ldy, IMM, 2), // $A0
    op(Lda, INDX, 6), // $A1
    op(Ldx, IMM, 2), // $A2
    op(Lax, INDX, 6), // $A3
    op(Ldy, ZP, 3), // $A4
    op(Lda, ZP, 3), // $A5
    op(Ldx, ZP, 3), // $A6
    op(Lax, ZP, 3), // $A7
    op(Tay, IMP, 2), // $A8
    op(Lda, IMM, 2), // $A9
    op(Tax, IMP, 2), // $AA
    op(Lax, IMM, 2), // $AB
    op(Ldy, ABS, 4), // $AC
    op(Lda, ABS, 4), // $AD
    op(Ldx, ABS, 4), // $AE
    op(Lax, ABS, 4), // $AF
    // $Bx
    op(Bcs, REL, 2), // $B0
    op(Lda, INDY, 5), // $B1
    op(Kil, IMP, 2), // $B2
    op(Lax, INDY, 5), // $B3
    op(Ldy, ZPX, 4), // $B4
    op(Lda, ZPX, 4), // $B5
    op(Ldx, ZPY, 4), // $B6
    op(Lax, ZPY, 4), // $B7
    op(Clv, IMP, 2), // $B8
    op(Lda, ABSY, 4), // $B9
    op(Tsx, IMP, 2), // $BA
    op(Las, ABSY, 4), // $BB
    op(Ldy, ABSX, 4), // $BC
    op(Lda, ABSX, 4), // $BD
    op(Ldx, ABSY, 4), // $BE
    op(Lax, ABSY, 4), // $BF
    // $Cx
    op(Cpy, IMM, 2), // $C0
    op(Cmp, INDX, 6), // $C1
    op(Nop, IMM, 2), // $C2
    op(Dcp, INDX, 8), // $C3
    op(Cpy, ZP, 3), // $C4
    op(Cmp, ZP, 3), // $C5
    op(Dec, ZP, 5), // $C6
    op(Dcp, ZP, 5), // $C7
    op(Iny, IMP, 2), // $C8
    op(Cmp, IMM, 2), // $C9
    op(Dex, IMP, 2), // $CA
    op(Axs, IMM, 2), // $CB
    op(Cpy, ABS, 4), // $CC
    op(Cmp, ABS, 4), // $CD
    op(Dec, ABS, 6), // $CE
    op(Dcp, ABS, 6), // $CF
    // $Dx
    op(Bne, REL, 2), // $D0
    op(Cmp, INDY, 5), // $D1
    op(Kil, IMP, 2), // $D2
    op(Dcp, INDY, 8), // $D3
    op(Nop, ZPX, 4), // $D4
    op(Cmp, ZPX, 4), // $D5
    op(Dec, ZPX, 6), // $D6
    op(Dcp, ZPX, 6), // $D7
    op(Cld, IMP, 2), // $D8
    op(Cmp, ABSY, 4), // $D9
    op(Nop, IMP, 2), // $DA
    op(Dcp, ABSY, 7), // $DB
    op(Nop, ABSX, 4), // $DC
    op(Cmp, ABSX, 4), // $DD
    op(Dec, ABSX, 7), // $DE
    op(Dcp, ABSX, 7), // $DF
    // $Ex
    op(Cpx, IMM, 2), // $E0
    op(Sbc, INDX, 6), // $E1
    op(Nop, IMM, 2), // $E2
    op(Isb, INDX, 8), // $E3
    op(Cpx, ZP, 3), // $E4
    op(Sbc, ZP, 3), // $E5
    op(Inc, ZP, 5), // $E6
    op(Isb, ZP, 5), // $E7
    op(Inx, IMP, 2), // $E8
    op(Sbc, IMM, 2), // $E9
    op(Nop, IMP, 2), // $EA
    op(Sbc, IMM, 2), // $EB
    op(Cpx, ABS, 4), // $EC
    op(Sbc, ABS, 4), // $ED
    op(Inc, ABS, 6), // $EE
    op(Isb, ABS, 6), // $EF
    // $Fx
    op(Beq, REL, 2), // $F0
    op(Sbc, INDY, 5), // $F1
    op(Kil, IMP, 2), // $F2
    op(Isb, INDY, 8), // $F3
    op(Nop, ZPX, 4), // $F4
    op(Sbc, ZPX, 4), // $F5
    op(Inc, ZPX, 6), // $F6
    op(Isb, ZPX, 6), // $F7
    op(Sed, IMP, 2), // $F8
    op(Sbc, ABSY, 4), // $F9
    op(Nop, IMP, 2), // $FA
    op(Isb, ABSY, 7), // $FB
    op(Nop, ABSX, 4), // $FC
    op(Sbc, ABSX, 4), // $FD
    op(Inc, ABSX, 7), // $FE
    op(Isb, ABSX, 7), // $FF
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Every official opcode with its documented operation and mode.
    #[rustfmt::skip]
    const OFFICIAL: &[(u8, Instruction, Mode)] = &[
        (0x69, Adc, IMM), (0x65, Adc, ZP), (0x75, Adc, ZPX), (0x6D, Adc, ABS),
        (0x7D, Adc, ABSX), (0x79, Adc, ABSY), (0x61, Adc, INDX), (0x71, Adc, INDY),
        (0x29, And, IMM), (0x25, And, ZP), (0x35, And, ZPX), (0x2D, And, ABS),
        (0x3D, And, ABSX), (0x39, And, ABSY), (0x21, And, INDX), (0x31, And, INDY),
        (0x0A, Asl, ACC), (0x06, Asl, ZP), (0x16, Asl, ZPX), (0x0E, Asl, ABS),
        (0x1E, Asl, ABSX),
        (0x90, Bcc, REL),
        (0xB0, Bcs, REL),
        (0xF0, Beq, REL),
        (0x30, Bmi, REL),
        (0xD0, Bne, REL),
        (0x10, Bpl, REL),
        (0x50, Bvc, REL),
        (0x70, Bvs, REL),
        (0x24, Bit, ZP), (0x2C, Bit, ABS),
        (0x00, Brk, IMP),
        (0x18, Clc, IMP),
        (0xD8, Cld, IMP),
        (0x58, Cli, IMP),
        (0xB8, Clv, IMP),
        (0xC9, Cmp, IMM), (0xC5, Cmp, ZP), (0xD5, Cmp, ZPX), (0xCD, Cmp, ABS),
        (0xDD, Cmp, ABSX), (0xD9, Cmp, ABSY), (0xC1, Cmp, INDX), (0xD1, Cmp, INDY),
        (0xE0, Cpx, IMM), (0xE4, Cpx, ZP), (0xEC, Cpx, ABS),
        (0xC0, Cpy, IMM), (0xC4, Cpy, ZP), (0xCC, Cpy, ABS),
        (0xC6, Dec, ZP), (0xD6, Dec, ZPX), (0xCE, Dec, ABS), (0xDE, Dec, ABSX),
        (0xCA, Dex, IMP),
        (0x88, Dey, IMP),
        (0x49, Eor, IMM), (0x45, Eor, ZP), (0x55, Eor, ZPX), (0x4D, Eor, ABS),
        (0x5D, Eor, ABSX), (0x59, Eor, ABSY), (0x41, Eor, INDX), (0x51, Eor, INDY),
        (0xE6, Inc, ZP), (0xF6, Inc, ZPX), (0xEE, Inc, ABS), (0xFE, Inc, ABSX),
        (0xE8, Inx, IMP),
        (0xC8, Iny, IMP),
        (0x4C, Jmp, ABS), (0x6C, Jmp, IND),
        (0x20, Jsr, ABS),
        (0xA9, Lda, IMM), (0xA5, Lda, ZP), (0xB5, Lda, ZPX), (0xAD, Lda, ABS),
        (0xBD, Lda, ABSX), (0xB9, Lda, ABSY), (0xA1, Lda, INDX), (0xB1, Lda, INDY),
        (0xA2, Ldx, IMM), (0xA6, Ldx, ZP), (0xB6, Ldx, ZPY), (0xAE, Ldx, ABS),
        (0xBE, Ldx, ABSY),
        (0xA0, Ldy, IMM), (0xA4, Ldy, ZP), (0xB4, Ldy, ZPX), (0xAC, Ldy, ABS),
        (0xBC, Ldy, ABSX),
        (0x4A, Lsr, ACC), (0x46, Lsr, ZP), (0x56, Lsr, ZPX), (0x4E, Lsr, ABS),
        (0x5E, Lsr, ABSX),
        (0xEA, Nop, IMP),
        (0x09, Ora, IMM), (0x05, Ora, ZP), (0x15, Ora, ZPX), (0x0D, Ora, ABS),
        (0x1D, Ora, ABSX), (0x19, Ora, ABSY), (0x01, Ora, INDX), (0x11, Ora, INDY),
        (0x48, Pha, IMP),
        (0x08, Php, IMP),
        (0x68, Pla, IMP),
        (0x28, Plp, IMP),
        (0x2A, Rol, ACC), (0x26, Rol, ZP), (0x36, Rol, ZPX), (0x2E, Rol, ABS),
        (0x3E, Rol, ABSX),
        (0x6A, Ror, ACC), (0x66, Ror, ZP), (0x76, Ror, ZPX), (0x6E, Ror, ABS),
        (0x7E, Ror, ABSX),
        (0x40, Rti, IMP),
        (0x60, Rts, IMP),
        (0xE9, Sbc, IMM), (0xE5, Sbc, ZP), (0xF5, Sbc, ZPX), (0xED, Sbc, ABS),
        (0xFD, Sbc, ABSX), (0xF9, Sbc, ABSY), (0xE1, Sbc, INDX), (0xF1, Sbc, INDY),
        (0x38, Sec, IMP),
        (0xF8, Sed, IMP),
        (0x78, Sei, IMP),
        (0x85, Sta, ZP), (0x95, Sta, ZPX), (0x8D, Sta, ABS), (0x9D, Sta, ABSX),
        (0x99, Sta, ABSY), (0x81, Sta, INDX), (0x91, Sta, INDY),
        (0x86, Stx, ZP), (0x96, Stx, ZPY), (0x8E, Stx, ABS),
        (0x84, Sty, ZP), (0x94, Sty, ZPX), (0x8C, Sty, ABS),
        (0xAA, Tax, IMP),
        (0xA8, Tay, IMP),
        (0xBA, Tsx, IMP),
        (0x8A, Txa, IMP),
        (0x9A, Txs, IMP),
        (0x98, Tya, IMP),
    ];

    #[test]
    fn official_opcodes_decode_as_documented() {
        assert_eq!(OFFICIAL.len(), 151);
        for &(code, instruction, mode) in OFFICIAL {
            let d = OPCODES[usize::from(code)];
            assert_eq!(
                (d.instruction, d.mode),
                (instruction, mode),
                "${code:02X}"
            );
        }
    }

    #[test]
    fn official_spot_checks() {
        assert_eq!(OPCODES[0xA9], op(Lda, IMM, 2));
        assert_eq!(OPCODES[0x6C], op(Jmp, IND, 5));
        assert_eq!(OPCODES[0x9D].cycles, 5);
        assert!(!OPCODES[0x9D].page_cycle);
        assert!(OPCODES[0xBD].page_cycle);
        assert!(OPCODES[0x11].page_cycle);
        assert_eq!(OPCODES[0xEB].instruction, Sbc);
    }

    #[test]
    fn branches_never_take_the_page_bonus() {
        for code in [0x10, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            let d = OPCODES[code];
            assert_eq!(d.mode, REL, "{code:02X}");
            assert_eq!(d.cycles, 2);
            assert!(!d.page_cycle);
        }
    }

    #[test]
    fn writes_force_the_dummy_read() {
        assert!(OPCODES[0x91].forces_dummy_read()); // STA (d),Y
        assert!(OPCODES[0x1E].forces_dummy_read()); // ASL abs,X
        assert!(OPCODES[0xDB].forces_dummy_read()); // DCP abs,Y
        assert!(!OPCODES[0xB9].forces_dummy_read()); // LDA abs,Y
    }

    #[test]
    fn unofficial_nops_read_their_operand() {
        assert_eq!(OPCODES[0x1C].instruction, Nop);
        assert_eq!(OPCODES[0x1C].mode, ABSX);
        assert!(OPCODES[0x1C].page_cycle);
        assert_eq!(OPCODES[0x04].cycles, 3);
    }
}
