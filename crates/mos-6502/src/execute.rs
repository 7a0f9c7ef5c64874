//! Instruction execution and ALU.

use emu_core::Bus;

use crate::addressing::{Operand, branch_crosses_page};
use crate::cpu::IRQ_VECTOR;
use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::{Descriptor, Instruction};
use crate::{Mos6502, Status};

impl Mos6502 {
    /// Perform the operation on an already-resolved operand. Returns the
    /// cycles a taken branch adds on top of the table count.
    pub(crate) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        descriptor: Descriptor,
        operand: Operand,
    ) -> u32 {
        let address = operand.address;
        match descriptor.instruction {
            // Loads and stores
            Instruction::Lda => {
                let val = self.load(bus, address);
                self.do_lda(val);
            }
            Instruction::Ldx => {
                let val = self.load(bus, address);
                self.do_ldx(val);
            }
            Instruction::Ldy => {
                let val = self.load(bus, address);
                self.do_ldy(val);
            }
            Instruction::Sta => store(bus, address, self.regs.a),
            Instruction::Stx => store(bus, address, self.regs.x),
            Instruction::Sty => store(bus, address, self.regs.y),

            // Transfers
            Instruction::Tax => self.do_ldx(self.regs.a),
            Instruction::Tay => self.do_ldy(self.regs.a),
            Instruction::Txa => self.do_lda(self.regs.x),
            Instruction::Tya => self.do_lda(self.regs.y),
            Instruction::Tsx => self.do_ldx(self.regs.s),
            Instruction::Txs => self.regs.s = self.regs.x,

            // Logic and arithmetic
            Instruction::Adc => {
                let val = self.load(bus, address);
                self.do_adc(val);
            }
            Instruction::Sbc => {
                let val = self.load(bus, address);
                self.do_sbc(val);
            }
            Instruction::And => {
                let val = self.load(bus, address);
                self.do_and(val);
            }
            Instruction::Ora => {
                let val = self.load(bus, address);
                self.do_ora(val);
            }
            Instruction::Eor => {
                let val = self.load(bus, address);
                self.do_eor(val);
            }
            Instruction::Bit => {
                let val = self.load(bus, address);
                self.do_bit(val);
            }
            Instruction::Cmp => {
                let val = self.load(bus, address);
                self.compare(self.regs.a, val);
            }
            Instruction::Cpx => {
                let val = self.load(bus, address);
                self.compare(self.regs.x, val);
            }
            Instruction::Cpy => {
                let val = self.load(bus, address);
                self.compare(self.regs.y, val);
            }

            // Shifts and memory increments
            Instruction::Asl => {
                self.modify(bus, address, Self::do_asl);
            }
            Instruction::Lsr => {
                self.modify(bus, address, Self::do_lsr);
            }
            Instruction::Rol => {
                self.modify(bus, address, Self::do_rol);
            }
            Instruction::Ror => {
                self.modify(bus, address, Self::do_ror);
            }
            Instruction::Inc => {
                self.modify(bus, address, Self::do_inc);
            }
            Instruction::Dec => {
                self.modify(bus, address, Self::do_dec);
            }

            // Register increments
            Instruction::Inx => self.do_ldx(self.regs.x.wrapping_add(1)),
            Instruction::Iny => self.do_ldy(self.regs.y.wrapping_add(1)),
            Instruction::Dex => self.do_ldx(self.regs.x.wrapping_sub(1)),
            Instruction::Dey => self.do_ldy(self.regs.y.wrapping_sub(1)),

            // Branches
            Instruction::Bcc => return self.branch(bus, !self.regs.p.is_set(C), address),
            Instruction::Bcs => return self.branch(bus, self.regs.p.is_set(C), address),
            Instruction::Bne => return self.branch(bus, !self.regs.p.is_set(Z), address),
            Instruction::Beq => return self.branch(bus, self.regs.p.is_set(Z), address),
            Instruction::Bpl => return self.branch(bus, !self.regs.p.is_set(N), address),
            Instruction::Bmi => return self.branch(bus, self.regs.p.is_set(N), address),
            Instruction::Bvc => return self.branch(bus, !self.regs.p.is_set(V), address),
            Instruction::Bvs => return self.branch(bus, self.regs.p.is_set(V), address),

            // Jumps and subroutines
            Instruction::Jmp => {
                if let Some(target) = address {
                    self.regs.pc = target;
                }
            }
            Instruction::Jsr => self.op_jsr(bus, address),
            Instruction::Rts => self.op_rts(bus),
            Instruction::Rti => self.op_rti(bus),
            Instruction::Brk => self.op_brk(bus),

            // Stack
            Instruction::Pha => self.push(bus, self.regs.a),
            Instruction::Php => self.push(bus, self.regs.p.pushed(true)),
            Instruction::Pla => {
                let _ = bus.read(self.regs.stack_addr());
                let val = self.pull(bus);
                self.do_lda(val);
            }
            Instruction::Plp => {
                let _ = bus.read(self.regs.stack_addr());
                let val = self.pull(bus);
                self.regs.p = Status::pulled(val);
            }

            // Flags
            Instruction::Clc => self.regs.p.clear(C),
            Instruction::Sec => self.regs.p.set(C),
            Instruction::Cli => self.regs.p.clear(I),
            Instruction::Sei => self.regs.p.set(I),
            Instruction::Cld => self.regs.p.clear(D),
            Instruction::Sed => self.regs.p.set(D),
            Instruction::Clv => self.regs.p.clear(V),

            Instruction::Nop => {
                if let Some(addr) = address {
                    let _ = bus.read(addr);
                }
            }

            // Unofficial combined operations
            Instruction::Slo => {
                let val = self.modify(bus, address, Self::do_asl);
                self.do_ora(val);
            }
            Instruction::Rla => {
                let val = self.modify(bus, address, Self::do_rol);
                self.do_and(val);
            }
            Instruction::Sre => {
                let val = self.modify(bus, address, Self::do_lsr);
                self.do_eor(val);
            }
            Instruction::Rra => {
                let val = self.modify(bus, address, Self::do_ror);
                self.do_adc(val);
            }
            Instruction::Dcp => {
                let val = self.modify(bus, address, Self::do_dec);
                self.compare(self.regs.a, val);
            }
            Instruction::Isb => {
                let val = self.modify(bus, address, Self::do_inc);
                self.do_sbc(val);
            }
            Instruction::Lax => {
                let val = self.load(bus, address);
                self.do_lda(val);
                self.regs.x = val;
            }
            Instruction::Sax => store(bus, address, self.regs.a & self.regs.x),
            Instruction::Anc => {
                let val = self.load(bus, address);
                self.do_and(val);
                self.regs.p.set_if(C, self.regs.p.is_set(N));
            }
            Instruction::Alr => {
                let val = self.load(bus, address);
                self.do_and(val);
                self.regs.a = self.do_lsr(self.regs.a);
            }
            Instruction::Arr => {
                let val = self.load(bus, address);
                self.do_arr(val);
            }
            Instruction::Axs => {
                let val = self.load(bus, address);
                let ax = self.regs.a & self.regs.x;
                self.regs.p.set_if(C, ax >= val);
                self.do_ldx(ax.wrapping_sub(val));
            }
            Instruction::Kil
            | Instruction::Xaa
            | Instruction::Ahx
            | Instruction::Tas
            | Instruction::Las
            | Instruction::Shx
            | Instruction::Shy => {
                log::trace!(
                    "unmodelled opcode {} at {:04X}",
                    descriptor.mnemonic(),
                    self.regs.pc
                );
            }
        }
        0
    }

    // ========================================================================
    // Operand access
    // ========================================================================

    fn load<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) -> u8 {
        address.map_or(self.regs.a, |addr| bus.read(addr))
    }

    /// Read-modify-write. Memory operands see the unmodified value written
    /// back before the result, as the hardware does. With no address the
    /// accumulator is the operand.
    fn modify<B: Bus>(
        &mut self,
        bus: &mut B,
        address: Option<u16>,
        op: fn(&mut Self, u8) -> u8,
    ) -> u8 {
        match address {
            Some(addr) => {
                let val = bus.read(addr);
                bus.write(addr, val);
                let result = op(self, val);
                bus.write(addr, result);
                result
            }
            None => {
                let a = self.regs.a;
                let result = op(self, a);
                self.regs.a = result;
                result
            }
        }
    }

    pub(crate) fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    pub(crate) fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(bus, hi);
        self.push(bus, lo);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    fn pull_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        u16::from_le_bytes([lo, hi])
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// A taken branch spends one cycle reading the next opcode, and a second
    /// reading from the wrong page when the target crosses.
    fn branch<B: Bus>(&mut self, bus: &mut B, condition: bool, target: Option<u16>) -> u32 {
        let Some(target) = target else {
            return 0;
        };
        if !condition {
            return 0;
        }
        let pc = self.regs.pc;
        let _ = bus.read(pc);
        self.regs.pc = target;
        if branch_crosses_page(pc, target) {
            let _ = bus.read((pc & 0xFF00) | (target & 0x00FF));
            2
        } else {
            1
        }
    }

    fn op_jsr<B: Bus>(&mut self, bus: &mut B, target: Option<u16>) {
        let _ = bus.read(self.regs.stack_addr());
        let ret = self.regs.pc.wrapping_sub(1);
        self.push_word(bus, ret);
        if let Some(target) = target {
            self.regs.pc = target;
        }
    }

    fn op_rts<B: Bus>(&mut self, bus: &mut B) {
        let _ = bus.read(self.regs.stack_addr());
        self.regs.pc = self.pull_word(bus);
        let _ = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
    }

    fn op_rti<B: Bus>(&mut self, bus: &mut B) {
        let _ = bus.read(self.regs.stack_addr());
        let p = self.pull(bus);
        self.regs.p = Status::pulled(p);
        self.regs.pc = self.pull_word(bus);
    }

    /// BRK skips a padding byte, so the pushed return address is two past
    /// the opcode.
    fn op_brk<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.regs.pc.wrapping_add(1);
        self.push_word(bus, self.regs.pc);
        self.push(bus, self.regs.p.pushed(true));
        self.regs.p.set(I);
        self.regs.pc = self.read_vector(bus, IRQ_VECTOR);
    }

    // ========================================================================
    // ALU operations
    // ========================================================================

    fn do_lda(&mut self, val: u8) {
        self.regs.a = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldx(&mut self, val: u8) {
        self.regs.x = val;
        self.regs.p.update_nz(val);
    }

    fn do_ldy(&mut self, val: u8) {
        self.regs.y = val;
        self.regs.p.update_nz(val);
    }

    fn do_ora(&mut self, val: u8) {
        self.do_lda(self.regs.a | val);
    }

    fn do_and(&mut self, val: u8) {
        self.do_lda(self.regs.a & val);
    }

    fn do_eor(&mut self, val: u8) {
        self.do_lda(self.regs.a ^ val);
    }

    fn do_adc(&mut self, val: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(val) + u16::from(self.regs.p.is_set(C));
        let result = sum as u8;
        self.regs.p.set_if(C, sum > 0xFF);
        self.regs
            .p
            .set_if(V, (a ^ val) & 0x80 == 0 && (a ^ result) & 0x80 != 0);
        self.do_lda(result);
    }

    fn do_sbc(&mut self, val: u8) {
        let a = self.regs.a;
        let diff = i16::from(a) - i16::from(val) - i16::from(!self.regs.p.is_set(C));
        let result = diff as u8;
        self.regs.p.set_if(C, diff >= 0);
        self.regs
            .p
            .set_if(V, (a ^ val) & 0x80 != 0 && (a ^ result) & 0x80 != 0);
        self.do_lda(result);
    }

    fn compare(&mut self, reg: u8, val: u8) {
        self.regs.p.set_if(C, reg >= val);
        self.regs.p.update_nz(reg.wrapping_sub(val));
    }

    fn do_bit(&mut self, val: u8) {
        self.regs.p.set_if(Z, self.regs.a & val == 0);
        self.regs.p.set_if(V, val & 0x40 != 0);
        self.regs.p.set_if(N, val & 0x80 != 0);
    }

    fn do_asl(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = val << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_lsr(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = val >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_rol(&mut self, val: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = (val << 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    fn do_ror(&mut self, val: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C)) << 7;
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = (val >> 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    fn do_inc(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        self.regs.p.update_nz(result);
        result
    }

    fn do_dec(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        self.regs.p.update_nz(result);
        result
    }

    /// AND then rotate right, with C and V taken from bits 6 and 5 of the
    /// result.
    fn do_arr(&mut self, val: u8) {
        let carry_in = u8::from(self.regs.p.is_set(C)) << 7;
        let result = ((self.regs.a & val) >> 1) | carry_in;
        self.do_lda(result);
        let bit6 = result & 0x40 != 0;
        let bit5 = result & 0x20 != 0;
        self.regs.p.set_if(C, bit6);
        self.regs.p.set_if(V, bit6 ^ bit5);
    }
}

fn store<B: Bus>(bus: &mut B, address: Option<u16>, value: u8) {
    if let Some(addr) = address {
        bus.write(addr, value);
    }
}
