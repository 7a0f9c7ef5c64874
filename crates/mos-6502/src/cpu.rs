//! 2A03 CPU core.
//!
//! `step` runs one whole instruction or interrupt sequence. Each bus access
//! inside it costs one cycle, and the bus advances the rest of the machine
//! as it goes. Cycles the model performs without an access are made up at
//! the end so every opcode costs exactly what the table says.

use emu_core::{Bus, Cpu, Observable, Value};

use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::{Instruction, OPCODES};
use crate::Registers;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycles to push state and load a vector for NMI or IRQ.
const INTERRUPT_CYCLES: u32 = 7;

/// The 2A03's 6502 core.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,

    /// I flag as seen by the interrupt poll. CLI, SEI and PLP change I
    /// after the poll for the next instruction has already happened.
    irq_inhibit: bool,

    /// Opcode of the last instruction started.
    opcode: u8,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            irq_inhibit: true,
            opcode: 0,
        }
    }

    pub(crate) fn read_vector<B: Bus>(&mut self, bus: &mut B, vector: u16) -> u16 {
        let lo = bus.read(vector);
        let hi = bus.read(vector.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Hardware interrupt entry: two reads of the current PC, three pushes
    /// with B clear, then the vector.
    fn interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        let _ = bus.read(self.regs.pc);
        let _ = bus.read(self.regs.pc);
        self.push_word(bus, self.regs.pc);
        self.push(bus, self.regs.p.pushed(false));
        self.regs.p.set(I);
        self.regs.pc = self.read_vector(bus, vector);
        self.irq_inhibit = true;
    }

    /// Pad the bus up to `expected` cycles since `start`.
    ///
    /// # Panics
    ///
    /// If the model has already spent more cycles than the table allows.
    /// That is a bug in the model, never a state the hardware can reach.
    fn reconcile<B: Bus>(&self, bus: &mut B, start: u64, expected: u32, what: &str) -> u32 {
        let elapsed = bus.cycles() - start;
        assert!(
            elapsed <= u64::from(expected),
            "{what} (opcode {:02X}) took {elapsed} cycles, expected {expected}",
            self.opcode
        );
        bus.tick(expected - elapsed as u32);
        expected
    }

    /// Opcode byte of the most recent instruction.
    #[must_use]
    pub const fn last_opcode(&self) -> u8 {
        self.opcode
    }
}

impl Cpu for Mos6502 {
    type Registers = Registers;

    fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let start = bus.cycles();

        if bus.poll_nmi() {
            self.interrupt(bus, NMI_VECTOR);
            return self.reconcile(bus, start, INTERRUPT_CYCLES, "NMI");
        }
        if bus.irq_asserted() && !self.irq_inhibit {
            self.interrupt(bus, IRQ_VECTOR);
            return self.reconcile(bus, start, INTERRUPT_CYCLES, "IRQ");
        }

        self.opcode = self.fetch(bus);
        let descriptor = OPCODES[usize::from(self.opcode)];
        let i_before = self.regs.p.is_set(I);

        let operand = self.resolve(bus, descriptor);
        let branch_cycles = self.execute(bus, descriptor, operand);

        self.irq_inhibit = match descriptor.instruction {
            Instruction::Cli | Instruction::Sei | Instruction::Plp => i_before,
            _ => self.regs.p.is_set(I),
        };

        let page_cycles = u32::from(descriptor.page_cycle && operand.page_crossed);
        let expected = u32::from(descriptor.cycles) + page_cycles + branch_cycles;
        self.reconcile(bus, start, expected, descriptor.mnemonic())
    }

    /// Reset sequence: five cycles of suppressed stack activity that pull
    /// S down by three, then the vector fetch.
    fn reset<B: Bus>(&mut self, bus: &mut B) {
        bus.tick(5);
        self.regs.s = self.regs.s.wrapping_sub(3);
        self.regs.p.set(I);
        self.irq_inhibit = true;
        self.regs.pc = self.read_vector(bus, RESET_VECTOR);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.0.into()),
            "flags.c" => Some(self.regs.p.is_set(C).into()),
            "flags.z" => Some(self.regs.p.is_set(Z).into()),
            "flags.i" => Some(self.regs.p.is_set(I).into()),
            "flags.d" => Some(self.regs.p.is_set(D).into()),
            "flags.v" => Some(self.regs.p.is_set(V).into()),
            "flags.n" => Some(self.regs.p.is_set(N).into()),
            "opcode" => Some(self.opcode.into()),
            "mnemonic" => Some(OPCODES[usize::from(self.opcode)].mnemonic().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc", "a", "x", "y", "s", "p", "flags.c", "flags.z", "flags.i", "flags.d", "flags.v",
            "flags.n", "opcode", "mnemonic",
        ]
    }
}
