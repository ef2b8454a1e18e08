//! The fetch/decode/execute loop tying every other module together.

use crate::addressing;
use crate::constants::FP_DEVICE_CODE;
use crate::diagnostics::diagnostic;
use crate::fpu::FloatingPointUnit;
use crate::machine::Machine;
use crate::mnemonic::Opcode;
use crate::operate;
use crate::report::Report;
use crate::word::{add_with_carry, field, truncate, wrapping_inc, Word};

/// A PDP-8 plus its floating-point coprocessor and report collector, run as
/// one unit from a fixed entry address to halt.
pub struct Interpreter {
    pub machine: Machine,
    pub fpu: FloatingPointUnit,
    pub report: Report,
}

impl Interpreter {
    #[must_use]
    pub fn new(machine: Machine) -> Self {
        Interpreter {
            machine,
            fpu: FloatingPointUnit::new(),
            report: Report::new(),
        }
    }

    /// Run until Run clears, or until `max_instructions` instructions have
    /// been dispatched if a cap is given. Returns whether the run halted
    /// through HLT (`true`) rather than exhausting the safety cap (`false`).
    pub fn run(&mut self, max_instructions: Option<u64>) -> bool {
        loop {
            if !self.machine.run {
                return true;
            }
            if let Some(cap) = max_instructions {
                if self.report.total_instructions() >= cap {
                    let pc = self.machine.pc;
                    diagnostic(pc, "safety cap reached; halting run");
                    self.machine.run = false;
                    return false;
                }
            }
            self.step();
        }
    }

    /// Fetch and execute exactly one instruction, folding its clocks into
    /// the report.
    pub fn step(&mut self) {
        let pc_before = self.machine.pc;
        let ir = self.machine.fetch();
        let cpage = self.machine.cpage;
        let opcode = Opcode::decode(ir);

        let clocks = self.execute(opcode, ir, cpage, pc_before);
        self.report.record(opcode, clocks);
    }

    fn execute(&mut self, opcode: Opcode, ir: Word, cpage: Word, pc_before: Word) -> u32 {
        match opcode {
            Opcode::And => {
                let resolved = addressing::resolve(&mut self.machine, ir, cpage);
                self.machine.ac &= self.machine.read(resolved.ea);
                2 + resolved.clocks
            }
            Opcode::Tad => {
                let resolved = addressing::resolve(&mut self.machine, ir, cpage);
                let operand = self.machine.read(resolved.ea);
                let (sum, carry) = add_with_carry(self.machine.ac, operand, self.machine.l);
                self.machine.ac = sum;
                self.machine.l = carry;
                2 + resolved.clocks
            }
            Opcode::Isz => {
                let resolved = addressing::resolve(&mut self.machine, ir, cpage);
                let incremented = wrapping_inc(self.machine.read(resolved.ea));
                self.machine.write(resolved.ea, incremented);
                if incremented == 0 {
                    self.machine.skip();
                }
                2 + resolved.clocks
            }
            Opcode::Dca => {
                let resolved = addressing::resolve(&mut self.machine, ir, cpage);
                self.machine.write(resolved.ea, self.machine.ac);
                self.machine.ac = 0;
                2 + resolved.clocks
            }
            Opcode::Jms => {
                let resolved = addressing::resolve(&mut self.machine, ir, cpage);
                self.machine.write(resolved.ea, self.machine.pc);
                self.machine.pc = wrapping_inc(resolved.ea);
                2 + resolved.clocks
            }
            Opcode::Jmp => {
                let resolved = addressing::resolve(&mut self.machine, ir, cpage);
                self.machine.pc = resolved.ea;
                1 + resolved.clocks
            }
            Opcode::Iot => {
                let device_code = field(ir, 3, 6);
                if device_code == FP_DEVICE_CODE {
                    let extended_opcode = field(ir, 9, 3);
                    self.fpu.dispatch(&mut self.machine, extended_opcode, pc_before);
                } else {
                    diagnostic(pc_before, "unsupported IOT device code");
                }
                0
            }
            Opcode::Opr => {
                operate::execute(&mut self.machine, ir, pc_before);
                1
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn instruction(opcode: Word, page0: bool, indirect: bool, offset: Word) -> Word {
        let mut ir = opcode << 9;
        if page0 {
            ir |= 1 << 7;
        }
        if indirect {
            ir |= 1 << 8;
        }
        ir | truncate(offset)
    }

    #[test]
    fn scenario_s1_add_two_constants() {
        let mut machine = Machine::new();
        // CLA CLL (opcode 7, group1, CLA+CLL bits): bits4,5 set.
        machine.write(0o200, 0o7300);
        // TAD 250 (opcode1, page0, offset 0o50)
        machine.write(0o201, instruction(1, true, false, 0o50));
        // TAD 251
        machine.write(0o202, instruction(1, true, false, 0o51));
        // DCA 252
        machine.write(0o203, instruction(3, true, false, 0o52));
        // HLT: opcode7 group2, bit10 set -> raw bit 1<<1, plus group select bit3=1 -> raw 1<<8
        machine.write(0o204, (0o7 << 9) | (1 << 8) | (1 << 1));
        // JMP 200
        machine.write(0o205, instruction(5, true, false, 0o00));

        machine.write(0o250, 2);
        machine.write(0o251, 3);
        machine.write(0o252, 0);

        let mut interpreter = Interpreter::new(machine);
        let halted_cleanly = interpreter.run(Some(100));

        assert!(halted_cleanly);
        assert_eq!(interpreter.machine.ac, 0);
        assert!(!interpreter.machine.l);
        assert_eq!(interpreter.machine.read(0o252), 5);
        assert_eq!(interpreter.report.instruction_count(Opcode::Tad), 2);
        assert_eq!(interpreter.report.instruction_count(Opcode::Dca), 1);
        assert!(interpreter.report.instruction_count(Opcode::Opr) >= 2);
    }

    #[test]
    fn scenario_s2_link_carry() {
        let mut machine = Machine::new();
        machine.ac = 0o7777;
        machine.write(0o200, instruction(1, true, false, 0o10)); // TAD page0 offset 0o10
        machine.write(0o210, 1);
        let mut interpreter = Interpreter::new(machine);
        interpreter.step();
        assert_eq!(interpreter.machine.ac, 0);
        assert!(interpreter.machine.l);
    }

    #[test]
    fn scenario_s3_auto_increment_through_and() {
        let mut machine = Machine::new();
        machine.ac = 0o7777;
        machine.write(0o10, 0o300);
        machine.write(0o301, 0o42);
        // AND, page 0 (direct = offset, independent of CPage), indirect, offset 0o10.
        machine.write(0o200, instruction(0, false, true, 0o10));
        let mut interpreter = Interpreter::new(machine);
        interpreter.step();
        assert_eq!(interpreter.machine.read(0o10), 0o301);
        assert_eq!(interpreter.machine.ac, 0o42);
        assert_eq!(interpreter.report.cycle_count(Opcode::And), 4);
    }

    #[test]
    fn scenario_s4_isz_skip() {
        let mut machine = Machine::new();
        // page0 = 0 means EA = offset directly; 0o100 fits the 7-bit offset field.
        machine.write(0o100, 0o7777);
        machine.write(0o200, instruction(2, false, false, 0o100));
        machine.write(0o201, 0o7 << 9); // OPR no-op, stands in for "two distinct instructions"
        machine.write(0o202, 0o7 << 9);
        machine.write(0o203, 0o7 << 9);
        let mut interpreter = Interpreter::new(machine);
        interpreter.step(); // ISZ
        assert_eq!(interpreter.machine.read(0o100), 0);
        assert_eq!(interpreter.machine.pc, 0o202, "ISZ skip advances PC past the instruction at 0o201");
    }
}
