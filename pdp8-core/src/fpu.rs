//! The floating-point coprocessor reached through IOT device code octal 55.
//!
//! A float is not a host `f64`; it is a sign/exponent/mantissa triplet whose
//! layout matches the three-word memory representation below. Arithmetic on
//! it (FPADD, FPMULT) is deliberately undefined here: both are decoded,
//! consume their operand word, and emit a diagnostic rather than compute.

use crate::constants::FP_DEVICE_CODE;
use crate::diagnostics::diagnostic;
use crate::machine::Machine;
use crate::word::{field, wrapping_inc, Word};

/// The IOT device code, within IR bits 3..8, reserved for this coprocessor.
pub const DEVICE_CODE: Word = FP_DEVICE_CODE;

/// Sign, exponent, and mantissa fields of a memory-resident float.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatRegister {
    pub sign: bool,
    /// 8-bit exponent.
    pub exponent: u16,
    /// 23-bit mantissa: 11 high bits (from word P+1) over 12 low bits (word P+2).
    pub mantissa: u32,
}

impl FloatRegister {
    /// Decode a float from the three words starting at `base`.
    #[must_use]
    pub fn read_from(machine: &Machine, base: Word) -> Self {
        let w0 = machine.read(base);
        let w1 = machine.read(wrapping_inc(base));
        let w2 = machine.read(wrapping_inc(wrapping_inc(base)));

        let exponent = field(w0, 4, 8);
        let sign = field(w1, 0, 1) != 0;
        let mantissa_high = u32::from(field(w1, 1, 11));
        let mantissa_low = u32::from(field(w2, 0, 12));

        FloatRegister {
            sign,
            exponent,
            mantissa: (mantissa_high << 12) | mantissa_low,
        }
    }

    /// Encode this float into the three words starting at `base`.
    pub fn write_to(self, machine: &mut Machine, base: Word) {
        let mantissa_high = ((self.mantissa >> 12) & 0x7FF) as Word;
        let mantissa_low = (self.mantissa & 0xFFF) as Word;

        let w0 = self.exponent & 0xFF;
        let w1 = (u16::from(self.sign) << 11) | mantissa_high;
        let w2 = mantissa_low;

        machine.write(base, w0);
        machine.write(wrapping_inc(base), w1);
        machine.write(wrapping_inc(wrapping_inc(base)), w2);
    }
}

/// The coprocessor's two registers: the primary accumulator and a second
/// operand register available to (currently undispatched) arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatingPointUnit {
    pub fp: FloatRegister,
    pub fpop: FloatRegister,
}

impl FloatingPointUnit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the second-operand register from the three-word float at `base`.
    ///
    /// Not reachable through any documented extended opcode; kept available
    /// for arithmetic that reads a second operand.
    pub fn load_second_operand(&mut self, machine: &Machine, base: Word) {
        self.fpop = FloatRegister::read_from(machine, base);
    }

    /// Dispatch an extended opcode (IR bits 9..11) under device code 55.
    ///
    /// `pc_before` is the PC at instruction fetch, used only for diagnostics.
    pub fn dispatch(&mut self, machine: &mut Machine, extended_opcode: Word, pc_before: Word) {
        match extended_opcode {
            0 => {
                // FPCLAC
                self.fp = FloatRegister::default();
            }
            1 => {
                // FPLOAD
                let pointer = machine.read(machine.pc);
                self.fp = FloatRegister::read_from(machine, pointer);
                machine.pc = wrapping_inc(machine.pc);
            }
            2 => {
                // FPSTOR
                let pointer = machine.read(machine.pc);
                self.fp.write_to(machine, pointer);
                machine.pc = wrapping_inc(machine.pc);
            }
            3 => {
                // FPADD: operand consumed, no arithmetic performed.
                diagnostic(pc_before, "FPADD is decoded but not implemented");
                machine.pc = wrapping_inc(machine.pc);
            }
            4 => {
                // FPMULT: reserved, never reached by any documented mnemonic.
                diagnostic(pc_before, "FPMULT is decoded but not implemented");
                machine.pc = wrapping_inc(machine.pc);
            }
            _ => diagnostic(pc_before, "unsupported floating-point extended opcode"),
        }
    }
}
