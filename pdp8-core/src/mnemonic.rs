//! The eight primary opcodes and their mnemonics.

use crate::word::{field, Word};

/// A primary (opcode 0..7) PDP-8 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    And,
    Tad,
    Isz,
    Dca,
    Jms,
    Jmp,
    Iot,
    Opr,
}

/// Mnemonics in opcode order, used for the per-opcode report.
pub const OPCODE_MNEMONICS: [&str; 8] = ["AND", "TAD", "ISZ", "DCA", "JMS", "JMP", "IOT", "OPR"];

impl Opcode {
    /// Decode the primary opcode from bits 0..2 of the instruction register.
    #[must_use]
    pub fn decode(ir: Word) -> Self {
        match field(ir, 0, 3) {
            0 => Opcode::And,
            1 => Opcode::Tad,
            2 => Opcode::Isz,
            3 => Opcode::Dca,
            4 => Opcode::Jms,
            5 => Opcode::Jmp,
            6 => Opcode::Iot,
            7 => Opcode::Opr,
            _ => unreachable!("a 3-bit field only has 8 values"),
        }
    }

    /// This opcode's index into the per-opcode counter arrays.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// This opcode's mnemonic, as printed in the final report.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        OPCODE_MNEMONICS[self.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_all_eight_opcodes() {
        let expected = [
            Opcode::And,
            Opcode::Tad,
            Opcode::Isz,
            Opcode::Dca,
            Opcode::Jms,
            Opcode::Jmp,
            Opcode::Iot,
            Opcode::Opr,
        ];
        for (code, opcode) in expected.into_iter().enumerate() {
            let ir = (code as Word) << 9;
            assert_eq!(Opcode::decode(ir), opcode);
        }
    }

    #[test]
    fn mnemonics_match_index() {
        for (i, name) in OPCODE_MNEMONICS.iter().enumerate() {
            assert_eq!(Opcode::decode((i as Word) << 9).mnemonic(), *name);
        }
    }
}
