//! The halt-time report: per-opcode instruction and cycle counters.

use std::fmt;

use crate::constants::OPCODE_COUNT;
use crate::mnemonic::{Opcode, OPCODE_MNEMONICS};

/// Eight cycle accumulators and eight instruction counters, one per primary
/// opcode, plus the derived totals printed at halt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Report {
    /// Cycles charged per opcode (CPI in the source's naming).
    cycles: [u64; OPCODE_COUNT],
    /// Instructions dispatched per opcode (IC in the source's naming).
    instructions: [u64; OPCODE_COUNT],
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one executed instruction's clocks into `opcode`'s counters.
    pub fn record(&mut self, opcode: Opcode, clocks: u32) {
        let index = opcode.index();
        self.instructions[index] += 1;
        self.cycles[index] += u64::from(clocks);
    }

    /// Instructions dispatched for `opcode`.
    #[must_use]
    pub fn instruction_count(&self, opcode: Opcode) -> u64 {
        self.instructions[opcode.index()]
    }

    /// Cycles charged to `opcode`.
    #[must_use]
    pub fn cycle_count(&self, opcode: Opcode) -> u64 {
        self.cycles[opcode.index()]
    }

    /// Total instructions dispatched across all opcodes.
    #[must_use]
    pub fn total_instructions(&self) -> u64 {
        self.instructions.iter().sum()
    }

    /// Total clocks charged across all opcodes.
    #[must_use]
    pub fn total_clocks(&self) -> u64 {
        self.cycles.iter().sum()
    }

    /// Average clocks per instruction, or 0.0 if nothing was executed.
    #[must_use]
    pub fn average_cycles_per_instruction(&self) -> f64 {
        let total_instructions = self.total_instructions();
        if total_instructions == 0 {
            0.0
        } else {
            self.total_clocks() as f64 / total_instructions as f64
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, mnemonic) in OPCODE_MNEMONICS.iter().enumerate() {
            writeln!(
                f,
                "{} {} instructions executed, using {} clocks",
                self.instructions[index], mnemonic, self.cycles[index]
            )?;
        }
        writeln!(
            f,
            "total: {} instructions, {} clocks, {:.2} average clocks per instruction",
            self.total_instructions(),
            self.total_clocks(),
            self.average_cycles_per_instruction()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_accumulates_per_opcode() {
        let mut report = Report::new();
        report.record(Opcode::Tad, 2);
        report.record(Opcode::Tad, 2);
        report.record(Opcode::Dca, 2);
        assert_eq!(report.instruction_count(Opcode::Tad), 2);
        assert_eq!(report.cycle_count(Opcode::Tad), 4);
        assert_eq!(report.instruction_count(Opcode::Dca), 1);
    }

    #[test]
    fn totals_match_sum_of_per_opcode_counters() {
        let mut report = Report::new();
        report.record(Opcode::And, 4);
        report.record(Opcode::Jmp, 1);
        report.record(Opcode::Opr, 1);
        assert_eq!(report.total_instructions(), 3);
        assert_eq!(report.total_clocks(), 6);
    }

    #[test]
    fn average_cycles_per_instruction_with_no_activity_is_zero() {
        let report = Report::new();
        assert_eq!(report.average_cycles_per_instruction(), 0.0);
    }

    #[test]
    fn display_includes_every_mnemonic() {
        let report = Report::new();
        let text = report.to_string();
        for mnemonic in OPCODE_MNEMONICS {
            assert!(text.contains(mnemonic), "missing {mnemonic} in report output");
        }
    }
}
