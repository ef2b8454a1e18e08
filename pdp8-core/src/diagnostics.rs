//! Non-fatal diagnostics printed to stderr during a run.
//!
//! These are not [`LoadError`](crate::loader::LoadError)s: nothing here
//! aborts a run. They mark places the source declares unsupported or
//! reserved, which the interpreter treats as a no-op rather than a fault.

use colored::Colorize;

use crate::word::Word;

/// Print a colorized, non-fatal diagnostic naming the instruction's PC.
///
/// `pc` is the address the offending instruction was fetched from, before
/// the fetch increment, so the message always points at the instruction
/// that triggered it rather than the one after.
pub fn diagnostic(pc: Word, message: &str) {
    eprintln!(
        "{} {}",
        format!("[{pc:04o}]").bright_white(),
        message.bright_red()
    );
}
