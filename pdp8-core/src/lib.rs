//! Cycle-counting instruction-set simulator core for the PDP-8.
//!
//! [`Machine`] holds the register file and memory; [`Interpreter`] drives
//! the fetch/decode/execute loop over it. [`loader::load_image`] fills
//! memory before a run; [`Report`] accumulates the per-opcode counters a
//! run reports at halt.

pub mod addressing;
pub mod constants;
pub mod diagnostics;
pub mod fpu;
pub mod interpreter;
pub mod loader;
pub mod machine;
pub mod mnemonic;
pub mod operate;
pub mod report;
pub mod word;

pub use interpreter::Interpreter;
pub use loader::{load_image, load_image_file, LoadError};
pub use machine::Machine;
pub use mnemonic::Opcode;
pub use report::Report;
