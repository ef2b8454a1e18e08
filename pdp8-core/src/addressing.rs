//! Effective-address computation, including indirect auto-increment.
//!
//! All effective-address computation routes through [`resolve`], invoked at
//! most once per instruction execution. The auto-increment side effect is
//! structural: it is the only place the addressing stage mutates memory.

use crate::constants::is_auto_increment_address;
use crate::machine::Machine;
use crate::word::{bit, field, truncate, wrapping_inc, Word};

/// The result of resolving an effective address: the address itself, and the
/// extra clocks the addressing stage charged beyond the opcode's base cost.
pub struct Resolved {
    pub ea: Word,
    pub clocks: u32,
}

/// Resolve the effective address for a memory-reference instruction.
///
/// `ir` is the already-fetched instruction and `cpage` is the page latched
/// at fetch time. This also updates `machine.ma` to the resolved address and,
/// for indirection through an auto-increment location, writes the
/// incremented pointer back to memory.
pub fn resolve(machine: &mut Machine, ir: Word, cpage: Word) -> Resolved {
    let page0 = bit(ir, 4);
    let offset = field(ir, 5, 7);
    let indirect = bit(ir, 3);

    let direct = if page0 { (cpage << 7) | offset } else { offset };
    let direct = truncate(direct);

    if !indirect {
        machine.ma = direct;
        return Resolved {
            ea: direct,
            clocks: 0,
        };
    }

    let mut clocks = 1;
    let ea = if is_auto_increment_address(direct) {
        clocks += 1;
        let incremented = wrapping_inc(machine.read(direct));
        machine.write(direct, incremented);
        incremented
    } else {
        machine.read(direct)
    };

    machine.ma = ea;
    Resolved { ea, clocks }
}
