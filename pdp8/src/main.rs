use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use pdp8_core::{load_image_file, Machine};

/// Run a PDP-8 memory image to completion and report per-opcode counters.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a whitespace-separated hexadecimal memory image.
    #[arg(default_value = "pdp8.mem")]
    image: PathBuf,

    /// Starting value of the program counter (octal, decimal, or 0x-prefixed hex).
    #[arg(long, value_parser = parse_word)]
    start: Option<u16>,

    /// Preset value of the switch register (octal, decimal, or 0x-prefixed hex).
    #[arg(long, value_parser = parse_word)]
    switches: Option<u16>,

    /// Maximum instructions to execute before forcing a halt.
    #[arg(long)]
    max_instructions: Option<u64>,

    /// Suppress the pre-run memory dump.
    #[arg(long)]
    quiet: bool,
}

fn parse_word(text: &str) -> Result<u16, String> {
    let parsed = if let Some(rest) = text.strip_prefix("0o") {
        u16::from_str_radix(rest, 8)
    } else if let Some(rest) = text.strip_prefix("0x") {
        u16::from_str_radix(rest, 16)
    } else {
        text.parse::<u16>()
    };
    parsed.map_err(|err| format!("{text:?} is not a valid word: {err}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut machine = Machine::with_switch_register(cli.switches.unwrap_or(0));
    if let Err(error) = load_image_file(&mut machine, &cli.image) {
        eprintln!("{}", format!("failed to load {}: {error}", cli.image.display()).bright_red());
        return ExitCode::FAILURE;
    }
    if let Some(start) = cli.start {
        machine.pc = start & pdp8_core::word::WORD_MASK;
    }

    if !cli.quiet {
        dump_nonzero_memory(&machine);
    }

    let mut interpreter = pdp8_core::Interpreter::new(machine);
    interpreter.run(cli.max_instructions);

    print!("{}", interpreter.report);
    ExitCode::SUCCESS
}

fn dump_nonzero_memory(machine: &Machine) {
    for address in 0..pdp8_core::constants::MEMORY_SIZE {
        let value = machine.read(address as u16);
        if value != 0 {
            println!("{address:04o}  {value:04o}");
        }
    }
}
