//! vnsim command-line front panel.
//!
//! This binary drives the simulator without an interactive console. It performs:
//! 1. **Run:** Load an octal program image, boot at the configured address and
//!    continue until HLT, an input wait, or the instruction limit.
//! 2. **Disassemble:** List a program image as address, word and mnemonic.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vnsim_core::Simulator;
use vnsim_core::common::{RegName, SimError};
use vnsim_core::config::Config;
use vnsim_core::core::cpu::RunOutcome;
use vnsim_core::isa::disasm::disassemble;
use vnsim_core::sim::loader;
use vnsim_core::soc::FrontPanel;

/// Instruction limit used when none is given, so a runaway loop terminates.
const DEFAULT_MAX_INSTRUCTIONS: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(
    name = "vnsim",
    author,
    version,
    about = "18-bit teaching processor simulator",
    long_about = "Run or disassemble octal program images.\n\nExamples:\n  vnsim run program.txt --input 'hello'\n  vnsim run program.txt --config machine.json --trace\n  vnsim disasm program.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load an image, boot and run it.
    Run {
        /// Program image (`ADDRESS WORD` octal pairs).
        image: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Text queued on the keyboard before the run starts.
        #[arg(short, long)]
        input: Option<String>,

        /// Stop after this many instructions.
        #[arg(long, default_value_t = DEFAULT_MAX_INSTRUCTIONS)]
        max_steps: u64,

        /// Log every micro-step (overrides RUST_LOG).
        #[arg(long)]
        trace: bool,

        /// Print engine and memory statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Print an image as address, octal word and mnemonic.
    Disasm {
        /// Program image.
        image: PathBuf,
    },
}

/// Panel that streams printer output to stdout.
struct StdoutPanel;

impl FrontPanel for StdoutPanel {
    fn terminal_output(&mut self, ch: char) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "{ch}");
        let _ = out.flush();
    }

    fn halted(&mut self) {
        println!();
    }
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            image,
            config,
            input,
            max_steps,
            trace,
            stats,
        } => {
            init_tracing(trace);
            cmd_run(&image, config.as_deref(), input.as_deref(), max_steps, trace, stats)
        }
        Commands::Disasm { image } => {
            init_tracing(false);
            cmd_disasm(&image)
        }
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

fn cmd_run(
    image: &Path,
    config_path: Option<&Path>,
    input: Option<&str>,
    max_steps: u64,
    trace: bool,
    stats: bool,
) -> Result<(), SimError> {
    let mut config = config_path.map_or_else(|| Ok(Config::default()), Config::from_file)?;
    config.general.trace_micro_steps |= trace;

    let mut sim = Simulator::with_panel(&config, Box::new(StdoutPanel))?;
    let words = sim.load_program(image)?;
    println!(
        "[*] Loaded {words} words, boot address {:06o}",
        config.general.boot_address
    );
    if let Some(text) = input {
        sim.cpu.provide_input(text);
    }

    let outcome = sim.run(Some(max_steps));
    sim.shutdown();
    let outcome = outcome?;

    match outcome {
        RunOutcome::Halted => println!("[*] Halted at PC {:06o}", sim.cpu.reg(RegName::Pc)),
        RunOutcome::WaitingForInput => println!("[*] Waiting for keyboard input"),
        RunOutcome::StepLimit => println!("[*] Stopped after {max_steps} instructions"),
    }
    print!("{}", sim.cpu.dump_state());

    if stats {
        println!("{}", sim.cpu.stats().report(&sim.memory_stats()));
    }
    Ok(())
}

fn cmd_disasm(image: &Path) -> Result<(), SimError> {
    for (addr, word) in loader::read_image(image)? {
        println!("{addr:06o}  {word}  {}", disassemble(word));
    }
    Ok(())
}
