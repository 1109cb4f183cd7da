//! Tomasulo RISC-V simulator CLI.
//!
//! This binary runs one statically linked RV64IM ELF program. It performs:
//! 1. **Setup:** Builds the configuration (defaults, optional JSON file, flags)
//!    and installs the log subscriber.
//! 2. **Load:** Places the program in memory and sets PC to its entry point.
//! 3. **Run:** Ticks the machine until the program exits, the cycle limit is
//!    reached, or a fatal error stops it.
//!
//! Exit status: the program's own status on exit, 1 on any fatal error.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomasim_core::config::{Config, DEFAULT_SNAPSHOT_FILE};
use tomasim_core::sim::RunOutcome;
use tomasim_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Tomasulo out-of-order RISC-V RV64IM simulator",
    long_about = "Run a statically linked RV64IM ELF program on a Tomasulo-style \
                  out-of-order core.\n\nExamples:\n  sim program.elf\n  sim -v program.elf\n  \
                  sim --config machine.json --snapshot program.elf"
)]
struct Cli {
    /// ELF executable to run.
    program: PathBuf,

    /// Print the CPU state after every cycle.
    #[arg(short, long)]
    verbose: bool,

    /// Pause after every cycle; enter a line containing `d` to dump history.
    #[arg(short = 's', long = "single-step")]
    single_step: bool,

    /// Write the execution history when the program exits.
    #[arg(short = 'd', long = "dump-history")]
    dump_history: bool,

    /// JSON configuration file.
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Stop after this many cycles.
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Record per-cycle JSON snapshots.
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_SNAPSHOT_FILE
    )]
    snapshot: Option<String>,
}

impl Cli {
    /// Loads the configuration file, if any, and applies flag overrides.
    fn build_config(&self) -> Result<Config, SimError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let general = &mut config.general;
        general.verbose |= self.verbose;
        general.single_step |= self.single_step;
        general.dump_history_on_exit |= self.dump_history;
        if self.max_cycles.is_some() {
            general.max_cycles = self.max_cycles;
        }
        if self.snapshot.is_some() {
            general.snapshot_file.clone_from(&self.snapshot);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.build_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            process::exit(1);
        }
    };

    let mut sim = match Simulator::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            process::exit(1);
        }
    };

    info!(program = %cli.program.display(), "starting");
    let result = sim.load_elf(&cli.program).and_then(|_| sim.run());
    match result {
        Ok(RunOutcome::Exited(code)) => process::exit(code),
        Ok(RunOutcome::CycleLimit) => {
            eprintln!(
                "[*] Stopped after {} cycles (cycle limit)",
                sim.stats().cycles
            );
            sim.stats().print();
        }
        Err(e) => {
            sim.report_fatal(&e);
            process::exit(1);
        }
    }
}
