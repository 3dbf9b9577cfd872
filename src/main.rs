use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use rr_model::{
    QuantumMode, Sim, SimConfig,
    sim::{DEFAULT_SWITCH_COST, bernoulli_processes},
    trace::{load_process_table, parse_quantum},
};

/// rr_model: single-CPU round-robin scheduling simulator
///
/// Replays a static trace of CPU-burst processes under round-robin
/// scheduling and reports the average wait and response times. The quantum
/// is either a fixed number of ticks or "median", which recomputes it on
/// every dispatch as the median cpu time already consumed by the processes
/// in the ready queue.
#[derive(Debug, Parser)]
#[clap(version)]
struct Opts {
    #[clap(subcommand)]
    command: Command,

    /// Ticks charged when the CPU switches to a different process.
    #[clap(short = 's', long, default_value_t = DEFAULT_SWITCH_COST, global = true)]
    switch_cost: u64,

    /// Print every simulation event as it happens.
    #[clap(short = 'e', long, global = true)]
    events: bool,

    /// Also print the longest wait and response time of any process.
    #[clap(long, global = true)]
    summary: bool,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate the process table stored in FILE.
    Run {
        /// Process count followed by one "pid, arrival, burst" line per process.
        file: PathBuf,

        /// Quantum length in ticks, or "median".
        #[clap(value_parser = parse_quantum)]
        quantum: QuantumMode,
    },

    /// Simulate a randomly generated trace.
    Synth {
        /// Quantum length in ticks, or "median".
        #[clap(value_parser = parse_quantum)]
        quantum: QuantumMode,

        /// Number of ticks during which processes may arrive.
        #[clap(short = 't', long, default_value = "500")]
        ticks: u64,

        /// Probability that a process arrives on a given tick.
        #[clap(long, default_value = "0.3")]
        p_arrival: f64,

        /// Probability that an arriving process is short.
        #[clap(long, default_value = "0.3")]
        p_short: f64,

        /// Burst time of short processes.
        #[clap(long, default_value = "2")]
        short_burst: u64,

        /// Burst time of long processes.
        #[clap(long, default_value = "6")]
        long_burst: u64,

        /// Seed for the trace generator.
        #[clap(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let (procs, quantum) = match opts.command {
        Command::Run { file, quantum } => (load_process_table(&file)?, quantum),
        Command::Synth {
            quantum,
            ticks,
            p_arrival,
            p_short,
            short_burst,
            long_burst,
            seed,
        } => {
            if short_burst == 0 || long_burst == 0 {
                bail!("burst times must be positive");
            }
            let procs = bernoulli_processes(ticks, p_arrival, p_short, short_burst, long_burst, seed);
            if procs.is_empty() {
                bail!("no processes");
            }
            (procs, quantum)
        }
    };

    let config = SimConfig::new(quantum).with_switch_cost(opts.switch_cost);
    info!(
        "Simulating {} processes with {}, switch cost {}",
        procs.len(),
        config.quantum,
        config.switch_cost
    );

    let mut out = std::io::stdout().lock();
    let mut sim = Sim::from_config(procs, &config)?;
    while !sim.is_done() {
        let events = sim.step();
        if opts.events {
            for (at, event) in events {
                writeln!(out, "t={at} {event:?}")?;
            }
        }
    }

    info!("Simulation finished at t={}", sim.now());
    writeln!(out, "{}", sim.report())?;
    if opts.summary {
        writeln!(out, "{}", sim.summary())?;
    }
    out.flush().context("stdout")?;

    Ok(())
}
