use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use u_procsched::workload::{parse_workload, WorkloadGenerator};
use u_procsched::{PolicyKind, Simulation, SimulationConfig, SimulationReport};

/// CPU scheduling simulator.
#[derive(Debug, Parser)]
#[command(name = "u-procsched", version, about)]
struct Args {
    /// Scheduling algorithm: FIFO, SJF, PR or RR.
    #[arg(long = "alg")]
    alg: String,

    /// Time quantum for RR (ms).
    #[arg(long)]
    quantum: Option<u64>,

    /// Workload file (proc / sleep / stop lines).
    #[arg(long, conflicts_with = "generate")]
    input: Option<PathBuf>,

    /// Generate a synthetic workload with this many processes instead of reading a file.
    #[arg(long)]
    generate: Option<usize>,

    /// Seed for --generate.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Wall-clock microseconds per logical time unit (0 = no sleeping).
    #[arg(long = "tick-us", default_value_t = 1000)]
    tick_us: u64,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let policy = PolicyKind::from_parts(&args.alg, args.quantum)?;
    let config = SimulationConfig::new(policy).with_tick(Duration::from_micros(args.tick_us));
    let sim = Simulation::new(config)?;

    let (source, report) = match (&args.input, args.generate) {
        (Some(path), _) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            let report = sim.run(parse_workload(BufReader::new(file)))?;
            (path.display().to_string(), report)
        }
        (None, Some(n)) => {
            let events = WorkloadGenerator::new(args.seed).with_processes(n).generate();
            let report = sim.run_events(events)?;
            (format!("<generated: {n} processes, seed {}>", args.seed), report)
        }
        (None, None) => bail!("either --input or --generate is required"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&source, sim.config().policy, &report);
    }
    Ok(())
}

fn print_summary(source: &str, policy: PolicyKind, report: &SimulationReport) {
    let m = &report.metrics;
    let fmt = |v: Option<f64>, precision: usize, unit: &str| match v {
        Some(v) => format!("{v:.precision$}{unit}"),
        None => "undefined".to_string(),
    };

    println!("Input File Name              : {source}");
    println!("CPU Scheduling Alg           : {}", policy.name());
    if let Some(q) = policy.quantum() {
        println!("Quantum                      : {q} ms");
    }
    println!("Process count                : {}", m.completed);
    println!("Total time                   : {}ms", m.current_time);
    println!("Busy time                    : {}ms", m.busy_time);
    println!("Total turnaround time        : {}ms", m.total_turnaround);
    println!("Total waiting time           : {}ms", m.total_waiting);
    println!(
        "CPU utilization              : {}",
        fmt(m.cpu_utilization().map(|u| u * 100.0), 3, "%")
    );
    println!(
        "Throughput                   : {}",
        fmt(m.throughput(), 3, " processes / ms")
    );
    println!(
        "Avg. Turnaround time         : {}",
        fmt(m.avg_turnaround(), 1, "ms")
    );
    println!(
        "Avg. Waiting time in R queue : {}",
        fmt(m.avg_waiting(), 1, "ms")
    );
}
