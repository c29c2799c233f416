use std::path::PathBuf;

use clap::Parser;

use crate::loadgen::LoadGenerator;
use crate::stats::{StatsCollector, SNAPSHOT_INTERVAL};

mod loadgen;
mod stats;

#[cfg(test)]
mod tests;

/// Replays a record file against a search endpoint at bounded concurrency and
/// reports latency statistics.
#[derive(Debug, Parser)]
#[command(name = "sz-search-perftest")]
struct Args {
    /// Newline-delimited JSON record file to replay.
    file_to_process: PathBuf,
    /// Target search endpoint URL.
    #[arg(short, long)]
    url: String,
    /// Output debug trace information.
    #[arg(short = 't', long = "debugTrace")]
    debug_trace: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let level = if args.debug_trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let workers = worker_count();
    let generator = LoadGenerator::new(args.url, workers);
    let mut collector = StatsCollector::new(SNAPSHOT_INTERVAL);

    if let Err(err) = generator.run(&args.file_to_process, &mut collector).await {
        eprintln!("Shutting down due to error: {err}");
        std::process::exit(1);
    }

    match collector.finalize() {
        Ok(report) => print!("{report}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Worker count from the environment; 0 or unset selects the host parallelism.
fn worker_count() -> usize {
    let configured = std::env::var("SENZING_THREADS_PER_PROCESS")
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(0);
    if configured != 0 {
        return configured;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
