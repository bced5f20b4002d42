//! Cache hierarchy simulator CLI.
//!
//! This binary folds an access trace through a configured hierarchy. It performs:
//! 1. **Configuration:** Geometry flags mirroring the classic `-S/-A/-B/-L/-P`
//!    option letters, or a full JSON config file.
//! 2. **Simulation:** One pass over the trace, optionally echoing each outcome.
//! 3. **Reporting:** The statistics block printed on completion.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachetrace_core::config::{CacheParams, HierarchyConfig, PrefetchPolicy};
use cachetrace_core::{AccessType, Hierarchy};

mod trace;

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Two-level set-associative cache hierarchy simulator",
    long_about = "Fold an access trace through a simulated cache hierarchy and report\nhit/miss/write-back statistics.\n\nGeometry is given by flags (or a JSON config file); the trace is a text file\nwith one access per line: `R <hex-addr>` or `W <hex-addr>`.\n\nExamples:\n  csim -t traces/mixed.txt\n  csim -S 4096 -A 2 -B 64 -L 2 -P sequential -t traces/stream.txt -v\n  csim --config hierarchy.json -t traces/mixed.txt"
)]
struct Cli {
    /// L1 cache size in bytes (power of two).
    #[arg(short = 'S', long, default_value_t = 4096)]
    size: u64,

    /// L1 associativity (ways per set, power of two).
    #[arg(short = 'A', long, default_value_t = 1)]
    assoc: u64,

    /// L1 block size in bytes (power of two, at least 4).
    #[arg(short = 'B', long, default_value_t = 4)]
    block: u64,

    /// Number of cache levels (1 or 2); L2 geometry is derived from L1.
    #[arg(short = 'L', long, default_value_t = 1)]
    levels: u32,

    /// Prefetch policy (effective only with two levels).
    #[arg(short = 'P', long, value_enum, default_value = "none")]
    prefetch: PrefetchArg,

    /// Full hierarchy configuration as JSON; overrides the geometry flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trace file of accesses.
    #[arg(short = 't', long)]
    trace: PathBuf,

    /// Echo each access and its outcome.
    #[arg(short, long)]
    verbose: bool,
}

/// Prefetch policy as a command-line value.
///
/// Kept separate from the core enum so the library does not depend on clap.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PrefetchArg {
    /// No prefetching.
    None,
    /// Fill the next block into L2 on each L1 miss.
    Sequential,
    /// Reserved; behaves as none.
    Stride,
    /// Reserved; behaves as none.
    Custom,
}

impl From<PrefetchArg> for PrefetchPolicy {
    fn from(arg: PrefetchArg) -> Self {
        match arg {
            PrefetchArg::None => Self::None,
            PrefetchArg::Sequential => Self::Sequential,
            PrefetchArg::Stride => Self::Stride,
            PrefetchArg::Custom => Self::Custom,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };

    let mut hierarchy = match Hierarchy::new(&config) {
        Ok(hierarchy) => hierarchy,
        Err(e) => {
            eprintln!("Error: invalid cache configuration: {e}");
            process::exit(1);
        }
    };

    let entries = match trace::read_trace(&cli.trace) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error: {}: {e}", cli.trace.display());
            process::exit(1);
        }
    };

    for entry in &entries {
        let result = hierarchy.access(entry.addr, entry.op);
        if cli.verbose {
            let letter = match entry.op {
                AccessType::Read => 'R',
                AccessType::Write => 'W',
            };
            println!("{letter} 0x{:08x} : {result}", entry.addr);
        }
    }

    hierarchy.stats().print();
}

/// Builds the hierarchy configuration from the config file or the flags.
///
/// The JSON file, when given, wins outright; mixing it with geometry flags
/// would make it unclear which source a parameter came from.
fn build_config(cli: &Cli) -> Result<HierarchyConfig, String> {
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        return serde_json::from_str(&text)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()));
    }

    Ok(HierarchyConfig {
        l1: CacheParams {
            size_bytes: cli.size,
            ways: cli.assoc,
            block_bytes: cli.block,
        },
        levels: cli.levels,
        prefetch: cli.prefetch.into(),
    })
}
