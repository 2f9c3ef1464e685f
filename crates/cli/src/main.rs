//! Cache simulator CLI.
//!
//! This binary builds one cache from command-line flags (optionally layered
//! over a JSON configuration file) and replays a trace against it. It performs:
//! 1. **Trace replay:** Reads `R <addr>` / `W <addr>` lines from `--trace`.
//! 2. **Synthetic traffic:** Without `--trace`, generates random line-aligned
//!    reads and writes across the cache's address range.
//! 3. **Reporting:** Prints the statistics and writes them to the `--stat` file.

use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::sim::trace::{DEFAULT_SEED, DEFAULT_SYNTHETIC_ACCESSES};
use cachesim_core::sim::{Simulator, SyntheticTrace, TextTrace};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Simulate a single-level set-associative cache and report hit/miss statistics.\n\nWithout --trace, synthetic random traffic is generated.\n\nExample:\n  cachesim -c 256 -l 64 -w 4 -p 0 --write-allocate 0 --trace trace.txt --stat cache_stats.txt\n\nThis runs a 256KB cache with 64B lines, 4-way set associativity, LRU replacement, and no write-allocate."
)]
struct Cli {
    /// Trace file with one `R <addr>` or `W <addr>` per line.
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Statistics output file.
    #[arg(long, default_value = "cache_stats.txt")]
    stat: PathBuf,

    /// JSON cache configuration; flags given on the command line override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cache size in KB (default 1024).
    #[arg(short = 'c', long = "cache-size-kb")]
    cache_size_kb: Option<usize>,

    /// Cache line size in bytes (default 64).
    #[arg(short = 'l', long = "line-size")]
    line_size: Option<usize>,

    /// Associativity; 0 is direct-mapped (default 4).
    #[arg(short = 'w', long)]
    ways: Option<usize>,

    /// Replacement policy: 0/lru or 1/fifo (default LRU).
    #[arg(short = 'p', long, value_parser = parse_policy)]
    policy: Option<ReplacementPolicy>,

    /// Write-allocate policy: 1 = write allocate, 0 = no write allocate (default 1).
    #[arg(long = "write-allocate", value_parser = parse_write_allocate)]
    write_allocate: Option<bool>,

    /// Number of synthetic accesses when no trace is given.
    #[arg(long, default_value_t = DEFAULT_SYNTHETIC_ACCESSES)]
    accesses: u64,

    /// Seed for synthetic traffic.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_policy(s: &str) -> Result<ReplacementPolicy, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_write_allocate(s: &str) -> Result<bool, String> {
    match s.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(format!(
            "write allocate policy must be 1 (Write Allocate) or 0 (No Write Allocate), got {other:?}"
        )),
    }
}

impl Cli {
    /// Resolves the final configuration: defaults, then `--config`, then flags.
    fn cache_config(&self) -> Result<CacheConfig, String> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("could not read config {}: {e}", path.display()))?;
                CacheConfig::from_json(&text)
                    .map_err(|e| format!("invalid config {}: {e}", path.display()))?
            }
            None => CacheConfig::default(),
        };

        if let Some(kb) = self.cache_size_kb {
            config.size_bytes = kb
                .checked_mul(1024)
                .ok_or_else(|| format!("cache size {kb} KB is too large"))?;
        }
        if let Some(line) = self.line_size {
            config.line_bytes = line;
        }
        if let Some(ways) = self.ways {
            config.ways = ways;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(write_allocate) = self.write_allocate {
            config.write_allocate = write_allocate;
        }
        Ok(config)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints an error and exits with status 1.
fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    process::exit(1);
}

/// Associativity as the report shows it, marking the direct-mapped sentinel.
fn ways_label(config: &CacheConfig) -> String {
    if config.ways == 0 {
        format!("{} (direct-mapped)", config.effective_ways())
    } else {
        config.effective_ways().to_string()
    }
}

fn print_banner(cli: &Cli, config: &CacheConfig) {
    println!("------------------------------------------");
    println!("Cache Simulator");
    println!("------------------------------------------");
    println!("Cache size:             {} bytes", config.size_bytes);
    println!("Cache line size:        {} bytes", config.line_bytes);
    println!("Number of ways:         {}", ways_label(config));
    println!("Replacement Policy:     {}", config.policy);
    println!(
        "Write Allocate Policy:  {}",
        if config.write_allocate {
            "Write Allocate"
        } else {
            "No Write Allocate"
        }
    );
    match &cli.trace {
        Some(path) => println!("Trace file:             {}", path.display()),
        None => println!(
            "Trace file:             Not set. Synthetic random traffic ({} accesses)",
            cli.accesses
        ),
    }
    println!("Stats file:             {}", cli.stat.display());
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = cli.cache_config().unwrap_or_else(|e| fail(e));
    let mut sim = Simulator::new(&config).unwrap_or_else(|e| fail(e));

    if !cli.json {
        print_banner(&cli, &config);
    }

    match &cli.trace {
        Some(path) => {
            info!(path = %path.display(), "replaying trace file");
            let trace = TextTrace::open(path).unwrap_or_else(|e| fail(e));
            if let Err(e) = sim.run_fallible(trace) {
                fail(e);
            }
        }
        None => {
            info!(accesses = cli.accesses, seed = cli.seed, "generating synthetic trace");
            let trace = SyntheticTrace::new(
                config.size_bytes as u64,
                config.line_bytes as u64,
                cli.accesses,
                cli.seed,
            );
            let _ = sim.run(trace);
        }
    }

    let report = sim.report();
    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
    } else {
        report.print();
    }

    if let Err(e) = report.write_stats_file(&cli.stat) {
        fail(format!("failed to write stats file {}: {e}", cli.stat.display()));
    }
    info!(path = %cli.stat.display(), "statistics written");
}
