use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use deltahunt::derive::Secp256k1Deriver;
use deltahunt::engine::{Engine, EngineConfig, DEFAULT_HITS_FILE};
use deltahunt::sources::{load_deltas, load_targets};

#[derive(Parser, Debug)]
#[command(
    name = "deltahunt",
    version,
    about = "Parallel randomized delta-offset search over secp256k1 private keys"
)]
struct Args {
    /// File of signed decimal delta values, one per line
    #[arg(long, default_value = "minuses.txt", value_name = "FILE")]
    deltas: PathBuf,

    /// File of target public key X-coordinates, one 64-char hex per line
    #[arg(long, default_value = "uncompress.txt", value_name = "FILE")]
    targets: PathBuf,

    /// Append-only hit log
    #[arg(long, default_value = DEFAULT_HITS_FILE, value_name = "FILE")]
    hits: PathBuf,

    /// Worker threads (default: all cores)
    #[arg(short = 't', long, value_name = "N")]
    threads: Option<usize>,

    /// Consecutive offsets tried per (base, delta) pair
    #[arg(long, default_value_t = 4, value_name = "N")]
    window: u64,

    /// Candidates between progress lines
    #[arg(long, default_value_t = 100, value_name = "N")]
    report_interval: u64,
}

fn main() {
    let args = Args::parse();

    println!("deltahunt • secp256k1 delta-offset key search\n");

    let targets = match load_targets(&args.targets) {
        Ok(t) => {
            println!("[✓] Loaded {} target X-coordinates", t.len());
            t
        }
        Err(e) => {
            eprintln!("[✗] Cannot load targets {}: {}", args.targets.display(), e);
            process::exit(1);
        }
    };
    if targets.is_empty() {
        eprintln!("[✗] Target set is empty, nothing to search for");
        process::exit(1);
    }

    let deltas = match load_deltas(&args.deltas) {
        Ok(d) => {
            println!("[✓] Loaded {} delta values", d.len());
            d
        }
        Err(e) => {
            eprintln!("[✗] Cannot load deltas {}: {}", args.deltas.display(), e);
            process::exit(1);
        }
    };
    if deltas.is_empty() {
        eprintln!("[✗] Delta sequence is empty, no candidates to generate");
        process::exit(1);
    }

    let deriver = match Secp256k1Deriver::new() {
        Ok(d) => Arc::new(d),
        Err(e) => {
            eprintln!("[✗] Curve backend: {}", e);
            process::exit(1);
        }
    };

    let config = EngineConfig {
        threads: args.threads,
        window: args.window,
        report_interval: args.report_interval,
        hits_path: args.hits,
    };
    let engine = match Engine::new(config, deltas, targets, deriver) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("[✗] Cannot open hit log: {}", e);
            process::exit(1);
        }
    };

    let shutdown = engine.shutdown_handle();
    ctrlc::set_handler(move || {
        println!("\n[!] Stopping...");
        shutdown.store(true, Ordering::SeqCst);
    })
    .ok();

    println!("[▶] Searching... (Ctrl+C to stop)\n");
    let start = Instant::now();

    if let Err(e) = engine.run() {
        eprintln!("[✗] Engine failed: {}", e);
        process::exit(1);
    }

    let total = engine.keys_processed();
    let elapsed = start.elapsed().as_secs_f64();
    println!(
        "\n[Done] {} candidates in {:.1}s ({:.0} keys/sec)",
        total,
        elapsed,
        total as f64 / elapsed.max(f64::EPSILON)
    );
}
