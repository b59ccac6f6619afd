//! Export an explorer checkpoint to a SQLite database.
//!
//! Usage: export_sqlite [input.bin] [output.db]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use bishops_solver::checkpoint::Checkpoint;
use bishops_solver::export::write_explorer;
use clap::Parser;
use rusqlite::Connection;

#[derive(Parser, Debug)]
#[command(name = "export_sqlite", about = "Convert an explorer checkpoint to SQLite")]
struct Args {
    /// Checkpoint written by `solver --checkpoint`
    #[arg(default_value = "data/explorer.bin")]
    input: PathBuf,

    /// Database to create (replaced if present)
    #[arg(default_value = "data/explorer.db")]
    output: PathBuf,
}

fn main() -> Result<()> {
    bishops_solver::init_tracing();
    let args = Args::parse();

    println!("Checkpoint to SQLite Exporter");
    println!("=============================");
    println!("Input:  {:?}", args.input);
    println!("Output: {:?}", args.output);
    println!();

    let start = Instant::now();
    let checkpoint = Checkpoint::load(&args.input)
        .with_context(|| format!("failed to load checkpoint {}", args.input.display()))?;
    let explorer = checkpoint
        .to_explorer()
        .context("checkpoint holds invalid states")?;
    println!(
        "Loaded {} states in {:.2}s",
        explorer.len(),
        start.elapsed().as_secs_f64()
    );

    if args.output.exists() {
        std::fs::remove_file(&args.output).ok();
    }

    let start = Instant::now();
    let conn = Connection::open(&args.output)
        .with_context(|| format!("failed to create database {}", args.output.display()))?;
    let (states, edges) = write_explorer(&conn, &explorer).context("failed to write tables")?;
    println!(
        "Inserted {} states and {} edges in {:.2}s",
        states,
        edges,
        start.elapsed().as_secs_f64()
    );

    println!("\nVerifying database...");
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM states", [], |row| row.get(0))?;
    anyhow::ensure!(
        count as usize == explorer.len(),
        "states table has {count} rows, expected {}",
        explorer.len()
    );
    println!("Verification passed!");

    println!("\nDone! Database created at {:?}", args.output);
    Ok(())
}
