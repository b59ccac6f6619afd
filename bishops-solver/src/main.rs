//! Bishops Solver
//!
//! Solves a puzzle from its initial layout or from any state hash, with a
//! deadline. Ctrl-C cancels the search. The winning line can be committed to
//! an explorer that is saved as a checkpoint.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use bishops_core::{
    deadline_from_secs, Explorer, Game, GameSettings, PieceFilter, Search, SolveOutcome,
    SolverSettings,
};
use bishops_solver::checkpoint::Checkpoint;
use bishops_solver::report::{format_line, SearchStats};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "solver", about = "Shortest-solution search for the bishops puzzle")]
struct Args {
    /// Board rows
    #[arg(long, default_value_t = 4)]
    rows: u8,

    /// Board columns
    #[arg(long, default_value_t = 5)]
    cols: u8,

    /// Starting pieces: all, white or black
    #[arg(long, default_value = "all")]
    pieces: PieceFilter,

    /// Search deadline in seconds, at most one hour
    #[arg(long, default_value_t = SolverSettings::default().deadline_secs)]
    deadline: f64,

    /// Start from this state hash instead of the root
    #[arg(long)]
    from: Option<String>,

    /// Explorer checkpoint to resume from and save to
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Commit the winning line to the explorer
    #[arg(long)]
    commit: bool,

    /// Seconds between progress lines
    #[arg(long, default_value_t = 5)]
    log_interval: u64,
}

fn load_explorer(args: &Args, settings: GameSettings) -> Result<Explorer> {
    if let Some(path) = args.checkpoint.as_ref().filter(|p| p.exists()) {
        println!("Loading checkpoint from {:?}...", path);
        let checkpoint = Checkpoint::load(path)
            .with_context(|| format!("failed to load checkpoint {}", path.display()))?;
        if checkpoint.settings != settings {
            warn!(
                "checkpoint is a {}x{} {:?} puzzle; ignoring board flags",
                checkpoint.settings.rows, checkpoint.settings.cols, checkpoint.settings.pieces
            );
        }
        let explorer = checkpoint.to_explorer().context("checkpoint holds invalid states")?;
        println!("Loaded {} states\n", explorer.len());
        return Ok(explorer);
    }
    Ok(Explorer::new(settings)?)
}

fn main() -> Result<()> {
    bishops_solver::init_tracing();
    let args = Args::parse();

    println!("Bishops Solver");
    println!("==============");

    let settings = GameSettings::new(args.rows, args.cols, args.pieces);
    let mut explorer = load_explorer(&args, settings)?;
    let settings = explorer.settings();
    let deadline = deadline_from_secs(args.deadline);

    // Resolve the start state; an unregistered hash is searched without ancestry
    let (start_node, search) = match &args.from {
        None => (Some(explorer.root()), explorer.search(explorer.root(), deadline)?),
        Some(hash) => match explorer.lookup(hash) {
            Some(id) => (Some(id), explorer.search(id, deadline)?),
            None => {
                if args.commit {
                    bail!("--commit needs a start state that is already in the explorer");
                }
                let game = Game::from_hash(settings.rows, settings.cols, hash)
                    .with_context(|| format!("bad --from hash {hash:?}"))?;
                (None, Search::new(game, [], deadline))
            }
        },
    };

    println!("Board: {}x{} ({:?} pieces)", settings.rows, settings.cols, settings.pieces);
    println!("Deadline: {:.1}s\n", deadline.as_secs_f64());

    // Set up SIGINT handler for graceful shutdown
    let r = search.running_flag();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, stopping search...");
        r.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let interval = Duration::from_secs(args.log_interval);
    let mut stats = SearchStats::new();
    let outcome = search.run_with(|layer| {
        stats.record_layer(layer);
        if stats.should_log(interval) {
            println!("{}", stats.progress_line());
        }
    });

    println!("\n==============");
    stats.print_summary(&outcome);

    if let SolveOutcome::Solved { moves, .. } = &outcome {
        if !moves.is_empty() {
            println!("\nWinning line:");
            println!("{}", format_line(moves, settings.rows, settings.cols)?);
        }
        if args.commit {
            if let Some(from) = start_node {
                let reached = explorer.commit_line(from, moves)?;
                info!("committed {} states, explorer now holds {}", reached.len(), explorer.len());
            }
        }
    }

    if let Some(path) = &args.checkpoint {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let saved = Checkpoint::from_explorer(&explorer)
            .save(path)
            .with_context(|| format!("failed to save checkpoint {}", path.display()))?;
        println!("\nSaved {} states to {:?}", saved, path);
    }

    Ok(())
}
