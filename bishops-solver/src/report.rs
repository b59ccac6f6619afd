//! Progress and summary output for solver runs.

use std::time::{Duration, Instant};

use bishops_core::{notation, EngineResult, LayerSnapshot, Move, SolveOutcome};

/// Counters collected while a search runs.
#[derive(Debug)]
pub struct SearchStats {
    /// New states per expanded layer
    pub layer_sizes: Vec<usize>,

    /// States enqueued so far
    pub explored: u64,

    /// Largest layer seen
    pub widest_layer: usize,

    /// Frontier states that produced no new state
    pub dead_ends: u64,

    start_time: Instant,
    last_log_time: Instant,
    last_log_explored: u64,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStats {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            layer_sizes: Vec::new(),
            explored: 0,
            widest_layer: 0,
            dead_ends: 0,
            start_time: now,
            last_log_time: now,
            last_log_explored: 0,
        }
    }

    pub fn record_layer(&mut self, layer: &LayerSnapshot) {
        self.layer_sizes.push(layer.states.len());
        self.widest_layer = self.widest_layer.max(layer.states.len());
        self.dead_ends += layer.children.iter().filter(|c| c.is_empty()).count() as u64;
        self.explored = layer.explored;
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// States per second since the start.
    pub fn states_per_sec(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.explored as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn should_log(&self, interval: Duration) -> bool {
        self.last_log_time.elapsed() >= interval
    }

    /// One progress line; resets the log timer.
    pub fn progress_line(&mut self) -> String {
        let elapsed_total = self.elapsed().as_secs();
        let since = self.last_log_time.elapsed().as_secs_f64();
        let rate = if since > 0.0 {
            (self.explored - self.last_log_explored) as f64 / since
        } else {
            self.states_per_sec()
        };

        self.last_log_time = Instant::now();
        self.last_log_explored = self.explored;

        format!(
            "[{:02}:{:02}:{:02}] depth={} explored={} layer={} rate={:.0}/s",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.depth(),
            self.explored,
            self.layer_sizes.last().copied().unwrap_or(0),
            rate,
        )
    }

    /// Print final summary
    pub fn print_summary(&self, outcome: &SolveOutcome) {
        println!("Result: {}", describe(outcome));
        println!("States explored: {}", outcome.explored());
        println!("Layers expanded: {}", self.depth());
        println!("Widest layer: {}", self.widest_layer);
        println!("Dead ends: {}", self.dead_ends);
        println!("Time: {:.2}s", self.elapsed().as_secs_f64());
        println!("Average rate: {:.0} states/sec", self.states_per_sec());
    }
}

/// Short human description of an outcome.
pub fn describe(outcome: &SolveOutcome) -> String {
    match outcome {
        SolveOutcome::Solved { moves, .. } if moves.is_empty() => "already solved".to_string(),
        SolveOutcome::Solved { moves, .. } => format!("solved in {} moves", moves.len()),
        SolveOutcome::NoSolution { .. } => "no solution".to_string(),
        SolveOutcome::TimeExpired { .. } => "deadline expired".to_string(),
        SolveOutcome::Cancelled { .. } => "cancelled".to_string(),
    }
}

/// Numbered move list in board notation, one move per line.
pub fn format_line(moves: &[Move], rows: u8, cols: u8) -> EngineResult<String> {
    let lines = moves
        .iter()
        .enumerate()
        .map(|(i, mv)| -> EngineResult<String> {
            Ok(format!("{:>3}. {}", i + 1, notation::format_move(mv, rows, cols)?))
        })
        .collect::<EngineResult<Vec<_>>>()?;
    Ok(lines.join("\n"))
}
