//! Layered breadth-first search for a fully solved board.
//!
//! [`Search`] is resumable: each [`Search::step`] expands exactly one layer
//! and hands control back, so a browser frame loop or an async task can
//! drive it without blocking. The deadline and the running flag are checked
//! before every candidate, so a search can stop mid-layer.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use instant::Instant;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::{Move, StateHash};

/// Result of a finished search. Never an error.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SolveOutcome {
    /// Shortest winning line from the start state. Empty if the start is
    /// already solved.
    Solved { moves: Vec<Move>, explored: u64 },
    /// Every reachable state was visited.
    NoSolution { explored: u64 },
    /// The deadline passed before a solution was found.
    TimeExpired { explored: u64 },
    /// The running flag was cleared.
    Cancelled { explored: u64 },
}

impl SolveOutcome {
    /// States enqueued during the search.
    pub fn explored(&self) -> u64 {
        match *self {
            SolveOutcome::Solved { explored, .. }
            | SolveOutcome::NoSolution { explored }
            | SolveOutcome::TimeExpired { explored }
            | SolveOutcome::Cancelled { explored } => explored,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved { .. })
    }

    /// Winning line, if any.
    pub fn moves(&self) -> Option<&[Move]> {
        match self {
            SolveOutcome::Solved { moves, .. } => Some(moves),
            _ => None,
        }
    }

    /// First move of the winning line (a hint).
    pub fn first_move(&self) -> Option<Move> {
        self.moves().and_then(|m| m.first().copied())
    }
}

/// One expanded layer.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct LayerSnapshot {
    /// Layer number; the start state is layer 0.
    pub depth: u32,
    /// For each state of the previous layer, the indices of its children
    /// in `states`.
    pub children: Vec<Vec<usize>>,
    /// Hashes of the new layer, in discovery order.
    pub states: Vec<StateHash>,
    /// Running total of explored states.
    pub explored: u64,
}

/// Result of one [`Search::step`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SearchStep {
    /// A layer was expanded without finding a solution.
    Layer(LayerSnapshot),
    /// The search is over; further steps return the same outcome.
    Finished(SolveOutcome),
}

/// Back-pointer to rebuild the winning line.
struct Trail {
    parent: usize,
    mv: Move,
}

/// An in-progress search.
pub struct Search {
    frontier: Vec<(usize, Game)>,
    trail: Vec<Option<Trail>>,
    visited: HashSet<StateHash>,
    explored: u64,
    depth: u32,
    started: Instant,
    deadline: Duration,
    running: Arc<AtomicBool>,
    outcome: Option<SolveOutcome>,
}

impl Search {
    /// Start a search from `start`.
    ///
    /// `ancestry` are the hashes of the states on the path from the root to
    /// `start`; they are never revisited. The clock starts now.
    pub fn new(
        start: Game,
        ancestry: impl IntoIterator<Item = StateHash>,
        deadline: Duration,
    ) -> Search {
        let mut visited: HashSet<StateHash> = ancestry.into_iter().collect();
        visited.insert(start.hash().clone());

        let outcome = start.is_solved().then(|| SolveOutcome::Solved {
            moves: Vec::new(),
            explored: 0,
        });

        Search {
            frontier: vec![(0, start)],
            trail: vec![None],
            visited,
            explored: 0,
            depth: 0,
            started: Instant::now(),
            deadline,
            running: Arc::new(AtomicBool::new(true)),
            outcome,
        }
    }

    /// Use an external running flag; clearing it cancels the search.
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Search {
        self.running = running;
        self
    }

    /// Handle that cancels the search when set to `false`.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    #[inline]
    pub fn explored(&self) -> u64 {
        self.explored
    }

    /// Layers expanded so far.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    pub fn outcome(&self) -> Option<&SolveOutcome> {
        self.outcome.as_ref()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn finish(&mut self, outcome: SolveOutcome) -> SearchStep {
        info!(
            "search finished after {} layers, {} states, {:.2?}: {:?}",
            self.depth,
            self.explored,
            self.elapsed(),
            outcome
        );
        self.frontier.clear();
        self.outcome = Some(outcome.clone());
        SearchStep::Finished(outcome)
    }

    /// Expand one layer.
    pub fn step(&mut self) -> SearchStep {
        if let Some(outcome) = &self.outcome {
            return SearchStep::Finished(outcome.clone());
        }
        if self.frontier.is_empty() {
            return self.finish(SolveOutcome::NoSolution {
                explored: self.explored,
            });
        }

        let frontier = std::mem::take(&mut self.frontier);
        let mut next: Vec<(usize, Game)> = Vec::new();
        let mut children = Vec::with_capacity(frontier.len());

        for (trail_idx, game) in &frontier {
            let mut kids = Vec::new();
            for mv in game.safe_moves() {
                if !self.running.load(Ordering::SeqCst) {
                    return self.finish(SolveOutcome::Cancelled {
                        explored: self.explored,
                    });
                }
                if self.started.elapsed() >= self.deadline {
                    return self.finish(SolveOutcome::TimeExpired {
                        explored: self.explored,
                    });
                }

                if !self.visited.insert(game.hash_after(mv)) {
                    continue;
                }
                self.trail.push(Some(Trail {
                    parent: *trail_idx,
                    mv,
                }));
                kids.push(next.len());
                next.push((self.trail.len() - 1, game.successor(mv)));
                self.explored += 1;
            }
            children.push(kids);
        }

        self.depth += 1;
        debug!(
            "layer {}: {} new states, {} explored",
            self.depth,
            next.len(),
            self.explored
        );

        if let Some(&(idx, _)) = next.iter().find(|(_, g)| g.is_solved()) {
            let moves = self.line_to(idx);
            return self.finish(SolveOutcome::Solved {
                moves,
                explored: self.explored,
            });
        }

        let snapshot = LayerSnapshot {
            depth: self.depth,
            children,
            states: next.iter().map(|(_, g)| g.hash().clone()).collect(),
            explored: self.explored,
        };
        self.frontier = next;
        SearchStep::Layer(snapshot)
    }

    fn line_to(&self, mut idx: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        while let Some(Trail { parent, mv }) = &self.trail[idx] {
            moves.push(*mv);
            idx = *parent;
        }
        moves.reverse();
        moves
    }

    /// Step until finished.
    pub fn run(self) -> SolveOutcome {
        self.run_with(|_| {})
    }

    /// Step until finished, reporting each expanded layer.
    pub fn run_with(mut self, mut on_layer: impl FnMut(&LayerSnapshot)) -> SolveOutcome {
        loop {
            match self.step() {
                SearchStep::Layer(snapshot) => on_layer(&snapshot),
                SearchStep::Finished(outcome) => return outcome,
            }
        }
    }
}
