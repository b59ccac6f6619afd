//! Option kinds that depend on the explored-state graph.
//!
//! A safe option whose result is already registered is `PriorConnected`
//! when the two states share an edge and `PriorExplored` otherwise. These
//! kinds are derived each time they are asked for; games never store them.

use serde::{Deserialize, Serialize};

use crate::game::{Game, MoveKind};
use crate::graph::{NodeId, StateGraph};
use crate::registry::Registry;
use crate::{Coord, Move};

/// Option counts of one committed state.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct OptionTally {
    /// Safe options.
    pub total: u32,
    /// Safe options leading to a registered state.
    pub explored: u32,
    /// Explored options whose result is adjacent to this state.
    pub connected: u32,
}

impl OptionTally {
    /// A registered neighbour is not linked to this state yet.
    #[inline]
    pub fn missing_connection(&self) -> bool {
        self.connected < self.explored
    }

    /// Every safe option leads to a registered state.
    #[inline]
    pub fn complete(&self) -> bool {
        self.explored == self.total
    }
}

/// Kind of option `option` of the bishop on `from`, or `None` if no such
/// option exists. `node` is the game's own id when it is committed.
pub fn option_kind(
    game: &Game,
    node: Option<NodeId>,
    from: Coord,
    option: usize,
    registry: &Registry,
    graph: &StateGraph,
) -> Option<MoveKind> {
    if !game.in_bounds(from) {
        return None;
    }
    let opt = game.square(from).options().get(option)?;
    if !opt.is_safe() {
        return Some(MoveKind::Invalid);
    }

    let result = game.result_hash(from, option)?;
    let kind = match registry.lookup(result.as_str()) {
        None => MoveKind::Valid,
        Some(target) if node.is_some_and(|n| graph.are_connected(n, target)) => {
            MoveKind::PriorConnected
        }
        Some(_) => MoveKind::PriorExplored,
    };
    Some(kind)
}

/// Every option of the game with its current kind, grid order.
pub fn move_kinds(
    game: &Game,
    node: Option<NodeId>,
    registry: &Registry,
    graph: &StateGraph,
) -> Vec<(Move, MoveKind)> {
    let mut kinds = Vec::new();
    for (index, square) in game.squares().iter().enumerate() {
        let from = Coord::from_index(index, game.cols());
        for (i, opt) in square.options().iter().enumerate() {
            if let Some(kind) = option_kind(game, node, from, i, registry, graph) {
                kinds.push((Move::new(from, opt.to()), kind));
            }
        }
    }
    kinds
}

/// Resolve every option and count the safe ones by kind.
pub fn tally(
    game: &Game,
    node: Option<NodeId>,
    registry: &Registry,
    graph: &StateGraph,
) -> OptionTally {
    let mut tally = OptionTally::default();
    for (_, kind) in move_kinds(game, node, registry, graph) {
        match kind {
            MoveKind::Invalid => continue,
            MoveKind::Valid => {}
            MoveKind::PriorExplored => tally.explored += 1,
            MoveKind::PriorConnected => {
                tally.explored += 1;
                tally.connected += 1;
            }
        }
        tally.total += 1;
    }
    tally
}
