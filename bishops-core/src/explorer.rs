//! The explorer owns every committed state of one puzzle.
//!
//! All engine operations that touch shared state (registry, connectivity,
//! distances, option tallies) run through an [`Explorer`]. A host keeps one
//! per puzzle and replaces it, or calls [`Explorer::reset`], to start over.

use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::GameSettings;
use crate::error::{EngineError, EngineResult};
use crate::game::{Attacks, Game, MoveKind};
use crate::graph::{NodeId, StateGraph};
use crate::notation;
use crate::priors::{self, OptionTally};
use crate::registry::Registry;
use crate::solver::{Search, SolveOutcome};
use crate::{Color, Coord, Move, StateHash};

/// An edge between two committed states, oriented from the shallower one.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    /// Move leading from `from` to `to`, when the states are one move apart.
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    /// e.g. `d5 → c4`.
    pub label: Option<String>,
}

/// What one [`Explorer::expand`] call changed.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Expansion {
    /// Resulting node of each requested move, in request order.
    pub reached: Vec<NodeId>,
    /// Nodes registered by this call.
    pub created: Vec<NodeId>,
    /// Edges added by this call.
    pub connections: Vec<Connection>,
}

/// Status of a committed state as a host displays it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StateSummary {
    pub id: NodeId,
    pub hash: StateHash,
    pub distance: Option<u32>,
    pub last_move: Option<Move>,
    pub solved_pieces: u32,
    pub total_pieces: u32,
    pub options: OptionTally,
    pub missing_connection: bool,
    pub complete: bool,
}

/// One move option with its current kind.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OptionView {
    pub to: Coord,
    pub kind: MoveKind,
}

/// One square as a host renders it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SquareView {
    pub coord: Coord,
    pub label: String,
    pub occupant: Option<Color>,
    pub attacked_by: Attacks,
    pub options: Vec<OptionView>,
}

/// A committed state with every option classified, row-major.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct BoardView {
    pub id: NodeId,
    pub rows: u8,
    pub cols: u8,
    pub hash: StateHash,
    pub squares: Vec<SquareView>,
}

/// Successor of a move during [`Explorer::expand`].
enum Successor {
    Known(NodeId),
    New(Game),
}

/// Registry, connectivity and root of one puzzle.
#[derive(Debug)]
pub struct Explorer {
    settings: GameSettings,
    registry: Registry,
    graph: StateGraph,
    tallies: Vec<OptionTally>,
    root: NodeId,
}

impl Explorer {
    /// Start a puzzle: commit the initial layout as the root.
    pub fn new(settings: GameSettings) -> EngineResult<Explorer> {
        let mut explorer = Explorer {
            settings,
            registry: Registry::new(),
            graph: StateGraph::new(),
            tallies: Vec::new(),
            root: NodeId(0),
        };
        explorer.reset(settings)?;
        Ok(explorer)
    }

    /// Drop every committed state and start over with new settings.
    /// On error the explorer is left unchanged.
    pub fn reset(&mut self, settings: GameSettings) -> EngineResult<()> {
        let initial = Game::new(&settings)?;

        self.settings = settings;
        self.registry.reset();
        self.graph.reset();
        self.tallies.clear();

        self.root = self.commit(initial)?;
        self.resequence();
        self.refresh_all();
        info!(
            "new {}x{} puzzle ({:?} pieces), root {}",
            settings.rows,
            settings.cols,
            settings.pieces,
            self.game(self.root)?.hash()
        );
        Ok(())
    }

    /// Rebuild an explorer from committed hashes (root first) and edges
    /// given as index pairs into `hashes`.
    pub fn restore(
        settings: GameSettings,
        hashes: &[StateHash],
        edges: &[(u32, u32)],
    ) -> EngineResult<Explorer> {
        settings.validate()?;
        if hashes.is_empty() {
            return Err(EngineError::config("no states to restore"));
        }

        let mut explorer = Explorer {
            settings,
            registry: Registry::new(),
            graph: StateGraph::new(),
            tallies: Vec::new(),
            root: NodeId(0),
        };
        for hash in hashes {
            let game = Game::from_hash(settings.rows, settings.cols, hash.as_str())?;
            if explorer.registry.contains(hash.as_str()) {
                return Err(EngineError::config(format!("state {hash} listed twice")));
            }
            explorer.commit(game)?;
        }
        for &(a, b) in edges {
            let (a, b) = (NodeId(a), NodeId(b));
            explorer.game(a)?;
            explorer.game(b)?;
            explorer.graph.connect(a, b);
        }

        explorer.resequence();
        explorer.refresh_all();
        info!(
            "restored {} states and {} edges",
            explorer.len(),
            explorer.graph.edge_count()
        );
        Ok(explorer)
    }

    // ========== Accessors ==========

    #[inline]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Number of committed states.
    #[inline]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn game(&self, id: NodeId) -> EngineResult<&Game> {
        self.registry
            .get(id)
            .ok_or_else(|| EngineError::unknown(format!("node {}", id.0)))
    }

    #[inline]
    pub fn lookup(&self, hash: &str) -> Option<NodeId> {
        self.registry.lookup(hash)
    }

    /// Like [`Explorer::lookup`], but an unknown hash is an error.
    pub fn node(&self, hash: &str) -> EngineResult<NodeId> {
        self.lookup(hash).ok_or_else(|| EngineError::unknown(hash))
    }

    #[inline]
    pub fn distance(&self, id: NodeId) -> Option<u32> {
        self.graph.distance(id)
    }

    /// Tally from the last refresh.
    pub fn tally(&self, id: NodeId) -> OptionTally {
        self.tallies.get(id.index()).copied().unwrap_or_default()
    }

    // ========== Graph Operations ==========

    /// Register a game. A game whose hash is already known resolves to the
    /// existing node.
    pub fn commit(&mut self, game: Game) -> EngineResult<NodeId> {
        self.register(game).map(|(id, _)| id)
    }

    fn register(&mut self, game: Game) -> EngineResult<(NodeId, bool)> {
        if game.rows() != self.settings.rows || game.cols() != self.settings.cols {
            return Err(EngineError::config(format!(
                "{}x{} state does not belong to a {}x{} puzzle",
                game.rows(),
                game.cols(),
                self.settings.rows,
                self.settings.cols
            )));
        }
        let (id, inserted) = self.registry.register(game);
        if inserted {
            self.tallies.push(OptionTally::default());
        }
        Ok((id, inserted))
    }

    /// Link two committed states. `false` if they were already linked.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> EngineResult<bool> {
        self.game(a)?;
        self.game(b)?;
        Ok(self.graph.connect(a, b))
    }

    /// Recompute BFS distances from the root.
    pub fn resequence(&mut self) {
        self.graph.resequence(self.root);
    }

    /// Re-derive the option tally of one state.
    pub fn refresh_priors(&mut self, id: NodeId) -> EngineResult<OptionTally> {
        let game = self
            .registry
            .get(id)
            .ok_or_else(|| EngineError::unknown(format!("node {}", id.0)))?;
        let tally = priors::tally(game, Some(id), &self.registry, &self.graph);
        self.tallies[id.index()] = tally;
        Ok(tally)
    }

    /// Re-derive the option tallies of every state.
    pub fn refresh_all(&mut self) {
        for (id, game) in self.registry.iter() {
            self.tallies[id.index()] = priors::tally(game, Some(id), &self.registry, &self.graph);
        }
    }

    /// Every option of a state with its current kind.
    pub fn move_kinds(&self, id: NodeId) -> EngineResult<Vec<(Move, MoveKind)>> {
        let game = self.game(id)?;
        Ok(priors::move_kinds(game, Some(id), &self.registry, &self.graph))
    }

    /// Kind of the move `from -> to` in state `id`.
    pub fn move_kind(&self, id: NodeId, mv: &Move) -> EngineResult<Option<MoveKind>> {
        Ok(self
            .move_kinds(id)?
            .into_iter()
            .find(|(m, _)| m == mv)
            .map(|(_, kind)| kind))
    }

    /// Safe moves that lead to states nobody has committed yet.
    pub fn unexplored_moves(&self, id: NodeId) -> EngineResult<Vec<Move>> {
        Ok(self
            .move_kinds(id)?
            .into_iter()
            .filter(|(_, kind)| *kind == MoveKind::Valid)
            .map(|(mv, _)| mv)
            .collect())
    }

    /// Commit the successors of `from` for each move, link them to `from`,
    /// then resequence and refresh every tally.
    ///
    /// All moves are checked before anything is committed.
    pub fn expand(&mut self, from: NodeId, moves: &[Move]) -> EngineResult<Expansion> {
        let parent = self.game(from)?;
        let mut successors = Vec::with_capacity(moves.len());
        for mv in moves {
            parent.check_move(mv)?;
            let successor = match self.registry.lookup(parent.hash_after(*mv).as_str()) {
                Some(id) => Successor::Known(id),
                None => Successor::New(parent.successor(*mv)),
            };
            successors.push(successor);
        }

        let mut expansion = Expansion::default();
        let mut linked = Vec::new();
        for successor in successors {
            let id = match successor {
                Successor::Known(id) => id,
                Successor::New(game) => {
                    let (id, inserted) = self.register(game)?;
                    if inserted {
                        expansion.created.push(id);
                    }
                    id
                }
            };
            if self.graph.connect(from, id) {
                linked.push(id);
            }
            expansion.reached.push(id);
        }

        self.resequence();
        self.refresh_all();
        expansion.connections = linked
            .into_iter()
            .filter_map(|id| self.connection(from, id))
            .collect();

        debug!(
            "expanded node {} by {} moves: {} new states, {} new edges",
            from.0,
            moves.len(),
            expansion.created.len(),
            expansion.connections.len()
        );
        Ok(expansion)
    }

    /// Expand a line of moves one after another, starting at `from`.
    /// Returns the node reached after each move.
    ///
    /// The whole line is replayed before anything is committed, so an
    /// illegal move anywhere leaves the explorer unchanged.
    pub fn commit_line(&mut self, from: NodeId, moves: &[Move]) -> EngineResult<Vec<NodeId>> {
        let mut replay = self.game(from)?.clone();
        for mv in moves {
            replay = replay.apply_move(mv)?;
        }

        let mut reached = Vec::with_capacity(moves.len());
        let mut at = from;
        for mv in moves {
            let expansion = self.expand(at, std::slice::from_ref(mv))?;
            at = expansion.reached[0];
            reached.push(at);
        }
        Ok(reached)
    }

    // ========== Views ==========

    pub fn summary(&self, id: NodeId) -> EngineResult<StateSummary> {
        let game = self.game(id)?;
        let options = self.tally(id);
        Ok(StateSummary {
            id,
            hash: game.hash().clone(),
            distance: self.distance(id),
            last_move: game.last_move(),
            solved_pieces: game.solved_pieces(),
            total_pieces: game.total_pieces(),
            options,
            missing_connection: options.missing_connection(),
            complete: options.complete(),
        })
    }

    /// Squares of a state with option kinds resolved against the graph.
    pub fn board(&self, id: NodeId) -> EngineResult<BoardView> {
        let game = self.game(id)?;
        let (rows, cols) = (game.rows(), game.cols());
        let squares = game
            .squares()
            .iter()
            .enumerate()
            .map(|(index, sq)| -> EngineResult<SquareView> {
                let coord = Coord::from_index(index, cols);
                let options = sq
                    .options()
                    .iter()
                    .enumerate()
                    .filter_map(|(i, opt)| {
                        let kind = priors::option_kind(
                            game,
                            Some(id),
                            coord,
                            i,
                            &self.registry,
                            &self.graph,
                        )?;
                        Some(OptionView { to: opt.to(), kind })
                    })
                    .collect();
                Ok(SquareView {
                    coord,
                    label: notation::format_coord(coord, rows, cols)?,
                    occupant: sq.occupant(),
                    attacked_by: sq.attacked_by(),
                    options,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(BoardView {
            id,
            rows,
            cols,
            hash: game.hash().clone(),
            squares,
        })
    }

    /// Summaries of every committed state, commit order.
    pub fn summaries(&self) -> Vec<StateSummary> {
        self.registry
            .iter()
            .filter_map(|(id, _)| self.summary(id).ok())
            .collect()
    }

    /// Every edge, labeled with the move it stands for.
    pub fn connections(&self) -> Vec<Connection> {
        self.graph
            .edges()
            .filter_map(|(a, b)| self.connection(a, b))
            .collect()
    }

    fn connection(&self, a: NodeId, b: NodeId) -> Option<Connection> {
        let (from, to) = match (self.distance(a), self.distance(b)) {
            (Some(da), Some(db)) if db < da => (b, a),
            _ => (a, b),
        };
        let mv = edge_move(self.registry.get(from)?, self.registry.get(to)?);
        let label = mv.and_then(|mv| {
            notation::connection_label(
                &mv,
                self.distance(from),
                self.distance(to),
                self.settings.rows,
                self.settings.cols,
            )
            .ok()
        });
        Some(Connection { from, to, mv, label })
    }

    // ========== Solver ==========

    /// Prepare a search from a committed state. States on its path from
    /// the root are never revisited.
    pub fn search(&self, id: NodeId, deadline: Duration) -> EngineResult<Search> {
        let start = self.game(id)?.clone();
        let ancestry = self
            .graph
            .ancestry(id)
            .into_iter()
            .filter_map(|n| self.registry.get(n).map(|g| g.hash().clone()))
            .collect::<Vec<_>>();
        Ok(Search::new(start, ancestry, deadline))
    }

    /// Run a search to completion.
    pub fn solve(&self, id: NodeId, deadline: Duration) -> EngineResult<SolveOutcome> {
        Ok(self.search(id, deadline)?.run())
    }
}

/// The single move turning `a` into `b`, if they are one move apart.
pub fn edge_move(a: &Game, b: &Game) -> Option<Move> {
    if a.rows() != b.rows() || a.cols() != b.cols() {
        return None;
    }
    let mut from = None;
    let mut to = None;
    for (index, (sa, sb)) in a.squares().iter().zip(b.squares()).enumerate() {
        match (sa.occupant(), sb.occupant()) {
            (x, y) if x == y => {}
            (Some(color), None) if from.is_none() => from = Some((index, color)),
            (None, Some(color)) if to.is_none() => to = Some((index, color)),
            _ => return None,
        }
    }
    match (from, to) {
        (Some((f, cf)), Some((t, ct))) if cf == ct => Some(Move::new(
            Coord::from_index(f, a.cols()),
            Coord::from_index(t, a.cols()),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PieceFilter;

    fn mv(r1: u8, c1: u8, r2: u8, c2: u8) -> Move {
        Move::new(Coord::new(r1, c1), Coord::new(r2, c2))
    }

    fn explorer() -> Explorer {
        Explorer::new(GameSettings::default()).unwrap()
    }

    #[test]
    fn test_new_registers_root() {
        let ex = explorer();
        assert_eq!(ex.len(), 1);
        assert_eq!(ex.distance(ex.root()), Some(0));
        let summary = ex.summary(ex.root()).unwrap();
        assert_eq!(summary.total_pieces, 8);
        assert_eq!(summary.options.total, 8);
        assert_eq!(summary.options.explored, 0);
        assert!(!summary.complete);
    }

    #[test]
    fn test_expand_commits_and_links() {
        let mut ex = explorer();
        let root = ex.root();
        let expansion = ex.expand(root, &[mv(0, 0, 1, 1)]).unwrap();

        assert_eq!(expansion.reached.len(), 1);
        assert_eq!(expansion.created, expansion.reached);
        let child = expansion.reached[0];
        assert_eq!(ex.distance(child), Some(1));
        assert_eq!(ex.tally(root).explored, 1);
        assert_eq!(ex.tally(root).connected, 1);

        let conn = &expansion.connections[0];
        assert_eq!((conn.from, conn.to), (root, child));
        assert_eq!(conn.mv, Some(mv(0, 0, 1, 1)));
        assert_eq!(conn.label.as_deref(), Some("d5 → c4"));
    }

    #[test]
    fn test_expand_twice_is_idempotent() {
        let mut ex = explorer();
        let root = ex.root();
        let first = ex.expand(root, &[mv(0, 0, 1, 1)]).unwrap();
        let second = ex.expand(root, &[mv(0, 0, 1, 1)]).unwrap();
        assert_eq!(first.reached, second.reached);
        assert!(second.created.is_empty());
        assert!(second.connections.is_empty());
        assert_eq!(ex.len(), 2);
    }

    #[test]
    fn test_expand_rejects_without_side_effects() {
        let mut ex = explorer();
        let root = ex.root();
        let err = ex.expand(root, &[mv(0, 0, 1, 1), mv(0, 0, 2, 2)]).unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { .. }));
        assert_eq!(ex.len(), 1);
        assert!(ex.expand(NodeId(9), &[]).is_err());

        let err = ex.expand(root, &[mv(0, 0, 9, 9)]).unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { .. }));
        assert_eq!(ex.len(), 1);
    }

    #[test]
    fn test_transposition_reports_prior_explored() {
        let mut ex = explorer();
        let root = ex.root();
        let a = ex.expand(root, &[mv(0, 0, 1, 1)]).unwrap().reached[0];
        let b = ex.expand(root, &[mv(0, 4, 1, 3)]).unwrap().reached[0];
        let ab = ex.expand(a, &[mv(0, 4, 1, 3)]).unwrap().reached[0];

        // b -> (0,0)->(1,1) reaches the same state as a -> (0,4)->(1,3)
        assert_eq!(
            ex.move_kind(b, &mv(0, 0, 1, 1)).unwrap(),
            Some(MoveKind::PriorExplored)
        );
        assert!(ex.summary(b).unwrap().missing_connection);

        let again = ex.expand(b, &[mv(0, 0, 1, 1)]).unwrap();
        assert_eq!(again.reached, vec![ab]);
        assert!(again.created.is_empty());
        assert_eq!(again.connections.len(), 1);
        assert_eq!(
            ex.move_kind(b, &mv(0, 0, 1, 1)).unwrap(),
            Some(MoveKind::PriorConnected)
        );
        assert_eq!(ex.distance(ab), Some(2));
    }

    #[test]
    fn test_unexplored_moves_shrink() {
        let mut ex = explorer();
        let root = ex.root();
        let before = ex.unexplored_moves(root).unwrap();
        assert_eq!(before.len(), 8);

        ex.expand(root, &before[..3]).unwrap();
        let after = ex.unexplored_moves(root).unwrap();
        assert_eq!(after, before[3..].to_vec());

        ex.expand(root, &after).unwrap();
        assert!(ex.unexplored_moves(root).unwrap().is_empty());
        assert!(ex.summary(root).unwrap().complete);
    }

    #[test]
    fn test_commit_line_follows_solution() {
        let settings = GameSettings::new(3, 5, PieceFilter::White);
        let mut ex = Explorer::new(settings).unwrap();
        let root = ex.root();
        let outcome = ex.solve(root, Duration::from_secs(60)).unwrap();
        let moves = outcome.moves().unwrap().to_vec();

        let line = ex.commit_line(root, &moves).unwrap();
        let last = *line.last().unwrap();
        assert!(ex.game(last).unwrap().is_solved());
        assert_eq!(ex.distance(last), Some(moves.len() as u32));

        let again = ex.solve(last, Duration::from_secs(60)).unwrap();
        assert_eq!(again.moves(), Some(&[][..]));
    }

    #[test]
    fn test_commit_line_is_all_or_nothing() {
        let mut ex = explorer();
        let root = ex.root();

        // Second move starts on an empty square
        let err = ex
            .commit_line(root, &[mv(0, 0, 1, 1), mv(3, 3, 2, 2)])
            .unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { .. }));
        assert_eq!(ex.len(), 1);
        assert!(ex.connections().is_empty());
        assert_eq!(ex.tally(root).explored, 0);

        let reached = ex
            .commit_line(root, &[mv(0, 0, 1, 1), mv(0, 4, 1, 3)])
            .unwrap();
        assert_eq!(reached.len(), 2);
        assert_eq!(ex.len(), 3);
    }

    #[test]
    fn test_board_view_kinds() {
        let mut ex = explorer();
        let root = ex.root();
        ex.expand(root, &[mv(0, 0, 1, 1)]).unwrap();

        let board = ex.board(root).unwrap();
        assert_eq!(board.squares.len(), 20);
        let corner = &board.squares[0];
        assert_eq!(corner.label, "d5");
        assert_eq!(corner.occupant, Some(Color::Black));
        assert_eq!(
            corner.options,
            vec![
                OptionView {
                    to: Coord::new(1, 1),
                    kind: MoveKind::PriorConnected,
                },
                OptionView {
                    to: Coord::new(2, 2),
                    kind: MoveKind::Invalid,
                },
                OptionView {
                    to: Coord::new(3, 3),
                    kind: MoveKind::Invalid,
                },
            ]
        );
        assert!(board.squares[1].options.is_empty());
    }

    #[test]
    fn test_commit_rejects_other_board_size() {
        let mut ex = explorer();
        let other = Game::new(&GameSettings::new(3, 4, PieceFilter::All)).unwrap();
        assert!(ex.commit(other).is_err());
    }

    #[test]
    fn test_reset_starts_over() {
        let mut ex = explorer();
        let root = ex.root();
        ex.expand(root, &[mv(0, 0, 1, 1)]).unwrap();
        ex.reset(GameSettings::new(3, 4, PieceFilter::All)).unwrap();
        assert_eq!(ex.len(), 1);
        assert_eq!(ex.graph().edge_count(), 0);
        assert_eq!(ex.settings().cols, 4);

        assert!(ex.reset(GameSettings::new(0, 4, PieceFilter::All)).is_err());
        assert_eq!(ex.settings().cols, 4);
        assert_eq!(ex.len(), 1);
    }

    #[test]
    fn test_restore_matches_original() {
        let mut ex = explorer();
        let root = ex.root();
        ex.expand(root, &[mv(0, 0, 1, 1), mv(2, 0, 1, 1)]).unwrap();

        let hashes: Vec<StateHash> = ex.registry().iter().map(|(_, g)| g.hash().clone()).collect();
        let edges: Vec<(u32, u32)> = ex.graph().edges().map(|(a, b)| (a.0, b.0)).collect();
        let copy = Explorer::restore(ex.settings(), &hashes, &edges).unwrap();

        let view = |e: &Explorer| {
            e.summaries()
                .into_iter()
                .map(|s| (s.hash, s.distance, s.options))
                .collect::<Vec<_>>()
        };
        assert_eq!(view(&copy), view(&ex));
        assert_eq!(copy.connections(), ex.connections());
    }

    #[test]
    fn test_restore_rejects_bad_input() {
        let settings = GameSettings::default();
        assert!(Explorer::restore(settings, &[], &[]).is_err());

        let root = Game::new(&settings).unwrap().hash().clone();
        assert!(Explorer::restore(settings, &[root.clone(), root.clone()], &[]).is_err());
        assert!(Explorer::restore(settings, &[root], &[(0, 3)]).is_err());
    }

    #[test]
    fn test_edge_move_detects_single_move() {
        let a = Game::new(&GameSettings::default()).unwrap();
        let b = a.apply_move(&mv(0, 0, 1, 1)).unwrap();
        assert_eq!(edge_move(&a, &b), Some(mv(0, 0, 1, 1)));
        assert_eq!(edge_move(&b, &a), Some(mv(1, 1, 0, 0)));
        assert_eq!(edge_move(&a, &a), None);

        let c = b.apply_move(&mv(0, 4, 1, 3)).unwrap();
        assert_eq!(edge_move(&a, &c), None);
    }
}
