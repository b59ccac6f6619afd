//! End-to-end scenarios through the public engine API.
//!
//! Solver results are checked against a plain breadth-first search over
//! `Game::safe_moves` that shares no code with `Search`.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use bishops_core::{
    Coord, EngineError, Explorer, Game, GameSettings, Move, MoveKind, PieceFilter, Search,
    SearchStep, SolveOutcome, StateHash,
};

const LONG: Duration = Duration::from_secs(120);

/// Shortest solution length, or `None` if no reachable state is solved.
fn brute_force(start: &Game) -> (Option<usize>, usize) {
    let mut dist: HashMap<StateHash, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(start.hash().clone(), 0);
    queue.push_back(start.clone());

    while let Some(game) = queue.pop_front() {
        let d = dist[game.hash()];
        if game.is_solved() {
            return (Some(d), dist.len());
        }
        for mv in game.safe_moves() {
            let next = game.apply_move(&mv).unwrap();
            if !dist.contains_key(next.hash()) {
                dist.insert(next.hash().clone(), d + 1);
                queue.push_back(next);
            }
        }
    }
    (None, dist.len())
}

fn replay(start: &Game, moves: &[Move]) -> Game {
    moves
        .iter()
        .fold(start.clone(), |g, mv| g.apply_move(mv).unwrap())
}

#[test]
fn test_four_by_five_first_move() {
    let mut explorer = Explorer::new(GameSettings::default()).unwrap();
    let root = explorer.root();
    let start = explorer.game(root).unwrap().clone();
    assert_eq!(start.total_pieces(), 8);
    assert_eq!(start.solved_pieces(), 0);

    let mv = Move::new(Coord::new(0, 0), Coord::new(1, 1));
    let option = start
        .square(mv.from)
        .options()
        .iter()
        .find(|o| o.to() == mv.to)
        .unwrap();
    assert_eq!(option.kind(), MoveKind::Valid);

    let expansion = explorer.expand(root, &[mv]).unwrap();
    let child = expansion.reached[0];
    assert_ne!(explorer.game(child).unwrap().hash(), start.hash());
    assert_eq!(explorer.distance(child), Some(1));
    assert_eq!(explorer.lookup(start.hash().as_str()), Some(root));
}

#[test]
fn test_solver_matches_brute_force() {
    let cases = [
        GameSettings::new(3, 5, PieceFilter::White),
        GameSettings::new(4, 5, PieceFilter::White),
        GameSettings::new(4, 5, PieceFilter::Black),
        GameSettings::new(5, 5, PieceFilter::White),
        GameSettings::new(2, 4, PieceFilter::All),
        GameSettings::new(3, 4, PieceFilter::All),
        GameSettings::new(3, 3, PieceFilter::All),
    ];

    for settings in cases {
        let start = Game::new(&settings).unwrap();
        let (expected, reachable) = brute_force(&start);
        let outcome = Search::new(start.clone(), [], LONG).run();

        match (expected, &outcome) {
            (Some(len), SolveOutcome::Solved { moves, .. }) => {
                assert_eq!(moves.len(), len, "{settings:?}");
                assert!(replay(&start, moves).is_solved(), "{settings:?}");
            }
            (None, SolveOutcome::NoSolution { explored }) => {
                assert_eq!(*explored as usize, reachable - 1, "{settings:?}");
            }
            other => panic!("{settings:?}: unexpected {other:?}"),
        }
    }
}

#[test]
fn test_known_solution_lengths() {
    let lengths = [
        (GameSettings::new(3, 5, PieceFilter::White), 6),
        (GameSettings::new(4, 5, PieceFilter::White), 18),
        (GameSettings::new(5, 5, PieceFilter::White), 12),
        (GameSettings::new(4, 5, PieceFilter::All), 36),
    ];
    for (settings, len) in lengths {
        let explorer = Explorer::new(settings).unwrap();
        let outcome = explorer.solve(explorer.root(), LONG).unwrap();
        assert_eq!(outcome.moves().map(<[Move]>::len), Some(len), "{settings:?}");
    }
}

#[test]
fn test_solve_from_committed_state() {
    let settings = GameSettings::new(4, 5, PieceFilter::White);
    let mut explorer = Explorer::new(settings).unwrap();
    let root = explorer.root();

    let first = explorer.solve(root, LONG).unwrap().first_move().unwrap();
    let next = explorer.expand(root, &[first]).unwrap().reached[0];
    let rest = explorer.solve(next, LONG).unwrap();
    assert_eq!(rest.moves().unwrap().len(), 17);

    // The root is on the ancestry of `next` and is never revisited.
    let mut search = explorer.search(next, LONG).unwrap();
    let root_hash = explorer.game(root).unwrap().hash().clone();
    while let SearchStep::Layer(layer) = search.step() {
        assert!(!layer.states.contains(&root_hash));
    }
}

#[test]
fn test_unreachable_goal() {
    let explorer = Explorer::new(GameSettings::new(3, 6, PieceFilter::All)).unwrap();
    let outcome = explorer.solve(explorer.root(), LONG).unwrap();
    assert!(matches!(outcome, SolveOutcome::NoSolution { .. }));

    let outcome = explorer.solve(explorer.root(), Duration::ZERO).unwrap();
    assert_eq!(outcome, SolveOutcome::TimeExpired { explored: 0 });
}

#[test]
fn test_distance_invariant_after_random_expansion() {
    use rand::prelude::*;

    let mut rng = rand::rng();
    let mut explorer = Explorer::new(GameSettings::default()).unwrap();

    for _ in 0..60 {
        let id = bishops_core::NodeId(rng.random_range(0..explorer.len() as u32));
        let moves = explorer.game(id).unwrap().safe_moves();
        if moves.is_empty() {
            continue;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        explorer.expand(id, &[mv]).unwrap();
    }

    let graph = explorer.graph();
    for (a, b) in graph.edges() {
        let (da, db) = (graph.distance(a).unwrap(), graph.distance(b).unwrap());
        assert!(da.abs_diff(db) <= 1, "edge {a:?}-{b:?}: {da} vs {db}");
    }
    for summary in explorer.summaries() {
        assert!(summary.options.connected <= summary.options.explored);
        assert!(summary.options.explored <= summary.options.total);
    }
}

#[test]
fn test_registry_idempotence_through_expand() {
    let mut explorer = Explorer::new(GameSettings::default()).unwrap();
    let root = explorer.root();
    let moves = explorer.unexplored_moves(root).unwrap();

    explorer.expand(root, &moves).unwrap();
    let count = explorer.len();
    let edges = explorer.graph().edge_count();

    let again = explorer.expand(root, &moves).unwrap();
    assert_eq!(explorer.len(), count);
    assert_eq!(explorer.graph().edge_count(), edges);
    assert!(again.connections.is_empty());

    let hashes: Vec<_> = explorer
        .registry()
        .iter()
        .map(|(_, g)| g.hash().clone())
        .collect();
    let mut unique = hashes.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), hashes.len());
}

#[test]
fn test_illegal_requests() {
    let mut explorer = Explorer::new(GameSettings::default()).unwrap();
    let root = explorer.root();

    let err = explorer
        .expand(root, &[Move::new(Coord::new(0, 1), Coord::new(1, 2))])
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove { .. }));

    assert!(matches!(
        explorer.node("nope"),
        Err(EngineError::UnknownState { .. })
    ));
    assert!(Explorer::new(GameSettings::new(4, 1, PieceFilter::All)).is_err());
}
