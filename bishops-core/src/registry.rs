//! Committed games, deduplicated by hash.

use std::collections::HashMap;

use log::trace;

use crate::game::Game;
use crate::graph::NodeId;
use crate::StateHash;

/// Arena of committed games plus a hash index.
///
/// A hash is registered at most once; node ids are dense and stable until
/// [`Registry::reset`].
#[derive(Debug, Default)]
pub struct Registry {
    games: Vec<Game>,
    index: HashMap<StateHash, NodeId>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    #[inline]
    pub fn lookup(&self, hash: &str) -> Option<NodeId> {
        self.index.get(hash).copied()
    }

    #[inline]
    pub fn contains(&self, hash: &str) -> bool {
        self.index.contains_key(hash)
    }

    /// Register a game. A duplicate hash resolves to the existing node and
    /// the new game is dropped; `inserted` tells which happened.
    pub fn register(&mut self, game: Game) -> (NodeId, bool) {
        if let Some(id) = self.lookup(game.hash().as_str()) {
            return (id, false);
        }
        let id = NodeId(self.games.len() as u32);
        trace!("register {} as node {}", game.hash(), id.0);
        self.index.insert(game.hash().clone(), id);
        self.games.push(game);
        (id, true)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Game> {
        self.games.get(id.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games in commit order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Game)> {
        self.games
            .iter()
            .enumerate()
            .map(|(i, g)| (NodeId(i as u32), g))
    }

    pub fn reset(&mut self) {
        self.games.clear();
        self.index.clear();
    }
}
