//! Undirected connectivity between committed states, with BFS distance
//! labels from the root.

use std::collections::{BTreeSet, VecDeque};

use log::trace;
use serde::{Deserialize, Serialize};

/// Index of a committed game in the registry arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Adjacency sets plus the labels of the last sequencing pass.
#[derive(Debug, Default, Clone)]
pub struct StateGraph {
    edges: Vec<BTreeSet<NodeId>>,
    distance: Vec<Option<u32>>,
    parent: Vec<Option<NodeId>>,
}

impl StateGraph {
    pub fn new() -> StateGraph {
        StateGraph::default()
    }

    fn ensure(&mut self, id: NodeId) {
        let needed = id.index() + 1;
        if self.edges.len() < needed {
            self.edges.resize_with(needed, BTreeSet::new);
            self.distance.resize(needed, None);
            self.parent.resize(needed, None);
        }
    }

    /// Add an undirected edge. Returns `false` if it already existed or
    /// `a == b`.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        self.ensure(a.max(b));
        let added = self.edges[a.index()].insert(b);
        if added {
            self.edges[b.index()].insert(a);
            trace!("edge {} <-> {}", a.0, b.0);
        }
        added
    }

    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .get(a.index())
            .is_some_and(|set| set.contains(&b))
    }

    /// Neighbours of `id` in ascending id order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.get(id.index()).into_iter().flatten().copied()
    }

    /// Every edge once, as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().enumerate().flat_map(|(i, set)| {
            let a = NodeId(i as u32);
            set.range(a..).filter(move |&&b| b != a).map(move |&b| (a, b))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Hops from the root, or `None` if unreachable or never sequenced.
    #[inline]
    pub fn distance(&self, id: NodeId) -> Option<u32> {
        self.distance.get(id.index()).copied().flatten()
    }

    /// BFS parent from the last sequencing pass.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id.index()).copied().flatten()
    }

    /// Nodes on the BFS path from the root down to `id`'s parent,
    /// root first. Empty for the root and for unreachable nodes.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.parent(p);
        }
        chain.reverse();
        chain
    }

    /// Relabel every node with its BFS distance from `root`.
    pub fn resequence(&mut self, root: NodeId) {
        self.ensure(root);
        self.distance.iter_mut().for_each(|d| *d = None);
        self.parent.iter_mut().for_each(|p| *p = None);

        self.distance[root.index()] = Some(0);
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            let next = self.distance[node.index()].map_or(0, |d| d + 1);
            for &neighbor in &self.edges[node.index()] {
                if self.distance[neighbor.index()].is_none() {
                    self.distance[neighbor.index()] = Some(next);
                    self.parent[neighbor.index()] = Some(node);
                    queue.push_back(neighbor);
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.edges.clear();
        self.distance.clear();
        self.parent.clear();
    }
}
