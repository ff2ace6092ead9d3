//! Weighted directed graphs with all-pairs shortest paths.
//!
//! This module knows nothing about transducers. Vertices are any ordered,
//! cloneable value; edges carry a non-negative [`Weight`].

mod shortest;

pub use shortest::ShortestPaths;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// Non-negative edge weight and path length.
pub type Weight = u64;

/// Distance of an unreachable pair. Larger than any finite path length.
pub const INFINITY: Weight = Weight::MAX;

/// A weighted directed graph.
///
/// Vertices keep their insertion order. A repeated edge between the same
/// pair keeps the smaller weight.
///
/// # Example
///
/// ```rust
/// use modal_transducer::graph::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_edge("a", "b", 1);
/// graph.add_edge("b", "c", 1);
/// graph.add_edge("a", "c", 5);
///
/// let paths = graph.shortest_paths();
/// assert_eq!(paths.distance(&"a", &"c"), Some(2));
/// assert_eq!(paths.path(&"a", &"c"), Some(vec!["a", "b", "c"]));
/// assert_eq!(paths.path(&"c", &"a"), None);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<V: Ord + Clone> {
    graph: DiGraph<V, Weight>,
    index: BTreeMap<V, NodeIndex>,
}

impl<V: Ord + Clone> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Ord + Clone> Graph<V> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: BTreeMap::new(),
        }
    }

    /// Add `vertex` if absent and return its node index.
    pub fn add_vertex(&mut self, vertex: V) -> NodeIndex {
        if let Some(&node) = self.index.get(&vertex) {
            return node;
        }
        let node = self.graph.add_node(vertex.clone());
        self.index.insert(vertex, node);
        node
    }

    /// Add an edge, adding its endpoints as needed.
    pub fn add_edge(&mut self, from: V, to: V, weight: Weight) {
        let from = self.add_vertex(from);
        let to = self.add_vertex(to);
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                if let Some(existing) = self.graph.edge_weight_mut(edge) {
                    *existing = (*existing).min(weight);
                }
            }
            None => {
                self.graph.add_edge(from, to, weight);
            }
        }
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.graph.node_weights()
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Weight of the direct edge `from -> to`, if there is one.
    pub fn weight(&self, from: &V, to: &V) -> Option<Weight> {
        let edge = self
            .graph
            .find_edge(*self.index.get(from)?, *self.index.get(to)?)?;
        self.graph.edge_weight(edge).copied()
    }

    /// All edges as `(from, to, weight)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, Weight)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                *edge.weight(),
            )
        })
    }

    /// Run Floyd–Warshall over the whole graph.
    pub fn shortest_paths(&self) -> ShortestPaths<V> {
        ShortestPaths::compute(self)
    }

    /// Edges as dense `(from, to, weight)` indices.
    pub(crate) fn edge_indices(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source().index(), edge.target().index(), *edge.weight()))
    }

    pub(crate) fn index_of(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).map(|node| node.index())
    }

    /// The vertex at a dense index taken from [`index_of`](Self::index_of).
    pub(crate) fn vertex(&self, index: usize) -> Option<&V> {
        self.graph.node_weight(NodeIndex::new(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_vertex_is_idempotent() {
        let mut graph = Graph::new();
        let x = graph.add_vertex("x");
        let y = graph.add_vertex("y");
        assert_eq!(graph.add_vertex("x"), x);
        assert_ne!(x, y);
        assert_eq!(graph.index_of(&"y"), Some(1));
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn add_edge_adds_endpoints_in_order() {
        let mut graph = Graph::new();
        graph.add_edge("b", "a", 3);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![&"b", &"a"]);
        assert_eq!(graph.weight(&"b", &"a"), Some(3));
        assert_eq!(graph.weight(&"a", &"b"), None);
    }

    #[test]
    fn parallel_edge_keeps_smallest_weight() {
        let mut graph = Graph::new();
        graph.add_edge(1, 2, 9);
        graph.add_edge(1, 2, 4);
        graph.add_edge(1, 2, 6);
        assert_eq!(graph.weight(&1, &2), Some(4));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn edges_report_vertex_values() {
        let mut graph = Graph::new();
        graph.add_edge('p', 'q', 2);
        graph.add_edge('q', 'p', 7);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(&'p', &'q', 2), (&'q', &'p', 7)]);
    }
}
