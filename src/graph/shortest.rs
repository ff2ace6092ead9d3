//! Floyd–Warshall all-pairs shortest paths with path reconstruction.

use super::{Graph, Weight, INFINITY};
use std::collections::BTreeMap;

/// All-pairs shortest path result over a [`Graph`].
///
/// `dist[i][i]` is zero for every vertex; unreachable pairs keep
/// [`INFINITY`] and have no path.
#[derive(Clone, Debug)]
pub struct ShortestPaths<V: Ord + Clone> {
    graph: Graph<V>,
    dist: Vec<Vec<Weight>>,
    next: Vec<Vec<Option<usize>>>,
}

impl<V: Ord + Clone> ShortestPaths<V> {
    pub(crate) fn compute(graph: &Graph<V>) -> Self {
        let n = graph.vertex_count();
        let mut dist = vec![vec![INFINITY; n]; n];
        let mut next = vec![vec![None; n]; n];

        for i in 0..n {
            dist[i][i] = 0;
            next[i][i] = Some(i);
        }
        for (from, to, weight) in graph.edge_indices() {
            if from != to && weight < dist[from][to] {
                dist[from][to] = weight;
                next[from][to] = Some(to);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let via = dist[i][k];
                if via == INFINITY {
                    continue;
                }
                for j in 0..n {
                    let rest = dist[k][j];
                    if rest == INFINITY {
                        continue;
                    }
                    let through = via.saturating_add(rest);
                    if through < dist[i][j] {
                        dist[i][j] = through;
                        next[i][j] = next[i][k];
                    }
                }
            }
        }

        Self {
            graph: graph.clone(),
            dist,
            next,
        }
    }

    /// Vertices of the analysed graph, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.graph.vertices()
    }

    /// Length of the shortest path `from -> to`, or `None` if unreachable.
    pub fn distance(&self, from: &V, to: &V) -> Option<Weight> {
        let i = self.graph.index_of(from)?;
        let j = self.graph.index_of(to)?;
        let distance = self.dist[i][j];
        (distance != INFINITY).then_some(distance)
    }

    /// Vertex sequence of the shortest path `from -> to`, both ends included.
    pub fn path(&self, from: &V, to: &V) -> Option<Vec<V>> {
        let i = self.graph.index_of(from)?;
        let j = self.graph.index_of(to)?;
        self.path_vertices(i, j)
    }

    /// Paths between every ordered pair of distinct, reachable vertices.
    pub fn all_paths(&self) -> BTreeMap<(V, V), Vec<V>> {
        let vertices: Vec<&V> = self.graph.vertices().collect();
        let mut paths = BTreeMap::new();
        for (i, from) in vertices.iter().enumerate() {
            for (j, to) in vertices.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(path) = self.path_vertices(i, j) {
                    paths.insert(((*from).clone(), (*to).clone()), path);
                }
            }
        }
        paths
    }

    fn path_vertices(&self, from: usize, to: usize) -> Option<Vec<V>> {
        self.path_indices(from, to)?
            .into_iter()
            .map(|index| self.graph.vertex(index).cloned())
            .collect()
    }

    fn path_indices(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let mut at = from;
        let mut path = vec![at];
        while at != to {
            at = self.next[at][to]?;
            path.push(at);
            // A consistent next-table never revisits more vertices than exist.
            if path.len() > self.dist.len() {
                return None;
            }
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> Graph<&'static str> {
        let mut graph = Graph::new();
        graph.add_edge("green", "yellow", 1);
        graph.add_edge("yellow", "ped_red", 2);
        graph.add_edge("ped_red", "red", 3);
        graph.add_edge("red", "green", 4);
        graph
    }

    #[test]
    fn self_distance_is_zero() {
        let paths = cycle().shortest_paths();
        for vertex in ["green", "yellow", "ped_red", "red"] {
            assert_eq!(paths.distance(&vertex, &vertex), Some(0));
            assert_eq!(paths.path(&vertex, &vertex), Some(vec![vertex]));
        }
    }

    #[test]
    fn path_follows_the_cycle() {
        let paths = cycle().shortest_paths();
        assert_eq!(
            paths.path(&"red", &"ped_red"),
            Some(vec!["red", "green", "yellow", "ped_red"])
        );
        assert_eq!(paths.distance(&"red", &"ped_red"), Some(7));
    }

    #[test]
    fn unreachable_pairs_have_no_path() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b", 1);
        graph.add_vertex("island");
        let paths = graph.shortest_paths();

        assert_eq!(paths.distance(&"b", &"a"), None);
        assert_eq!(paths.path(&"a", &"island"), None);
        assert_eq!(paths.path(&"missing", &"a"), None);
    }

    #[test]
    fn cheaper_detour_beats_direct_edge() {
        let mut graph = Graph::new();
        graph.add_edge(0, 3, 10);
        graph.add_edge(0, 1, 1);
        graph.add_edge(1, 2, 1);
        graph.add_edge(2, 3, 1);
        let paths = graph.shortest_paths();

        assert_eq!(paths.distance(&0, &3), Some(3));
        assert_eq!(paths.path(&0, &3), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn self_loops_do_not_change_self_distance() {
        let mut graph = Graph::new();
        graph.add_edge("a", "a", 5);
        graph.add_edge("a", "b", 1);
        let paths = graph.shortest_paths();
        assert_eq!(paths.distance(&"a", &"a"), Some(0));
        assert_eq!(paths.distance(&"a", &"b"), Some(1));
    }

    #[test]
    fn all_paths_lists_distinct_reachable_pairs() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b", 1);
        graph.add_edge("b", "c", 1);
        let all = graph.shortest_paths().all_paths();

        assert_eq!(all.len(), 3);
        assert_eq!(all.get(&("a", "c")), Some(&vec!["a", "b", "c"]));
        assert!(!all.contains_key(&("c", "a")));
        assert!(!all.contains_key(&("a", "a")));
    }
}
