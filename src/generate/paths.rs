//! Shortest paths between the states of a transducer.
//!
//! The state graph has one vertex per state and one edge per distinct
//! `(state, next)` pair. With [`EdgeWeighting::DiscoveryOrder`] each new pair
//! is weighted by a counter that grows in table order, so the "shortest"
//! path prefers transitions discovered early. That is a heuristic, not a
//! minimal hop count; use [`EdgeWeighting::Uniform`] for fewest hops.

use crate::core::{ConfigData, State, Symbol, Transducer, TransitionTriple};
use crate::graph::{Graph, ShortestPaths, Weight};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// How state-graph edges are weighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeWeighting {
    /// 1, 2, 3, ... in the order `(state, next)` pairs are first seen
    #[default]
    DiscoveryOrder,
    /// Every edge weighs 1
    Uniform,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    pub weighting: EdgeWeighting,
}

/// Inputs that cause each `(state, next)` edge, in table order.
pub type EdgeLabels<S, I> = BTreeMap<(S, S), Vec<I>>;

/// All shortest paths of a transducer's state graph.
#[derive(Clone, Debug)]
pub struct ShortestPathReport<S: State, I: Symbol> {
    /// State sequence for every ordered pair of distinct, reachable states
    pub paths: BTreeMap<(S, S), Vec<S>>,
    /// Raw edge-label index
    pub labels: EdgeLabels<S, I>,
    analysis: ShortestPaths<S>,
}

impl<S: State, I: Symbol> ShortestPathReport<S, I> {
    pub fn path(&self, from: &S, to: &S) -> Option<&[S]> {
        self.paths
            .get(&(from.clone(), to.clone()))
            .map(Vec::as_slice)
    }

    /// Accumulated edge weight of the path `from -> to`.
    pub fn distance(&self, from: &S, to: &S) -> Option<Weight> {
        self.analysis.distance(from, to)
    }

    /// One input per hop of the path `from -> to`, taking the first label
    /// recorded for each edge.
    pub fn inputs(&self, from: &S, to: &S) -> Option<Vec<I>> {
        let path = self.path(from, to)?;
        path.windows(2)
            .map(|hop| {
                self.labels
                    .get(&(hop[0].clone(), hop[1].clone()))
                    .and_then(|inputs| inputs.first().cloned())
            })
            .collect()
    }

    /// The `(state, input, next)` triples the graph was built from, sorted.
    pub fn triples(&self) -> Vec<TransitionTriple<S, I>> {
        let mut triples: Vec<_> = self
            .labels
            .iter()
            .flat_map(|((state, next), inputs)| {
                inputs.iter().map(move |input| TransitionTriple {
                    state: state.clone(),
                    input: input.clone(),
                    next: next.clone(),
                })
            })
            .collect();
        triples.sort();
        triples
    }
}

/// Build the weighted state graph and its edge-label index.
pub fn state_graph<S, I, E, D>(
    transducer: &Transducer<S, I, E, D>,
    weighting: EdgeWeighting,
) -> (Graph<S>, EdgeLabels<S, I>)
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    let mut graph = Graph::new();
    let mut labels: EdgeLabels<S, I> = BTreeMap::new();
    let mut counter: Weight = 0;

    let triples = transducer.triples();
    for triple in &triples {
        graph.add_vertex(triple.state.clone());
    }

    for triple in triples {
        let pair = (triple.state.clone(), triple.next.clone());
        if !labels.contains_key(&pair) {
            counter += 1;
            let weight = match weighting {
                EdgeWeighting::DiscoveryOrder => counter,
                EdgeWeighting::Uniform => 1,
            };
            graph.add_edge(triple.state, triple.next, weight);
        }
        labels.entry(pair).or_default().push(triple.input);
    }

    (graph, labels)
}

/// All-pairs shortest paths with the default discovery-order weighting.
pub fn shortest_paths<S, I, E, D>(transducer: &Transducer<S, I, E, D>) -> ShortestPathReport<S, I>
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    shortest_paths_with(transducer, &PathOptions::default())
}

/// All-pairs shortest paths over the transducer's state graph.
pub fn shortest_paths_with<S, I, E, D>(
    transducer: &Transducer<S, I, E, D>,
    options: &PathOptions,
) -> ShortestPathReport<S, I>
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    let (graph, labels) = state_graph(transducer, options.weighting);
    let analysis = graph.shortest_paths();
    let paths = analysis.all_paths();

    debug!(
        transducer = transducer.name(),
        states = graph.vertex_count(),
        edges = graph.edge_count(),
        paths = paths.len(),
        "computed shortest paths"
    );

    ShortestPathReport {
        paths,
        labels,
        analysis,
    }
}
