//! Static artifacts derived from a transducer's transition table.
//!
//! Every generator reads the same `(state, input, next)` triples, taken from
//! the table in key order, so repeated generation from an unchanged
//! transducer produces identical output. No generator calls `transduce`.

mod dot;
mod paths;
mod sql;

pub use dot::{to_digraph, to_digraph_with, DotOptions, RankDir};
pub use paths::{
    shortest_paths, shortest_paths_with, state_graph, EdgeLabels, EdgeWeighting, PathOptions,
    ShortestPathReport,
};
pub use sql::{is_sql_identifier, to_sql, to_sql_with, SqlArtifact, SqlError, SqlOptions};
