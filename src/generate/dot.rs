//! Graphviz DOT generator.

use crate::core::{ConfigData, State, Symbol, Transducer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Graph layout direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    TopBottom,
    #[default]
    LeftRight,
}

impl RankDir {
    fn as_dot(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
        }
    }
}

/// Rendering options for the generated digraph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotOptions {
    pub rank_dir: RankDir,
    /// Name of the initial state; when set, an entry arrow points at it
    pub initial: Option<String>,
}

/// Render the transition table as a DOT digraph with default options.
///
/// One edge statement is emitted per row, labelled with its input. Self
/// loops and parallel edges with different labels are all kept.
pub fn to_digraph<S, I, E, D>(transducer: &Transducer<S, I, E, D>) -> String
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    to_digraph_with(transducer, &DotOptions::default())
}

/// Render the transition table as a DOT digraph.
pub fn to_digraph_with<S, I, E, D>(
    transducer: &Transducer<S, I, E, D>,
    options: &DotOptions,
) -> String
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    let triples = transducer.triples();
    debug!(
        transducer = transducer.name(),
        edges = triples.len(),
        "generating digraph"
    );

    let mut dot = format!("digraph {} {{\n", quote(transducer.name()));
    dot.push_str(&format!("    rankdir={};\n", options.rank_dir.as_dot()));

    if let Some(initial) = &options.initial {
        dot.push_str("    __start [shape=point];\n");
        dot.push_str(&format!("    __start -> {};\n", quote(initial)));
    }

    for triple in &triples {
        dot.push_str(&format!(
            "    {} -> {} [label={}];\n",
            quote(triple.state.name()),
            quote(triple.next.name()),
            quote(triple.input.name())
        ));
    }

    dot.push_str("}\n");
    dot
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
