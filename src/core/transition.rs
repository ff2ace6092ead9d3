//! Transition rows and the transition table.
//!
//! A row is plain data: the declared target, the effects to emit and the
//! child actions to perform. Generators read the declared target directly
//! and never have to run anything to discover it.

use super::error::TableError;
use super::symbol::{State, Symbol};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Unique key of a transition table row.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateInputTuple<S: State, I: Symbol> {
    pub state: S,
    pub input: I,
}

impl<S: State, I: Symbol> StateInputTuple<S, I> {
    pub fn new(state: S, input: I) -> Self {
        Self { state, input }
    }
}

/// What a row does to a nested child machine, applied in declaration order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChildAction {
    /// Instantiate the child with an encoded initial configuration,
    /// replacing any configuration it already has.
    Spawn { child: String, initial: Value },

    /// Route the current input into the child and merge its outputs.
    ///
    /// With `complete_on` set, the parent only reaches the row's target once
    /// the child lands in the named state; until then the parent stays in
    /// the row's source state.
    Route {
        child: String,
        complete_on: Option<String>,
    },

    /// Drop the child's configuration.
    Despawn { child: String },
}

impl ChildAction {
    /// Name of the child this action refers to.
    pub fn child(&self) -> &str {
        match self {
            Self::Spawn { child, .. } | Self::Route { child, .. } | Self::Despawn { child } => {
                child
            }
        }
    }
}

/// A transition row: declared target state, ordered effects and child actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<S: State, E: Symbol> {
    pub target: S,
    pub effects: Vec<E>,
    pub children: Vec<ChildAction>,
}

impl<S: State, E: Symbol> Transition<S, E> {
    /// A row that moves to `target` and does nothing else.
    pub fn to(target: S) -> Self {
        Self {
            target,
            effects: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an effect.
    pub fn with_effect(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append a child action.
    pub fn with_child_action(mut self, action: ChildAction) -> Self {
        self.children.push(action);
        self
    }
}

/// One `(state, input) -> next state` edge extracted from a table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionTriple<S: State, I: Symbol> {
    pub state: S,
    pub input: I,
    pub next: S,
}

/// Mapping from `(state, input)` to the row that handles it.
///
/// Keys are unique: inserting a key twice is an error rather than a silent
/// overwrite. Iteration is in key order, so everything derived from a table
/// is deterministic.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionTable<S: State, I: Symbol, E: Symbol> {
    rows: BTreeMap<StateInputTuple<S, I>, Transition<S, E>>,
}

impl<S: State, I: Symbol, E: Symbol> Default for TransitionTable<S, I, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, I: Symbol, E: Symbol> TransitionTable<S, I, E> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Register a row, failing if `(state, input)` is already taken.
    pub fn insert(
        &mut self,
        key: StateInputTuple<S, I>,
        transition: Transition<S, E>,
    ) -> Result<(), TableError> {
        if self.rows.contains_key(&key) {
            return Err(TableError::DuplicateKey {
                state: key.state.name().to_string(),
                input: key.input.name().to_string(),
            });
        }
        self.rows.insert(key, transition);
        Ok(())
    }

    /// Look up the row for `(state, input)`.
    pub fn get(&self, state: &S, input: &I) -> Option<&Transition<S, E>> {
        // Borrowed lookups need an owned key; symbols are small enums.
        self.rows
            .get(&StateInputTuple::new(state.clone(), input.clone()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateInputTuple<S, I>, &Transition<S, E>)> {
        self.rows.iter()
    }

    /// The `(state, input, next)` triples of every row, in key order.
    pub fn triples(&self) -> Vec<TransitionTriple<S, I>> {
        self.rows
            .iter()
            .map(|(key, transition)| TransitionTriple {
                state: key.state.clone(),
                input: key.input.clone(),
                next: transition.target.clone(),
            })
            .collect()
    }

    /// Every state that appears as a source or target, sorted and distinct.
    pub fn states(&self) -> Vec<S> {
        let mut states: Vec<S> = self
            .rows
            .iter()
            .flat_map(|(key, transition)| [key.state.clone(), transition.target.clone()])
            .collect();
        states.sort();
        states.dedup();
        states
    }

    /// Every input that appears in a key, sorted and distinct.
    pub fn inputs(&self) -> Vec<I> {
        let mut inputs: Vec<I> = self.rows.keys().map(|key| key.input.clone()).collect();
        inputs.sort();
        inputs.dedup();
        inputs
    }
}
