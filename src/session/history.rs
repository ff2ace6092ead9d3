//! Step history of a running session.
//!
//! History is immutable: `record` returns a new history with the step added
//! and leaves the original untouched.

use crate::core::{State, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one defined transition taken by a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Step<S: State, I: Symbol, E: Symbol> {
    /// The state before the input arrived
    pub from: S,
    /// The state after the transition
    pub to: S,
    /// The input that triggered the transition
    pub input: I,
    /// Effects emitted, including those of nested children
    pub effects: Vec<E>,
    /// When the transition was taken
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of steps.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use modal_transducer::session::{History, Step};
/// use modal_transducer::symbol_enum;
///
/// symbol_enum! {
///     enum Light {
///         Invalid,
///         Green,
///         Yellow,
///     }
///     invalid: Invalid
/// }
///
/// symbol_enum! {
///     enum Input {
///         Timer,
///     }
/// }
///
/// symbol_enum! {
///     enum Effect {
///         UpdateLightColor,
///     }
/// }
///
/// let history = History::new();
/// let history = history.record(Step {
///     from: Light::Green,
///     to: Light::Yellow,
///     input: Input::Timer,
///     effects: vec![Effect::UpdateLightColor],
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![&Light::Green, &Light::Yellow]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct History<S: State, I: Symbol, E: Symbol> {
    steps: Vec<Step<S, I, E>>,
}

impl<S: State, I: Symbol, E: Symbol> Default for History<S, I, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, I: Symbol, E: Symbol> History<S, I, E> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, returning a new history.
    pub fn record(&self, step: Step<S, I, E>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// The states traversed: the first step's source, then every target.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.steps.first() {
            path.push(&first.from);
        }
        for step in &self.steps {
            path.push(&step.to);
        }
        path
    }

    /// The inputs that drove each step, in order.
    pub fn inputs(&self) -> Vec<&I> {
        self.steps.iter().map(|step| &step.input).collect()
    }

    /// Time between the first and last step, or `None` without steps.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[Step<S, I, E>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
