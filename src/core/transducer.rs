//! The transducer: a named, immutable transition table plus its children.

use super::config::{decode, encode, ConfigData, Configuration};
use super::error::ConfigError;
use super::outputs::Outputs;
use super::symbol::{State, Symbol};
use super::transition::{ChildAction, Transition, TransitionTable, TransitionTriple};
use crate::builder::TransducerBuilder;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Result of one step of a child machine, in encoded form.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStep<E> {
    /// The child's new configuration, encoded
    pub config: Value,
    /// Name of the state the child landed in
    pub state: String,
    /// Effects the child emitted, in order
    pub effects: Vec<E>,
}

/// A transducer seen from its parent.
///
/// Parents and children share the input and effect alphabets but each child
/// has its own state and payload types, so the parent drives it through its
/// encoded configuration.
pub trait ChildTransducer<I: Symbol, E: Symbol>: Send + Sync {
    /// The name the child's configuration is stored under.
    fn name(&self) -> &str;

    /// Decode `config`, transduce `input` and re-encode the result.
    fn transduce_encoded(&self, config: &Value, input: &I) -> Result<ChildStep<E>, ConfigError>;

    /// Check if `state` names a state that appears in the child's table.
    fn has_state(&self, state: &str) -> bool;

    /// Check if `config` decodes as one of this child's configurations.
    fn accepts(&self, config: &Value) -> bool;
}

/// A named hierarchical finite-state transducer.
///
/// Built once through [`Transducer::builder`] and read-only afterwards, so a
/// single transducer can serve any number of independent configurations
/// concurrently.
///
/// # Example
///
/// ```rust
/// use modal_transducer::builder::TransitionBuilder;
/// use modal_transducer::core::{Configuration, Transducer};
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
///         Button,
///     }
/// }
///
/// symbol_enum! {
///     enum Effect {
///         UpdateLightColor,
///     }
/// }
///
/// let light: Transducer<Light, Input, Effect> = Transducer::builder("light")
///     .transition(
///         TransitionBuilder::on(Light::Green, Input::Timer)
///             .to(Light::Yellow)
///             .effect(Effect::UpdateLightColor),
///     )
///     .build()
///     .unwrap();
///
/// let outputs = light.transduce(&Configuration::new(Light::Green), &Input::Timer);
/// assert_eq!(outputs.config.state, Light::Yellow);
/// assert_eq!(outputs.effects, vec![Effect::UpdateLightColor]);
///
/// // Unknown inputs are an identity transition, not an error.
/// let ignored = light.transduce(&Configuration::new(Light::Green), &Input::Button);
/// assert_eq!(ignored.config.state, Light::Green);
/// assert!(ignored.effects.is_empty());
/// ```
pub struct Transducer<S: State, I: Symbol, E: Symbol, D: ConfigData = ()> {
    name: String,
    table: TransitionTable<S, I, E>,
    children: BTreeMap<String, Arc<dyn ChildTransducer<I, E>>>,
    _data: PhantomData<fn() -> D>,
}

impl<S: State, I: Symbol, E: Symbol, D: ConfigData> Transducer<S, I, E, D> {
    /// Start building a transducer called `name`.
    pub fn builder(name: impl Into<String>) -> TransducerBuilder<S, I, E, D> {
        TransducerBuilder::new(name)
    }

    /// Assemble an already validated definition.
    pub(crate) fn from_parts(
        name: String,
        table: TransitionTable<S, I, E>,
        children: BTreeMap<String, Arc<dyn ChildTransducer<I, E>>>,
    ) -> Self {
        Self {
            name,
            table,
            children,
            _data: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &TransitionTable<S, I, E> {
        &self.table
    }

    /// The row registered for `(state, input)`, if any.
    pub fn lookup(&self, state: &S, input: &I) -> Option<&Transition<S, E>> {
        self.table.get(state, input)
    }

    /// The registered child called `name`.
    pub fn child(&self, name: &str) -> Option<&dyn ChildTransducer<I, E>> {
        self.children.get(name).map(|child| child.as_ref())
    }

    /// Names of all registered children, sorted.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Every `(state, input, next)` edge of the table, in key order.
    pub fn triples(&self) -> Vec<TransitionTriple<S, I>> {
        self.table.triples()
    }

    /// Compute the next configuration and effects for `input`.
    ///
    /// When no row matches `(config.state, input)` the result is the
    /// identity: `config` unchanged and no effects. Nothing is executed and
    /// `config` itself is never modified.
    pub fn transduce(&self, config: &Configuration<S, D>, input: &I) -> Outputs<S, E, D> {
        let Some(transition) = self.table.get(&config.state, input) else {
            trace!(
                transducer = %self.name,
                state = config.state.name(),
                input = input.name(),
                "no transition, identity"
            );
            return Outputs::identity(config.clone());
        };

        debug!(
            transducer = %self.name,
            from = config.state.name(),
            input = input.name(),
            to = transition.target.name(),
            "transition"
        );
        self.apply(config, input, transition)
    }

    fn apply(
        &self,
        config: &Configuration<S, D>,
        input: &I,
        transition: &Transition<S, E>,
    ) -> Outputs<S, E, D> {
        let mut outputs = Outputs::identity(config.clone())
            .set_state(transition.target.clone())
            .add_effects(transition.effects.iter().cloned());

        for action in &transition.children {
            outputs = match action {
                ChildAction::Spawn { child, initial } => {
                    outputs
                        .config
                        .metadata
                        .child_configs
                        .insert(child.clone(), initial.clone());
                    outputs
                }
                ChildAction::Despawn { child } => {
                    outputs.config.metadata.child_configs.remove(child);
                    outputs
                }
                ChildAction::Route { child, complete_on } => {
                    let Some(machine) = self.children.get(child) else {
                        warn!(
                            transducer = %self.name,
                            child = %child,
                            "route to unregistered child"
                        );
                        continue;
                    };
                    let (routed, landed) = outputs.route_child(machine.as_ref(), input);
                    debug!(
                        transducer = %self.name,
                        child = %child,
                        landed = landed.as_deref().unwrap_or("-"),
                        "routed input to child"
                    );
                    match complete_on {
                        Some(done) if landed.as_deref() != Some(done.as_str()) => {
                            routed.set_state(config.state.clone())
                        }
                        _ => routed,
                    }
                }
            };
        }

        outputs
    }
}

impl<S, I, E, D> ChildTransducer<I, E> for Transducer<S, I, E, D>
where
    S: State,
    I: Symbol,
    E: Symbol,
    D: ConfigData,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transduce_encoded(&self, config: &Value, input: &I) -> Result<ChildStep<E>, ConfigError> {
        let config: Configuration<S, D> = decode(&self.name, config)?;
        let outputs = self.transduce(&config, input);
        let state = outputs.config.state.name().to_string();
        let (config, effects) = outputs.into_parts();

        Ok(ChildStep {
            config: encode(&self.name, &config)?,
            state,
            effects,
        })
    }

    fn has_state(&self, state: &str) -> bool {
        self.table.states().iter().any(|known| known.name() == state)
    }

    fn accepts(&self, config: &Value) -> bool {
        decode::<S, D>(&self.name, config).is_ok()
    }
}

impl<S: State, I: Symbol, E: Symbol, D: ConfigData> fmt::Debug for Transducer<S, I, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transducer")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .finish()
    }
}
