//! The result of one transition.

use super::config::{ConfigData, Configuration};
use super::symbol::{State, Symbol};
use super::transducer::{ChildStep, ChildTransducer};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Next configuration plus the ordered effects the caller must perform.
///
/// Effects are descriptions only; the engine accumulates them and never
/// executes anything. Their order is preserved through every merge, with a
/// parent's effects always ahead of its child's.
///
/// # Example
///
/// ```rust
/// use modal_transducer::core::Outputs;
/// use modal_transducer::symbol_enum;
///
/// symbol_enum! {
///     enum Light {
///         Invalid,
///         Green,
///     }
///     invalid: Invalid
/// }
///
/// symbol_enum! {
///     enum Effect {
///         UpdateLightColor,
///         Chime,
///     }
/// }
///
/// let outputs: Outputs<Light, Effect> = Outputs::new()
///     .set_state(Light::Green)
///     .add_effect(Effect::UpdateLightColor)
///     .add_effect(Effect::Chime);
///
/// assert_eq!(outputs.config.state, Light::Green);
/// assert_eq!(outputs.effects, vec![Effect::UpdateLightColor, Effect::Chime]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Outputs<S: State, E: Symbol, D: ConfigData = ()> {
    pub config: Configuration<S, D>,
    pub effects: Vec<E>,
}

impl<S: State, E: Symbol, D: ConfigData> Default for Outputs<S, E, D> {
    fn default() -> Self {
        Self {
            config: Configuration::default(),
            effects: Vec::new(),
        }
    }
}

impl<S: State, E: Symbol, D: ConfigData> Outputs<S, E, D> {
    /// Empty outputs around an uninitialised configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The no-op result: `config` unchanged and no effects.
    pub fn identity(config: Configuration<S, D>) -> Self {
        Self {
            config,
            effects: Vec::new(),
        }
    }

    pub fn set_state(mut self, state: S) -> Self {
        self.config.state = state;
        self
    }

    pub fn set_data(mut self, data: D) -> Self {
        self.config.data = data;
        self
    }

    /// Append one effect after those already present.
    pub fn add_effect(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append effects in order after those already present.
    pub fn add_effects<It>(mut self, effects: It) -> Self
    where
        It: IntoIterator<Item = E>,
    {
        self.effects.extend(effects);
        self
    }

    /// Route `input` into `child` and fold its outputs into these.
    ///
    /// The child's configuration is read from this configuration's metadata
    /// under the child's name. When the child is not instantiated the outputs
    /// come back unchanged. Otherwise the child's effects are appended after
    /// the existing ones and its new configuration replaces the stored one;
    /// this configuration's own state is left alone.
    pub fn transduce_child<I: Symbol>(self, child: &dyn ChildTransducer<I, E>, input: &I) -> Self {
        self.route_child(child, input).0
    }

    /// Like [`transduce_child`](Self::transduce_child), also returning the
    /// name of the state the child landed in when it was routed.
    pub(crate) fn route_child<I: Symbol>(
        self,
        child: &dyn ChildTransducer<I, E>,
        input: &I,
    ) -> (Self, Option<String>) {
        let name = child.name();
        let Some(encoded) = self.config.metadata.child_configs.get(name) else {
            trace!(child = name, input = input.name(), "child not instantiated, routing skipped");
            return (self, None);
        };

        match child.transduce_encoded(encoded, input) {
            Ok(step) => {
                let state = step.state.clone();
                (self.merge_child(name, step), Some(state))
            }
            Err(error) => {
                warn!(child = name, %error, "child configuration unreadable, routing skipped");
                (self, None)
            }
        }
    }

    /// Fold a child's step result into these outputs.
    pub fn merge_child(mut self, name: &str, step: ChildStep<E>) -> Self {
        self.effects.extend(step.effects);
        self.config
            .metadata
            .child_configs
            .insert(name.to_string(), step.config);
        self
    }

    pub fn into_parts(self) -> (Configuration<S, D>, Vec<E>) {
        (self.config, self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_enum;
    use serde_json::json;

    symbol_enum! {
        enum Mode {
            Invalid,
            Off,
            On,
        }
        invalid: Invalid
    }

    symbol_enum! {
        enum Fx {
            A,
            B,
            C,
            D,
        }
    }

    #[test]
    fn new_outputs_are_empty() {
        let outputs: Outputs<Mode, Fx> = Outputs::new();
        assert_eq!(outputs.config.state, Mode::Invalid);
        assert!(outputs.effects.is_empty());
    }

    #[test]
    fn identity_keeps_configuration() {
        let config: Configuration<Mode> = Configuration::new(Mode::On);
        let outputs: Outputs<Mode, Fx> = Outputs::identity(config.clone());
        assert_eq!(outputs.config, config);
        assert!(outputs.effects.is_empty());
    }

    #[test]
    fn add_effect_appends_in_order() {
        let outputs: Outputs<Mode, Fx> = Outputs::new()
            .add_effect(Fx::B)
            .add_effect(Fx::A)
            .add_effects([Fx::D, Fx::C]);
        assert_eq!(outputs.effects, vec![Fx::B, Fx::A, Fx::D, Fx::C]);
    }

    #[test]
    fn merge_child_puts_parent_effects_first() {
        let outputs: Outputs<Mode, Fx> = Outputs::new()
            .set_state(Mode::On)
            .add_effect(Fx::A)
            .add_effect(Fx::B);

        let merged = outputs.merge_child(
            "inner",
            ChildStep {
                config: json!({ "state": "Whatever" }),
                state: "Whatever".to_string(),
                effects: vec![Fx::C, Fx::D],
            },
        );

        assert_eq!(merged.effects, vec![Fx::A, Fx::B, Fx::C, Fx::D]);
        assert_eq!(merged.config.state, Mode::On);
        assert_eq!(
            merged.config.metadata.child_configs.get("inner"),
            Some(&json!({ "state": "Whatever" }))
        );
    }

    #[test]
    fn into_parts_splits_configuration_and_effects() {
        let outputs: Outputs<Mode, Fx> = Outputs::new().set_state(Mode::Off).add_effect(Fx::C);
        let (config, effects) = outputs.into_parts();
        assert_eq!(config.state, Mode::Off);
        assert_eq!(effects, vec![Fx::C]);
    }
}
