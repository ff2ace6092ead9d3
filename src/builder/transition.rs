//! Builder for a single transition row.

use crate::builder::error::BuildViolation;
use crate::core::{ChildAction, ConfigData, Configuration, State, Symbol};

/// Builder describing the row for one `(state, input)` pair.
///
/// Problems found while describing the row (for example a spawn
/// configuration that cannot be encoded) are kept and reported together
/// with every other violation when the transducer is built.
pub struct TransitionBuilder<S: State, I: Symbol, E: Symbol> {
    pub(crate) state: S,
    pub(crate) input: I,
    pub(crate) target: Option<S>,
    pub(crate) effects: Vec<E>,
    pub(crate) children: Vec<ChildAction>,
    pub(crate) completions: Vec<(String, String)>,
    pub(crate) problems: Vec<BuildViolation>,
}

impl<S: State, I: Symbol, E: Symbol> TransitionBuilder<S, I, E> {
    /// Describe the row taken when `input` arrives in `state`.
    pub fn on(state: S, input: I) -> Self {
        Self {
            state,
            input,
            target: None,
            effects: Vec::new(),
            children: Vec::new(),
            completions: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Append an effect.
    pub fn effect(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Append several effects in order.
    pub fn effects<It>(mut self, effects: It) -> Self
    where
        It: IntoIterator<Item = E>,
    {
        self.effects.extend(effects);
        self
    }

    /// Instantiate `child` with `initial`, replacing any existing configuration.
    pub fn spawn<CS, CD>(mut self, child: &str, initial: &Configuration<CS, CD>) -> Self
    where
        CS: State,
        CD: ConfigData,
    {
        match serde_json::to_value(initial) {
            Ok(initial) => self.children.push(ChildAction::Spawn {
                child: child.to_string(),
                initial,
            }),
            Err(error) => self.problems.push(BuildViolation::ChildEncoding {
                child: child.to_string(),
                message: error.to_string(),
            }),
        }
        self
    }

    /// Route the input into `child`; the target is reached unconditionally.
    pub fn route(mut self, child: &str) -> Self {
        self.children.push(ChildAction::Route {
            child: child.to_string(),
            complete_on: None,
        });
        self
    }

    /// Route the input into `child`; the target is reached only once the
    /// child lands in `done`, otherwise the parent stays where it was.
    pub fn route_until<CS: State>(mut self, child: &str, done: CS) -> Self {
        let done = done.name().to_string();
        self.completions.push((child.to_string(), done.clone()));
        self.children.push(ChildAction::Route {
            child: child.to_string(),
            complete_on: Some(done),
        });
        self
    }

    /// Drop the configuration of `child`.
    pub fn despawn(mut self, child: &str) -> Self {
        self.children.push(ChildAction::Despawn {
            child: child.to_string(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_enum;

    symbol_enum! {
        enum Phase {
            Invalid,
            Start,
            End,
        }
        invalid: Invalid
    }

    symbol_enum! {
        enum Go {
            Now,
        }
    }

    symbol_enum! {
        enum Fx {
            Log,
            Beep,
        }
    }

    #[test]
    fn on_starts_without_target() {
        let row: TransitionBuilder<Phase, Go, Fx> = TransitionBuilder::on(Phase::Start, Go::Now);
        assert_eq!(row.state, Phase::Start);
        assert!(row.target.is_none());
        assert!(row.effects.is_empty());
    }

    #[test]
    fn fluent_api_collects_effects_in_order() {
        let row: TransitionBuilder<Phase, Go, Fx> = TransitionBuilder::on(Phase::Start, Go::Now)
            .to(Phase::End)
            .effect(Fx::Beep)
            .effects([Fx::Log, Fx::Beep]);

        assert_eq!(row.target, Some(Phase::End));
        assert_eq!(row.effects, vec![Fx::Beep, Fx::Log, Fx::Beep]);
    }

    #[test]
    fn child_actions_keep_declaration_order() {
        let row: TransitionBuilder<Phase, Go, Fx> = TransitionBuilder::on(Phase::Start, Go::Now)
            .to(Phase::End)
            .spawn("inner", &Configuration::<Phase>::new(Phase::Start))
            .route_until("inner", Phase::End)
            .despawn("inner");

        assert!(matches!(row.children[0], ChildAction::Spawn { .. }));
        assert_eq!(
            row.children[1],
            ChildAction::Route {
                child: "inner".to_string(),
                complete_on: Some("End".to_string()),
            }
        );
        assert!(matches!(row.children[2], ChildAction::Despawn { .. }));
        assert_eq!(
            row.completions,
            vec![("inner".to_string(), "End".to_string())]
        );
        assert!(row.problems.is_empty());
    }
}
