//! Builder for constructing transducers.

use crate::builder::error::{BuildError, BuildViolation};
use crate::builder::transition::TransitionBuilder;
use crate::core::{
    ChildAction, ChildTransducer, ConfigData, State, StateInputTuple, Symbol, TableError,
    Transducer, Transition, TransitionTable,
};
use crate::generate::is_sql_identifier;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

type Check = Validation<(), NonEmptyVec<BuildViolation>>;

/// Builder for constructing transducers with a fluent API.
///
/// Nothing is checked until [`build`](Self::build), which reports every
/// violation in the definition at once rather than stopping at the first.
pub struct TransducerBuilder<S: State, I: Symbol, E: Symbol, D: ConfigData = ()> {
    name: String,
    rows: Vec<TransitionBuilder<S, I, E>>,
    children: Vec<Arc<dyn ChildTransducer<I, E>>>,
    _phantom: PhantomData<fn() -> D>,
}

impl<S: State, I: Symbol, E: Symbol, D: ConfigData> TransducerBuilder<S, I, E, D> {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            children: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add a transition row.
    pub fn transition(mut self, row: TransitionBuilder<S, I, E>) -> Self {
        self.rows.push(row);
        self
    }

    /// Add multiple transition rows at once.
    pub fn transitions<It>(mut self, rows: It) -> Self
    where
        It: IntoIterator<Item = TransitionBuilder<S, I, E>>,
    {
        self.rows.extend(rows);
        self
    }

    /// Register a child transducer under its own name.
    pub fn child<CS, CD>(self, child: Transducer<CS, I, E, CD>) -> Self
    where
        CS: State,
        CD: ConfigData,
    {
        self.shared_child(Arc::new(child))
    }

    /// Register a child definition that is shared with other parents.
    pub fn shared_child(mut self, child: Arc<dyn ChildTransducer<I, E>>) -> Self {
        self.children.push(child);
        self
    }

    /// Validate the definition and build the transducer.
    pub fn build(self) -> Result<Transducer<S, I, E, D>, BuildError> {
        let mut checks: Vec<Check> = vec![check_name(&self.name)];

        let mut children: BTreeMap<String, Arc<dyn ChildTransducer<I, E>>> = BTreeMap::new();
        for child in self.children {
            let name = child.name().to_string();
            if children.contains_key(&name) {
                checks.push(Validation::fail(BuildViolation::DuplicateChild { child: name }));
            } else {
                children.insert(name, child);
            }
        }

        let mut table = TransitionTable::new();
        for row in self.rows {
            let state = row.state.name().to_string();
            let input = row.input.name().to_string();

            checks.extend(row.problems.into_iter().map(Validation::fail));

            for action in &row.children {
                match (children.get(action.child()), action) {
                    (None, _) => checks.push(Validation::fail(BuildViolation::UnknownChild {
                        child: action.child().to_string(),
                        state: state.clone(),
                        input: input.clone(),
                    })),
                    (Some(machine), ChildAction::Spawn { child, initial })
                        if !machine.accepts(initial) =>
                    {
                        checks.push(Validation::fail(BuildViolation::ChildConfigMismatch {
                            child: child.clone(),
                            state: state.clone(),
                            input: input.clone(),
                        }));
                    }
                    _ => {}
                }
            }

            for (child, child_state) in row.completions {
                let known = children
                    .get(&child)
                    .map_or(true, |machine| machine.has_state(&child_state));
                if !known {
                    checks.push(Validation::fail(BuildViolation::UnknownChildState {
                        child,
                        child_state,
                    }));
                }
            }

            let Some(target) = row.target else {
                checks.push(Validation::fail(BuildViolation::MissingTarget { state, input }));
                continue;
            };

            if row.state.is_invalid() || target.is_invalid() {
                checks.push(Validation::fail(BuildViolation::InvalidState { state, input }));
                continue;
            }

            let transition = Transition {
                target,
                effects: row.effects,
                children: row.children,
            };
            if let Err(TableError::DuplicateKey { state, input }) =
                table.insert(StateInputTuple::new(row.state, row.input), transition)
            {
                checks.push(Validation::fail(BuildViolation::DuplicateTransition {
                    state,
                    input,
                }));
            }
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => {
                debug!(
                    transducer = %self.name,
                    rows = table.len(),
                    children = children.len(),
                    "transducer built"
                );
                Ok(Transducer::from_parts(self.name, table, children))
            }
            Validation::Failure(errors) => Err(BuildError::Rejected {
                name: self.name,
                violations: errors.iter().cloned().collect(),
            }),
        }
    }
}

fn check_name(name: &str) -> Check {
    if is_sql_identifier(name) {
        Validation::success(())
    } else {
        Validation::fail(BuildViolation::InvalidName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Configuration;
    use crate::symbol_enum;

    symbol_enum! {
        enum Light {
            Invalid,
            Green,
            Yellow,
            Red,
        }
        invalid: Invalid
    }

    symbol_enum! {
        enum Walk {
            Invalid,
            Stop,
            Go,
        }
        invalid: Invalid
    }

    symbol_enum! {
        enum Input {
            Timer,
            Button,
        }
    }

    symbol_enum! {
        enum Effect {
            UpdateLightColor,
        }
    }

    fn walk() -> Transducer<Walk, Input, Effect> {
        Transducer::builder("walk")
            .transition(TransitionBuilder::on(Walk::Stop, Input::Button).to(Walk::Go))
            .build()
            .unwrap()
    }

    #[test]
    fn builds_valid_definition() {
        let light: Transducer<Light, Input, Effect> = Transducer::builder("light")
            .transitions([
                TransitionBuilder::on(Light::Green, Input::Timer).to(Light::Yellow),
                TransitionBuilder::on(Light::Yellow, Input::Timer).to(Light::Red),
                TransitionBuilder::on(Light::Red, Input::Timer)
                    .to(Light::Green)
                    .effect(Effect::UpdateLightColor),
            ])
            .build()
            .unwrap();

        assert_eq!(light.name(), "light");
        assert_eq!(light.table().len(), 3);
    }

    #[test]
    fn duplicate_transition_fails_fast() {
        let result: Result<Transducer<Light, Input, Effect>, _> = Transducer::builder("light")
            .transition(TransitionBuilder::on(Light::Green, Input::Timer).to(Light::Yellow))
            .transition(TransitionBuilder::on(Light::Green, Input::Timer).to(Light::Red))
            .build();

        let error = result.unwrap_err();
        assert_eq!(
            error.violations(),
            &[BuildViolation::DuplicateTransition {
                state: "Green".to_string(),
                input: "Timer".to_string(),
            }]
        );
    }

    #[test]
    fn build_accumulates_all_violations() {
        let result: Result<Transducer<Light, Input, Effect>, _> = Transducer::builder("bad name")
            .transition(TransitionBuilder::on(Light::Green, Input::Timer))
            .transition(TransitionBuilder::on(Light::Invalid, Input::Timer).to(Light::Red))
            .transition(
                TransitionBuilder::on(Light::Red, Input::Button)
                    .to(Light::Green)
                    .route("walk"),
            )
            .build();

        let error = result.unwrap_err();
        let violations = error.violations();
        assert_eq!(violations.len(), 4);
        assert!(violations
            .iter()
            .any(|v| matches!(v, BuildViolation::InvalidName { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, BuildViolation::MissingTarget { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, BuildViolation::InvalidState { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, BuildViolation::UnknownChild { .. })));
        assert!(error.to_string().contains("4 violation(s)"));
    }

    #[test]
    fn duplicate_child_is_rejected() {
        let result: Result<Transducer<Light, Input, Effect>, _> = Transducer::builder("light")
            .child(walk())
            .child(walk())
            .build();

        assert!(matches!(
            result.unwrap_err().violations(),
            [BuildViolation::DuplicateChild { .. }]
        ));
    }

    #[test]
    fn completion_state_must_exist_in_child() {
        let result: Result<Transducer<Light, Input, Effect>, _> = Transducer::builder("light")
            .child(walk())
            .transition(
                TransitionBuilder::on(Light::Red, Input::Button)
                    .to(Light::Green)
                    .spawn("walk", &Configuration::<Walk>::new(Walk::Stop))
                    .route_until("walk", Light::Yellow),
            )
            .build();

        assert_eq!(
            result.unwrap_err().violations(),
            &[BuildViolation::UnknownChildState {
                child: "walk".to_string(),
                child_state: "Yellow".to_string(),
            }]
        );
    }

    #[test]
    fn spawned_configuration_must_belong_to_child() {
        let result: Result<Transducer<Light, Input, Effect>, _> = Transducer::builder("light")
            .child(walk())
            .transition(
                TransitionBuilder::on(Light::Red, Input::Button)
                    .to(Light::Green)
                    .spawn("walk", &Configuration::<Light>::new(Light::Green))
                    .route_until("walk", Walk::Go),
            )
            .build();

        assert_eq!(
            result.unwrap_err().violations(),
            &[BuildViolation::ChildConfigMismatch {
                child: "walk".to_string(),
                state: "Red".to_string(),
                input: "Button".to_string(),
            }]
        );
    }

    #[test]
    fn spawned_configuration_of_child_type_is_accepted() {
        let result: Result<Transducer<Light, Input, Effect>, _> = Transducer::builder("light")
            .child(walk())
            .transition(
                TransitionBuilder::on(Light::Red, Input::Button)
                    .to(Light::Green)
                    .spawn("walk", &Configuration::<Walk>::new(Walk::Stop))
                    .route_until("walk", Walk::Go),
            )
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn name_must_not_start_with_digit() {
        let result: Result<Transducer<Light, Input, Effect>, _> =
            Transducer::builder("9lives").build();

        assert_eq!(
            result.unwrap_err().violations(),
            &[BuildViolation::InvalidName {
                name: "9lives".to_string(),
            }]
        );
    }

    #[test]
    fn name_may_start_with_underscore() {
        let result: Result<Transducer<Light, Input, Effect>, _> =
            Transducer::builder("_lives9").build();
        assert!(result.is_ok());
    }

    #[test]
    fn empty_definition_is_allowed() {
        let result: Result<Transducer<Light, Input, Effect>, _> =
            Transducer::builder("idle").build();
        assert!(result.is_ok());
    }
}
