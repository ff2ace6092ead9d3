//! Running machine instances.
//!
//! A session owns one running configuration against a shared, read-only
//! transducer. Each input replaces the configuration wholesale and hands
//! the resulting effects back to the caller, who is the only one that ever
//! performs them. Any number of sessions may run against one transducer.

mod history;

pub use history::{History, Step};

use crate::core::{ConfigData, Configuration, State, Symbol, Transducer};
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// One running instance of a transducer.
///
/// # Example
///
/// ```rust
/// use modal_transducer::builder::TransitionBuilder;
/// use modal_transducer::core::{Configuration, Transducer};
/// use modal_transducer::session::Session;
/// use modal_transducer::symbol_enum;
///
/// symbol_enum! {
///     enum Light {
///         Invalid,
///         Green,
///         Yellow,
///         Red,
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
/// let light: Transducer<Light, Input, Effect> = Transducer::builder("light")
///     .transitions([
///         TransitionBuilder::on(Light::Green, Input::Timer)
///             .to(Light::Yellow)
///             .effect(Effect::UpdateLightColor),
///         TransitionBuilder::on(Light::Yellow, Input::Timer)
///             .to(Light::Red)
///             .effect(Effect::UpdateLightColor),
///     ])
///     .build()
///     .unwrap();
///
/// let mut session = Session::new(&light, Configuration::new(Light::Green));
/// let effects = session.feed_all([Input::Timer, Input::Timer, Input::Timer]);
///
/// assert_eq!(session.state(), &Light::Red);
/// assert_eq!(effects.len(), 2);
/// assert_eq!(session.history().len(), 2);
/// ```
pub struct Session<'a, S: State, I: Symbol, E: Symbol, D: ConfigData = ()> {
    id: Uuid,
    started_at: DateTime<Utc>,
    transducer: &'a Transducer<S, I, E, D>,
    config: Configuration<S, D>,
    history: History<S, I, E>,
}

impl<'a, S: State, I: Symbol, E: Symbol, D: ConfigData> Session<'a, S, I, E, D> {
    /// Start a session at `initial`.
    pub fn new(transducer: &'a Transducer<S, I, E, D>, initial: Configuration<S, D>) -> Self {
        let id = Uuid::new_v4();
        debug!(
            session = %id,
            transducer = transducer.name(),
            state = initial.state.name(),
            "session started"
        );
        Self {
            id,
            started_at: Utc::now(),
            transducer,
            config: initial,
            history: History::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn transducer(&self) -> &'a Transducer<S, I, E, D> {
        self.transducer
    }

    pub fn config(&self) -> &Configuration<S, D> {
        &self.config
    }

    pub fn state(&self) -> &S {
        &self.config.state
    }

    pub fn history(&self) -> &History<S, I, E> {
        &self.history
    }

    /// Feed one input and return the effects the caller must perform.
    ///
    /// Identity transitions leave the configuration as it was and are not
    /// recorded in the history.
    pub fn feed(&mut self, input: I) -> Vec<E> {
        let defined = self
            .transducer
            .lookup(&self.config.state, &input)
            .is_some();
        let (config, effects) = self.transducer.transduce(&self.config, &input).into_parts();

        if defined {
            debug!(
                session = %self.id,
                from = self.config.state.name(),
                to = config.state.name(),
                effects = effects.len(),
                "session step"
            );
            self.history = self.history.record(Step {
                from: self.config.state.clone(),
                to: config.state.clone(),
                input,
                effects: effects.clone(),
                timestamp: Utc::now(),
            });
        }

        self.config = config;
        effects
    }

    /// Feed inputs in order and return all effects, concatenated.
    pub fn feed_all<It>(&mut self, inputs: It) -> Vec<E>
    where
        It: IntoIterator<Item = I>,
    {
        inputs
            .into_iter()
            .flat_map(|input| self.feed(input))
            .collect()
    }

    /// End the session, keeping its final configuration.
    pub fn into_config(self) -> Configuration<S, D> {
        self.config
    }
}
