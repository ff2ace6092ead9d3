//! Runtime configuration of one machine instance.
//!
//! A configuration is replaced wholesale on every transition, never mutated in
//! place by the engine. Child configurations live in the parent's metadata,
//! encoded as JSON values because each child has its own state alphabet.

use super::error::ConfigError;
use super::symbol::State;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Opaque extended-data payload carried alongside the state.
///
/// The engine never inspects the payload; it is copied unchanged through
/// every transition. `()` is the payload of machines that need none.
pub trait ConfigData:
    Clone + PartialEq + Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> ConfigData for T where
    T: Clone + PartialEq + Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Nested configurations owned by a configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Child configurations keyed by child transducer name. Only children
    /// that are currently instantiated have an entry.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub child_configs: BTreeMap<String, Value>,

    /// Sibling configurations of orthogonal regions, in declaration order.
    /// Carried and encoded, but never transduced by the engine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parallel_configs: Vec<Value>,
}

/// The complete runtime snapshot of one machine instance.
///
/// # Example
///
/// ```rust
/// use modal_transducer::core::Configuration;
/// use modal_transducer::symbol_enum;
///
/// symbol_enum! {
///     enum Light {
///         Invalid,
///         Green,
///         Red,
///     }
///     invalid: Invalid
/// }
///
/// symbol_enum! {
///     enum Walk {
///         Invalid,
///         Stop,
///         Go,
///     }
///     invalid: Invalid
/// }
///
/// let crossing: Configuration<Walk> = Configuration::new(Walk::Stop);
/// let config: Configuration<Light> = Configuration::default()
///     .with_state(Light::Red)
///     .with_child("crossing", &crossing)
///     .unwrap();
///
/// let child = config.child::<Walk, ()>("crossing").unwrap().unwrap();
/// assert_eq!(child.state, Walk::Stop);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Configuration<S: State, D: ConfigData = ()> {
    /// Current machine position
    pub state: S,
    /// Opaque payload, never interpreted by the engine
    #[serde(default)]
    pub data: D,
    /// Child and parallel configurations
    #[serde(default)]
    pub metadata: Metadata,
}

impl<S: State, D: ConfigData> Default for Configuration<S, D> {
    fn default() -> Self {
        Self {
            state: S::invalid(),
            data: D::default(),
            metadata: Metadata::default(),
        }
    }
}

impl<S: State, D: ConfigData> Configuration<S, D> {
    /// Create a configuration positioned at `state` with a default payload.
    pub fn new(state: S) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Replace the state.
    pub fn with_state(mut self, state: S) -> Self {
        self.state = state;
        self
    }

    /// Replace the payload.
    pub fn with_data(mut self, data: D) -> Self {
        self.data = data;
        self
    }

    /// Check whether the configuration is still the uninitialised placeholder.
    pub fn is_initialized(&self) -> bool {
        !self.state.is_invalid()
    }

    /// Instantiate (or replace) the child configuration stored under `name`.
    pub fn with_child<CS, CD>(
        mut self,
        name: &str,
        child: &Configuration<CS, CD>,
    ) -> Result<Self, ConfigError>
    where
        CS: State,
        CD: ConfigData,
    {
        let value = encode(name, child)?;
        self.metadata.child_configs.insert(name.to_string(), value);
        Ok(self)
    }

    /// Remove the child configuration stored under `name`, if any.
    pub fn without_child(mut self, name: &str) -> Self {
        self.metadata.child_configs.remove(name);
        self
    }

    /// Check whether a child named `name` is instantiated.
    pub fn has_child(&self, name: &str) -> bool {
        self.metadata.child_configs.contains_key(name)
    }

    /// Names of all instantiated children, sorted.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.metadata.child_configs.keys().map(String::as_str)
    }

    /// Decode the child configuration stored under `name`.
    ///
    /// Returns `Ok(None)` when the child is not instantiated and an error
    /// when the stored value does not match `Configuration<CS, CD>`.
    pub fn child<CS, CD>(&self, name: &str) -> Result<Option<Configuration<CS, CD>>, ConfigError>
    where
        CS: State,
        CD: ConfigData,
    {
        self.metadata
            .child_configs
            .get(name)
            .map(|value| decode(name, value))
            .transpose()
    }

    /// Append an orthogonal-region sibling configuration.
    pub fn with_parallel<CS, CD>(
        mut self,
        sibling: &Configuration<CS, CD>,
    ) -> Result<Self, ConfigError>
    where
        CS: State,
        CD: ConfigData,
    {
        let slot = format!("parallel[{}]", self.metadata.parallel_configs.len());
        let value = encode(&slot, sibling)?;
        self.metadata.parallel_configs.push(value);
        Ok(self)
    }

    /// Decode the sibling configuration at `index`.
    pub fn parallel<CS, CD>(
        &self,
        index: usize,
    ) -> Result<Option<Configuration<CS, CD>>, ConfigError>
    where
        CS: State,
        CD: ConfigData,
    {
        self.metadata
            .parallel_configs
            .get(index)
            .map(|value| decode(&format!("parallel[{index}]"), value))
            .transpose()
    }
}

pub(crate) fn encode<S, D>(slot: &str, config: &Configuration<S, D>) -> Result<Value, ConfigError>
where
    S: State,
    D: ConfigData,
{
    serde_json::to_value(config).map_err(|source| ConfigError::Encode {
        slot: slot.to_string(),
        source,
    })
}

pub(crate) fn decode<S, D>(slot: &str, value: &Value) -> Result<Configuration<S, D>, ConfigError>
where
    S: State,
    D: ConfigData,
{
    Configuration::deserialize(value).map_err(|source| ConfigError::Decode {
        slot: slot.to_string(),
        source,
    })
}
