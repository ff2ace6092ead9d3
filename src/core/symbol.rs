//! Symbol traits for states, inputs and effects.
//!
//! A transducer only ever compares, orders and names its symbols. It never
//! looks inside them, so all three alphabets share the `Symbol` trait and
//! states add the distinguished `Invalid` placeholder on top.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// An opaque, comparable symbol drawn from a closed alphabet.
///
/// # Required Traits
///
/// - `Ord` + `Hash`: symbols key the transition table and are sorted before
///   any artifact is generated
/// - `Serialize` + `Deserialize`: configurations carrying symbols are encoded
///   when nested inside a parent configuration
/// - `Send` + `Sync`: transducers are shared read-only across sessions
///
/// # Example
///
/// ```rust
/// use modal_transducer::core::Symbol;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
/// enum Input {
///     Timer,
///     Button,
/// }
///
/// impl Symbol for Input {
///     fn name(&self) -> &str {
///         match self {
///             Self::Timer => "Timer",
///             Self::Button => "Button",
///         }
///     }
/// }
///
/// assert_eq!(Input::Button.name(), "Button");
/// ```
pub trait Symbol:
    Clone + Eq + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The symbol's name as it appears in generated SQL and DOT output.
    fn name(&self) -> &str;
}

/// A machine position.
///
/// Every state alphabet carries an `Invalid` member that stands for "no
/// state". It is the default of an uninitialised configuration and is never
/// the source or target of a table row.
///
/// # Example
///
/// ```rust
/// use modal_transducer::core::{State, Symbol};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Invalid,
///     Open,
///     Closed,
/// }
///
/// impl Symbol for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Invalid => "Invalid",
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// impl State for Door {
///     fn invalid() -> Self {
///         Self::Invalid
///     }
/// }
///
/// assert!(Door::Invalid.is_invalid());
/// assert!(!Door::Open.is_invalid());
/// ```
pub trait State: Symbol {
    /// The placeholder state of an uninitialised configuration.
    fn invalid() -> Self;

    /// Check if this is the `Invalid` placeholder.
    fn is_invalid(&self) -> bool {
        *self == Self::invalid()
    }
}
