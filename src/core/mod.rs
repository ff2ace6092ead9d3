//! Core transducer types and logic.
//!
//! This module contains the pure core of the engine:
//! - Symbol alphabets via the `Symbol` and `State` traits
//! - Configurations, including nested child configurations
//! - Outputs and the helpers that fold a child's outputs into a parent's
//! - Transition tables and the `Transducer` itself
//!
//! Nothing in this module performs I/O or executes effects.

mod config;
mod error;
mod outputs;
mod symbol;
mod transducer;
mod transition;

pub use config::{ConfigData, Configuration, Metadata};
pub use error::{ConfigError, TableError};
pub use outputs::Outputs;
pub use symbol::{State, Symbol};
pub use transducer::{ChildStep, ChildTransducer, Transducer};
pub use transition::{ChildAction, StateInputTuple, Transition, TransitionTable, TransitionTriple};
