//! Builder API for ergonomic transducer construction.
//!
//! This module provides fluent builders and the `symbol_enum!` macro for
//! declaring alphabets and transition tables with minimal boilerplate.
//! Definitions are validated as a whole when built.

pub mod error;
pub mod macros;
pub mod transducer;
pub mod transition;

pub use error::{BuildError, BuildViolation};
pub use transducer::TransducerBuilder;
pub use transition::TransitionBuilder;
