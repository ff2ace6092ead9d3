//! Build errors for transducers and their transition rows.

use thiserror::Error;

/// A single defect found while validating a transducer definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildViolation {
    #[error("Transducer name '{name}' must be a SQL identifier: [A-Za-z_][A-Za-z0-9_]*")]
    InvalidName { name: String },

    #[error("Transition ({state}, {input}) is registered more than once")]
    DuplicateTransition { state: String, input: String },

    #[error("Transition ({state}, {input}) has no target. Call .to(state)")]
    MissingTarget { state: String, input: String },

    #[error("Transition ({state}, {input}) uses the Invalid placeholder as source or target")]
    InvalidState { state: String, input: String },

    #[error("Child '{child}' is registered more than once")]
    DuplicateChild { child: String },

    #[error("Transition ({state}, {input}) refers to unregistered child '{child}'")]
    UnknownChild {
        child: String,
        state: String,
        input: String,
    },

    #[error("Transition ({state}, {input}) spawns '{child}' with a foreign configuration")]
    ChildConfigMismatch {
        child: String,
        state: String,
        input: String,
    },

    #[error("Child '{child}' has no state named '{child_state}'")]
    UnknownChildState { child: String, child_state: String },

    #[error("Initial configuration for child '{child}' could not be encoded: {message}")]
    ChildEncoding { child: String, message: String },
}

/// Errors that can occur when building a transducer.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every violation found in the definition, in discovery order
    #[error("Transducer '{name}' rejected with {} violation(s)", .violations.len())]
    Rejected {
        name: String,
        violations: Vec<BuildViolation>,
    },
}

impl BuildError {
    pub fn violations(&self) -> &[BuildViolation] {
        match self {
            Self::Rejected { violations, .. } => violations,
        }
    }
}
