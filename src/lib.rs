//! Modal Transducer: hierarchical finite-state transducers
//!
//! A transducer maps a configuration and an input symbol to the next
//! configuration plus an ordered list of effects. The engine is a pure core:
//! effects are symbolic descriptions that the embedding application performs,
//! and configurations are replaced, never mutated in place.
//!
//! # Core Concepts
//!
//! - **Symbols**: States, inputs and effects are closed enums (`symbol_enum!`)
//! - **Configuration**: State, opaque payload and nested child configurations
//! - **Transducer**: A named transition table, optionally owning child machines
//! - **Generators**: SQL, DOT and shortest-path artifacts read straight from the table
//!
//! # Example
//!
//! ```rust
//! use modal_transducer::builder::TransitionBuilder;
//! use modal_transducer::core::{Configuration, Transducer};
//! use modal_transducer::generate::{shortest_paths, to_digraph};
//! use modal_transducer::symbol_enum;
//!
//! symbol_enum! {
//!     enum Light {
//!         Invalid,
//!         Green,
//!         Yellow,
//!         Red,
//!     }
//!     invalid: Invalid
//! }
//!
//! symbol_enum! {
//!     enum Input {
//!         Timer,
//!     }
//! }
//!
//! symbol_enum! {
//!     enum Effect {
//!         UpdateLightColor,
//!     }
//! }
//!
//! let light: Transducer<Light, Input, Effect> = Transducer::builder("light")
//!     .transitions([
//!         TransitionBuilder::on(Light::Green, Input::Timer).to(Light::Yellow),
//!         TransitionBuilder::on(Light::Yellow, Input::Timer).to(Light::Red),
//!         TransitionBuilder::on(Light::Red, Input::Timer)
//!             .to(Light::Green)
//!             .effect(Effect::UpdateLightColor),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let outputs = light.transduce(&Configuration::new(Light::Red), &Input::Timer);
//! assert_eq!(outputs.config.state, Light::Green);
//!
//! let paths = shortest_paths(&light);
//! assert_eq!(
//!     paths.path(&Light::Yellow, &Light::Green),
//!     Some(&[Light::Yellow, Light::Red, Light::Green][..])
//! );
//! assert!(to_digraph(&light).contains("\"Red\" -> \"Green\" [label=\"Timer\"];"));
//! ```

pub mod builder;
pub mod core;
pub mod generate;
pub mod graph;
pub mod session;

// Re-export commonly used types
pub use builder::{BuildError, BuildViolation, TransitionBuilder};
pub use core::{Configuration, Outputs, State, Symbol, Transducer};
