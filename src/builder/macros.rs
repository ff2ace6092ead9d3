//! Macros for ergonomic alphabet declaration.

/// Declare a symbol enum and implement [`Symbol`](crate::core::Symbol) for it.
///
/// Adding an `invalid: Variant` clause also implements
/// [`State`](crate::core::State), naming the placeholder variant.
///
/// # Example
///
/// ```
/// use modal_transducer::core::{State, Symbol};
/// use modal_transducer::symbol_enum;
///
/// symbol_enum! {
///     pub enum Light {
///         Invalid,
///         Green,
///         Yellow,
///         Red,
///     }
///     invalid: Invalid
/// }
///
/// symbol_enum! {
///     pub enum Tick {
///         Timer,
///     }
/// }
///
/// assert_eq!(Light::Yellow.name(), "Yellow");
/// assert!(Light::invalid().is_invalid());
/// assert_eq!(Tick::Timer.name(), "Timer");
/// ```
#[macro_export]
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(invalid: $invalid:ident)?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
            serde::Serialize, serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        $(
            impl $crate::core::State for $name {
                fn invalid() -> Self {
                    Self::$invalid
                }
            }
        )?
    };
}
