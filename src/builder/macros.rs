//! Macros for declaring state enums.

/// Generate a unit enum implementing [`State`](crate::core::State).
///
/// A variant may carry an explicit label, used both as its `name()` and as
/// its serialized form. Unlabeled variants use the variant identifier.
///
/// # Example
///
/// ```
/// use turnstile::core::State;
/// use turnstile::state_enum;
///
/// state_enum! {
///     pub enum CarState {
///         Parked = "parked",
///         EngineStarted = "engine_started",
///         Idle,
///     }
/// }
///
/// assert_eq!(CarState::EngineStarted.name(), "engine_started");
/// assert_eq!(CarState::Idle.name(), "Idle");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $(#[serde(rename = $label)])?
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__state_label!($variant $(, $label)?)),*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_label {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}
