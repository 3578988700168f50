//! Builder API for ergonomic transition construction.
//!
//! This module provides a fluent builder and the `state_enum!` macro for
//! declaring transitions with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use transition::TransitionBuilder;

use crate::core::{Guard, State};
use crate::transition::TransitionSpec;

/// Create an unguarded transition with no action.
///
/// # Example
///
/// ```
/// use turnstile::builder::simple_transition;
/// use turnstile::core::{Operations, Subject};
/// use turnstile::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///     }
/// }
///
/// struct Signal;
///
/// impl Subject for Signal {
///     fn operations(&self) -> &Operations<Self> {
///         static OPS: std::sync::OnceLock<Operations<Signal>> = std::sync::OnceLock::new();
///         OPS.get_or_init(Operations::new)
///     }
/// }
///
/// let transition = simple_transition::<Light, Signal>(Light::Red, Light::Green);
/// assert!(transition.is_executable(&Signal, &[]).unwrap());
/// ```
pub fn simple_transition<S: State, T>(from: S, to: S) -> TransitionSpec<S, T> {
    TransitionSpec::new(from, to, Vec::new(), None)
}

/// Create a transition guarded by a single named operation.
pub fn guarded_transition<S: State, T>(
    from: S,
    to: S,
    guard: impl Into<Guard<T>>,
) -> TransitionSpec<S, T> {
    TransitionSpec::new(from, to, vec![guard.into()], None)
}
