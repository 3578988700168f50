//! State identifiers for transition endpoints.
//!
//! States are opaque, comparable tokens. The engine only ever compares
//! them for equality and renders their name in diagnostics.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for state identifiers used as transition endpoints.
///
/// # Required Traits
///
/// - `Clone`: transitions hand out copies of their endpoints
/// - `PartialEq`: states must be comparable for matching
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: states appear in configuration records
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// #[serde(rename_all = "snake_case")]
/// enum CarState {
///     Parked,
///     EngineStarted,
/// }
///
/// impl State for CarState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Parked => "parked",
///             Self::EngineStarted => "engine_started",
///         }
///     }
/// }
///
/// assert_eq!(CarState::EngineStarted.name(), "engine_started");
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Name used when the state is rendered in a failure message.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self
    }
}
