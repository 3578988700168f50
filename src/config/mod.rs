//! Declarative transition configuration records.
//!
//! A record has the shape `{from, to, guard?, on_transition?}` and can be
//! loaded from JSON. Guard and action values are mapped onto [`Guard`] and
//! [`Action`] without validation; an action value that is not an operation
//! name or a list of names is kept as [`Action::Unrecognized`] and rejected
//! when the transition executes.

use crate::core::{Action, Guard, State, Value};
use crate::transition::TransitionSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod error;

pub use error::ConfigError;

/// Configuration for a single transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionConfig<S: State> {
    pub from: S,
    pub to: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_transition: Option<Value>,
}

impl<S: State> TransitionConfig<S> {
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            guard: None,
            on_transition: None,
        }
    }

    pub fn with_guard(mut self, guard: impl Into<Value>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    pub fn with_on_transition(mut self, action: impl Into<Value>) -> Self {
        self.on_transition = Some(action.into());
        self
    }

    /// Build the transition described by this record.
    ///
    /// An action list holding anything other than names, such as
    /// `["honk", 3]`, is kept whole as [`Action::Unrecognized`]: executing
    /// it fails before any step runs.
    pub fn into_spec<T>(self) -> TransitionSpec<S, T> {
        let guards = self.guard.map(guards_from_value).unwrap_or_default();
        let on_transition = self.on_transition.and_then(action_from_value);
        TransitionSpec::new(self.from, self.to, guards, on_transition)
    }
}

/// Nested lists are flattened. Names become named guards; any other value
/// becomes a guard that always passes.
fn guards_from_value<T>(value: Value) -> Vec<Guard<T>> {
    let mut guards = Vec::new();
    collect_guards(value, &mut guards);
    guards
}

fn collect_guards<T>(value: Value, guards: &mut Vec<Guard<T>>) {
    match value {
        Value::List(items) => {
            for item in items {
                collect_guards(item, guards);
            }
        }
        Value::Str(name) | Value::Symbol(name) => guards.push(Guard::Named(name)),
        _ => guards.push(Guard::Always),
    }
}

/// A list becomes a sequence only when every element is a name; a mixed
/// list is unrecognized as a whole, so none of its steps ever run.
fn action_from_value<T>(value: Value) -> Option<Action<T>> {
    match value {
        Value::Nil => None,
        Value::Str(name) | Value::Symbol(name) => Some(Action::Named(name)),
        Value::List(items) if items.iter().all(|item| item.as_name().is_some()) => {
            Some(Action::Sequence(
                items
                    .iter()
                    .filter_map(|item| item.as_name().map(str::to_string))
                    .collect(),
            ))
        }
        other => Some(Action::Unrecognized(other)),
    }
}

/// Parse a JSON array of transition records.
pub fn load_json<S: State>(json: &str) -> Result<Vec<TransitionConfig<S>>, ConfigError> {
    let configs: Vec<TransitionConfig<S>> =
        serde_json::from_str(json).map_err(|e| ConfigError::Deserialization(e.to_string()))?;
    debug!(count = configs.len(), "loaded transition configuration");
    Ok(configs)
}

/// Parse a JSON array of transition records and build their transitions.
pub fn load_specs<S: State, T>(json: &str) -> Result<Vec<TransitionSpec<S, T>>, ConfigError> {
    Ok(load_json(json)?
        .into_iter()
        .map(TransitionConfig::into_spec)
        .collect())
}

/// Serialize transition records as a JSON array.
pub fn to_json<S: State>(configs: &[TransitionConfig<S>]) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(configs).map_err(|e| ConfigError::Serialization(e.to_string()))
}
