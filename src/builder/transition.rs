//! Builder for constructing transition specs.

use crate::builder::error::BuildError;
use crate::core::{Action, Guard, OperationError, State, Value};
use crate::transition::TransitionSpec;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, T> {
    from: Option<S>,
    to: Option<S>,
    guards: Vec<Guard<T>>,
    on_transition: Option<Action<T>>,
}

impl<S: State, T> TransitionBuilder<S, T> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guards: Vec::new(),
            on_transition: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Append a guard. Guards run in the order they were added.
    pub fn guard(mut self, guard: impl Into<Guard<T>>) -> Self {
        self.guards.push(guard.into());
        self
    }

    /// Append several guards.
    pub fn guards<I>(mut self, guards: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Guard<T>>,
    {
        self.guards.extend(guards.into_iter().map(Into::into));
        self
    }

    /// Append a guard from a closure.
    pub fn when<F, R>(self, predicate: F) -> Self
    where
        F: Fn(&T, &[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.guard(Guard::new(predicate))
    }

    /// Append a guard from a closure that may fail.
    pub fn try_when<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, OperationError> + Send + Sync + 'static,
    {
        self.guard(Guard::fallible(predicate))
    }

    /// Set the on-transition action (optional).
    pub fn on_transition(mut self, action: impl Into<Action<T>>) -> Self {
        self.on_transition = Some(action.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionSpec<S, T>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(TransitionSpec::new(from, to, self.guards, self.on_transition))
    }
}

impl<S: State, T> Default for TransitionBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}
