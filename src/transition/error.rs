//! Errors reported by transition operations.

use crate::core::{Arguments, OperationError, Value};
use thiserror::Error;

/// A guard did not pass when a transition was required to be executable.
///
/// The message is part of the public contract:
///
/// ```text
/// Transitions: Transition for instance of `Car` from `parked` to `airborne` failed because the guard `rocket?` failed with arguments `[5]`
/// ```
///
/// The arguments suffix only appears when arguments were supplied. The
/// rejection that caused the failure is not chained as a source.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct GuardFailure {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub guard: String,
    pub arguments: Vec<Value>,
    message: String,
}

impl GuardFailure {
    pub fn new(
        subject: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        guard: impl Into<String>,
        arguments: &[Value],
    ) -> Self {
        let subject = subject.into();
        let from = from.into();
        let to = to.into();
        let guard = guard.into();

        let mut message = format!(
            "Transitions: Transition for instance of `{subject}` from `{from}` to `{to}` failed because the guard `{guard}` failed"
        );
        if !arguments.is_empty() {
            message.push_str(&format!(" with arguments `{}`", Arguments(arguments)));
        }

        Self {
            subject,
            from,
            to,
            guard,
            arguments: arguments.to_vec(),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while executing a transition's action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("You can only pass an operation name, a callable or a list of operation names to 'on_transition' - got {found}.")]
    UnrecognizedActionSpec { found: &'static str },

    #[error(transparent)]
    Operation(#[from] OperationError),
}
