//! Side effects performed when a transition executes.

use super::subject::{OperationError, Subject};
use super::value::Value;
use std::fmt;
use std::sync::Arc;

/// Callable action body.
pub type ActionFn<T> = Arc<dyn Fn(&mut T, &[Value]) -> Result<(), OperationError> + Send + Sync>;

/// The on-transition effect of a transition.
///
/// An absent action is represented by `None` on the transition itself.
pub enum Action<T> {
    /// Operation invoked on the subject by name.
    Named(String),
    /// Closure invoked as `func(subject, args)`.
    Callable {
        label: Option<String>,
        func: ActionFn<T>,
    },
    /// Operations invoked in order. The first failure stops the sequence.
    Sequence(Vec<String>),
    /// A configured value that is none of the above.
    ///
    /// Only configuration documents produce this variant. It is accepted
    /// when the transition is built and rejected when it executes.
    Unrecognized(Value),
}

impl<T> Action<T> {
    pub fn named(name: impl Into<String>) -> Self {
        Action::Named(name.into())
    }

    pub fn sequence<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Action::Sequence(names.into_iter().map(Into::into).collect())
    }

    /// Action from a closure that cannot fail.
    pub fn new<F>(effect: F) -> Self
    where
        F: Fn(&mut T, &[Value]) + Send + Sync + 'static,
    {
        Self::fallible(move |subject, args| {
            effect(subject, args);
            Ok(())
        })
    }

    /// Action from a closure that may fail.
    pub fn fallible<F>(effect: F) -> Self
    where
        F: Fn(&mut T, &[Value]) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        Action::Callable {
            label: None,
            func: Arc::new(effect),
        }
    }

    /// Name a callable action for diagnostics. No effect on other variants.
    pub fn labeled(self, name: impl Into<String>) -> Self {
        match self {
            Action::Callable { func, .. } => Action::Callable {
                label: Some(name.into()),
                func,
            },
            other => other,
        }
    }
}

impl<T: Subject> Action<T> {
    /// Perform the action against the subject.
    ///
    /// [`Action::Unrecognized`] does nothing here; `TransitionSpec::execute`
    /// rejects it before performing.
    pub(crate) fn perform(&self, subject: &mut T, args: &[Value]) -> Result<(), OperationError> {
        match self {
            Action::Named(name) => subject.invoke(name, args),
            Action::Callable { func, .. } => func(subject, args),
            Action::Sequence(names) => names
                .iter()
                .try_for_each(|name| subject.invoke(name, args)),
            Action::Unrecognized(_) => Ok(()),
        }
    }
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        match self {
            Action::Named(name) => Action::Named(name.clone()),
            Action::Callable { label, func } => Action::Callable {
                label: label.clone(),
                func: Arc::clone(func),
            },
            Action::Sequence(names) => Action::Sequence(names.clone()),
            Action::Unrecognized(value) => Action::Unrecognized(value.clone()),
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Action::Callable { label, .. } => {
                f.debug_struct("Callable").field("label", label).finish()
            }
            Action::Sequence(names) => f.debug_tuple("Sequence").field(names).finish(),
            Action::Unrecognized(value) => f.debug_tuple("Unrecognized").field(value).finish(),
        }
    }
}

impl<T> From<&str> for Action<T> {
    fn from(name: &str) -> Self {
        Action::named(name)
    }
}

impl<T> From<String> for Action<T> {
    fn from(name: String) -> Self {
        Action::Named(name)
    }
}

impl<T> From<Vec<&str>> for Action<T> {
    fn from(names: Vec<&str>) -> Self {
        Action::sequence(names)
    }
}

impl<T, const N: usize> From<[&str; N]> for Action<T> {
    fn from(names: [&str; N]) -> Self {
        Action::sequence(names)
    }
}
