//! Guard predicates for controlling state transitions.
//!
//! A guard is evaluated against a subject and the transition arguments.
//! It passes when its result is truthy (see [`Value::is_truthy`]).

use super::subject::{OperationError, Subject};
use super::value::Value;
use std::fmt;
use std::sync::Arc;

/// Callable guard body.
pub type GuardFn<T> = Arc<dyn Fn(&T, &[Value]) -> Result<Value, OperationError> + Send + Sync>;

/// A single guard attached to a transition.
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
/// use turnstile::core::{Guard, Operations, Subject, Value};
///
/// struct Car {
///     fuel: i64,
/// }
///
/// impl Subject for Car {
///     fn operations(&self) -> &Operations<Self> {
///         static OPS: OnceLock<Operations<Car>> = OnceLock::new();
///         OPS.get_or_init(|| Operations::new().query("fueled?", |car: &Car, _| car.fuel > 0))
///     }
/// }
///
/// let by_name: Guard<Car> = Guard::named("fueled?");
/// let by_closure = Guard::new(|car: &Car, args: &[Value]| car.fuel >= args.len() as i64);
///
/// let car = Car { fuel: 1 };
/// assert!(by_name.passes(&car, &[]).unwrap());
/// assert!(by_closure.passes(&car, &[Value::Int(1)]).unwrap());
/// assert!(!by_closure.passes(&car, &[Value::Int(1), Value::Int(2)]).unwrap());
/// ```
pub enum Guard<T> {
    /// Operation looked up on the subject when the guard runs.
    Named(String),
    /// Closure invoked as `func(subject, args)`.
    Callable {
        label: Option<String>,
        func: GuardFn<T>,
    },
    /// Always passes.
    Always,
}

/// Why a guard did not pass.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardRejection {
    /// The guard returned `nil` or `false`.
    Falsy(Value),
    /// The guard raised an error.
    Raised(OperationError),
}

/// Result of checking a guard with failures captured.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    Pass,
    Fail(GuardRejection),
}

impl GuardOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, GuardOutcome::Pass)
    }
}

impl fmt::Display for GuardRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardRejection::Falsy(value) => write!(f, "returned {value}"),
            GuardRejection::Raised(err) => write!(f, "raised: {err}"),
        }
    }
}

impl<T> Guard<T> {
    /// Guard that invokes the named operation on the subject.
    pub fn named(name: impl Into<String>) -> Self {
        Guard::Named(name.into())
    }

    /// Guard from a closure whose result converts into a [`Value`].
    pub fn new<F, R>(predicate: F) -> Self
    where
        F: Fn(&T, &[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self::fallible(move |subject, args| Ok(predicate(subject, args).into()))
    }

    /// Guard from a closure that may fail.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, OperationError> + Send + Sync + 'static,
    {
        Guard::Callable {
            label: None,
            func: Arc::new(predicate),
        }
    }

    /// Name a callable guard for diagnostics. No effect on other variants.
    pub fn labeled(self, name: impl Into<String>) -> Self {
        match self {
            Guard::Callable { func, .. } => Guard::Callable {
                label: Some(name.into()),
                func,
            },
            other => other,
        }
    }
}

impl<T: Subject> Guard<T> {
    /// Run the guard, propagating any error it raises.
    pub fn evaluate(&self, subject: &T, args: &[Value]) -> Result<Value, OperationError> {
        match self {
            Guard::Callable { func, .. } => func(subject, args),
            Guard::Named(name) => subject.query(name, args),
            Guard::Always => Ok(Value::Bool(true)),
        }
    }

    /// Whether the guard passes, propagating any error it raises.
    pub fn passes(&self, subject: &T, args: &[Value]) -> Result<bool, OperationError> {
        Ok(self.evaluate(subject, args)?.is_truthy())
    }

    /// Run the guard, capturing a raised error as a failing outcome.
    pub fn check(&self, subject: &T, args: &[Value]) -> GuardOutcome {
        match self.evaluate(subject, args) {
            Ok(value) if value.is_truthy() => GuardOutcome::Pass,
            Ok(value) => GuardOutcome::Fail(GuardRejection::Falsy(value)),
            Err(err) => GuardOutcome::Fail(GuardRejection::Raised(err)),
        }
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        match self {
            Guard::Named(name) => Guard::Named(name.clone()),
            Guard::Callable { label, func } => Guard::Callable {
                label: label.clone(),
                func: Arc::clone(func),
            },
            Guard::Always => Guard::Always,
        }
    }
}

impl<T> fmt::Display for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Named(name) => f.write_str(name),
            Guard::Callable {
                label: Some(label), ..
            } => f.write_str(label),
            Guard::Callable { label: None, .. } => f.write_str("<callable>"),
            Guard::Always => f.write_str("always"),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Guard::Callable { label, .. } => {
                f.debug_struct("Callable").field("label", label).finish()
            }
            Guard::Always => f.write_str("Always"),
        }
    }
}

impl<T> From<&str> for Guard<T> {
    fn from(name: &str) -> Self {
        Guard::named(name)
    }
}

impl<T> From<String> for Guard<T> {
    fn from(name: String) -> Self {
        Guard::Named(name)
    }
}
