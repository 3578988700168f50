//! Subjects and their capability tables.
//!
//! A subject is the object a transition concerns. Guards and actions that
//! refer to an operation by name are resolved against the subject's
//! [`Operations`] table when they run.

use super::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by subject operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OperationError {
    #[error("undefined operation `{name}` for `{subject}`")]
    UnknownOperation { subject: String, name: String },

    #[error("{message}")]
    Failed { message: String },
}

impl OperationError {
    /// Failure raised from inside a guard or action.
    pub fn failed(message: impl Into<String>) -> Self {
        OperationError::Failed {
            message: message.into(),
        }
    }
}

/// Read-only operation, usable as a guard or as an action.
pub type Query<T> = Arc<dyn Fn(&T, &[Value]) -> Result<Value, OperationError> + Send + Sync>;

/// Mutating operation, usable as an action.
pub type Command<T> = Arc<dyn Fn(&mut T, &[Value]) -> Result<(), OperationError> + Send + Sync>;

/// Capability table mapping operation names to callables.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{Operations, Value};
///
/// struct Car {
///     fuel: i64,
/// }
///
/// let ops = Operations::<Car>::new()
///     .query("fueled?", |car, _| car.fuel > 0)
///     .command("refuel", |car, args| {
///         car.fuel += args.len() as i64;
///     });
///
/// assert!(ops.get_query("fueled?").is_some());
/// assert!(ops.get_command("refuel").is_some());
/// assert!(ops.get_query("refuel").is_none());
/// ```
pub struct Operations<T> {
    queries: HashMap<String, Query<T>>,
    commands: HashMap<String, Command<T>>,
}

impl<T> Operations<T> {
    pub fn new() -> Self {
        Self {
            queries: HashMap::new(),
            commands: HashMap::new(),
        }
    }

    /// Register a query whose result converts into a [`Value`].
    pub fn query<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T, &[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.try_query(name, move |subject, args| Ok(f(subject, args).into()))
    }

    /// Register a query that may fail.
    pub fn try_query<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, OperationError> + Send + Sync + 'static,
    {
        self.queries.insert(name.into(), Arc::new(f));
        self
    }

    /// Register a command.
    pub fn command<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut T, &[Value]) + Send + Sync + 'static,
    {
        self.try_command(name, move |subject, args| {
            f(subject, args);
            Ok(())
        })
    }

    /// Register a command that may fail.
    pub fn try_command<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut T, &[Value]) -> Result<(), OperationError> + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Arc::new(f));
        self
    }

    pub fn get_query(&self, name: &str) -> Option<&Query<T>> {
        self.queries.get(name)
    }

    pub fn get_command(&self, name: &str) -> Option<&Command<T>> {
        self.commands.get(name)
    }
}

impl<T> Default for Operations<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Operations<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut queries: Vec<_> = self.queries.keys().collect();
        let mut commands: Vec<_> = self.commands.keys().collect();
        queries.sort();
        commands.sort();
        f.debug_struct("Operations")
            .field("queries", &queries)
            .field("commands", &commands)
            .finish()
    }
}

/// An object whose operations can be invoked by name.
///
/// Implementors usually keep their table in a `static` initialized once:
///
/// ```rust
/// use std::sync::OnceLock;
/// use turnstile::core::{Operations, Subject, Value};
///
/// struct Car;
///
/// impl Subject for Car {
///     fn operations(&self) -> &Operations<Self> {
///         static OPS: OnceLock<Operations<Car>> = OnceLock::new();
///         OPS.get_or_init(|| Operations::new().query("race_car?", |_, _| false))
///     }
/// }
///
/// let car = Car;
/// assert_eq!(car.type_name(), "Car");
/// assert_eq!(car.query("race_car?", &[]).unwrap(), Value::Bool(false));
/// assert!(car.query("rocket?", &[]).is_err());
/// ```
pub trait Subject: Sized {
    fn operations(&self) -> &Operations<Self>;

    /// Type name shown in failure messages. Defaults to the unqualified
    /// Rust type name.
    fn type_name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Run a query by name.
    fn query(&self, name: &str, args: &[Value]) -> Result<Value, OperationError> {
        let op = self
            .operations()
            .get_query(name)
            .ok_or_else(|| unknown_operation(self, name))?;
        op(self, args)
    }

    /// Run an operation by name for its side effects.
    ///
    /// Commands are resolved first; a query of the same name is run as a
    /// fallback and its result discarded.
    fn invoke(&mut self, name: &str, args: &[Value]) -> Result<(), OperationError> {
        let command = self.operations().get_command(name).cloned();
        if let Some(op) = command {
            return op(self, args);
        }
        self.query(name, args).map(|_| ())
    }
}

fn unknown_operation<T: Subject>(subject: &T, name: &str) -> OperationError {
    OperationError::UnknownOperation {
        subject: subject.type_name().to_string(),
        name: name.to_string(),
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
