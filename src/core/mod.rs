//! Core building blocks of the transition engine.
//!
//! - State identifiers via the `State` trait
//! - Dynamic argument values and their truthiness
//! - Subjects and their named-operation tables
//! - Guards and on-transition actions

mod action;
mod guard;
mod state;
mod subject;
mod value;

pub use action::{Action, ActionFn};
pub use guard::{Guard, GuardFn, GuardOutcome, GuardRejection};
pub use state::State;
pub use subject::{Command, OperationError, Operations, Query, Subject};
pub use value::{Arguments, Value};
