//! Turnstile: a guarded state-transition engine
//!
//! Turnstile is the evaluation core of a declarative state machine. Given a
//! subject sitting in some state, a [`TransitionSpec`] decides whether moving
//! to another state is permitted right now and, if so, performs the
//! transition's side effects.
//!
//! # Core Concepts
//!
//! - **Subject**: the object a transition concerns, exposing named operations
//! - **Guards**: predicates that must all pass for a transition to run
//! - **Actions**: side effects performed when a transition executes
//! - **Configuration**: serde records describing transitions declaratively
//!
//! Selecting which candidate transition to try and persisting the subject's
//! new state are left to the caller.
//!
//! # Example
//!
//! ```rust
//! use std::sync::OnceLock;
//! use turnstile::core::{Operations, Subject, Value};
//! use turnstile::state_enum;
//! use turnstile::TransitionSpec;
//!
//! state_enum! {
//!     enum CarState {
//!         Parked = "parked",
//!         Airborne = "airborne",
//!     }
//! }
//!
//! struct Car;
//!
//! impl Subject for Car {
//!     fn operations(&self) -> &Operations<Self> {
//!         static OPS: OnceLock<Operations<Car>> = OnceLock::new();
//!         OPS.get_or_init(|| {
//!             Operations::new().query("rocket?", |_: &Car, args: &[Value]| match args {
//!                 [Value::Int(boost)] if *boost < 10 => Some(false),
//!                 _ => None,
//!             })
//!         })
//!     }
//! }
//!
//! let lift_off = TransitionSpec::<CarState, Car>::builder()
//!     .from(CarState::Parked)
//!     .to(CarState::Airborne)
//!     .guard("rocket?")
//!     .build()
//!     .unwrap();
//!
//! let err = lift_off.ensure_executable(&Car, &[Value::Int(5)]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Transitions: Transition for instance of `Car` from `parked` to `airborne` \
//!      failed because the guard `rocket?` failed with arguments `[5]`"
//! );
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod transition;

// Re-export commonly used types
pub use crate::core::{Action, Guard, Operations, State, Subject, Value};
pub use transition::{GuardFailure, TransitionError, TransitionSpec};
