//! Guarded transitions and the errors they report.
//!
//! A [`TransitionSpec`] answers "can this subject move from `from` to `to`
//! right now?" and performs the side effects of doing so. Choosing among
//! candidate transitions and storing the subject's new state belong to the
//! caller.

mod error;
mod spec;

pub use error::{GuardFailure, TransitionError};
pub use spec::TransitionSpec;
