//! One guarded edge of a state graph.

use super::error::{GuardFailure, TransitionError};
use crate::builder::TransitionBuilder;
use crate::core::{Action, Guard, GuardOutcome, OperationError, State, Subject, Value};
use std::fmt;
use tracing::{debug, trace};

/// A transition from one state to another, with guards and an
/// on-transition action.
///
/// Transitions are immutable once built and can be evaluated against any
/// number of subjects. Equality only considers `from` and `to`.
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
/// use turnstile::core::{Operations, Subject};
/// use turnstile::transition::TransitionSpec;
///
/// struct Car {
///     ignitions: u32,
/// }
///
/// impl Subject for Car {
///     fn operations(&self) -> &Operations<Self> {
///         static OPS: OnceLock<Operations<Car>> = OnceLock::new();
///         OPS.get_or_init(|| {
///             Operations::new()
///                 .query("race_car?", |_, _| false)
///                 .query("has_key?", |_, _| true)
///                 .command("ignite", |car: &mut Car, _| car.ignitions += 1)
///         })
///     }
/// }
///
/// let start = TransitionSpec::<String, Car>::builder()
///     .from("parked".to_string())
///     .to("engine_started".to_string())
///     .guard("has_key?")
///     .on_transition("ignite")
///     .build()
///     .unwrap();
///
/// let mut car = Car { ignitions: 0 };
/// assert!(start.matches(&"parked".to_string()));
/// assert!(start.is_executable(&car, &[]).unwrap());
/// start.execute(&mut car, &[]).unwrap();
/// assert_eq!(car.ignitions, 1);
///
/// let race = TransitionSpec::<String, Car>::builder()
///     .from("parked".to_string())
///     .to("engine_started".to_string())
///     .guard("race_car?")
///     .build()
///     .unwrap();
///
/// let err = race.ensure_executable(&car, &[]).unwrap_err();
/// assert!(err.to_string().ends_with("because the guard `race_car?` failed"));
/// assert_eq!(race, start);
/// ```
pub struct TransitionSpec<S: State, T> {
    from: S,
    to: S,
    guards: Vec<Guard<T>>,
    on_transition: Option<Action<T>>,
}

impl<S: State, T> TransitionSpec<S, T> {
    /// Create a transition. No validation is performed here; unrecognized
    /// actions are reported by [`execute`](Self::execute).
    pub fn new(from: S, to: S, guards: Vec<Guard<T>>, on_transition: Option<Action<T>>) -> Self {
        Self {
            from,
            to,
            guards,
            on_transition,
        }
    }

    /// Start a fluent builder.
    pub fn builder() -> TransitionBuilder<S, T> {
        TransitionBuilder::new()
    }

    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn guards(&self) -> &[Guard<T>] {
        &self.guards
    }

    pub fn on_transition(&self) -> Option<&Action<T>> {
        self.on_transition.as_ref()
    }

    /// Whether this transition starts from `state`.
    pub fn matches(&self, state: &S) -> bool {
        self.from == *state
    }
}

impl<S: State, T: Subject> TransitionSpec<S, T> {
    /// Whether every guard passes. Stops at the first failing guard.
    ///
    /// Errors raised by a guard are propagated unchanged.
    pub fn is_executable(&self, subject: &T, args: &[Value]) -> Result<bool, OperationError> {
        for guard in &self.guards {
            if !guard.passes(subject, args)? {
                trace!(
                    subject = subject.type_name(),
                    from = self.from.name(),
                    to = self.to.name(),
                    guard = %guard,
                    "guard did not pass"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Require every guard to pass.
    ///
    /// A guard that raises counts as failing. The first failing guard is
    /// reported as a [`GuardFailure`].
    pub fn ensure_executable(&self, subject: &T, args: &[Value]) -> Result<(), GuardFailure> {
        for guard in &self.guards {
            if let GuardOutcome::Fail(rejection) = guard.check(subject, args) {
                debug!(
                    subject = subject.type_name(),
                    from = self.from.name(),
                    to = self.to.name(),
                    guard = %guard,
                    %rejection,
                    "guard rejected transition"
                );
                return Err(GuardFailure::new(
                    subject.type_name(),
                    self.from.name(),
                    self.to.name(),
                    guard.to_string(),
                    args,
                ));
            }
        }
        Ok(())
    }

    /// Perform the on-transition action, if any.
    ///
    /// Errors raised by the action propagate unchanged. Earlier steps of a
    /// sequence are not undone when a later step fails.
    pub fn execute(&self, subject: &mut T, args: &[Value]) -> Result<(), TransitionError> {
        let Some(action) = &self.on_transition else {
            return Ok(());
        };

        trace!(
            subject = subject.type_name(),
            from = self.from.name(),
            to = self.to.name(),
            ?action,
            "executing transition"
        );

        if let Action::Unrecognized(value) = action {
            return Err(TransitionError::UnrecognizedActionSpec {
                found: value.kind(),
            });
        }

        action.perform(subject, args)?;
        Ok(())
    }
}

impl<S: State, T> PartialEq for TransitionSpec<S, T> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl<S: State, T> Clone for TransitionSpec<S, T> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guards: self.guards.clone(),
            on_transition: self.on_transition.clone(),
        }
    }
}

impl<S: State, T> fmt::Debug for TransitionSpec<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionSpec")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guards", &self.guards)
            .field("on_transition", &self.on_transition)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operations;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum CarState {
        Parked,
        EngineStarted,
        Airborne,
        UnderWater,
    }

    impl State for CarState {
        fn name(&self) -> &str {
            match self {
                Self::Parked => "parked",
                Self::EngineStarted => "engine_started",
                Self::Airborne => "airborne",
                Self::UnderWater => "under_water",
            }
        }
    }

    #[derive(Default)]
    struct Car {
        log: Vec<String>,
    }

    impl Subject for Car {
        fn operations(&self) -> &Operations<Self> {
            static OPS: OnceLock<Operations<Car>> = OnceLock::new();
            OPS.get_or_init(|| {
                Operations::new()
                    .query("race_car?", |_: &Car, _| false)
                    .query("street_legal?", |_: &Car, _| true)
                    .query("rocket?", |_: &Car, args: &[Value]| match args.first() {
                        Some(Value::Int(boost)) if *boost < 10 => Some(false),
                        _ => None,
                    })
                    .try_query("submarine?", |_: &Car, _| {
                        Err(OperationError::failed("RuntimeError"))
                    })
                    .command("ignite", |car: &mut Car, args| {
                        car.log.push(format!("ignite {}", crate::core::Arguments(args)));
                    })
                    .command("buckle_up", |car: &mut Car, _| car.log.push("buckle_up".into()))
                    .try_command("stall", |car: &mut Car, _| {
                        car.log.push("stall".into());
                        Err(OperationError::failed("stalled"))
                    })
            })
        }
    }

    fn spec(
        to: CarState,
        guards: Vec<Guard<Car>>,
        action: Option<Action<Car>>,
    ) -> TransitionSpec<CarState, Car> {
        TransitionSpec::new(CarState::Parked, to, guards, action)
    }

    #[test]
    fn matches_compares_from_state() {
        let t = spec(CarState::EngineStarted, vec![], None);
        assert!(t.matches(&CarState::Parked));
        assert!(!t.matches(&CarState::EngineStarted));
        assert!(!t.matches(&CarState::Airborne));
    }

    #[test]
    fn empty_guards_are_executable() {
        let t = spec(CarState::EngineStarted, vec![], None);
        let car = Car::default();
        assert!(t.is_executable(&car, &[]).unwrap());
        assert!(t.ensure_executable(&car, &[Value::Int(1)]).is_ok());
    }

    #[test]
    fn all_guards_must_pass() {
        let car = Car::default();
        let ok = spec(
            CarState::EngineStarted,
            vec!["street_legal?".into(), Guard::Always],
            None,
        );
        let blocked = spec(
            CarState::EngineStarted,
            vec!["street_legal?".into(), "race_car?".into()],
            None,
        );
        assert!(ok.is_executable(&car, &[]).unwrap());
        assert!(!blocked.is_executable(&car, &[]).unwrap());
    }

    #[test]
    fn is_executable_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let t = spec(
            CarState::EngineStarted,
            vec![
                "race_car?".into(),
                Guard::new(move |_: &Car, _: &[Value]| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    true
                }),
            ],
            None,
        );
        assert!(!t.is_executable(&Car::default(), &[]).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn ensure_executable_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let t = spec(
            CarState::EngineStarted,
            vec![
                "race_car?".into(),
                Guard::new(move |_: &Car, _: &[Value]| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    true
                }),
            ],
            None,
        );
        let err = t.ensure_executable(&Car::default(), &[]).unwrap_err();
        assert_eq!(err.guard, "race_car?");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn is_executable_propagates_guard_errors() {
        let t = spec(CarState::UnderWater, vec!["submarine?".into()], None);
        assert_eq!(
            t.is_executable(&Car::default(), &[]),
            Err(OperationError::failed("RuntimeError"))
        );
    }

    #[test]
    fn ensure_executable_reports_first_failing_guard() {
        let t = spec(
            CarState::EngineStarted,
            vec!["street_legal?".into(), "race_car?".into(), "rocket?".into()],
            None,
        );
        let err = t.ensure_executable(&Car::default(), &[]).unwrap_err();
        assert_eq!(err.guard, "race_car?");
        assert_eq!(err.subject, "Car");
        assert_eq!(err.from, "parked");
        assert_eq!(err.to, "engine_started");
    }

    #[test]
    fn ensure_executable_converts_raised_errors() {
        let t = spec(CarState::UnderWater, vec!["submarine?".into()], None);
        let err = t.ensure_executable(&Car::default(), &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Transitions: Transition for instance of `Car` from `parked` to `under_water` failed because the guard `submarine?` failed"
        );
    }

    #[test]
    fn ensure_executable_includes_arguments() {
        let t = spec(CarState::Airborne, vec!["rocket?".into()], None);
        let err = t
            .ensure_executable(&Car::default(), &[Value::Int(5)])
            .unwrap_err();
        assert!(err.to_string().ends_with("with arguments `[5]`"));
    }

    #[test]
    fn callable_guard_failure_uses_label() {
        let t = spec(
            CarState::Airborne,
            vec![Guard::new(|_: &Car, _: &[Value]| false).labeled("has_wings")],
            None,
        );
        let err = t.ensure_executable(&Car::default(), &[]).unwrap_err();
        assert_eq!(err.guard, "has_wings");
    }

    #[test]
    fn execute_without_action_is_noop() {
        let t = spec(CarState::EngineStarted, vec![], None);
        let mut car = Car::default();
        t.execute(&mut car, &[Value::Int(1)]).unwrap();
        assert!(car.log.is_empty());
    }

    #[test]
    fn execute_named_action_passes_arguments() {
        let t = spec(CarState::EngineStarted, vec![], Some("ignite".into()));
        let mut car = Car::default();
        t.execute(&mut car, &[Value::symbol("fast"), Value::symbol("now")])
            .unwrap();
        assert_eq!(car.log, vec!["ignite [:fast, :now]"]);
    }

    #[test]
    fn execute_callable_action() {
        let t = spec(
            CarState::EngineStarted,
            vec![],
            Some(Action::new(|car: &mut Car, args: &[Value]| {
                car.log.push(format!("closure {}", args.len()));
            })),
        );
        let mut car = Car::default();
        t.execute(&mut car, &[Value::Int(1)]).unwrap();
        assert_eq!(car.log, vec!["closure 1"]);
    }

    #[test]
    fn execute_sequence_stops_on_failure() {
        let t = spec(
            CarState::EngineStarted,
            vec![],
            Some(Action::sequence(["buckle_up", "stall", "ignite"])),
        );
        let mut car = Car::default();
        let err = t.execute(&mut car, &[]).unwrap_err();
        assert_eq!(
            err,
            TransitionError::Operation(OperationError::failed("stalled"))
        );
        assert_eq!(car.log, vec!["buckle_up", "stall"]);
    }

    #[test]
    fn execute_rejects_unrecognized_action() {
        let t = spec(
            CarState::EngineStarted,
            vec![],
            Some(Action::Unrecognized(Value::Int(42))),
        );
        let err = t.execute(&mut Car::default(), &[]).unwrap_err();
        assert_eq!(err, TransitionError::UnrecognizedActionSpec { found: "integer" });
    }

    #[test]
    fn execute_reports_unknown_operations() {
        let t = spec(CarState::EngineStarted, vec![], Some("fly".into()));
        let err = t.execute(&mut Car::default(), &[]).unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Operation(OperationError::UnknownOperation { .. })
        ));
    }

    #[test]
    fn equality_ignores_guards_and_actions() {
        let a = spec(CarState::EngineStarted, vec!["race_car?".into()], None);
        let b = spec(CarState::EngineStarted, vec![], Some("ignite".into()));
        let c = spec(CarState::Airborne, vec!["race_car?".into()], None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn clone_shares_callables() {
        let t = spec(
            CarState::EngineStarted,
            vec![Guard::new(|_: &Car, _: &[Value]| true)],
            Some(Action::new(|car: &mut Car, _: &[Value]| car.log.push("x".into()))),
        );
        let copy = t.clone();
        let mut car = Car::default();
        assert!(copy.is_executable(&car, &[]).unwrap());
        copy.execute(&mut car, &[]).unwrap();
        assert_eq!(car.log, vec!["x"]);
        assert_eq!(copy.guards().len(), 1);
        assert!(copy.on_transition().is_some());
    }

    fn assert_send_sync<X: Send + Sync>() {}

    #[test]
    fn transition_is_send_and_sync() {
        assert_send_sync::<TransitionSpec<CarState, Car>>();
        assert_send_sync::<TransitionSpec<String, Car>>();
    }

    #[test]
    fn shared_transition_evaluates_across_threads() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&evaluated);
        let t = Arc::new(spec(
            CarState::Airborne,
            vec![
                Guard::new(move |_: &Car, _: &[Value]| {
                    counted.fetch_add(1, Ordering::SeqCst);
                    true
                }),
                Guard::new(|_: &Car, args: &[Value]| {
                    matches!(args.first(), Some(Value::Int(boost)) if *boost >= 10)
                }),
            ],
            None,
        ));

        let handles: Vec<_> = (0..4i64)
            .map(|boost| {
                let t = Arc::clone(&t);
                std::thread::spawn(move || {
                    let car = Car::default();
                    let args = [Value::Int(boost * 5)];
                    let executable = t.is_executable(&car, &args).unwrap();
                    let ensured = t.ensure_executable(&car, &args).is_ok();
                    (executable, ensured)
                })
            })
            .collect();

        let results: Vec<(bool, bool)> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(
            results,
            vec![(false, false), (false, false), (true, true), (true, true)]
        );
        assert_eq!(evaluated.load(Ordering::SeqCst), 8);
    }
}
