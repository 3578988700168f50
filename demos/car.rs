//! Car Transitions
//!
//! A small dispatcher drives a car through guarded transitions loaded from
//! JSON configuration.
//!
//! Key concepts:
//! - Named guards and actions resolved against the car's operation table
//! - Candidate selection by current state
//! - Guard failure messages when no candidate is executable
//!
//! Run with: RUST_LOG=turnstile=debug cargo run --example car

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use turnstile::config::load_specs;
use turnstile::core::{Operations, Subject, Value};
use turnstile::{state_enum, TransitionSpec};

state_enum! {
    enum CarState {
        Parked = "parked",
        EngineStarted = "engine_started",
        Airborne = "airborne",
    }
}

struct Car {
    has_key: bool,
    log: Vec<String>,
}

impl Subject for Car {
    fn operations(&self) -> &Operations<Self> {
        static OPS: OnceLock<Operations<Car>> = OnceLock::new();
        OPS.get_or_init(|| {
            Operations::new()
                .query("has_key?", |car: &Car, _| car.has_key)
                .query("rocket?", |_: &Car, _| false)
                .command("ignite", |car: &mut Car, args| {
                    car.log.push(format!("ignite {}", turnstile::core::Arguments(args)));
                })
                .command("honk", |car: &mut Car, _| car.log.push("honk".to_string()))
        })
    }
}

const TRANSITIONS: &str = r#"[
    {"from": "parked", "to": "airborne", "guard": "rocket?"},
    {"from": "parked", "to": "engine_started", "guard": "has_key?", "on_transition": ["honk", "ignite"]},
    {"from": "engine_started", "to": "parked"}
]"#;

fn fire(
    transitions: &[TransitionSpec<CarState, Car>],
    car: &mut Car,
    current: &CarState,
    args: &[Value],
) -> Result<CarState, String> {
    let candidates: Vec<_> = transitions.iter().filter(|t| t.matches(current)).collect();

    for candidate in &candidates {
        if candidate.is_executable(car, args).map_err(|e| e.to_string())? {
            candidate.execute(car, args).map_err(|e| e.to_string())?;
            return Ok(candidate.to().clone());
        }
    }

    match candidates.first() {
        Some(candidate) => Err(candidate
            .ensure_executable(car, args)
            .err()
            .map_or_else(|| "no transition".to_string(), |e| e.to_string())),
        None => Err(format!("no transition from {current:?}")),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Car Transitions ===\n");

    let transitions: Vec<TransitionSpec<CarState, Car>> = match load_specs(TRANSITIONS) {
        Ok(transitions) => transitions,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return;
        }
    };

    let mut car = Car {
        has_key: false,
        log: Vec::new(),
    };
    let mut state = CarState::Parked;

    println!("Without a key:");
    match fire(&transitions, &mut car, &state, &[Value::symbol("fast")]) {
        Ok(next) => state = next,
        Err(message) => println!("  {message}"),
    }

    car.has_key = true;
    println!("\nWith a key:");
    match fire(&transitions, &mut car, &state, &[Value::symbol("fast")]) {
        Ok(next) => {
            println!("  {state:?} -> {next:?}");
            state = next;
        }
        Err(message) => println!("  {message}"),
    }

    println!("\nSide effects: {:?}", car.log);
    println!("Final state: {state:?}");

    println!("\n=== Example Complete ===");
}
