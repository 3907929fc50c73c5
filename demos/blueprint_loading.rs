//! Blueprint Loading
//!
//! This example demonstrates defining a machine as data and attaching its
//! actions in code.
//!
//! Key concepts:
//! - Reading a `MachineBlueprint` from TOML (a file path argument, or the
//!   built-in definition below)
//! - Attaching enter/exit actions by state name
//! - Definition problems reported all at once
//!
//! Run with: cargo run --example blueprint_loading [path/to/machine.toml]

use statewire::{BuildError, Entry, MachineBlueprint};

const DOOR: &str = r#"
name = "door"
default_state = "Closed"
history_capacity = 16

[[states]]
name = "Closed"

[[states]]
name = "Opening"

[[states]]
name = "Open"
timeout_secs = 30.0

[[states]]
name = "Locked"

[[events]]
name = "Open"
transitions = { Closed = "Opening" }

[[events]]
name = "Close"
transitions = { Open = "Closed" }

[[events]]
name = "Lock"
transitions = { Closed = "Locked" }

[[events]]
name = "Unlock"
transitions = { Locked = "Closed" }
"#;

const BROKEN: &str = r#"
name = "broken"

[[states]]
name = "A"

[[states]]
name = "A"

[[events]]
name = "Go"
transitions = { A = "Nowhere", Ghost = "A" }
"#;

fn main() {
    println!("=== Blueprint Loading ===\n");

    let blueprint = match std::env::args().nth(1) {
        Some(path) => MachineBlueprint::load(&path).unwrap(),
        None => MachineBlueprint::from_toml_str(DOOR).unwrap(),
    };
    println!(
        "Loaded '{}' with {} states and {} events\n",
        blueprint.name,
        blueprint.states.len(),
        blueprint.events.len()
    );

    let mut machine = blueprint
        .into_builder::<bool>()
        .on_enter("Opening", |blocked: Option<&bool>| match blocked {
            Some(true) => Entry::redirect("Closed"),
            _ => Entry::redirect("Open"),
        })
        .on_exit("Open", || println!("  door swings shut"))
        .build()
        .unwrap();

    for (event, blocked) in [("Open", true), ("Open", false), ("Close", false), ("Lock", false)] {
        let result = machine.fire_event(event, Some(blocked));
        println!(
            "{event:<6} (blocked: {blocked:<5}) -> {:<8} {}",
            machine.current_state_name(),
            if result.is_ok() { "" } else { "(rejected)" }
        );
    }

    println!("\nPath: {}", machine.history().path().join(" -> "));

    println!("\nA broken definition reports every problem:");
    match MachineBlueprint::from_toml_str(BROKEN).unwrap().build::<()>() {
        Err(BuildError::InvalidDefinition { problems }) => {
            for problem in problems {
                println!("  - {problem}");
            }
        }
        other => println!("  unexpected: {other:?}"),
    }

    println!("\n=== Example Complete ===");
}
