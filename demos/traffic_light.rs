//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic machine driven entirely by timeouts.
//!
//! Key concepts:
//! - Typed state and event names with `name_enum!`
//! - Per-state timeouts awaited with `wait_for_timeout`
//! - An observer that escalates each timeout into a transition
//!
//! Run with: cargo run --example traffic_light

use statewire::{name_enum, Event, Machine, MachineObserver, State};
use std::rc::Rc;
use std::time::Duration;

name_enum! {
    enum Light {
        Red,
        Green,
        Yellow,
    }
}

name_enum! {
    enum Signal {
        Next,
    }
}

struct Controller;

impl MachineObserver<()> for Controller {
    fn on_timeout(&self, machine: &mut Machine<()>, state: &str) {
        println!("  {state} elapsed");
        if let Err(error) = machine.fire(Signal::Next) {
            eprintln!("  could not advance: {error}");
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let controller = Rc::new(Controller);
    let mut machine = Machine::<()>::builder("crossing")
        .state(State::new(Light::Red).with_timeout(Duration::from_millis(300)))
        .state(State::new(Light::Green).with_timeout(Duration::from_millis(300)))
        .state(State::new(Light::Yellow).with_timeout(Duration::from_millis(100)))
        .event(
            Event::new(Signal::Next)
                .transition(Light::Red, Light::Green)
                .transition(Light::Green, Light::Yellow)
                .transition(Light::Yellow, Light::Red),
        )
        .observer(&controller)
        .build()
        .unwrap();

    println!("Initial state: {}\n", machine.current_state_name());

    for _ in 0..6 {
        machine.wait_for_timeout().await;
        println!("Now showing: {}", machine.current_state_name());
    }

    println!("\nLights shown: {}", machine.history().path().join(" -> "));
    println!("\n=== Example Complete ===");
}
