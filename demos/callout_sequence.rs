//! Callout Sequence
//!
//! This example demonstrates enter-action redirects and wildcard transitions.
//! A callout request arrives as a JSON document; the `Start` state inspects it
//! and redirects straight to the right place without any extra events.
//!
//! Key concepts:
//! - Enter actions that redirect based on the payload
//! - A wildcard `Stop` event that is legal from every state
//! - Observer notifications for illegal events and timeouts
//! - Structured logging through `tracing`
//!
//! Run with: RUST_LOG=statewire=debug cargo run --example callout_sequence

use serde_json::{json, Value};
use statewire::{
    name_enum, Entry, Event, FireError, JsonDocument, Machine, MachineObserver, State, WILDCARD,
};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

name_enum! {
    enum Callout {
        Off = "[Off]",
        Start = "[Start]",
        Announce = "[Announce]",
        Delay = "[Delay]",
        Complete = "[Complete]",
    }
}

name_enum! {
    enum Trigger {
        Begin = "begin",
        Spoken = "spoken",
        Stop = "stop",
    }
}

struct Narrator;

impl MachineObserver for Narrator {
    fn on_error(&self, machine: &Machine, error: &FireError) {
        println!("  [{}] rejected: {error}", machine.name());
    }

    fn on_timeout(&self, machine: &mut Machine, state: &str) {
        println!("  [{}] {state} timed out, continuing", machine.name());
        let _ = machine.fire(Trigger::Spoken);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("statewire=debug,warn"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn build() -> Machine {
    Machine::builder("callouts")
        .state(State::new(Callout::Off))
        .state(State::new(Callout::Start).on_enter(|request: Option<&Value>| {
            let doc = JsonDocument::from(request.cloned().unwrap_or_default());
            match doc.array("callouts").map(Vec::len) {
                Some(0) | None => Entry::redirect(Callout::Complete),
                Some(_) => Entry::Redirect {
                    state: Callout::Announce.into(),
                    payload: request.cloned(),
                },
            }
        }))
        .state(State::new(Callout::Announce).on_enter(|request: Option<&Value>| {
            let doc = JsonDocument::from(request.cloned().unwrap_or_default());
            if let Some(urgent) = doc.first_matching("priority", &json!("urgent")) {
                println!("  announcing urgent: {}", urgent["text"]);
            }
            for text in doc
                .array("callouts")
                .into_iter()
                .flatten()
                .filter_map(|c| c["text"].as_str())
            {
                println!("  announcing: {text}");
            }
            Entry::Settle
        }))
        .state(State::new(Callout::Delay).with_timeout(Duration::from_millis(200)))
        .state(State::new(Callout::Complete).on_enter(|_| Entry::redirect(Callout::Off)))
        .event(Event::new(Trigger::Begin).transition(Callout::Off, Callout::Start))
        .event(
            Event::new(Trigger::Spoken)
                .transition(Callout::Announce, Callout::Delay)
                .transition(Callout::Delay, Callout::Complete),
        )
        .event(Event::new(Trigger::Stop).transition(WILDCARD, Callout::Off))
        .build()
        .unwrap()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    println!("=== Callout Sequence ===\n");

    let narrator = Rc::new(Narrator);
    let mut machine = build();
    machine.set_observer(&narrator);

    println!("Empty request:");
    machine.fire_event(Trigger::Begin, Some(json!({ "callouts": [] }))).unwrap();
    println!("  settled in {}\n", machine.current_state_name());

    println!("Request with callouts:");
    let request = JsonDocument::parse(
        r#"{
            "callouts": [
                { "text": "Main Street ahead" },
                { "text": "Bus stop on your left", "priority": "urgent" }
            ]
        }"#,
    )
    .unwrap();
    machine.fire_event(Trigger::Begin, Some(request.into_value())).unwrap();
    println!("  settled in {}", machine.current_state_name());

    machine.fire(Trigger::Spoken).unwrap();
    println!("  waiting in {}", machine.current_state_name());
    machine.wait_for_timeout().await;
    println!("  settled in {}\n", machine.current_state_name());

    println!("Illegal event:");
    let _ = machine.fire(Trigger::Spoken);

    println!("\nStop from anywhere:");
    machine
        .fire_event(Trigger::Begin, Some(json!({ "callouts": [{ "text": "Crosswalk" }] })))
        .unwrap();
    println!("  interrupted {}", machine.current_state_name());
    machine.fire(Trigger::Stop).unwrap();
    println!("  settled in {}", machine.current_state_name());

    println!("\nPath: {}", machine.history().path().join(" -> "));
    println!("\n=== Example Complete ===");
}
