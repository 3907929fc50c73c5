//! Statewire: a named-state, event-driven finite state machine
//!
//! A machine is a fixed set of named states and named events. Firing an event
//! looks up the transition for the current state, runs the current state's exit
//! action and the target's enter action, and arms the target's timeout. Enter
//! actions may redirect the machine straight on to another state, which lets a
//! state make a decision from the event payload without growing the transition
//! table.
//!
//! # Core Concepts
//!
//! - **State**: a name, an optional timeout, and enter/exit actions
//! - **Event**: a name and a map from current state to target state
//! - **Machine**: the live current state, driven by fired events and host-polled timeouts
//! - **Observer**: weakly held receiver of error and timeout notifications
//! - **Blueprint**: the data half of a machine, loadable from TOML or JSON
//!
//! # Example
//!
//! ```rust
//! use statewire::{Entry, Event, Machine, State, WILDCARD};
//! use std::time::Duration;
//!
//! let mut machine: Machine<u32> = Machine::builder("beacon")
//!     .state(State::new("Off"))
//!     .state(State::new("Start").on_enter(|distance: Option<&u32>| match distance {
//!         Some(&d) if d < 10 => Entry::redirect("Arrived"),
//!         _ => Entry::redirect("Tracking"),
//!     }))
//!     .state(State::new("Tracking").with_timeout(Duration::from_secs(30)))
//!     .state(State::new("Arrived"))
//!     .event(Event::new("Begin").transition("Off", "Start"))
//!     .event(Event::new("Stop").transition(WILDCARD, "Off"))
//!     .build()
//!     .unwrap();
//!
//! machine.fire_event("Begin", Some(250)).unwrap();
//! assert_eq!(machine.current_state_name(), "Tracking");
//! assert_eq!(machine.previous_state_name(), Some("Start"));
//!
//! machine.fire("Stop").unwrap();
//! machine.fire_event("Begin", Some(4)).unwrap();
//! assert_eq!(machine.current_state_name(), "Arrived");
//!
//! assert!(machine.fire("Begin").is_err());
//! ```

pub mod blueprint;
pub mod builder;
pub mod core;
pub mod document;
pub mod guarded;
pub mod runtime;

// Re-export commonly used types
pub use blueprint::{BlueprintError, MachineBlueprint, StateBlueprint};
pub use builder::{BuildError, DefinitionError, MachineBuilder, UnknownName};
pub use crate::core::{
    Entry, Event, State, StateHistory, TransitionCause, TransitionRecord,
    DEFAULT_HISTORY_CAPACITY, WILDCARD,
};
pub use document::{DocumentError, JsonDocument};
pub use guarded::{run_guarded, ActionFault};
pub use runtime::{FireError, Machine, MachineObserver};
