//! Core value types of the state machine.
//!
//! This module contains the pieces a machine is built from:
//! - [`State`]: a named mode with a timeout and enter/exit actions
//! - [`Event`]: a named trigger with a per-state transition table
//! - [`StateHistory`]: bounded record of the transitions taken
//!
//! None of these types know about each other's names; referential integrity
//! is checked when a machine is built.

mod event;
mod history;
mod state;

pub use event::{Event, WILDCARD};
pub use history::{StateHistory, TransitionCause, TransitionRecord, DEFAULT_HISTORY_CAPACITY};
pub use state::{EnterAction, Entry, ExitAction, State};
