//! Event definitions.
//!
//! An [`Event`] maps the name of the state the machine is in to the name of
//! the state it should move to when the event fires. Events are plain data
//! and serialize cleanly, so they can be declared in a blueprint file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source key that matches any current state.
///
/// An explicit entry for the current state takes precedence over it.
pub const WILDCARD: &str = "*";

/// A named trigger with a per-state transition table.
///
/// # Example
///
/// ```rust
/// use statewire::Event;
///
/// let stop = Event::new("Stop")
///     .transition("Running", "Stopping")
///     .from_any("Off");
///
/// assert_eq!(stop.target_for("Running"), Some("Stopping"));
/// assert_eq!(stop.target_for("Paused"), Some("Off"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(default)]
    transitions: BTreeMap<String, String>,
}

impl Event {
    /// Create an event with an empty transition table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: BTreeMap::new(),
        }
    }

    /// Create an event from `(from, to)` pairs.
    pub fn with_transitions<I, K, V>(name: impl Into<String>, transitions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            transitions: transitions
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }

    /// Add a transition from `from` to `to`.
    pub fn transition(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.transitions.insert(from.into(), to.into());
        self
    }

    /// Add a transition from any state to `to`.
    pub fn from_any(self, to: impl Into<String>) -> Self {
        self.transition(WILDCARD, to)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &BTreeMap<String, String> {
        &self.transitions
    }

    /// Resolve the target state when the event fires in `state`.
    pub fn target_for(&self, state: &str) -> Option<&str> {
        self.transitions
            .get(state)
            .or_else(|| self.transitions.get(WILDCARD))
            .map(String::as_str)
    }

    pub fn is_legal_from(&self, state: &str) -> bool {
        self.target_for(state).is_some()
    }
}
