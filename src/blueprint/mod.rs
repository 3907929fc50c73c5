//! Declarative machine definitions loaded from TOML or JSON.
//!
//! A [`MachineBlueprint`] carries everything about a machine that is plain
//! data: its name, states and timeouts, events and their transitions, the
//! default state and the history capacity. Actions are code, so they are
//! attached afterwards on the [`MachineBuilder`] returned by
//! [`MachineBlueprint::into_builder`].
//!
//! ```toml
//! name = "job"
//! default_state = "Idle"
//!
//! [[states]]
//! name = "Idle"
//!
//! [[states]]
//! name = "Waiting"
//! timeout_secs = 5.0
//!
//! [[events]]
//! name = "Start"
//! transitions = { Idle = "Waiting" }
//! ```

pub mod error;

pub use error::BlueprintError;

use crate::builder::{BuildError, DefinitionError, MachineBuilder};
use crate::core::{Event, State, DEFAULT_HISTORY_CAPACITY};
use crate::runtime::Machine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Serializable description of a machine, without its actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineBlueprint {
    /// Diagnostic name of the machine.
    pub name: String,

    /// State to start in; the first state when absent.
    #[serde(default)]
    pub default_state: Option<String>,

    /// Maximum number of transition records kept.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    pub states: Vec<StateBlueprint>,

    #[serde(default)]
    pub events: Vec<Event>,
}

// Default history capacity: 64 records.
fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// Serializable description of a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateBlueprint {
    pub name: String,

    /// Timeout in seconds. Zero or negative means no timeout.
    #[serde(default)]
    pub timeout_secs: f64,
}

impl StateBlueprint {
    /// The timeout as a duration, `None` when non-positive or when it rounds
    /// down to zero nanoseconds.
    pub fn timeout(&self) -> Result<Option<Duration>, DefinitionError> {
        let seconds = self.timeout_secs;
        if seconds.is_nan() || seconds == f64::INFINITY {
            return Err(self.invalid_timeout());
        }
        if seconds <= 0.0 {
            return Ok(None);
        }
        Duration::try_from_secs_f64(seconds)
            .map(|timeout| (!timeout.is_zero()).then_some(timeout))
            .map_err(|_| self.invalid_timeout())
    }

    fn invalid_timeout(&self) -> DefinitionError {
        DefinitionError::InvalidTimeout {
            state: self.name.clone(),
            seconds: self.timeout_secs,
        }
    }
}

impl MachineBlueprint {
    pub fn from_toml_str(contents: &str) -> Result<Self, BlueprintError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, BlueprintError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load a blueprint file. A `.json` extension selects JSON; anything else
    /// is read as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BlueprintError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), json = is_json, "Loading machine blueprint");
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Turn the blueprint into a builder, ready for actions to be attached.
    ///
    /// Invalid timeouts are not rejected here; they are reported by
    /// [`MachineBuilder::build`] together with any other definition problem.
    pub fn into_builder<P: 'static>(self) -> MachineBuilder<P> {
        let mut builder = MachineBuilder::new(self.name).history_capacity(self.history_capacity);

        for state in self.states {
            builder = match state.timeout() {
                Ok(timeout) => builder.state(
                    State::new(state.name).with_timeout(timeout.unwrap_or(Duration::ZERO)),
                ),
                Err(problem) => builder.state(State::new(state.name)).defer(problem),
            };
        }

        builder = builder.events(self.events);
        match self.default_state {
            Some(state) => builder.default_state(state),
            None => builder,
        }
    }

    /// Build a machine whose states have no actions.
    pub fn build<P: 'static>(self) -> Result<Machine<P>, BuildError> {
        self.into_builder().build()
    }
}
