//! Errors raised while building a state machine.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Default state '{name}' is not one of the machine's states")]
    UnknownDefaultState { name: String },

    #[error("Initial state '{from}' redirected to unknown state '{to}'")]
    UnknownRedirect { from: String, to: String },

    #[error("Invalid machine definition ({} problem(s)): {}", .problems.len(), summarize(.problems))]
    InvalidDefinition { problems: Vec<DefinitionError> },
}

/// A single problem found while validating a machine definition.
///
/// Validation collects every problem rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Event '{name}' is declared more than once")]
    DuplicateEvent { name: String },

    #[error("'{name}' is reserved and cannot name a state")]
    ReservedStateName { name: String },

    #[error("Event '{event}' has a transition from unknown state '{from}'")]
    UnknownSource { event: String, from: String },

    #[error("Event '{event}' transitions from '{from}' to unknown state '{to}'")]
    UnknownTarget {
        event: String,
        from: String,
        to: String,
    },

    #[error("State '{state}' has an invalid timeout of {seconds} seconds")]
    InvalidTimeout { state: String, seconds: f64 },

    #[error("Action attached to unknown state '{state}'")]
    ActionForUnknownState { state: String },
}

/// A string did not match any variant of a [`name_enum!`](crate::name_enum) enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown name '{name}'")]
pub struct UnknownName {
    pub name: String,
}

fn summarize(problems: &[DefinitionError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
