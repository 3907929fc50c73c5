//! Errors reported while a machine is running.

use thiserror::Error;

/// Errors that can occur when firing an event.
///
/// All of them are recovered inside the machine: it is never left half way
/// through a transition. `UnknownEvent` and `IllegalTransition` leave the
/// machine exactly where it was. `UnknownRedirect` means the event's own
/// transition happened and the machine settled in `from`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireError {
    #[error("Unknown event '{event}' fired in state '{state}'")]
    UnknownEvent { event: String, state: String },

    #[error("Event '{event}' has no transition from state '{state}'")]
    IllegalTransition { event: String, state: String },

    #[error("State '{from}' redirected to unknown state '{to}'")]
    UnknownRedirect { from: String, to: String },
}

impl FireError {
    /// Whether the machine's state is guaranteed unchanged by the failed call.
    pub fn left_state_unchanged(&self) -> bool {
        !matches!(self, FireError::UnknownRedirect { .. })
    }
}
