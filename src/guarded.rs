//! Turn a panic inside a host-supplied block into an error value.
//!
//! The machine never calls this itself; a panic in an enter or exit action
//! propagates out of `fire_event`. Hosts that want to survive faulty actions
//! wrap the action body.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// A panic caught by [`run_guarded`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Action panicked: {message}")]
pub struct ActionFault {
    pub message: String,
}

/// Run `block`, returning its value or the panic it raised.
///
/// The panic hook still runs, so the panic is printed as usual.
///
/// # Example
///
/// ```rust
/// use statewire::run_guarded;
///
/// assert_eq!(run_guarded(|| 2 + 2), Ok(4));
///
/// let fault = run_guarded(|| -> u32 { panic!("sensor offline") }).unwrap_err();
/// assert_eq!(fault.message, "sensor offline");
/// ```
pub fn run_guarded<T>(block: impl FnOnce() -> T) -> Result<T, ActionFault> {
    panic::catch_unwind(AssertUnwindSafe(block)).map_err(|payload| ActionFault {
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entry, Event, State};
    use crate::runtime::Machine;

    #[test]
    fn returns_value_when_block_succeeds() {
        assert_eq!(run_guarded(|| "fine"), Ok("fine"));
    }

    #[test]
    fn captures_formatted_message() {
        let code = 7;
        let fault = run_guarded(|| -> u32 { panic!("failed with code {code}") }).unwrap_err();
        assert_eq!(fault.message, "failed with code 7");
        assert_eq!(fault.to_string(), "Action panicked: failed with code 7");
    }

    #[test]
    fn non_string_payload() {
        let fault = run_guarded(|| -> u32 { std::panic::panic_any(42_u8) }).unwrap_err();
        assert_eq!(fault.message, "non-string panic payload");
    }

    #[test]
    fn guarded_action_keeps_machine_usable() {
        let mut machine: Machine<u32> = Machine::create(
            "guarded",
            vec![
                State::new("Idle"),
                State::new("Reading").on_enter(|reading: Option<&u32>| {
                    let checked = run_guarded(|| {
                        let value = reading.copied().unwrap_or_default();
                        assert!(value < 100, "reading out of range");
                        value
                    });
                    match checked {
                        Ok(_) => Entry::Settle,
                        Err(_) => Entry::redirect("Fault"),
                    }
                }),
                State::new("Fault"),
            ],
            vec![
                Event::new("Read").transition("Idle", "Reading"),
                Event::new("Reset").from_any("Idle"),
            ],
            None,
        )
        .unwrap();

        machine.fire_event("Read", Some(500)).unwrap();
        assert_eq!(machine.current_state_name(), "Fault");

        machine.fire("Reset").unwrap();
        machine.fire_event("Read", Some(12)).unwrap();
        assert_eq!(machine.current_state_name(), "Reading");
    }
}
