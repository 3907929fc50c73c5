//! Observer contract for errors and timeouts.

use crate::runtime::error::FireError;
use crate::runtime::machine::Machine;

/// Receives a machine's error and timeout notifications.
///
/// The machine only holds a weak reference to its observer, so dropping the
/// observer silently stops notifications. Both callbacks run synchronously on
/// whatever context made the triggering call. Observers take `&self`; use
/// `Cell`/`RefCell` for any bookkeeping.
///
/// # Example
///
/// ```rust
/// use statewire::{Event, FireError, Machine, MachineObserver, State};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// #[derive(Default)]
/// struct Log(RefCell<Vec<String>>);
///
/// impl MachineObserver for Log {
///     fn on_error(&self, _machine: &Machine, error: &FireError) {
///         self.0.borrow_mut().push(error.to_string());
///     }
/// }
///
/// let log = Rc::new(Log::default());
/// let mut machine: Machine = Machine::create(
///     "door",
///     vec![State::new("Closed"), State::new("Open")],
///     vec![Event::new("Open").transition("Closed", "Open")],
///     None,
/// )
/// .unwrap();
/// machine.set_observer(&log);
///
/// assert!(machine.fire("Slam").is_err());
/// assert_eq!(log.0.borrow().len(), 1);
/// ```
pub trait MachineObserver<P = serde_json::Value> {
    /// An event was unknown, not legal from the current state, or an enter
    /// action redirected to a state that does not exist.
    fn on_error(&self, _machine: &Machine<P>, _error: &FireError) {}

    /// `state` stayed current for its whole timeout.
    ///
    /// The machine does not move on its own; fire an event on `machine` to
    /// escalate the timeout into a transition.
    fn on_timeout(&self, _machine: &mut Machine<P>, _state: &str) {}
}
