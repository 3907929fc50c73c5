//! State definitions.
//!
//! A [`State`] describes one named mode of a machine: how long the machine may
//! sit in it before a timeout is reported, what happens on the way in, and what
//! happens on the way out. States are plain values; the machine owns them once
//! it is built.

use std::fmt;
use std::time::Duration;

/// Outcome of an enter action.
///
/// An enter action either accepts the state it was called for, or asks the
/// machine to jump straight on to another state. Redirects are unconditional:
/// they are not checked against any event's transition table.
///
/// # Example
///
/// ```rust
/// use statewire::{Entry, State};
///
/// let waiting: State<String> = State::new("Waiting").on_enter(|payload: Option<&String>| {
///     match payload.map(String::as_str) {
///         Some("cancel") => Entry::redirect("Idle"),
///         _ => Entry::Settle,
///     }
/// });
/// assert_eq!(waiting.name(), "Waiting");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<P> {
    /// Stay in the state that was just entered.
    Settle,

    /// Leave immediately for `state`, handing it `payload`.
    Redirect { state: String, payload: Option<P> },
}

impl<P> Entry<P> {
    /// Redirect to `state` without a payload.
    pub fn redirect(state: impl Into<String>) -> Self {
        Entry::Redirect {
            state: state.into(),
            payload: None,
        }
    }

    /// Redirect to `state`, carrying `payload` into its enter action.
    pub fn redirect_with(state: impl Into<String>, payload: P) -> Self {
        Entry::Redirect {
            state: state.into(),
            payload: Some(payload),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Entry::Redirect { .. })
    }
}

/// Enter action: receives the payload of the triggering event.
pub type EnterAction<P> = Box<dyn FnMut(Option<&P>) -> Entry<P>>;

/// Exit action: runs when the machine leaves the state.
pub type ExitAction = Box<dyn FnMut()>;

/// A named state with an optional timeout and enter/exit actions.
///
/// Actions default to "settle, do nothing". A zero timeout means the state
/// never times out.
///
/// # Example
///
/// ```rust
/// use statewire::State;
/// use std::time::Duration;
///
/// let idle: State = State::new("Idle");
/// let waiting: State = State::new("Waiting").with_timeout(Duration::from_secs(5));
///
/// assert_eq!(idle.timeout(), None);
/// assert_eq!(waiting.timeout(), Some(Duration::from_secs(5)));
/// ```
pub struct State<P = serde_json::Value> {
    name: String,
    timeout: Option<Duration>,
    enter: EnterAction<P>,
    exit: ExitAction,
}

impl<P: 'static> State<P> {
    /// Create a state with no timeout and no-op actions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: None,
            enter: Box::new(|_| Entry::Settle),
            exit: Box::new(|| {}),
        }
    }

    /// Set the timeout. `Duration::ZERO` disables it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Set the enter action.
    pub fn on_enter<F>(mut self, action: F) -> Self
    where
        F: FnMut(Option<&P>) -> Entry<P> + 'static,
    {
        self.enter = Box::new(action);
        self
    }

    /// Set the exit action.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.exit = Box::new(action);
        self
    }

    pub(crate) fn replace_enter(&mut self, action: EnterAction<P>) {
        self.enter = action;
    }

    pub(crate) fn replace_exit(&mut self, action: ExitAction) {
        self.exit = action;
    }
}

impl<P> State<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The timeout, or `None` when the state never times out.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn enter(&mut self, payload: Option<&P>) -> Entry<P> {
        (self.enter)(payload)
    }

    pub(crate) fn exit(&mut self) {
        (self.exit)()
    }
}

impl<P> fmt::Debug for State<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
