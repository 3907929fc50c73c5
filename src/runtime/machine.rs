//! The state machine itself.

use crate::builder::{BuildError, MachineBuilder};
use crate::core::{Entry, Event, State, StateHistory, TransitionCause, TransitionRecord};
use crate::runtime::error::FireError;
use crate::runtime::observer::MachineObserver;
use crate::runtime::timer::StateTimer;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// A named-state, event-driven state machine.
///
/// Built once from a validated set of states and events, a machine then only
/// changes its current state, its previous state name, its timer and its
/// history, in response to [`fire_event`](Self::fire_event) calls and timer
/// checks. All calls are expected on one execution context; the machine does
/// no locking and is not `Send`.
///
/// # Example
///
/// ```rust
/// use statewire::{Event, Machine, State};
/// use std::time::Duration;
///
/// let mut machine: Machine = Machine::create(
///     "job",
///     vec![
///         State::new("Idle"),
///         State::new("Waiting").with_timeout(Duration::from_secs(5)),
///         State::new("Done"),
///     ],
///     vec![
///         Event::new("Start").transition("Idle", "Waiting"),
///         Event::new("Finish").transition("Waiting", "Done"),
///     ],
///     Some("Idle"),
/// )
/// .unwrap();
///
/// machine.fire("Start").unwrap();
/// assert_eq!(machine.current_state_name(), "Waiting");
/// assert!(machine.timeout_deadline().is_some());
///
/// machine.fire("Finish").unwrap();
/// assert_eq!(machine.current_state_name(), "Done");
/// assert_eq!(machine.previous_state_name(), Some("Waiting"));
/// assert!(machine.timeout_deadline().is_none());
/// ```
pub struct Machine<P = serde_json::Value> {
    name: String,
    states: Vec<State<P>>,
    index: HashMap<String, usize>,
    events: HashMap<String, Event>,
    current: usize,
    previous: Option<String>,
    observer: Option<Weak<dyn MachineObserver<P>>>,
    timer: StateTimer,
    history: StateHistory,
}

impl<P: 'static> Machine<P> {
    /// Build a machine from states and events.
    ///
    /// Starts in `default_state`, or the first state when `None`. See
    /// [`MachineBuilder`] for the fluent equivalent.
    pub fn create(
        name: impl Into<String>,
        states: Vec<State<P>>,
        events: Vec<Event>,
        default_state: Option<&str>,
    ) -> Result<Self, BuildError> {
        let builder = MachineBuilder::new(name).states(states).events(events);
        match default_state {
            Some(state) => builder.default_state(state).build(),
            None => builder.build(),
        }
    }

    /// Start a fluent builder.
    pub fn builder(name: impl Into<String>) -> MachineBuilder<P> {
        MachineBuilder::new(name)
    }

    /// Assemble a machine from an already validated definition and run the
    /// initial state's enter action.
    pub(crate) fn start(
        name: String,
        states: Vec<State<P>>,
        events: Vec<Event>,
        initial: usize,
        history: StateHistory,
        observer: Option<Weak<dyn MachineObserver<P>>>,
    ) -> Result<Self, BuildError> {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name().to_string(), i))
            .collect();
        let events = events
            .into_iter()
            .map(|e| (e.name().to_string(), e))
            .collect();

        let mut machine = Self {
            name,
            states,
            index,
            events,
            current: initial,
            previous: None,
            observer,
            timer: StateTimer::default(),
            history,
        };

        debug!(
            machine = %machine.name,
            state = %machine.current_state_name(),
            "Starting state machine"
        );

        let entry = machine.states[initial].enter(None);
        let outcome = machine.follow_redirects(entry);
        machine.arm_timer();

        outcome.map_err(|to| BuildError::UnknownRedirect {
            from: machine.current_state_name().to_string(),
            to,
        })?;
        Ok(machine)
    }

    /// Fire an event without a payload.
    pub fn fire(&mut self, event: impl AsRef<str>) -> Result<(), FireError> {
        self.fire_event(event, None)
    }

    /// Fire an event by name, carrying an optional payload to the target's
    /// enter action.
    ///
    /// On success the machine has left its current state (running its exit
    /// action), entered the event's target, and followed any enter-action
    /// redirects until a state settled. The settled state's timer is armed if
    /// it has a timeout.
    ///
    /// An unknown event, or one with no transition from the current state,
    /// leaves the machine untouched and is reported to the observer as well as
    /// returned.
    pub fn fire_event(&mut self, event: impl AsRef<str>, payload: Option<P>) -> Result<(), FireError> {
        let event = event.as_ref();
        let target = match self.resolve(event) {
            Ok(target) => target,
            Err(error) => {
                self.report(&error);
                return Err(error);
            }
        };

        let entry = self.hop(
            target,
            payload.as_ref(),
            TransitionCause::Event(event.to_string()),
        );
        let outcome = self.follow_redirects(entry);
        self.arm_timer();

        outcome.map_err(|to| {
            let error = FireError::UnknownRedirect {
                from: self.current_state_name().to_string(),
                to,
            };
            self.report(&error);
            error
        })
    }

    /// Whether `event` is known and has a transition from the current state.
    pub fn can_fire(&self, event: &str) -> bool {
        self.resolve(event).is_ok()
    }

    /// Register the observer. Only a weak reference is kept.
    pub fn set_observer<O>(&mut self, observer: &Rc<O>)
    where
        O: MachineObserver<P> + 'static,
    {
        let observer: Weak<O> = Rc::downgrade(observer);
        let observer: Weak<dyn MachineObserver<P>> = observer;
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Report the current state's timeout if its deadline has passed.
    ///
    /// Returns the timed-out state's name. A timeout is reported at most once;
    /// the machine stays in the state.
    pub fn check_timeout(&mut self) -> Option<String> {
        self.check_timeout_at(Instant::now())
    }

    /// [`check_timeout`](Self::check_timeout) against an explicit clock reading.
    pub fn check_timeout_at(&mut self, now: Instant) -> Option<String> {
        let state = self.timer.expire(now)?;
        info!(machine = %self.name, state = %state, "State timed out");

        if let Some(observer) = self.observer() {
            observer.on_timeout(self, &state);
        }
        Some(state)
    }

    /// Wait for the current state's timeout and report it.
    ///
    /// Never resolves while no timer is armed. Dropping the future (for
    /// example when another `tokio::select!` branch wins) loses nothing: the
    /// timer stays armed until it is reported or cancelled by a transition.
    pub async fn wait_for_timeout(&mut self) -> String {
        loop {
            let Some(deadline) = self.timer.deadline() else {
                std::future::pending::<()>().await;
                continue;
            };
            tokio::time::sleep_until(deadline).await;
            if let Some(state) = self.check_timeout() {
                return state;
            }
        }
    }

    /// When the pending timeout will expire, if one is armed.
    pub fn timeout_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    fn observer(&self) -> Option<Rc<dyn MachineObserver<P>>> {
        self.observer.as_ref().and_then(Weak::upgrade)
    }

    fn report(&self, error: &FireError) {
        warn!(machine = %self.name, %error, "Event rejected");
        if let Some(observer) = self.observer() {
            observer.on_error(self, error);
        }
    }

    fn resolve(&self, event: &str) -> Result<usize, FireError> {
        let state = self.current_state_name();
        let definition = self
            .events
            .get(event)
            .ok_or_else(|| FireError::UnknownEvent {
                event: event.to_string(),
                state: state.to_string(),
            })?;
        let target = definition
            .target_for(state)
            .ok_or_else(|| FireError::IllegalTransition {
                event: event.to_string(),
                state: state.to_string(),
            })?;

        // Targets are validated at build time.
        Ok(self.index[target])
    }

    /// Leave the current state for `target` and run its enter action.
    fn hop(&mut self, target: usize, payload: Option<&P>, cause: TransitionCause) -> Entry<P> {
        if self.timer.cancel() {
            debug!(machine = %self.name, state = %self.current_state_name(), "Timer cancelled");
        }

        let from = self.current;
        self.states[from].exit();
        self.previous = Some(self.states[from].name().to_string());
        self.current = target;

        debug!(
            machine = %self.name,
            from = %self.states[from].name(),
            to = %self.states[target].name(),
            ?cause,
            "Transition"
        );
        self.history.record(TransitionRecord::now(
            self.states[from].name(),
            self.states[target].name(),
            cause,
        ));

        self.states[target].enter(payload)
    }

    /// Follow redirects until a state settles. On a redirect to an unknown
    /// state, stop where we are and return that name.
    fn follow_redirects(&mut self, mut entry: Entry<P>) -> Result<(), String> {
        while let Entry::Redirect { state, payload } = entry {
            let Some(&target) = self.index.get(&state) else {
                return Err(state);
            };
            entry = self.hop(target, payload.as_ref(), TransitionCause::Redirect);
        }
        Ok(())
    }

    fn arm_timer(&mut self) {
        let state = &self.states[self.current];
        if let Some(timeout) = state.timeout() {
            self.timer.arm(state.name(), timeout, Instant::now());
            if self.timer.deadline().is_some() {
                debug!(machine = %self.name, state = %state.name(), ?timeout, "Timer armed");
            }
        }
    }
}

impl<P> Machine<P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The state the machine is in. Never absent.
    pub fn current_state(&self) -> &State<P> {
        &self.states[self.current]
    }

    pub fn current_state_name(&self) -> &str {
        self.states[self.current].name()
    }

    /// The state occupied immediately before the current one, or `None`
    /// before the first transition.
    pub fn previous_state_name(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(State::name)
    }
}

impl<P> fmt::Debug for Machine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("current", &self.current_state_name())
            .field("previous", &self.previous)
            .field("states", &self.states.len())
            .field("events", &self.events.len())
            .field("timer", &self.timer)
            .finish()
    }
}
