//! Builder for constructing state machines.

use crate::builder::error::{BuildError, DefinitionError};
use crate::builder::validate;
use crate::core::{Entry, Event, State, StateHistory, DEFAULT_HISTORY_CAPACITY};
use crate::runtime::{Machine, MachineObserver};
use std::rc::{Rc, Weak};

/// Builder for constructing state machines with a fluent API.
///
/// Nothing is checked until [`build`](Self::build), which reports every
/// definition problem at once.
///
/// # Example
///
/// ```rust
/// use statewire::{Entry, Event, MachineBuilder, State};
///
/// let machine = MachineBuilder::<String>::new("player")
///     .state(State::new("Stopped"))
///     .state(State::new("Playing"))
///     .event(Event::new("Play").transition("Stopped", "Playing"))
///     .event(Event::new("Stop").from_any("Stopped"))
///     .on_enter("Playing", |_track: Option<&String>| Entry::Settle)
///     .default_state("Stopped")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current_state_name(), "Stopped");
/// ```
pub struct MachineBuilder<P = serde_json::Value> {
    name: String,
    states: Vec<State<P>>,
    events: Vec<Event>,
    default_state: Option<String>,
    history_capacity: usize,
    observer: Option<Weak<dyn MachineObserver<P>>>,
    deferred: Vec<DefinitionError>,
}

impl<P: 'static> MachineBuilder<P> {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            events: Vec::new(),
            default_state: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            observer: None,
            deferred: Vec::new(),
        }
    }

    /// Add a state. The first state added is the default initial state.
    pub fn state(mut self, state: State<P>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = State<P>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add an event.
    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Add multiple events at once.
    pub fn events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.events.extend(events);
        self
    }

    /// Start in `state` instead of the first state.
    pub fn default_state(mut self, state: impl Into<String>) -> Self {
        self.default_state = Some(state.into());
        self
    }

    /// Keep at most `capacity` transition records.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Register an observer. Only a weak reference is kept.
    pub fn observer<O>(mut self, observer: &Rc<O>) -> Self
    where
        O: MachineObserver<P> + 'static,
    {
        let observer: Weak<O> = Rc::downgrade(observer);
        let observer: Weak<dyn MachineObserver<P>> = observer;
        self.observer = Some(observer);
        self
    }

    /// Replace the enter action of an already added state.
    pub fn on_enter<F>(mut self, state: impl AsRef<str>, action: F) -> Self
    where
        F: FnMut(Option<&P>) -> Entry<P> + 'static,
    {
        match self.find(state.as_ref()) {
            Some(target) => target.replace_enter(Box::new(action)),
            None => self.defer_unknown(state.as_ref()),
        }
        self
    }

    /// Replace the exit action of an already added state.
    pub fn on_exit<F>(mut self, state: impl AsRef<str>, action: F) -> Self
    where
        F: FnMut() + 'static,
    {
        match self.find(state.as_ref()) {
            Some(target) => target.replace_exit(Box::new(action)),
            None => self.defer_unknown(state.as_ref()),
        }
        self
    }

    /// Record a problem to be reported by `build`.
    pub(crate) fn defer(mut self, problem: DefinitionError) -> Self {
        self.deferred.push(problem);
        self
    }

    /// Validate the definition and start the machine.
    ///
    /// The initial state's enter action runs before this returns.
    pub fn build(self) -> Result<Machine<P>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        validate::problems(validate::definition(
            &self.states,
            &self.events,
            &self.deferred,
        ))
        .map_err(|problems| BuildError::InvalidDefinition { problems })?;

        let initial = match &self.default_state {
            Some(name) => self
                .states
                .iter()
                .position(|s| s.name() == name)
                .ok_or_else(|| BuildError::UnknownDefaultState { name: name.clone() })?,
            None => 0,
        };

        Machine::start(
            self.name,
            self.states,
            self.events,
            initial,
            StateHistory::with_capacity(self.history_capacity),
            self.observer,
        )
    }

    fn find(&mut self, name: &str) -> Option<&mut State<P>> {
        self.states.iter_mut().find(|s| s.name() == name)
    }

    fn defer_unknown(&mut self, state: &str) {
        self.deferred.push(DefinitionError::ActionForUnknownState {
            state: state.to_string(),
        });
    }
}
