//! Transition history tracking.
//!
//! Every hop a machine takes, whether triggered by an event or by an enter
//! action redirect, is recorded with a timestamp. The history is bounded so a
//! long-lived machine does not grow without limit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Number of records kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// What moved the machine from one state to the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// The named event fired.
    Event(String),
    /// The previous state's enter action redirected.
    Redirect,
}

/// Record of a single hop between two states.
///
/// # Example
///
/// ```rust
/// use statewire::{TransitionCause, TransitionRecord};
///
/// let record = TransitionRecord::now("Idle", "Waiting", TransitionCause::Event("Start".into()));
/// assert_eq!(record.from, "Idle");
/// assert_eq!(record.to, "Waiting");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state that was left
    pub from: String,
    /// The state that was entered
    pub to: String,
    pub cause: TransitionCause,
    /// When the hop happened
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Create a record stamped with the current time.
    pub fn now(from: impl Into<String>, to: impl Into<String>, cause: TransitionCause) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cause,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, bounded history of transitions.
///
/// When the history is full, recording a new transition drops the oldest one.
/// A capacity of zero keeps nothing.
///
/// # Example
///
/// ```rust
/// use statewire::{StateHistory, TransitionCause, TransitionRecord};
///
/// let mut history = StateHistory::with_capacity(2);
/// history.record(TransitionRecord::now("A", "B", TransitionCause::Event("go".into())));
/// history.record(TransitionRecord::now("B", "C", TransitionCause::Redirect));
/// history.record(TransitionRecord::now("C", "D", TransitionCause::Event("go".into())));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.path(), vec!["B", "C", "D"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    records: VecDeque<TransitionRecord>,
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StateHistory {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one if the history is full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Records from oldest to newest.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> + '_ {
        self.records.iter()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// State names traversed: the `from` of the oldest record, then the `to`
    /// of each record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }

    /// Time between the oldest and newest record, or `None` if empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(from: &str, to: &str) -> TransitionRecord {
        TransitionRecord::now(from, to, TransitionCause::Event("go".to_string()))
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn record_adds_transition() {
        let mut history = StateHistory::new();
        history.record(hop("Idle", "Waiting"));

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|r| r.to.as_str()), Some("Waiting"));
    }

    #[test]
    fn path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(hop("Idle", "Waiting"));
        history.record(hop("Waiting", "Done"));

        assert_eq!(history.path(), vec!["Idle", "Waiting", "Done"]);
    }

    #[test]
    fn oldest_records_are_evicted() {
        let mut history = StateHistory::with_capacity(3);
        for (from, to) in [("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")] {
            history.record(hop(from, to));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.path(), vec!["B", "C", "D", "E"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = StateHistory::with_capacity(0);
        history.record(hop("A", "B"));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(hop("A", "B"));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(hop("B", "C"));

        let duration = history.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_zero_duration() {
        let mut history = StateHistory::new();
        history.record(hop("A", "B"));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn redirect_cause_is_kept() {
        let mut history = StateHistory::new();
        history.record(TransitionRecord::now("Start", "Announce", TransitionCause::Redirect));

        assert_eq!(history.last().unwrap().cause, TransitionCause::Redirect);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_capacity(4);
        history.record(hop("A", "B"));

        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.capacity(), 4);
    }

    #[test]
    fn clear_empties_history() {
        let mut history = StateHistory::new();
        history.record(hop("A", "B"));
        history.clear();
        assert!(history.is_empty());
    }
}
