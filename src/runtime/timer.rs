//! The single per-state timeout timer.
//!
//! The machine never spawns anything: the timer is a deadline the host checks
//! on its own execution context, either by polling or by awaiting
//! [`Machine::wait_for_timeout`](crate::Machine::wait_for_timeout).

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Armed {
    state: String,
    deadline: Instant,
}

/// At most one pending timeout, scoped to the current state.
#[derive(Debug, Default)]
pub(crate) struct StateTimer {
    armed: Option<Armed>,
}

impl StateTimer {
    /// Arm for `state`, replacing any pending timeout.
    ///
    /// A timeout too large to represent as a deadline never fires.
    pub(crate) fn arm(&mut self, state: &str, timeout: Duration, now: Instant) {
        self.armed = now.checked_add(timeout).map(|deadline| Armed {
            state: state.to_string(),
            deadline,
        });
    }

    /// Cancel the pending timeout. Returns whether one was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|a| a.deadline)
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Disarm and return the state name if the deadline has passed.
    pub(crate) fn expire(&mut self, now: Instant) -> Option<String> {
        match &self.armed {
            Some(armed) if armed.deadline <= now => self.armed.take().map(|a| a.state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_idle() {
        let timer = StateTimer::default();
        assert!(!timer.is_armed());
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn expires_once_after_deadline() {
        let now = Instant::now();
        let mut timer = StateTimer::default();
        timer.arm("Waiting", Duration::from_secs(5), now);

        assert_eq!(timer.expire(now + Duration::from_secs(4)), None);
        assert_eq!(
            timer.expire(now + Duration::from_secs(5)),
            Some("Waiting".to_string())
        );
        assert_eq!(timer.expire(now + Duration::from_secs(6)), None);
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancel_prevents_expiry() {
        let now = Instant::now();
        let mut timer = StateTimer::default();
        timer.arm("Waiting", Duration::from_secs(1), now);

        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert_eq!(timer.expire(now + Duration::from_secs(10)), None);
    }

    #[test]
    fn rearming_replaces_previous_deadline() {
        let now = Instant::now();
        let mut timer = StateTimer::default();
        timer.arm("A", Duration::from_secs(1), now);
        timer.arm("B", Duration::from_secs(3), now);

        assert_eq!(timer.deadline(), Some(now + Duration::from_secs(3)));
        assert_eq!(timer.expire(now + Duration::from_secs(2)), None);
        assert_eq!(
            timer.expire(now + Duration::from_secs(3)),
            Some("B".to_string())
        );
    }

    #[test]
    fn unrepresentable_timeout_never_arms() {
        let mut timer = StateTimer::default();
        timer.arm("Forever", Duration::MAX, Instant::now());
        assert!(!timer.is_armed());
    }
}
