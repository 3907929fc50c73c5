//! Validation of machine definitions.
//!
//! Uses Stillwater's `Validation` so that a definition with several mistakes
//! reports all of them at once instead of one per build attempt.

use crate::builder::error::DefinitionError;
use crate::core::{Event, State, WILDCARD};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionError>>;

fn check(problem: Option<DefinitionError>) -> Check {
    match problem {
        Some(problem) => Validation::fail(problem),
        None => Validation::success(()),
    }
}

/// Check referential integrity and uniqueness of a definition.
///
/// `deferred` carries problems found earlier, while the definition was being
/// assembled, so they are reported together with these.
pub(crate) fn definition<P>(
    states: &[State<P>],
    events: &[Event],
    deferred: &[DefinitionError],
) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    let mut state_names = HashSet::new();
    for state in states {
        let name = state.name();
        checks.push(check(if name == WILDCARD {
            Some(DefinitionError::ReservedStateName {
                name: name.to_string(),
            })
        } else if !state_names.insert(name) {
            Some(DefinitionError::DuplicateState {
                name: name.to_string(),
            })
        } else {
            None
        }));
    }

    let mut event_names = HashSet::new();
    for event in events {
        if !event_names.insert(event.name()) {
            checks.push(check(Some(DefinitionError::DuplicateEvent {
                name: event.name().to_string(),
            })));
        }

        for (from, to) in event.transitions() {
            if from != WILDCARD && !state_names.contains(from.as_str()) {
                checks.push(check(Some(DefinitionError::UnknownSource {
                    event: event.name().to_string(),
                    from: from.clone(),
                })));
            }
            if !state_names.contains(to.as_str()) {
                checks.push(check(Some(DefinitionError::UnknownTarget {
                    event: event.name().to_string(),
                    from: from.clone(),
                    to: to.clone(),
                })));
            }
        }
    }

    checks.extend(deferred.iter().cloned().map(Some).map(check));

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a failed validation into its problems, in the order found.
pub(crate) fn problems(result: Check) -> Result<(), Vec<DefinitionError>> {
    match result {
        Validation::Success(_) => Ok(()),
        Validation::Failure(problems) => Err(problems.iter().cloned().collect()),
    }
}
