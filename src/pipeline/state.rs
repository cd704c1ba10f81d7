//! Run state machine

use crate::integrator::TargetKind;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Fetched,
    Analyzed,
    Confirmed,
    Mutating(TargetKind),
    Done,
    Cancelled,
    Aborted,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Cancelled | RunState::Aborted)
    }

    /// Legal edges: the forward chain, mutations in [`TargetKind::ALL`] order,
    /// cancellation at the confirmation gate, abort from any live state.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        use RunState::*;

        match (*self, next) {
            (from, Aborted) => !from.is_terminal(),
            (Start, Fetched) | (Fetched, Analyzed) | (Analyzed, Confirmed) => true,
            (Analyzed, Cancelled) => true,
            (Confirmed, Mutating(kind)) => kind == TargetKind::ALL[0],
            (Mutating(current), Mutating(kind)) => next_kind(current) == Some(kind),
            (Mutating(current), Done) => next_kind(current).is_none(),
            _ => false,
        }
    }
}

fn next_kind(kind: TargetKind) -> Option<TargetKind> {
    let index = TargetKind::ALL.iter().position(|k| *k == kind)?;
    TargetKind::ALL.get(index + 1).copied()
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Start => write!(f, "START"),
            RunState::Fetched => write!(f, "FETCHED"),
            RunState::Analyzed => write!(f, "ANALYZED"),
            RunState::Confirmed => write!(f, "CONFIRMED"),
            RunState::Mutating(kind) => write!(f, "MUTATING({})", kind),
            RunState::Done => write!(f, "DONE"),
            RunState::Cancelled => write!(f, "CANCELLED"),
            RunState::Aborted => write!(f, "ABORTED"),
        }
    }
}

/// Current state plus every state visited so far
#[derive(Debug, Clone)]
pub struct StateTracker {
    history: Vec<RunState>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            history: vec![RunState::Start],
        }
    }

    pub fn current(&self) -> RunState {
        self.history
            .last()
            .copied()
            .unwrap_or(RunState::Start)
    }

    pub fn advance(&mut self, next: RunState) {
        let current = self.current();
        if !current.can_transition_to(next) {
            warn!(from = %current, to = %next, "Unexpected state transition");
        }
        debug!(from = %current, to = %next, "State transition");
        self.history.push(next);
    }

    pub fn history(&self) -> &[RunState] {
        &self.history
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_is_legal() {
        let mut path = vec![RunState::Fetched, RunState::Analyzed, RunState::Confirmed];
        path.extend(TargetKind::ALL.iter().map(|k| RunState::Mutating(*k)));
        path.push(RunState::Done);

        let mut current = RunState::Start;
        for next in path {
            assert!(current.can_transition_to(next), "{} -> {}", current, next);
            current = next;
        }
        assert!(current.is_terminal());
    }

    #[test]
    fn test_mutations_cannot_skip_or_reorder() {
        let first = RunState::Mutating(TargetKind::Manifest);
        assert!(!RunState::Confirmed.can_transition_to(RunState::Mutating(TargetKind::Wizard)));
        assert!(!first.can_transition_to(RunState::Mutating(TargetKind::Report)));
        assert!(!first.can_transition_to(RunState::Done));
    }

    #[test]
    fn test_terminals() {
        assert!(RunState::Analyzed.can_transition_to(RunState::Cancelled));
        assert!(RunState::Start.can_transition_to(RunState::Aborted));
        assert!(!RunState::Done.can_transition_to(RunState::Aborted));
        assert!(!RunState::Cancelled.can_transition_to(RunState::Confirmed));
        assert!(!RunState::Start.can_transition_to(RunState::Analyzed));
    }

    #[test]
    fn test_tracker_records_history() {
        let mut tracker = StateTracker::new();
        tracker.advance(RunState::Fetched);
        tracker.advance(RunState::Aborted);

        assert_eq!(tracker.current(), RunState::Aborted);
        assert_eq!(
            tracker.history(),
            &[RunState::Start, RunState::Fetched, RunState::Aborted]
        );
        assert_eq!(RunState::Mutating(TargetKind::Manifest).to_string(), "MUTATING(docker-compose.yml)");
    }
}
