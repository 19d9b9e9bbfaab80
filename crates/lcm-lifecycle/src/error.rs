use crate::types::{LifecycleEvent, LifecycleState};

/// Returned when the driver is asked for a move the transition table forbids.
///
/// **Callers MUST treat this as a fatal programming error.** It means the
/// owning component's lifecycle callbacks are out of sync with the state
/// machine. The state is never changed when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// `event` has no edge out of `from`.
    #[error("invalid lifecycle transition: {event} is not legal from {from}")]
    InvalidTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },

    /// `to` cannot be reached from `from` by any sequence of events.
    #[error("unreachable lifecycle state: no event path from {from} to {to}")]
    UnreachableState {
        from: LifecycleState,
        to: LifecycleState,
    },
}

impl LifecycleError {
    /// The state the machine was in when the request was refused.
    pub fn from_state(&self) -> LifecycleState {
        match self {
            LifecycleError::InvalidTransition { from, .. } => *from,
            LifecycleError::UnreachableState { from, .. } => *from,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLifecycleError {
    #[error("unknown lifecycle state: {0:?}")]
    State(String),

    #[error("unknown lifecycle event: {0:?}")]
    Event(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_message_names_both_sides() {
        let err = LifecycleError::InvalidTransition {
            from: LifecycleState::Initialized,
            event: LifecycleEvent::OnStart,
        };
        let msg = err.to_string();
        assert!(msg.contains("ON_START"), "{msg}");
        assert!(msg.contains("INITIALIZED"), "{msg}");
        assert_eq!(err.from_state(), LifecycleState::Initialized);
    }

    #[test]
    fn parse_error_quotes_input() {
        let err = ParseLifecycleError::Event("ON_RESTART".to_string());
        assert_eq!(err.to_string(), "unknown lifecycle event: \"ON_RESTART\"");
    }
}
