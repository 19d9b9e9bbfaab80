use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseLifecycleError;

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

/// Every state a lifecycle owner can occupy.
///
/// Live states are ordered `Initialized < Created < Started < Resumed`.
/// `Destroyed` is terminal and ranks below every live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Constructed, no lifecycle event dispatched yet.
    Initialized,
    /// After `ON_CREATE`, or after `ON_STOP`.
    Created,
    /// After `ON_START`, or after `ON_PAUSE`.
    Started,
    /// After `ON_RESUME`. Highest live state.
    Resumed,
    /// After `ON_DESTROY`. **Terminal.**
    Destroyed,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 5] = [
        LifecycleState::Initialized,
        LifecycleState::Created,
        LifecycleState::Started,
        LifecycleState::Resumed,
        LifecycleState::Destroyed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Initialized => "INITIALIZED",
            LifecycleState::Created => "CREATED",
            LifecycleState::Started => "STARTED",
            LifecycleState::Resumed => "RESUMED",
            LifecycleState::Destroyed => "DESTROYED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ParseLifecycleError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INITIALIZED" => Ok(LifecycleState::Initialized),
            "CREATED" => Ok(LifecycleState::Created),
            "STARTED" => Ok(LifecycleState::Started),
            "RESUMED" => Ok(LifecycleState::Resumed),
            "DESTROYED" => Ok(LifecycleState::Destroyed),
            _ => Err(ParseLifecycleError::State(s.to_string())),
        }
    }

    /// Returns `true` if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Destroyed)
    }

    /// `true` when `self` is the same as or above `other` in the live ordering.
    pub fn is_at_least(&self, other: LifecycleState) -> bool {
        self.rank() >= other.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            LifecycleState::Destroyed => 0,
            LifecycleState::Initialized => 1,
            LifecycleState::Created => 2,
            LifecycleState::Started => 3,
            LifecycleState::Resumed => 4,
        }
    }

    /// The state reached by applying `event` from `self`, or `None` when the
    /// transition table has no such edge.
    pub fn next(self, event: LifecycleEvent) -> Option<LifecycleState> {
        use LifecycleEvent::*;
        use LifecycleState::*;

        match (self, event) {
            (Initialized, OnCreate) => Some(Created),
            (Created, OnStart) => Some(Started),
            (Started, OnResume) => Some(Resumed),
            (Resumed, OnPause) => Some(Started),
            (Started, OnStop) => Some(Created),
            (Created, OnDestroy) => Some(Destroyed),
            _ => None,
        }
    }

    /// Events that walk from `self` to `target` one table edge at a time.
    ///
    /// Returns `None` when `target` cannot be reached: nothing leaves
    /// `Destroyed`, and nothing ever returns to `Initialized`.
    pub fn path_to(self, target: LifecycleState) -> Option<Vec<LifecycleEvent>> {
        let mut path = Vec::new();
        let mut at = self;

        while at != target {
            let step = if target.is_terminal() || at.rank() > target.rank() {
                LifecycleEvent::down_from(at)
            } else {
                LifecycleEvent::up_from(at)
            }?;
            path.push(step);
            at = step.target_state();
        }

        Some(path)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = ParseLifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Transition signals delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleEvent {
    OnCreate,
    OnStart,
    OnResume,
    OnPause,
    OnStop,
    OnDestroy,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 6] = [
        LifecycleEvent::OnCreate,
        LifecycleEvent::OnStart,
        LifecycleEvent::OnResume,
        LifecycleEvent::OnPause,
        LifecycleEvent::OnStop,
        LifecycleEvent::OnDestroy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::OnCreate => "ON_CREATE",
            LifecycleEvent::OnStart => "ON_START",
            LifecycleEvent::OnResume => "ON_RESUME",
            LifecycleEvent::OnPause => "ON_PAUSE",
            LifecycleEvent::OnStop => "ON_STOP",
            LifecycleEvent::OnDestroy => "ON_DESTROY",
        }
    }

    /// Accepts `ON_CREATE`, `on_create`, `on-create` and the bare `create`.
    pub fn parse(s: &str) -> Result<Self, ParseLifecycleError> {
        let norm = s.trim().to_ascii_uppercase().replace('-', "_");
        let bare = norm.strip_prefix("ON_").unwrap_or(&norm);
        match bare {
            "CREATE" => Ok(LifecycleEvent::OnCreate),
            "START" => Ok(LifecycleEvent::OnStart),
            "RESUME" => Ok(LifecycleEvent::OnResume),
            "PAUSE" => Ok(LifecycleEvent::OnPause),
            "STOP" => Ok(LifecycleEvent::OnStop),
            "DESTROY" => Ok(LifecycleEvent::OnDestroy),
            _ => Err(ParseLifecycleError::Event(s.to_string())),
        }
    }

    /// Parse a script such as `"ON_CREATE, start resume"`. Commas and
    /// whitespace both separate events.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, ParseLifecycleError> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// The state every legal application of this event lands in.
    pub fn target_state(&self) -> LifecycleState {
        match self {
            LifecycleEvent::OnCreate | LifecycleEvent::OnStop => LifecycleState::Created,
            LifecycleEvent::OnStart | LifecycleEvent::OnPause => LifecycleState::Started,
            LifecycleEvent::OnResume => LifecycleState::Resumed,
            LifecycleEvent::OnDestroy => LifecycleState::Destroyed,
        }
    }

    /// The event moving one step up from `state`.
    pub fn up_from(state: LifecycleState) -> Option<LifecycleEvent> {
        match state {
            LifecycleState::Initialized => Some(LifecycleEvent::OnCreate),
            LifecycleState::Created => Some(LifecycleEvent::OnStart),
            LifecycleState::Started => Some(LifecycleEvent::OnResume),
            LifecycleState::Resumed | LifecycleState::Destroyed => None,
        }
    }

    /// The event moving one step down from `state`.
    pub fn down_from(state: LifecycleState) -> Option<LifecycleEvent> {
        match state {
            LifecycleState::Resumed => Some(LifecycleEvent::OnPause),
            LifecycleState::Started => Some(LifecycleEvent::OnStop),
            LifecycleState::Created => Some(LifecycleEvent::OnDestroy),
            LifecycleState::Initialized | LifecycleState::Destroyed => None,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = ParseLifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The complete transition table as `(from, event, to)` rows.
pub const TRANSITIONS: [(LifecycleState, LifecycleEvent, LifecycleState); 6] = [
    (
        LifecycleState::Initialized,
        LifecycleEvent::OnCreate,
        LifecycleState::Created,
    ),
    (
        LifecycleState::Created,
        LifecycleEvent::OnStart,
        LifecycleState::Started,
    ),
    (
        LifecycleState::Started,
        LifecycleEvent::OnResume,
        LifecycleState::Resumed,
    ),
    (
        LifecycleState::Resumed,
        LifecycleEvent::OnPause,
        LifecycleState::Started,
    ),
    (
        LifecycleState::Started,
        LifecycleEvent::OnStop,
        LifecycleState::Created,
    ),
    (
        LifecycleState::Created,
        LifecycleEvent::OnDestroy,
        LifecycleState::Destroyed,
    ),
];
