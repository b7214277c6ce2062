use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Segment, SessionView};

/// Every state change of the session engine produces an Event.
/// Front-ends print or log them; the render hook is the live channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        segment: Segment,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A segment ran down to zero and the next one was loaded.
    SegmentCompleted {
        from: Segment,
        to: Segment,
        focus_completed: u32,
        at: DateTime<Utc>,
    },
    SegmentSkipped {
        from: Segment,
        to: Segment,
        focus_completed: u32,
        at: DateTime<Utc>,
    },
    SegmentRestarted {
        segment: Segment,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The focus total was reached; the engine is terminal until reset.
    SessionCompleted {
        focus_completed: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    SettingsApplied {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        view: SessionView,
        at: DateTime<Utc>,
    },
}
