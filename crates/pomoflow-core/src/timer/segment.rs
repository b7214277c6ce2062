use serde::{Deserialize, Serialize};

/// One timed phase of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Segment {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl Segment {
    pub fn label(self) -> &'static str {
        match self {
            Segment::Focus => "Focus Time",
            Segment::ShortBreak => "Short Break",
            Segment::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Segment::Focus)
    }

    /// Segment that follows a finished focus, given the cycle position
    /// after it was counted.
    pub fn break_after_focus(cycle_counter: u32, cycles_before_long_break: u32) -> Self {
        if cycles_before_long_break > 0 && cycle_counter % cycles_before_long_break == 0 {
            Segment::LongBreak
        } else {
            Segment::ShortBreak
        }
    }
}
