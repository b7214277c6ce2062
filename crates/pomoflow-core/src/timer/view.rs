//! Display snapshot handed to the render hook.

use serde::{Deserialize, Serialize};

use super::segment::Segment;

/// Visual run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Running,
    Paused,
    Complete,
}

/// Progress through the current cycle, drawn as a row of dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleProgress {
    pub lit: u32,
    pub total: u32,
}

impl CycleProgress {
    /// All dots are lit once the session is complete.
    pub fn new(cycle_counter: u32, cycles_before_long_break: u32, complete: bool) -> Self {
        let total = cycles_before_long_break.max(1);
        let lit = if complete {
            total
        } else {
            (cycle_counter % total).min(total)
        };
        Self { lit, total }
    }

    /// `●●○○` style rendering.
    pub fn dots(&self) -> String {
        (0..self.total)
            .map(|i| if i < self.lit { '●' } else { '○' })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// `MM:SS`, zero padded.
    pub display: String,
    pub remaining_secs: u32,
    pub segment: Segment,
    pub label: String,
    pub mode: TimerMode,
    pub cycle: CycleProgress,
    pub focus_completed: u32,
}

/// Format whole seconds as `MM:SS`. Minutes are not capped at 59.
pub fn format_mmss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
