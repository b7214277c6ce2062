use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Duration, Local};
use clap::Subcommand;
use pomoflow_core::{NoopHooks, Segment, SessionContext, Settings, SettingsStore, TimerEngine};
use serde::Serialize;

use super::print_json;
use crate::interactive;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in this terminal
    Run {
        /// Stop the session after this many focus segments
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        total: Option<u32>,
        /// Append every session event to this file as JSON lines
        #[arg(long, value_name = "PATH")]
        events: Option<PathBuf>,
    },
    /// Show the upcoming segments, starting now
    Plan {
        /// Number of focus segments to plan
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedSegment {
    pub segment: Segment,
    pub label: String,
    pub minutes: u32,
    pub starts_at: DateTime<Local>,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { total, events } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(interactive::run(total, events.as_deref()))?;
        }
        TimerAction::Plan { count, json } => {
            let store = SettingsStore::open_default()?;
            let plan = plan_segments(&store.load_or_default(), count, Local::now());
            if json {
                print_json(&plan)?;
            } else {
                for (i, entry) in plan.iter().enumerate() {
                    println!(
                        "{:>2}. {}  {:<11} {:>3} min",
                        i + 1,
                        entry.starts_at.format("%H:%M"),
                        entry.label,
                        entry.minutes
                    );
                }
            }
        }
    }
    Ok(())
}

/// Segments up to and including the break after the `count`th focus, or
/// up to the focus that ends the session.
///
/// Driven through the engine with skips, which count focus segments exactly
/// like natural completion.
pub fn plan_segments(settings: &Settings, count: u32, start: DateTime<Local>) -> Vec<PlannedSegment> {
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(settings, &mut hooks);
    let mut engine = TimerEngine::new(settings);
    let now = Instant::now();
    let mut starts_at = start;
    let mut plan = Vec::new();

    loop {
        let segment = engine.segment();
        let minutes = settings.duration_min(segment);
        plan.push(PlannedSegment {
            segment,
            label: segment.label().to_string(),
            minutes,
            starts_at,
        });
        starts_at += Duration::minutes(i64::from(minutes));

        engine.skip(now, &mut cx);
        if engine.is_complete() || (segment.is_break() && engine.focus_completed() >= count) {
            break;
        }
    }
    plan
}
