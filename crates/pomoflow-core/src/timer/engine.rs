//! Session state machine and tick engine.
//!
//! The engine is wall-clock driven and owns no thread or timer. The caller
//! invokes `tick()` periodically with the current instant; elapsed time is
//! added to a drift accumulator and drained one whole second at a time, so
//! late or coalesced ticks neither lose nor double-count seconds.
//!
//! ## State Transitions
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> Focus -> LongBreak -> Focus
//!   \__________________________ complete (focus total reached)
//! ```
//!
//! Each segment is either running or paused. `complete` is terminal until
//! `reset()` (or `restart_segment()`).
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(&settings);
//! let mut cx = SessionContext::new(&settings, &mut hooks);
//! engine.start(Instant::now(), &mut cx);
//! // From a periodic trigger:
//! engine.tick(Instant::now(), &mut cx);
//! ```

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, warn};

use super::hooks::SessionHooks;
use super::segment::Segment;
use super::view::{format_mmss, CycleProgress, SessionView, TimerMode};
use crate::events::Event;
use crate::settings::Settings;

const SECOND: Duration = Duration::from_secs(1);

/// Session state. Only the engine mutates it; callers read it through
/// [`TimerEngine`] queries and the accessors below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) segment: Segment,
    pub(crate) remaining_secs: u32,
    pub(crate) running: bool,
    /// Focus segments finished or skipped since the last reset.
    pub(crate) focus_completed: u32,
    /// Focus segments counted toward the short/long break decision.
    pub(crate) cycle_counter: u32,
    pub(crate) complete: bool,
    /// Wall-clock time not yet drained into whole seconds.
    pub(crate) drift: Duration,
    /// Instant the drift accumulator was last advanced to.
    pub(crate) last_tick: Option<Instant>,
}

impl SessionState {
    pub fn drift(&self) -> Duration {
        self.drift
    }

    pub fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    fn initial(settings: &Settings) -> Self {
        Self {
            segment: Segment::Focus,
            remaining_secs: settings.duration_secs(Segment::Focus),
            running: false,
            focus_completed: 0,
            cycle_counter: 0,
            complete: false,
            drift: Duration::ZERO,
            last_tick: None,
        }
    }
}

/// What every operation needs besides the state itself: the current
/// settings snapshot and the hooks to notify.
pub struct SessionContext<'a, H: SessionHooks + ?Sized> {
    pub settings: &'a Settings,
    pub hooks: &'a mut H,
}

impl<'a, H: SessionHooks + ?Sized> SessionContext<'a, H> {
    pub fn new(settings: &'a Settings, hooks: &'a mut H) -> Self {
        Self { settings, hooks }
    }
}

/// Core session engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: SessionState,
}

impl TimerEngine {
    /// Fresh session: paused at the start of a focus segment.
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: SessionState::initial(settings),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn segment(&self) -> Segment {
        self.state.segment
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    pub fn focus_completed(&self) -> u32 {
        self.state.focus_completed
    }

    pub fn cycle_counter(&self) -> u32 {
        self.state.cycle_counter
    }

    pub fn mode(&self) -> TimerMode {
        if self.state.complete {
            TimerMode::Complete
        } else if self.state.running {
            TimerMode::Running
        } else {
            TimerMode::Paused
        }
    }

    pub fn view(&self, settings: &Settings) -> SessionView {
        SessionView {
            display: format_mmss(self.state.remaining_secs),
            remaining_secs: self.state.remaining_secs,
            segment: self.state.segment,
            label: self.state.segment.label().to_string(),
            mode: self.mode(),
            cycle: CycleProgress::new(
                self.state.cycle_counter,
                settings.cycles_before_long_break,
                self.state.complete,
            ),
            focus_completed: self.state.focus_completed,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, settings: &Settings) -> Event {
        Event::StateSnapshot {
            view: self.view(settings),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. No-op when already running or complete.
    pub fn start<H>(&mut self, now: Instant, cx: &mut SessionContext<'_, H>) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        if self.state.complete || self.state.running {
            return None;
        }
        self.state.running = true;
        self.state.drift = Duration::ZERO;
        self.state.last_tick = Some(now);
        debug!(segment = ?self.state.segment, remaining = self.state.remaining_secs, "timer started");
        self.render(cx);
        Some(Event::TimerStarted {
            segment: self.state.segment,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop counting down. Remaining time and counters are kept as is;
    /// pausing a paused session changes nothing.
    pub fn pause<H>(&mut self, cx: &mut SessionContext<'_, H>) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        self.state.last_tick = None;
        debug!(remaining = self.state.remaining_secs, "timer paused");
        self.render(cx);
        Some(Event::TimerPaused {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Feed the current instant. Returns `Some` when the segment finished
    /// during this tick; at most one transition happens per call.
    ///
    /// # Panics
    ///
    /// Panics if `now` is earlier than the previous tick reference.
    pub fn tick<H>(&mut self, now: Instant, cx: &mut SessionContext<'_, H>) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        if !self.state.running || self.state.complete {
            return None;
        }
        let last = self.state.last_tick.unwrap_or(now);
        assert!(
            now >= last,
            "tick instant {now:?} precedes the tick reference {last:?}"
        );
        self.state.drift += now - last;
        self.state.last_tick = Some(now);

        let before = self.state.remaining_secs;
        while self.state.drift >= SECOND && self.state.remaining_secs > 0 {
            self.state.remaining_secs -= 1;
            self.state.drift -= SECOND;
        }

        if self.state.remaining_secs == 0 {
            return Some(self.complete_segment(now, cx));
        }
        if self.state.remaining_secs != before {
            self.render(cx);
        }
        None
    }

    /// Manually advance to the next segment. A skipped focus counts exactly
    /// like a finished one; a skipped break counts for nothing. Skipping a
    /// complete session resets it.
    pub fn skip<H>(&mut self, now: Instant, cx: &mut SessionContext<'_, H>) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        if self.state.complete {
            return self.reset(cx);
        }
        let from = self.state.segment;
        let event = match self.advance(now, cx.settings) {
            Some(to) => {
                debug!(?from, ?to, "segment skipped");
                Event::SegmentSkipped {
                    from,
                    to,
                    focus_completed: self.state.focus_completed,
                    at: Utc::now(),
                }
            }
            None => self.session_completed(),
        };
        self.render(cx);
        Some(event)
    }

    /// Refill the current segment. Clears `complete`; leaves the segment,
    /// counters and run flag alone.
    pub fn restart_segment<H>(
        &mut self,
        now: Instant,
        cx: &mut SessionContext<'_, H>,
    ) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        self.state.complete = false;
        self.state.remaining_secs = cx.settings.duration_secs(self.state.segment);
        self.state.drift = Duration::ZERO;
        self.state.last_tick = Some(now);
        debug!(segment = ?self.state.segment, "segment restarted");
        self.render(cx);
        Some(Event::SegmentRestarted {
            segment: self.state.segment,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Back to a fresh, paused focus segment with zeroed counters.
    pub fn reset<H>(&mut self, cx: &mut SessionContext<'_, H>) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        self.state = SessionState::initial(cx.settings);
        debug!("session reset");
        self.render(cx);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// React to a settings edit. An idle segment picks up its new duration
    /// immediately; a running countdown is left alone.
    pub fn apply_settings<H>(&mut self, cx: &mut SessionContext<'_, H>) -> Option<Event>
    where
        H: SessionHooks + ?Sized,
    {
        if !self.state.running && !self.state.complete {
            self.state.remaining_secs = cx.settings.duration_secs(self.state.segment);
        }
        self.render(cx);
        Some(Event::SettingsApplied {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_segment<H>(&mut self, now: Instant, cx: &mut SessionContext<'_, H>) -> Event
    where
        H: SessionHooks + ?Sized,
    {
        if cx.settings.sound_enabled {
            if let Err(err) = cx.hooks.chime() {
                warn!(error = %err, "chime failed");
            }
        }

        let from = self.state.segment;
        let event = match self.advance(now, cx.settings) {
            Some(to) => {
                debug!(?from, ?to, "segment completed");
                Event::SegmentCompleted {
                    from,
                    to,
                    focus_completed: self.state.focus_completed,
                    at: Utc::now(),
                }
            }
            None => self.session_completed(),
        };
        self.render(cx);
        event
    }

    /// Count the current segment and load the next one. Returns `None` when
    /// the focus total was reached instead.
    fn advance(&mut self, now: Instant, settings: &Settings) -> Option<Segment> {
        let next = match self.state.segment {
            Segment::Focus => {
                self.state.focus_completed = self.state.focus_completed.saturating_add(1);
                self.state.cycle_counter = self.state.cycle_counter.saturating_add(1);
                if self.state.focus_completed >= settings.total_focus_count {
                    self.state.complete = true;
                    self.state.running = false;
                    self.state.last_tick = None;
                    return None;
                }
                Segment::break_after_focus(
                    self.state.cycle_counter,
                    settings.cycles_before_long_break,
                )
            }
            Segment::ShortBreak | Segment::LongBreak => Segment::Focus,
        };
        self.state.segment = next;
        self.state.remaining_secs = settings.duration_secs(next);
        self.state.drift = Duration::ZERO;
        self.state.last_tick = Some(now);
        Some(next)
    }

    fn session_completed(&self) -> Event {
        debug!(focus_completed = self.state.focus_completed, "session complete");
        Event::SessionCompleted {
            focus_completed: self.state.focus_completed,
            at: Utc::now(),
        }
    }

    fn render<H>(&self, cx: &mut SessionContext<'_, H>)
    where
        H: SessionHooks + ?Sized,
    {
        let view = self.view(cx.settings);
        cx.hooks.render(&view);
    }
}
