//! Session engine behaviour driven through the public API.
//!
//! Covers countdown monotonicity, drift accounting under arbitrary tick
//! chunking, cycle arithmetic and session termination.

use std::time::{Duration, Instant};

use pomoflow_core::{
    validate, Event, NoopHooks, NotifyError, Segment, SessionContext, SessionHooks, SessionView,
    Settings, SettingsInput, TimerEngine, TimerMode,
};
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Long focus so nothing completes during property runs.
fn long_focus() -> Settings {
    Settings {
        focus_duration: 180,
        ..Settings::default()
    }
}

proptest! {
    #[test]
    fn countdown_never_increases(deltas in prop::collection::vec(0u64..5_000, 0..200)) {
        let settings = long_focus();
        let mut hooks = NoopHooks;
        let mut cx = SessionContext::new(&settings, &mut hooks);
        let mut engine = TimerEngine::new(&settings);
        let mut now = Instant::now();
        engine.start(now, &mut cx);

        let mut previous = engine.remaining_secs();
        for delta in deltas {
            now += ms(delta);
            engine.tick(now, &mut cx);
            prop_assert!(engine.remaining_secs() <= previous);
            previous = engine.remaining_secs();
        }
    }

    #[test]
    fn drained_seconds_ignore_chunking(deltas in prop::collection::vec(0u64..5_000, 0..200)) {
        let settings = long_focus();
        let mut hooks = NoopHooks;
        let mut cx = SessionContext::new(&settings, &mut hooks);
        let mut engine = TimerEngine::new(&settings);
        let start = engine.remaining_secs();
        let mut now = Instant::now();
        engine.start(now, &mut cx);

        let total: u64 = deltas.iter().sum();
        for delta in deltas {
            now += ms(delta);
            engine.tick(now, &mut cx);
        }
        prop_assert_eq!(u64::from(start - engine.remaining_secs()), total / 1000);
    }

    #[test]
    fn one_transition_per_tick_across_boundaries(deltas in prop::collection::vec(0u64..400_000, 1..120)) {
        let settings = one_minute_segments();
        let mut hooks = NoopHooks;
        let mut cx = SessionContext::new(&settings, &mut hooks);
        let mut engine = TimerEngine::new(&settings);
        let mut now = Instant::now();
        engine.start(now, &mut cx);

        for delta in deltas {
            let before = (engine.segment(), engine.focus_completed());
            now += ms(delta);
            let event = engine.tick(now, &mut cx);
            let after = (engine.segment(), engine.focus_completed());

            match event {
                Some(Event::SegmentCompleted { from, to, .. }) => {
                    prop_assert_eq!(from, before.0);
                    prop_assert_eq!(to, after.0);
                    // Leftover time never spills into the fresh segment.
                    prop_assert_eq!(engine.remaining_secs(), settings.duration_secs(to));
                    prop_assert_eq!(engine.state().drift(), Duration::ZERO);
                }
                Some(other) => {
                    prop_assert!(false, "unexpected tick event {:?}", other);
                }
                None => {
                    prop_assert_eq!(before, after);
                }
            }
            prop_assert!(after.1 <= before.1 + 1);
            prop_assert!(engine.remaining_secs() <= settings.duration_secs(engine.segment()));
            prop_assert!(engine.remaining_secs() > 0);
        }
    }
}

/// One-minute segments so random chunking keeps crossing completions.
fn one_minute_segments() -> Settings {
    Settings {
        focus_duration: 1,
        short_break_duration: 1,
        long_break_duration: 1,
        ..Settings::default()
    }
}

#[test]
fn ten_short_ticks_equal_one_long_tick() {
    let settings = Settings::default();
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&settings, &mut hooks);
    let t0 = Instant::now();

    let mut chunked = TimerEngine::new(&settings);
    chunked.start(t0, &mut cx);
    for i in 1..=10 {
        chunked.tick(t0 + ms(100 * i), &mut cx);
    }

    let mut single = TimerEngine::new(&settings);
    single.start(t0, &mut cx);
    single.tick(t0 + ms(1000), &mut cx);

    assert_eq!(chunked.remaining_secs(), single.remaining_secs());
    assert_eq!(chunked.remaining_secs(), 25 * 60 - 1);
}

#[test]
fn fourth_focus_earns_the_long_break() {
    let settings = Settings {
        focus_duration: 1,
        short_break_duration: 1,
        long_break_duration: 1,
        cycles_before_long_break: 4,
        ..Settings::default()
    };
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&settings, &mut hooks);
    let mut engine = TimerEngine::new(&settings);
    let mut now = Instant::now();
    engine.start(now, &mut cx);

    let mut seen = vec![engine.segment()];
    for _ in 0..7 {
        now += ms(60_000);
        let event = engine.tick(now, &mut cx);
        assert!(matches!(event, Some(Event::SegmentCompleted { .. })));
        seen.push(engine.segment());
    }

    use Segment::*;
    assert_eq!(
        seen,
        vec![Focus, ShortBreak, Focus, ShortBreak, Focus, ShortBreak, Focus, LongBreak]
    );
}

#[test]
fn long_break_repeats_every_cycle() {
    let settings = Settings {
        cycles_before_long_break: 4,
        ..Settings::default()
    };
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&settings, &mut hooks);
    let mut engine = TimerEngine::new(&settings);
    let now = Instant::now();

    let mut long_breaks_after = Vec::new();
    for _ in 0..12 {
        engine.skip(now, &mut cx);
        if engine.segment() == Segment::LongBreak {
            long_breaks_after.push(engine.focus_completed());
        }
        engine.skip(now, &mut cx);
    }
    assert_eq!(long_breaks_after, vec![4, 8, 12]);
}

#[test]
fn third_focus_ends_the_session() {
    let settings = Settings {
        focus_duration: 1,
        short_break_duration: 1,
        ..Settings::default()
    }
    .with_total_focus_count(3);
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&settings, &mut hooks);
    let mut engine = TimerEngine::new(&settings);
    let mut now = Instant::now();
    engine.start(now, &mut cx);

    let mut last = None;
    while !engine.is_complete() {
        now += ms(60_000);
        last = engine.tick(now, &mut cx);
    }
    assert!(matches!(
        last,
        Some(Event::SessionCompleted { focus_completed: 3, .. })
    ));
    assert!(!engine.is_running());

    let frozen = engine.remaining_secs();
    for _ in 0..5 {
        now += ms(60_000);
        assert!(engine.tick(now, &mut cx).is_none());
    }
    assert_eq!(engine.remaining_secs(), frozen);

    engine.reset(&mut cx);
    assert!(!engine.is_complete());
    assert_eq!(engine.remaining_secs(), 60);
}

#[test]
fn skip_counts_like_completion() {
    let settings = Settings {
        focus_duration: 1,
        ..Settings::default()
    };
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&settings, &mut hooks);
    let t0 = Instant::now();

    let mut skipped = TimerEngine::new(&settings);
    skipped.skip(t0, &mut cx);

    let mut finished = TimerEngine::new(&settings);
    finished.start(t0, &mut cx);
    finished.tick(t0 + ms(60_000), &mut cx);

    assert_eq!(skipped.focus_completed(), finished.focus_completed());
    assert_eq!(skipped.cycle_counter(), finished.cycle_counter());
    assert_eq!(skipped.segment(), finished.segment());
}

#[test]
fn restart_never_touches_identity() {
    let settings = Settings::default();
    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&settings, &mut hooks);
    let mut engine = TimerEngine::new(&settings);
    let t0 = Instant::now();
    for _ in 0..3 {
        engine.skip(t0, &mut cx);
    }
    let (segment, done, cycle) = (
        engine.segment(),
        engine.focus_completed(),
        engine.cycle_counter(),
    );
    engine.start(t0, &mut cx);
    engine.tick(t0 + ms(7_000), &mut cx);
    engine.restart_segment(t0 + ms(7_000), &mut cx);

    assert_eq!(engine.segment(), segment);
    assert_eq!(engine.focus_completed(), done);
    assert_eq!(engine.cycle_counter(), cycle);
    assert_eq!(engine.remaining_secs(), settings.duration_secs(segment));
}

#[test]
fn edited_settings_flow_into_idle_session() {
    let previous = Settings::default();
    let mut engine = TimerEngine::new(&previous);

    let mut input = SettingsInput::default();
    input.set_field("focusDuration", "abc").unwrap();
    input.set_field("shortBreakDuration", "9").unwrap();
    let edited = validate(&input, &previous);
    assert_eq!(edited.focus_duration, 25);
    assert_eq!(edited.short_break_duration, 9);

    let mut hooks = NoopHooks;
    let mut cx = SessionContext::new(&edited, &mut hooks);
    engine.apply_settings(&mut cx);
    engine.skip(Instant::now(), &mut cx);
    assert_eq!(engine.remaining_secs(), 9 * 60);
}

#[derive(Default)]
struct Screen {
    frames: Vec<SessionView>,
    chimes: usize,
}

impl SessionHooks for Screen {
    fn render(&mut self, view: &SessionView) {
        self.frames.push(view.clone());
    }

    fn chime(&mut self) -> Result<(), NotifyError> {
        self.chimes += 1;
        Ok(())
    }
}

#[test]
fn render_sees_every_mutation() {
    let settings = Settings {
        focus_duration: 1,
        ..Settings::default()
    }
    .with_total_focus_count(1);
    let mut screen = Screen::default();
    let mut engine = TimerEngine::new(&settings);
    let t0 = Instant::now();
    {
        let mut cx = SessionContext::new(&settings, &mut screen);
        engine.start(t0, &mut cx);
        engine.tick(t0 + ms(30_000), &mut cx);
        engine.pause(&mut cx);
        engine.start(t0 + ms(40_000), &mut cx);
        engine.tick(t0 + ms(70_000), &mut cx);
    }

    let modes: Vec<_> = screen.frames.iter().map(|f| f.mode).collect();
    assert_eq!(
        modes,
        vec![
            TimerMode::Running,
            TimerMode::Running,
            TimerMode::Paused,
            TimerMode::Running,
            TimerMode::Complete,
        ]
    );
    let last = screen.frames.last().unwrap();
    assert_eq!(last.display, "00:00");
    assert_eq!(last.cycle.lit, last.cycle.total);
    assert_eq!(screen.chimes, 1);
    assert_eq!(screen.frames[1].display, "00:30");
}
