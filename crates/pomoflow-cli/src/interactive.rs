//! Interactive terminal session.
//!
//! One task selects between key presses and a 250 ms ticker. The ticker
//! only exists while the session runs: it is dropped on pause, on
//! completion and on exit, and recreated on start. With an event log, every
//! event an operation returns is appended as it happens.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use pomoflow_core::error::Result;
use pomoflow_core::{SessionContext, SessionHooks, Settings, SettingsStore, TimerEngine};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::debug;

use crate::controls::{command_for_key, dispatch, Command};
use crate::event_log::EventLog;
use crate::terminal::{spawn_key_reader, RawModeGuard, TerminalHooks};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub async fn run(total: Option<u32>, events_path: Option<&Path>) -> Result<()> {
    let store = SettingsStore::open_default()?;
    let mut settings = load_settings(&store, total);
    let mut events = events_path.map(EventLog::append_to).transpose()?;
    let mut engine = TimerEngine::new(&settings);
    if let Some(log) = events.as_mut() {
        log.record(&engine.snapshot(&settings))?;
    }

    let _raw = RawModeGuard::enter()?;
    let mut hooks = TerminalHooks::new(io::stdout(), &settings.theme());
    let mut keys = spawn_key_reader();
    let mut ticker: Option<Interval> = None;

    hooks.render(&engine.view(&settings));

    loop {
        let event = tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else { break };
                let Some(command) = command_for_key(key) else { continue };
                match command {
                    Command::Quit => break,
                    Command::Reload => {
                        settings = load_settings(&store, total);
                        hooks.set_theme(&settings.theme());
                        let mut cx = SessionContext::new(&settings, &mut hooks);
                        engine.apply_settings(&mut cx)
                    }
                    command => {
                        let mut cx = SessionContext::new(&settings, &mut hooks);
                        dispatch(command, &mut engine, Instant::now(), &mut cx)
                    }
                }
            }
            _ = next_tick(&mut ticker) => {
                let mut cx = SessionContext::new(&settings, &mut hooks);
                engine.tick(Instant::now(), &mut cx)
            }
        };
        if let Some(event) = event {
            debug!(?event, "session event");
            if let Some(log) = events.as_mut() {
                log.record(&event)?;
            }
        }
        sync_ticker(&mut ticker, engine.is_running());
    }

    hooks.finish()?;
    if let Some(log) = events.as_mut() {
        log.record(&engine.snapshot(&settings))?;
    }
    Ok(())
}

fn load_settings(store: &SettingsStore, total: Option<u32>) -> Settings {
    let settings = store.load_or_default();
    match total {
        Some(total) => settings.with_total_focus_count(total),
        None => settings,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn sync_ticker(ticker: &mut Option<Interval>, running: bool) {
    match (running, ticker.is_some()) {
        (true, false) => {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some(interval);
        }
        (false, true) => *ticker = None,
        _ => {}
    }
}
