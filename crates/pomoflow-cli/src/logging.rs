//! Logging setup.
//!
//! Logs go to stderr so they never mix with JSON on stdout. The filter is
//! read from `POMOFLOW_LOG` (e.g. `POMOFLOW_LOG=pomoflow_core=debug`) and
//! defaults to `warn`.
//!
//! While the interactive timer holds the terminal in raw mode, `\n` no
//! longer returns the carriage, so each record is moved off the status line
//! first and its line endings are written as `\r\n`. The status line is
//! redrawn below it on the next render.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::EnvFilter;

static RAW_MODE: AtomicBool = AtomicBool::new(false);

pub fn init() {
    let filter = EnvFilter::try_from_env("POMOFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| RecordWriter::new(io::stderr(), RAW_MODE.load(Ordering::Relaxed)))
        .with_target(true)
        .try_init();
}

/// Called by the raw mode guard on enter and exit.
pub fn set_raw_mode(on: bool) {
    RAW_MODE.store(on, Ordering::Relaxed);
}

/// Writer for a single log record.
struct RecordWriter<W: Write> {
    inner: W,
    raw: bool,
    started: bool,
}

impl<W: Write> RecordWriter<W> {
    fn new(inner: W, raw: bool) -> Self {
        Self {
            inner,
            raw,
            started: false,
        }
    }
}

impl<W: Write> Write for RecordWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.raw {
            return self.inner.write(buf);
        }
        if !self.started {
            self.inner.write_all(b"\r\n")?;
            self.started = true;
        }
        let mut lines = buf.split(|&b| b == b'\n');
        if let Some(first) = lines.next() {
            self.inner.write_all(first)?;
        }
        for line in lines {
            self.inner.write_all(b"\r\n")?;
            self.inner.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
