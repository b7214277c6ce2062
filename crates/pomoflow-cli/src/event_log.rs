//! JSON-lines event log for `timer run --events <path>`.
//!
//! One `Event` per line, appended. The run opens and closes the log with a
//! state snapshot so a reader can tell where the session started and ended.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use pomoflow_core::error::Result;
use pomoflow_core::Event;

pub struct EventLog<W: Write> {
    out: W,
}

impl EventLog<BufWriter<File>> {
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn record(&mut self, event: &Event) -> Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
