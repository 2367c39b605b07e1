use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// One processed command and its response lines.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord<'a> {
    /// Completed simulation steps after the command ran.
    pub step: u64,
    /// Raw command line as typed.
    pub command: &'a str,
    /// Response lines printed for the command.
    pub lines: &'a [String],
}

/// Newline-delimited JSON log of a session, one record per command.
pub struct TranscriptSink {
    file: File,
}

impl TranscriptSink {
    /// Create a sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Append a record to the log.
    pub fn write(&mut self, record: &TranscriptRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
