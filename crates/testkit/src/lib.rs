#![warn(missing_docs)]
//! Deterministic testing surfaces: transcript logs and golden snapshots.

mod micro_session;
mod snapshot;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use micro_session::*;
pub use snapshot::*;

/// One line of input and the output it produced, as captured by session tests.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord<'a> {
    /// Zero-based position of the input line in the session.
    pub step: u64,
    /// Raw input line.
    pub input: &'a str,
    /// Rendered response lines.
    pub output: &'a [String],
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    written: u64,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create log {}", path.display()))?;
        Ok(Self { file, written: 0 })
    }

    /// Append one record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_record() {
        let path = std::env::temp_dir().join(format!(
            "alembic-transcript-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let output = vec!["Trade successful".to_string()];
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for step in 0..2 {
            sink.write(&TranscriptRecord {
                step,
                input: "Geralt trades 1 Rebis for 1 Drowner trophy",
                output: &output,
            })
            .expect("write succeeds");
        }
        assert_eq!(sink.written(), 2);
        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("\"Trade successful\""));
    }
}
