//! Execution history transcript.
//!
//! One record per cycle: the mnemonic issued that cycle, if any, followed by
//! the CPU state block. The log is cleared whenever it reaches its limit so
//! long runs keep only the most recent window.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;

const BANNER: &str = "==================== Execution History ====================";
const FOOTER: &str = "================= End of Execution History ================";

/// Bounded per-cycle history.
#[derive(Clone, Debug, Default)]
pub struct History {
    records: Vec<String>,
    limit: usize,
}

impl History {
    /// Creates an empty history that clears itself after `limit` records.
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Number of records held.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record is held.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends the record for `cycle`.
    pub fn record(&mut self, cycle: u64, issued: Option<&str>, state: &str) {
        if self.records.len() >= self.limit {
            self.records.clear();
        }
        let line = issued.map_or_else(
            || format!("Cycle {cycle}: no instruction issued\n{state}"),
            |m| format!("Cycle {cycle}: issued {m}\n{state}"),
        );
        self.records.push(line);
    }

    /// Full transcript text.
    pub fn render(&self) -> String {
        let body: usize = self.records.iter().map(String::len).sum();
        let mut out = String::with_capacity(body + 2 * BANNER.len() + 2);
        out.push_str(BANNER);
        out.push('\n');
        for rec in &self.records {
            out.push_str(rec);
        }
        out.push_str(FOOTER);
        out.push('\n');
        out
    }

    /// Writes the transcript to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be written.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| SimError::io(path, e))
    }
}
