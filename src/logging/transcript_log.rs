// Append-only transcript file
//
// One file per run, named after the local start time. Each utterance is
// written as its text followed by a blank line. The file is opened,
// appended and closed on every write so nothing already written is lost
// if the process dies.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const ENTRY_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct TranscriptLog {
    path: PathBuf,
}

impl TranscriptLog {
    /// Log at `<dir>/conversation_<YYYYmmddHHMMSS>.txt`
    pub fn for_run(dir: &Path, started: DateTime<Local>) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let file_name = format!("conversation_{}.txt", started.format("%Y%m%d%H%M%S"));
        Ok(Self::at(dir.join(file_name)))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open transcript log {}", self.path.display()))?;

        write!(file, "{}{}", text, ENTRY_SEPARATOR)
            .with_context(|| format!("Failed to write transcript log {}", self.path.display()))?;
        debug!("Appended {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }

    /// Read back the entries of a transcript log.
    ///
    /// Entries that themselves contain a blank line come back split.
    pub fn read_entries(path: &Path) -> Result<Vec<String>> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript log {}", path.display()))?;
        Ok(contents
            .split(ENTRY_SEPARATOR)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
