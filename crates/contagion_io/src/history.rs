use crate::error::{IoError, Result};
use chrono::{DateTime, Utc};
use contagion_data::{PopulationStats, TickReport};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const HISTORY_FILE: &str = "history.jsonl";

/// First line written for every run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunHeader {
    pub seed: u64,
    /// Hash of the parameters that shape the run.
    pub fingerprint: String,
    pub started_at: DateTime<Utc>,
    pub initial: PopulationStats,
    pub contact_strategy: String,
}

/// Counters at a reported tick, with the events since the previous record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatsRecord {
    pub tick: u64,
    pub timestamp: DateTime<Utc>,
    pub stats: PopulationStats,
    pub events: TickReport,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEntry {
    Run(RunHeader),
    Stats(StatsRecord),
    Finished {
        tick: u64,
        timestamp: DateTime<Utc>,
        reason: String,
    },
}

/// Appends history entries as JSON lines to `<dir>/history.jsonl`.
///
/// This is an output log for analysis; nothing reads it back into a running
/// simulation.
pub struct HistoryLogger {
    file: Option<BufWriter<File>>,
    path: PathBuf,
}

impl HistoryLogger {
    pub fn new_at(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| {
                IoError::from(e).with_context(format!("creating {}", dir.display()))
            })?;
        }
        let path = dir.join(HISTORY_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| IoError::from(e).with_context(format!("opening {}", path.display())))?;
        Ok(Self {
            file: Some(BufWriter::new(file)),
            path,
        })
    }

    /// A logger that discards everything.
    pub fn new_dummy() -> Self {
        Self {
            file: None,
            path: PathBuf::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_header(&mut self, header: RunHeader) -> Result<()> {
        self.write(&HistoryEntry::Run(header))?;
        self.flush()
    }

    pub fn log_stats(&mut self, tick: u64, stats: PopulationStats, events: TickReport) -> Result<()> {
        self.write(&HistoryEntry::Stats(StatsRecord {
            tick,
            timestamp: Utc::now(),
            stats,
            events,
        }))
    }

    pub fn log_finish(&mut self, tick: u64, reason: &str) -> Result<()> {
        self.write(&HistoryEntry::Finished {
            tick,
            timestamp: Utc::now(),
            reason: reason.to_string(),
        })?;
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()?;
        }
        Ok(())
    }

    fn write(&mut self, entry: &HistoryEntry) -> Result<()> {
        if let Some(ref mut file) = self.file {
            let json = serde_json::to_string(entry)?;
            writeln!(file, "{}", json)?;
        }
        Ok(())
    }
}

impl Drop for HistoryLogger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Reads every entry of a history file. Blank lines are skipped; any other
/// line that does not parse is an error naming its line number.
pub fn read_history(path: impl AsRef<Path>) -> Result<Vec<HistoryEntry>> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IoError::not_found(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut entries = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str::<HistoryEntry>(&line)
            .map_err(|e| IoError::from(e).with_context(format!("line {}", n + 1)))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Headline numbers of the most recent run in a history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub header: RunHeader,
    pub runs: usize,
    pub records: usize,
    pub peak_infected: usize,
    pub peak_tick: u64,
    pub events: TickReport,
    pub last: Option<StatsRecord>,
    pub finished: Option<(u64, String)>,
}

impl HistorySummary {
    /// Summarises the entries following the last run header.
    pub fn from_entries(entries: &[HistoryEntry]) -> Result<Self> {
        let runs = entries
            .iter()
            .filter(|e| matches!(e, HistoryEntry::Run(_)))
            .count();
        let start = entries
            .iter()
            .rposition(|e| matches!(e, HistoryEntry::Run(_)))
            .ok_or_else(|| IoError::validation("history has no run header"))?;

        let header = match &entries[start] {
            HistoryEntry::Run(header) => header.clone(),
            _ => return Err(IoError::validation("history has no run header")),
        };

        let mut summary = Self {
            peak_infected: header.initial.total_infected,
            header,
            runs,
            records: 0,
            peak_tick: 0,
            events: TickReport::default(),
            last: None,
            finished: None,
        };

        for entry in &entries[start + 1..] {
            match entry {
                HistoryEntry::Stats(record) => {
                    summary.records += 1;
                    summary.events.absorb(&record.events);
                    if record.stats.total_infected > summary.peak_infected {
                        summary.peak_infected = record.stats.total_infected;
                        summary.peak_tick = record.tick;
                    }
                    summary.last = Some(record.clone());
                }
                HistoryEntry::Finished { tick, reason, .. } => {
                    summary.finished = Some((*tick, reason.clone()));
                }
                HistoryEntry::Run(_) => {}
            }
        }
        Ok(summary)
    }
}
