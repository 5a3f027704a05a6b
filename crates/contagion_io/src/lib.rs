//! # Contagion IO
//!
//! Output layer for Contagion runs.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The run history log (`history.jsonl`) and its reader

/// Error types and result aliases for I/O operations
pub mod error;
/// Run headers and periodic counter records in JSON lines
pub mod history;

pub use error::{IoError, Result};
pub use history::{read_history, HistoryEntry, HistoryLogger, HistorySummary, RunHeader, StatsRecord};
