//! Login events parsed from `logs/<date>-<n>.log.gz`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One "<player> joined the game" line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginEvent {
    /// File date combined with the line's time of day
    pub timestamp: NaiveDateTime,
    /// Thread label, e.g. `Server thread/INFO`
    pub source: String,
    /// Raw log message
    pub message: String,
    pub user_name: String,
    /// Log file the line was read from
    pub log_file: PathBuf,
}

impl LoginEvent {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}
