//! Login session extractor for gzip-compressed launcher logs
//!
//! Daily logs are named `<YYYY-MM-DD>-<n>.log.gz`; lines look like
//! `[14:23:01] [Server thread/INFO]: Alice joined the game`.
//! Every line and every file yields an explicit outcome so callers can tell
//! "not a login line" apart from "file unreadable".

use crate::error::CoreError;
use crate::models::LoginEvent;
use chrono::{NaiveDate, NaiveTime};
use flate2::read::GzDecoder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

static FILE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("valid file date pattern"));

static LOG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d\d:\d\d:\d\d)\] \[([^\[]*)\]: (.+)$").expect("valid log line pattern")
});

static JOINED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+ joined the game$").expect("valid join pattern"));

static CHAT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*\[CHAT\] ").expect("valid chat pattern"));

const JOINED_SUFFIX: &str = " joined the game";

/// Why a line produced no event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `[HH:MM:SS] [source]: message` prefix, or an impossible time
    NotTimestamped,
    /// Well-formed line that is not a join message
    NotLogin,
}

/// Result of scanning one log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Login(LoginEvent),
    Skipped(SkipReason),
}

/// Result of scanning one log file
#[derive(Debug)]
pub enum FileOutcome {
    Parsed {
        path: PathBuf,
        date: NaiveDate,
        events: Vec<LoginEvent>,
        lines_scanned: usize,
    },
    /// File name carries no `YYYY-MM-DD` date
    Undated { path: PathBuf },
    /// Open, read or gunzip failure; no rows are kept from the file
    Unreadable { path: PathBuf, error: CoreError },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Parsed { path, .. }
            | FileOutcome::Undated { path }
            | FileOutcome::Unreadable { path, .. } => path,
        }
    }

    pub fn events(&self) -> &[LoginEvent] {
        match self {
            FileOutcome::Parsed { events, .. } => events,
            _ => &[],
        }
    }
}

/// Parser for `logs/*.log.gz`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSessionParser;

impl LogSessionParser {
    pub fn new() -> Self {
        Self
    }

    /// All `*.log.gz` files under `logs_dir`, sorted. Missing directory yields none.
    pub fn discover(&self, logs_dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(logs_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(".log.gz"))
                    .unwrap_or(false)
            })
            .collect();

        files.sort();
        debug!(logs_dir = %logs_dir.display(), count = files.len(), "Discovered log files");
        files
    }

    /// Date embedded in the log file name
    pub fn log_date(&self, path: &Path) -> Option<NaiveDate> {
        let name = path.file_name()?.to_str()?;
        let captures = FILE_DATE.captures(name)?;
        NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d").ok()
    }

    /// Classify one line of a log dated `date`
    pub fn parse_line(&self, date: NaiveDate, line: &str, log_file: &Path) -> LineOutcome {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(parts) = LOG_LINE.captures(line) else {
            return LineOutcome::Skipped(SkipReason::NotTimestamped);
        };
        let Ok(time) = NaiveTime::parse_from_str(&parts[1], "%H:%M:%S") else {
            return LineOutcome::Skipped(SkipReason::NotTimestamped);
        };

        let message = &parts[3];
        if !JOINED.is_match(message) {
            return LineOutcome::Skipped(SkipReason::NotLogin);
        }

        LineOutcome::Login(LoginEvent {
            timestamp: date.and_time(time),
            source: parts[2].to_string(),
            message: message.to_string(),
            user_name: user_name(message),
            log_file: log_file.to_path_buf(),
        })
    }

    /// Scan one discovered log file. The discovered path is the only path opened.
    pub fn parse_file(&self, path: &Path) -> FileOutcome {
        let Some(date) = self.log_date(path) else {
            return FileOutcome::Undated {
                path: path.to_path_buf(),
            };
        };

        match self.scan(path, date) {
            Ok((events, lines_scanned)) => {
                trace!(path = %path.display(), events = events.len(), lines_scanned, "Scanned log");
                FileOutcome::Parsed {
                    path: path.to_path_buf(),
                    date,
                    events,
                    lines_scanned,
                }
            }
            Err(error) => FileOutcome::Unreadable {
                path: path.to_path_buf(),
                error,
            },
        }
    }

    /// Scan every log file under `logs_dir`
    pub fn parse_dir(&self, logs_dir: &Path) -> Vec<FileOutcome> {
        self.discover(logs_dir)
            .iter()
            .map(|path| self.parse_file(path))
            .collect()
    }

    fn scan(&self, path: &Path, date: NaiveDate) -> Result<(Vec<LoginEvent>, usize), CoreError> {
        let file = File::open(path).map_err(|e| CoreError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = BufReader::new(GzDecoder::new(file));

        let mut events = Vec::new();
        let mut buf = Vec::new();
        let mut lines_scanned = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| CoreError::Decompress {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                break;
            }
            lines_scanned += 1;

            // Chat lines may carry invalid UTF-8
            let line = String::from_utf8_lossy(&buf);
            if let LineOutcome::Login(event) = self.parse_line(date, &line, path) {
                events.push(event);
            }
        }

        Ok((events, lines_scanned))
    }
}

/// Player name from a join message: drops the suffix, a `[CHAT] ` prefix and a ` (...)` tail
pub fn user_name(message: &str) -> String {
    let name = message.strip_suffix(JOINED_SUFFIX).unwrap_or(message);
    let name = CHAT_MARKER.replace(name, "");
    match name.find(" (") {
        Some(idx) => name[..idx].to_string(),
        None => name.into_owned(),
    }
}
