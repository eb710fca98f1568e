//! Report store: the three read-only tables built once per run
//!
//! Loading never fails as a whole. Each bad input file is skipped and
//! recorded in the returned [`LoadReport`].

use crate::config::ReportConfig;
use crate::error::{LoadError, LoadReport};
use crate::models::{LoginEvent, StatCounters, StatRecord, WorldMeta};
use crate::parsers::{
    locate_level_files, locate_stat_files, FileOutcome, LevelParser, LogSessionParser, StatFile,
    WorldStatsParser,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Central data store for one report run
#[derive(Debug)]
pub struct ReportStore {
    config: ReportConfig,
    stats: Vec<StatRecord>,
    logins: Vec<LoginEvent>,
    worlds: Vec<WorldMeta>,
}

impl ReportStore {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            stats: Vec::new(),
            logins: Vec::new(),
            worlds: Vec::new(),
        }
    }

    /// Build a store directly from tables (tests, re-rendering exports)
    pub fn from_tables(
        config: ReportConfig,
        stats: Vec<StatRecord>,
        logins: Vec<LoginEvent>,
        worlds: Vec<WorldMeta>,
    ) -> Self {
        Self {
            config,
            stats,
            logins,
            worlds,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Load stats, world metadata and login sessions, replacing any earlier tables
    pub fn load(&mut self) -> LoadReport {
        let mut report = LoadReport::new();

        info!(
            saves_dir = %self.config.saves_dir.display(),
            logs_dir = %self.config.logs_dir.display(),
            "Starting report load"
        );

        self.load_stats(&mut report);
        self.load_worlds(&mut report);
        self.load_logins(&mut report);

        info!(
            stat_rows = self.stats.len(),
            worlds = self.worlds.len(),
            logins = self.logins.len(),
            stat_files_failed = report.stat_files_failed,
            logs_skipped = report.logs_skipped,
            "Report load complete"
        );

        report
    }

    /// Concatenate every world's normalized stats
    fn load_stats(&mut self, report: &mut LoadReport) {
        let saves_dir = &self.config.saves_dir;
        if !saves_dir.is_dir() {
            warn!(saves_dir = %saves_dir.display(), "Saves directory not found");
            report.add_error(
                LoadError::warning("stats", "Saves directory not found")
                    .with_path(saves_dir)
                    .with_suggestion("Point --minecraft-dir at a launcher directory holding saves/"),
            );
        }

        let files = locate_stat_files(saves_dir);
        self.stats = aggregate_stats(&files, &WorldStatsParser::new(), report);
    }

    fn load_worlds(&mut self, report: &mut LoadReport) {
        let parser = LevelParser::new();
        let mut worlds = Vec::new();

        for file in locate_level_files(&self.config.saves_dir) {
            report.level_files_scanned += 1;
            match parser.parse(&file) {
                Ok(meta) => worlds.push(meta),
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "Skipping unreadable level.dat");
                    report.level_files_failed += 1;
                    report.add_error(LoadError::from_core_error("worlds", &e));
                }
            }
        }

        self.worlds = worlds;
    }

    fn load_logins(&mut self, report: &mut LoadReport) {
        let logs_dir = &self.config.logs_dir;
        if !logs_dir.is_dir() {
            warn!(logs_dir = %logs_dir.display(), "Logs directory not found");
            report.add_error(
                LoadError::warning("logs", "Logs directory not found")
                    .with_path(logs_dir)
                    .with_suggestion("Session data needs the launcher's logs/ directory"),
            );
        }

        let parser = LogSessionParser::new();
        let mut logins = Vec::new();

        for outcome in parser.parse_dir(logs_dir) {
            report.logs_scanned += 1;
            match outcome {
                FileOutcome::Parsed { events, .. } => logins.extend(events),
                FileOutcome::Undated { path } => {
                    debug!(path = %path.display(), "Skipping log without a date in its name");
                    report.logs_skipped += 1;
                }
                FileOutcome::Unreadable { path, error } => {
                    debug!(path = %path.display(), error = %error, "Skipping unreadable log");
                    report.logs_skipped += 1;
                }
            }
        }

        logins.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        self.logins = logins;
    }

    pub fn stats(&self) -> &[StatRecord] {
        &self.stats
    }

    pub fn logins(&self) -> &[LoginEvent] {
        &self.logins
    }

    pub fn worlds(&self) -> &[WorldMeta] {
        &self.worlds
    }

    /// Number of distinct worlds with stat rows
    pub fn world_count(&self) -> usize {
        distinct_worlds(&self.stats)
    }

    /// Summed counters per world, ordered by world name
    pub fn world_totals(&self) -> BTreeMap<&str, StatCounters> {
        let mut totals: BTreeMap<&str, StatCounters> = BTreeMap::new();
        for record in &self.stats {
            totals
                .entry(record.world_name.as_str())
                .or_default()
                .accumulate(&record.counters);
        }
        totals
    }
}

/// Normalize every stat file and concatenate the rows.
///
/// Failed files are reported by path and skipped; the rest still load.
pub fn aggregate_stats(
    files: &[StatFile],
    parser: &WorldStatsParser,
    report: &mut LoadReport,
) -> Vec<StatRecord> {
    let mut rows = Vec::new();

    for file in files {
        report.stat_files_scanned += 1;
        match parser.parse(file) {
            Ok(records) => {
                debug!(world = %file.world, rows = records.len(), "Normalized stat file");
                rows.extend(records);
            }
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "Skipping stat file");
                report.stat_files_failed += 1;
                report.add_error(LoadError::from_core_error("stats", &e));
            }
        }
    }

    rows
}

pub(crate) fn distinct_worlds(stats: &[StatRecord]) -> usize {
    stats
        .iter()
        .map(|r| r.world_name.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}
