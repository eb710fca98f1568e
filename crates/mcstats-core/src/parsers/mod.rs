//! Parsers for Minecraft save and log files

pub mod level;
pub mod locator;
pub mod logs;
pub mod world_stats;

pub use level::LevelParser;
pub use locator::{locate_level_files, locate_stat_files, LevelFile, StatFile};
pub use logs::{user_name, FileOutcome, LineOutcome, LogSessionParser, SkipReason};
pub use world_stats::WorldStatsParser;
