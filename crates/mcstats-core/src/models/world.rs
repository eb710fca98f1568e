//! World metadata from `<world>/level.dat`

use serde::{Deserialize, Serialize};

/// Game ticks per real-time second
pub const TICKS_PER_SECOND: i64 = 20;

/// One row per world save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Save directory name
    pub world_dir: String,
    /// `Data.LevelName`, the name shown in the world list
    pub level_name: String,
    pub hardcore: bool,
    /// `Data.Time`, in ticks
    pub play_time: i64,
}

impl WorldMeta {
    pub fn play_hours(&self) -> f64 {
        self.play_time as f64 / TICKS_PER_SECOND as f64 / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_hours() {
        let meta = WorldMeta {
            world_dir: "New World".to_string(),
            level_name: "New World".to_string(),
            hardcore: false,
            play_time: 72_000 * 3,
        };
        assert!((meta.play_hours() - 3.0).abs() < f64::EPSILON);
    }
}
