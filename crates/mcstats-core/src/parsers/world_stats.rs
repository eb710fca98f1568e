//! Player stats normalizer
//!
//! Flattens the eight category objects of a stats file into one [`StatRecord`] per item key.

use crate::error::CoreError;
use crate::models::{strip_namespace, StatCategory, StatCounters, StatRecord};
use crate::parsers::locator::StatFile;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::trace;

/// Parser for `<world>/stats/<player>.json`
#[derive(Debug, Default, Clone, Copy)]
pub struct WorldStatsParser;

impl WorldStatsParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and normalize one stats file
    pub fn parse(&self, file: &StatFile) -> Result<Vec<StatRecord>, CoreError> {
        let content = std::fs::read_to_string(&file.path).map_err(|e| CoreError::FileRead {
            path: file.path.clone(),
            source: e,
        })?;

        self.parse_str(&content, &file.path, &file.world, &file.player())
    }

    /// Normalize an in-memory stats document; `path` is only used in errors
    pub fn parse_str(
        &self,
        content: &str,
        path: &Path,
        world: &str,
        player: &str,
    ) -> Result<Vec<StatRecord>, CoreError> {
        let root: Value = serde_json::from_str(content).map_err(|e| CoreError::JsonParse {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: e,
        })?;

        let stats = root
            .get("stats")
            .and_then(Value::as_object)
            .ok_or_else(|| CoreError::MissingStats {
                path: path.to_path_buf(),
            })?;

        let mut rows: BTreeMap<String, StatCounters> = BTreeMap::new();

        for category in StatCategory::ALL {
            let Some(entries) = category_entries(stats, category) else {
                trace!(path = %path.display(), %category, "Category absent, treated as empty");
                continue;
            };

            for (key, value) in entries {
                let count = coerce_count(value).ok_or_else(|| CoreError::InvalidStatValue {
                    path: path.to_path_buf(),
                    category: category.to_string(),
                    key: key.clone(),
                })?;

                let counters = rows.entry(strip_namespace(key).to_string()).or_default();
                *counters.get_mut(category) += count;
            }
        }

        Ok(rows
            .into_iter()
            .map(|(key, counters)| StatRecord::new(key, world, player, counters))
            .collect())
    }
}

fn category_entries(stats: &Map<String, Value>, category: StatCategory) -> Option<&Map<String, Value>> {
    stats.get(&category.json_key()).and_then(Value::as_object)
}

/// Integer value of a stat entry; floats truncate, negatives clamp to zero
fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|v| v.max(0) as u64))
            .or_else(|| n.as_f64().map(|v| v.max(0.0) as u64)),
        Value::Null => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "DataVersion": 3465,
        "stats": {
            "minecraft:mined": { "minecraft:oak_log": 12, "minecraft:stone": 40 },
            "minecraft:crafted": { "minecraft:oak_planks": 48, "minecraft:oak_log": 1 },
            "minecraft:used": { "minecraft:dark_oak_door": 3 },
            "minecraft:picked_up": { "minecraft:stone": 38 },
            "minecraft:custom": { "minecraft:jump": 905 }
        }
    }"#;

    fn parse(content: &str) -> Result<Vec<StatRecord>, CoreError> {
        WorldStatsParser::new().parse_str(content, Path::new("test.json"), "World", "uuid")
    }

    fn row<'a>(rows: &'a [StatRecord], key: &str) -> &'a StatRecord {
        rows.iter().find(|r| r.item_key == key).unwrap()
    }

    #[test]
    fn test_union_of_keys_without_duplicates() {
        let rows = parse(SAMPLE).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.item_key.as_str()).collect();

        assert_eq!(
            keys,
            vec!["dark_oak_door", "jump", "oak_log", "oak_planks", "stone"]
        );
    }

    #[test]
    fn test_zero_fill_per_category() {
        let rows = parse(SAMPLE).unwrap();

        let oak_log = row(&rows, "oak_log");
        assert_eq!(oak_log.counters.mined, 12);
        assert_eq!(oak_log.counters.crafted, 1);
        assert_eq!(oak_log.counters.used, 0);
        assert_eq!(oak_log.counters.broken, 0);

        let stone = row(&rows, "stone");
        assert_eq!(stone.counters.mined, 40);
        assert_eq!(stone.counters.picked_up, 38);
        assert_eq!(stone.counters.crafted, 0);
        assert_eq!(stone.wood_type, None);
    }

    #[test]
    fn test_rows_carry_world_and_wood_type() {
        let rows = parse(SAMPLE).unwrap();
        assert!(rows.iter().all(|r| r.world_name == "World" && r.player == "uuid"));
        assert_eq!(
            row(&rows, "dark_oak_door").wood_type,
            Some(crate::models::WoodType::DarkOak)
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(parse(SAMPLE).unwrap(), parse(SAMPLE).unwrap());
    }

    #[test]
    fn test_all_categories_missing_is_empty() {
        let rows = parse(r#"{"stats": {}}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_stats_key() {
        let result = parse(r#"{"DataVersion": 1}"#);
        assert!(matches!(result, Err(CoreError::MissingStats { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = parse(r#"{"stats": {"minecraft:mined": "#);
        assert!(matches!(result, Err(CoreError::JsonParse { .. })));
    }

    #[test]
    fn test_coerces_numbers() {
        let rows = parse(
            r#"{"stats": {"minecraft:used": {"minecraft:bow": 2.9, "minecraft:shield": -1}}}"#,
        )
        .unwrap();
        assert_eq!(row(&rows, "bow").counters.used, 2);
        assert_eq!(row(&rows, "shield").counters.used, 0);
    }

    #[test]
    fn test_non_numeric_value_is_error() {
        let result = parse(r#"{"stats": {"minecraft:used": {"minecraft:bow": "many"}}}"#);
        assert!(matches!(result, Err(CoreError::InvalidStatValue { .. })));
    }

    #[test]
    fn test_parse_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Survival/stats/5f3c.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let stat_file = StatFile {
            world: "Survival".to_string(),
            path: path.clone(),
        };
        let rows = WorldStatsParser::new().parse(&stat_file).unwrap();

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.world_name == "Survival" && r.player == "5f3c"));
    }

    #[test]
    fn test_missing_file() {
        let stat_file = StatFile {
            world: "Gone".to_string(),
            path: PathBuf::from("/nonexistent/stats/x.json"),
        };
        let result = WorldStatsParser::new().parse(&stat_file);
        assert!(matches!(result, Err(CoreError::FileRead { .. })));
    }
}
