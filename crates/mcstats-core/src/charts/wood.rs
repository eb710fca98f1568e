//! Wood-type summary: grouped sums reshaped to long form

use crate::models::{StatCategory, StatRecord, WoodType};
use crate::store::distinct_worlds;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counters shown per wood type, in legend order
pub const WOOD_COUNTERS: [StatCategory; 4] = [
    StatCategory::Crafted,
    StatCategory::Mined,
    StatCategory::PickedUp,
    StatCategory::Used,
];

/// One (wood type, counter) bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WoodSummaryRow {
    pub wood_type: WoodType,
    pub counter: StatCategory,
    pub value: u64,
}

/// Long-form wood summary across all loaded worlds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WoodSummary {
    pub rows: Vec<WoodSummaryRow>,
    pub world_count: usize,
}

impl WoodSummary {
    /// Group rows by wood type (untagged rows excluded) and sum the four wood counters
    pub fn build(stats: &[StatRecord]) -> Self {
        let mut groups: BTreeMap<&'static str, (WoodType, [u64; 4])> = BTreeMap::new();

        for record in stats {
            let Some(wood) = record.wood_type else {
                continue;
            };
            let (_, sums) = groups.entry(wood.as_str()).or_insert((wood, [0; 4]));
            for (sum, counter) in sums.iter_mut().zip(WOOD_COUNTERS) {
                *sum += record.counters.get(counter);
            }
        }

        let rows = groups
            .into_values()
            .flat_map(|(wood_type, sums)| {
                WOOD_COUNTERS
                    .into_iter()
                    .zip(sums)
                    .map(move |(counter, value)| WoodSummaryRow {
                        wood_type,
                        counter,
                        value,
                    })
            })
            .collect();

        Self {
            rows,
            world_count: distinct_worlds(stats),
        }
    }

    pub fn title(&self) -> String {
        format!("Wood Type Summary for {} Saved Worlds", self.world_count)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Wood types present, in axis order
    pub fn groups(&self) -> Vec<WoodType> {
        let mut groups: Vec<WoodType> = Vec::new();
        for row in &self.rows {
            if groups.last() != Some(&row.wood_type) {
                groups.push(row.wood_type);
            }
        }
        groups
    }

    pub fn value(&self, wood_type: WoodType, counter: StatCategory) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.wood_type == wood_type && r.counter == counter)
            .map(|r| r.value)
    }

    pub fn max_value(&self) -> u64 {
        self.rows.iter().map(|r| r.value).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatCounters;

    fn record(key: &str, world: &str, counters: StatCounters) -> StatRecord {
        StatRecord::new(key, world, "p", counters)
    }

    fn sample() -> Vec<StatRecord> {
        vec![
            record(
                "oak_log",
                "A",
                StatCounters {
                    mined: 10,
                    picked_up: 9,
                    broken: 100,
                    ..Default::default()
                },
            ),
            record(
                "oak_planks",
                "B",
                StatCounters {
                    crafted: 40,
                    used: 12,
                    ..Default::default()
                },
            ),
            record(
                "dark_oak_door",
                "A",
                StatCounters {
                    used: 3,
                    ..Default::default()
                },
            ),
            record(
                "stone",
                "C",
                StatCounters {
                    mined: 500,
                    ..Default::default()
                },
            ),
        ]
    }

    #[test]
    fn test_groups_and_sums() {
        let summary = WoodSummary::build(&sample());

        assert_eq!(summary.groups(), vec![WoodType::DarkOak, WoodType::Oak]);
        assert_eq!(summary.rows.len(), 8);
        assert_eq!(summary.value(WoodType::Oak, StatCategory::Mined), Some(10));
        assert_eq!(summary.value(WoodType::Oak, StatCategory::Crafted), Some(40));
        assert_eq!(summary.value(WoodType::Oak, StatCategory::PickedUp), Some(9));
        assert_eq!(summary.value(WoodType::Oak, StatCategory::Used), Some(12));
        assert_eq!(summary.value(WoodType::DarkOak, StatCategory::Used), Some(3));
        assert_eq!(summary.value(WoodType::Oak, StatCategory::Broken), None);
    }

    #[test]
    fn test_unset_wood_type_excluded_but_world_counted() {
        let summary = WoodSummary::build(&sample());

        assert!(summary.rows.iter().all(|r| r.value <= 40));
        assert_eq!(summary.world_count, 3);
        assert_eq!(summary.title(), "Wood Type Summary for 3 Saved Worlds");
    }

    #[test]
    fn test_display_labels() {
        let summary = WoodSummary::build(&sample());
        let first = &summary.rows[0];
        assert_eq!(first.wood_type.label(), "dark oak");

        let labels: Vec<_> = summary.rows[..4].iter().map(|r| r.counter.label()).collect();
        assert_eq!(labels, vec!["crafted", "mined", "picked up", "used"]);
    }

    #[test]
    fn test_empty_input() {
        let summary = WoodSummary::build(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.max_value(), 0);
    }
}
