//! Per-world statistic rows from `<world>/stats/<player>.json`
//!
//! The stats file stores eight category objects under `stats`, each keyed by a namespaced
//! identifier (`minecraft:oak_log`). One [`StatRecord`] holds every category for one key.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix stripped from item keys for display
pub const MINECRAFT_NAMESPACE: &str = "minecraft:";

/// One of the eight Minecraft statistic groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Broken,
    Crafted,
    Custom,
    Dropped,
    Killed,
    Mined,
    PickedUp,
    Used,
}

impl StatCategory {
    pub const ALL: [StatCategory; 8] = [
        StatCategory::Broken,
        StatCategory::Crafted,
        StatCategory::Custom,
        StatCategory::Dropped,
        StatCategory::Killed,
        StatCategory::Mined,
        StatCategory::PickedUp,
        StatCategory::Used,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatCategory::Broken => "broken",
            StatCategory::Crafted => "crafted",
            StatCategory::Custom => "custom",
            StatCategory::Dropped => "dropped",
            StatCategory::Killed => "killed",
            StatCategory::Mined => "mined",
            StatCategory::PickedUp => "picked_up",
            StatCategory::Used => "used",
        }
    }

    /// Key of this category inside the `stats` object
    pub fn json_key(&self) -> String {
        format!("{}{}", MINECRAFT_NAMESPACE, self.as_str())
    }

    /// Chart/table label (`picked up` instead of `picked_up`)
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter values for one item key, zero where a category has no entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCounters {
    pub broken: u64,
    pub crafted: u64,
    pub custom: u64,
    pub dropped: u64,
    pub killed: u64,
    pub mined: u64,
    pub picked_up: u64,
    pub used: u64,
}

impl StatCounters {
    pub fn get(&self, category: StatCategory) -> u64 {
        match category {
            StatCategory::Broken => self.broken,
            StatCategory::Crafted => self.crafted,
            StatCategory::Custom => self.custom,
            StatCategory::Dropped => self.dropped,
            StatCategory::Killed => self.killed,
            StatCategory::Mined => self.mined,
            StatCategory::PickedUp => self.picked_up,
            StatCategory::Used => self.used,
        }
    }

    pub fn get_mut(&mut self, category: StatCategory) -> &mut u64 {
        match category {
            StatCategory::Broken => &mut self.broken,
            StatCategory::Crafted => &mut self.crafted,
            StatCategory::Custom => &mut self.custom,
            StatCategory::Dropped => &mut self.dropped,
            StatCategory::Killed => &mut self.killed,
            StatCategory::Mined => &mut self.mined,
            StatCategory::PickedUp => &mut self.picked_up,
            StatCategory::Used => &mut self.used,
        }
    }

    /// Add every counter of `other` into `self`
    pub fn accumulate(&mut self, other: &StatCounters) {
        for category in StatCategory::ALL {
            *self.get_mut(category) += other.get(category);
        }
    }

    pub fn total(&self) -> u64 {
        StatCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Wood species recognised in item keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WoodType {
    Acacia,
    Birch,
    DarkOak,
    Jungle,
    Mangrove,
    Oak,
    Spruce,
}

/// `dark_oak` must precede `oak` so `dark_oak_door` is not tagged as oak
static WOOD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(dark_oak|birch|oak|acacia|spruce|jungle|mangrove)").expect("valid wood pattern")
});

impl WoodType {
    /// Derive the wood species from a (namespace-stripped) item key
    pub fn detect(item_key: &str) -> Option<Self> {
        let found = WOOD_PATTERN.find(item_key)?;
        Self::from_name(found.as_str())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "acacia" => Some(WoodType::Acacia),
            "birch" => Some(WoodType::Birch),
            "dark_oak" => Some(WoodType::DarkOak),
            "jungle" => Some(WoodType::Jungle),
            "mangrove" => Some(WoodType::Mangrove),
            "oak" => Some(WoodType::Oak),
            "spruce" => Some(WoodType::Spruce),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WoodType::Acacia => "acacia",
            WoodType::Birch => "birch",
            WoodType::DarkOak => "dark_oak",
            WoodType::Jungle => "jungle",
            WoodType::Mangrove => "mangrove",
            WoodType::Oak => "oak",
            WoodType::Spruce => "spruce",
        }
    }

    /// Chart label (`dark oak`)
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for WoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per (world, item key)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// Item/block/entity key without the `minecraft:` prefix
    pub item_key: String,
    /// Save directory name
    pub world_name: String,
    /// Stat file stem (player UUID)
    pub player: String,
    pub wood_type: Option<WoodType>,
    #[serde(flatten)]
    pub counters: StatCounters,
}

impl StatRecord {
    pub fn new(
        item_key: impl Into<String>,
        world_name: impl Into<String>,
        player: impl Into<String>,
        counters: StatCounters,
    ) -> Self {
        let item_key = item_key.into();
        let wood_type = WoodType::detect(&item_key);
        Self {
            item_key,
            world_name: world_name.into(),
            player: player.into(),
            wood_type,
            counters,
        }
    }
}

/// Strip the `minecraft:` namespace from a key
pub fn strip_namespace(key: &str) -> &str {
    key.strip_prefix(MINECRAFT_NAMESPACE).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wood_type_detection() {
        assert_eq!(WoodType::detect("oak_log"), Some(WoodType::Oak));
        assert_eq!(WoodType::detect("stone"), None);
        assert_eq!(WoodType::detect("dark_oak_door"), Some(WoodType::DarkOak));
        assert_eq!(WoodType::detect("stripped_spruce_wood"), Some(WoodType::Spruce));
        assert_eq!(WoodType::detect("mangrove_propagule"), Some(WoodType::Mangrove));
    }

    #[test]
    fn test_labels() {
        assert_eq!(WoodType::DarkOak.label(), "dark oak");
        assert_eq!(StatCategory::PickedUp.label(), "picked up");
        assert_eq!(StatCategory::PickedUp.json_key(), "minecraft:picked_up");
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("minecraft:oak_log"), "oak_log");
        assert_eq!(strip_namespace("create:cogwheel"), "create:cogwheel");
    }

    #[test]
    fn test_counters_accumulate() {
        let mut a = StatCounters {
            mined: 3,
            used: 1,
            ..Default::default()
        };
        let b = StatCounters {
            mined: 2,
            crafted: 4,
            ..Default::default()
        };
        a.accumulate(&b);

        assert_eq!(a.mined, 5);
        assert_eq!(a.crafted, 4);
        assert_eq!(a.used, 1);
        assert_eq!(a.total(), 10);
    }

    #[test]
    fn test_record_derives_wood_type() {
        let record = StatRecord::new("birch_planks", "World", "uuid", StatCounters::default());
        assert_eq!(record.wood_type, Some(WoodType::Birch));
    }
}
