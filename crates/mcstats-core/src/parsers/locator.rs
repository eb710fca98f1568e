//! Save-directory discovery
//!
//! Layout: `<saves>/<world>/stats/<player>.json` and `<saves>/<world>/level.dat`.
//! The world name is read from the naming convention, not from a fixed path depth.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const STATS_DIR: &str = "stats";
const LEVEL_FILE: &str = "level.dat";

/// A player stats file and the world it belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StatFile {
    pub world: String,
    pub path: PathBuf,
}

impl StatFile {
    /// File stem, the player UUID for vanilla saves
    pub fn player(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// A world's `level.dat`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LevelFile {
    pub world: String,
    pub path: PathBuf,
}

/// Find every `<world>/stats/*.json` below `root`, sorted by path.
///
/// A missing root yields an empty list.
pub fn locate_stat_files(root: &Path) -> Vec<StatFile> {
    let mut files: Vec<StatFile> = walk_files(root)
        .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
        .filter_map(|path| {
            let stats_dir = path.parent()?;
            if stats_dir.file_name()? != STATS_DIR {
                return None;
            }
            let world = dir_name(stats_dir.parent()?)?;
            Some(StatFile { world, path })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), count = files.len(), "Discovered stat files");
    files
}

/// Find every `<world>/level.dat` below `root`, sorted by path.
pub fn locate_level_files(root: &Path) -> Vec<LevelFile> {
    let mut files: Vec<LevelFile> = walk_files(root)
        .filter(|path| path.file_name().map(|n| n == LEVEL_FILE).unwrap_or(false))
        .filter_map(|path| {
            let world = dir_name(path.parent()?)?;
            Some(LevelFile { world, path })
        })
        .collect();

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), count = files.len(), "Discovered level files");
    files
}

fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
}

fn dir_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_locates_stats_and_level_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(&root.join("Alpha/stats/1111.json"));
        touch(&root.join("Alpha/level.dat"));
        touch(&root.join("Beta World/stats/2222.json"));
        touch(&root.join("Beta World/stats/3333.json"));
        touch(&root.join("Beta World/level.dat"));
        touch(&root.join("Beta World/advancements/2222.json"));
        touch(&root.join("Beta World/stats/notes.txt"));

        let stats = locate_stat_files(root);
        let worlds: Vec<_> = stats.iter().map(|f| f.world.as_str()).collect();
        assert_eq!(worlds, vec!["Alpha", "Beta World", "Beta World"]);
        assert_eq!(stats[1].player(), "2222");

        let levels = locate_level_files(root);
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].world, "Alpha");
        assert_eq!(levels[1].world, "Beta World");
    }

    #[test]
    fn test_world_name_independent_of_root_depth() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("a/b/c/saves");
        touch(&root.join("Deep/stats/abcd.json"));

        let stats = locate_stat_files(&root);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].world, "Deep");
    }

    #[test]
    fn test_missing_root_is_empty() {
        let stats = locate_stat_files(Path::new("/nonexistent/saves"));
        let levels = locate_level_files(Path::new("/nonexistent/saves"));
        assert!(stats.is_empty());
        assert!(levels.is_empty());
    }
}
