//! `level.dat` reader (gzip-compressed NBT)

use crate::error::CoreError;
use crate::models::WorldMeta;
use crate::parsers::locator::LevelFile;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Root compound of `level.dat`; only the fields the report uses
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LevelDat {
    #[serde(rename = "Data")]
    pub data: LevelData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LevelData {
    #[serde(rename = "LevelName")]
    pub level_name: String,
    #[serde(default)]
    pub hardcore: bool,
    #[serde(rename = "Time", default)]
    pub time: i64,
}

/// Parser for world metadata
#[derive(Debug, Default, Clone, Copy)]
pub struct LevelParser;

impl LevelParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, file: &LevelFile) -> Result<WorldMeta, CoreError> {
        let raw = std::fs::read(&file.path).map_err(|e| CoreError::FileRead {
            path: file.path.clone(),
            source: e,
        })?;
        self.parse_bytes(&raw, &file.path, &file.world)
    }

    /// Decode gzip-compressed NBT bytes
    pub fn parse_bytes(&self, raw: &[u8], path: &Path, world: &str) -> Result<WorldMeta, CoreError> {
        let mut nbt = Vec::new();
        GzDecoder::new(raw)
            .read_to_end(&mut nbt)
            .map_err(|e| CoreError::Decompress {
                path: path.to_path_buf(),
                source: e,
            })?;

        let level: LevelDat = fastnbt::from_bytes(&nbt).map_err(|e| CoreError::NbtParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(WorldMeta {
            world_dir: world.to_string(),
            level_name: level.data.level_name,
            hardcore: level.data.hardcore,
            play_time: level.data.time,
        })
    }
}

/// Gzip-compressed NBT for a minimal `level.dat`
#[cfg(test)]
pub(crate) fn encode_level_dat(level_name: &str, hardcore: bool, time: i64) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let level = LevelDat {
        data: LevelData {
            level_name: level_name.to_string(),
            hardcore,
            time,
        },
    };
    let nbt = fastnbt::to_bytes(&level).unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&nbt).unwrap();
    encoder.finish().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_level_dat() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Hard Mode/level.dat");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, encode_level_dat("Hard Mode!", true, 1_234_567)).unwrap();

        let meta = LevelParser::new()
            .parse(&LevelFile {
                world: "Hard Mode".to_string(),
                path,
            })
            .unwrap();

        assert_eq!(meta.world_dir, "Hard Mode");
        assert_eq!(meta.level_name, "Hard Mode!");
        assert!(meta.hardcore);
        assert_eq!(meta.play_time, 1_234_567);
    }

    #[test]
    fn test_not_gzip() {
        let result = LevelParser::new().parse_bytes(b"plain text", Path::new("level.dat"), "W");
        assert!(matches!(result, Err(CoreError::Decompress { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = LevelParser::new().parse(&LevelFile {
            world: "W".to_string(),
            path: PathBuf::from("/nonexistent/level.dat"),
        });
        assert!(matches!(result, Err(CoreError::FileRead { .. })));
    }
}
