//! Report configuration
//!
//! Paths are resolved once by the caller and passed into [`crate::ReportStore`];
//! nothing in the library reads a global default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Dashboard page layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Title bar, intro sidebar, single main column
    #[default]
    Sidebar,
    /// Dated title with a two-column chart grid
    Grid,
}

impl Layout {
    pub fn file_name(&self) -> &'static str {
        match self {
            Layout::Sidebar => "MinecraftStats.html",
            Layout::Grid => "MinecraftStats2.html",
        }
    }
}

/// On-disk config file (`--config mcstats.toml`); every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub minecraft_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub saves_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub layout: Option<Layout>,
    pub site_name: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Fully resolved configuration for one report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub minecraft_dir: PathBuf,
    /// Root holding one directory per world
    pub saves_dir: PathBuf,
    /// Directory holding `<date>-<n>.log.gz` files
    pub logs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub layout: Layout,
    pub site_name: String,
}

impl ReportConfig {
    /// Config rooted at a Minecraft directory with `saves/` and `logs/` below it
    pub fn from_minecraft_dir(minecraft_dir: impl Into<PathBuf>) -> Self {
        let minecraft_dir = minecraft_dir.into();
        Self {
            saves_dir: minecraft_dir.join("saves"),
            logs_dir: minecraft_dir.join("logs"),
            minecraft_dir,
            output_dir: PathBuf::from("."),
            layout: Layout::default(),
            site_name: "MinecraftStats".to_string(),
        }
    }

    /// Resolve from CLI overrides, an optional config file and platform defaults.
    ///
    /// Order: explicit directory → config file directory → user → platform default.
    pub fn resolve(
        minecraft_dir: Option<PathBuf>,
        user: Option<&str>,
        file: Option<ConfigFile>,
    ) -> Result<Self, CoreError> {
        let file = file.unwrap_or_default();

        let base = minecraft_dir
            .or(file.minecraft_dir)
            .or_else(|| user.or(file.user.as_deref()).map(user_minecraft_dir))
            .or_else(default_minecraft_dir)
            .ok_or(CoreError::MinecraftDirNotFound)?;

        let mut config = Self::from_minecraft_dir(base);
        if let Some(saves) = file.saves_dir {
            config.saves_dir = saves;
        }
        if let Some(logs) = file.logs_dir {
            config.logs_dir = logs;
        }
        if let Some(output) = file.output_dir {
            config.output_dir = output;
        }
        if let Some(layout) = file.layout {
            config.layout = layout;
        }
        if let Some(site) = file.site_name {
            if site.trim().is_empty() {
                return Err(CoreError::InvalidConfig {
                    message: "site_name must not be empty".to_string(),
                });
            }
            config.site_name = site;
        }

        Ok(config)
    }

    /// Path of the dashboard for a layout
    pub fn dashboard_path(&self, layout: Layout) -> PathBuf {
        self.output_dir.join(layout.file_name())
    }
}

fn user_minecraft_dir(user: &str) -> PathBuf {
    PathBuf::from("/Users")
        .join(user)
        .join("Library/Application Support/minecraft")
}

/// Launcher directory for the current platform
pub fn default_minecraft_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::data_dir().map(|d| d.join("minecraft"))
    } else if cfg!(target_os = "windows") {
        dirs::config_dir().map(|d| d.join(".minecraft"))
    } else {
        dirs::home_dir().map(|h| h.join(".minecraft"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_user_builds_launcher_path() {
        let config = ReportConfig::resolve(None, Some("culley"), None).unwrap();
        assert_eq!(
            config.saves_dir,
            PathBuf::from("/Users/culley/Library/Application Support/minecraft/saves")
        );
        assert_eq!(
            config.logs_dir,
            PathBuf::from("/Users/culley/Library/Application Support/minecraft/logs")
        );
    }

    #[test]
    fn test_explicit_dir_wins_over_user() {
        let config =
            ReportConfig::resolve(Some(PathBuf::from("/tmp/mc")), Some("culley"), None).unwrap();
        assert_eq!(config.minecraft_dir, PathBuf::from("/tmp/mc"));
        assert_eq!(config.saves_dir, PathBuf::from("/tmp/mc/saves"));
    }

    #[test]
    fn test_config_file_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
minecraft_dir = "/srv/minecraft"
logs_dir = "/var/log/minecraft"
layout = "grid"
site_name = "Home Server"
"#
        )
        .unwrap();

        let loaded = ConfigFile::load(file.path()).unwrap();
        let config = ReportConfig::resolve(None, None, Some(loaded)).unwrap();

        assert_eq!(config.saves_dir, PathBuf::from("/srv/minecraft/saves"));
        assert_eq!(config.logs_dir, PathBuf::from("/var/log/minecraft"));
        assert_eq!(config.layout, Layout::Grid);
        assert_eq!(config.site_name, "Home Server");
        assert_eq!(
            config.dashboard_path(Layout::Grid),
            PathBuf::from("./MinecraftStats2.html")
        );
    }

    #[test]
    fn test_config_file_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"green\"").unwrap();

        assert!(ConfigFile::load(file.path()).is_err());
    }

    #[test]
    fn test_empty_site_name_is_invalid() {
        let file = ConfigFile {
            minecraft_dir: Some(PathBuf::from("/tmp/mc")),
            site_name: Some("  ".to_string()),
            ..Default::default()
        };
        let result = ReportConfig::resolve(None, None, Some(file));
        assert!(matches!(result, Err(CoreError::InvalidConfig { .. })));
    }
}
