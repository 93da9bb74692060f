use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::progress::badges::DEFAULT_MILESTONE;

fn default_user_id() -> String {
    "local".to_string()
}
fn default_name() -> String {
    "Eco Friend".to_string()
}
fn default_milestone() -> u32 {
    DEFAULT_MILESTONE
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Rows in the database are keyed by this id
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            name: default_name(),
            email: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeConfig {
    /// Activities per badge
    #[serde(default = "default_milestone")]
    pub milestone: u32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            milestone: default_milestone(),
        }
    }
}

impl BadgeConfig {
    pub fn milestone(&self) -> u32 {
        self.milestone.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    #[serde(default = "default_true")]
    pub highlight_overdue: bool,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            highlight_overdue: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub badges: BadgeConfig,
    #[serde(default)]
    pub goals: GoalConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "greenstep")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("greenstep.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.profile.user_id, "local");
        assert_eq!(config.badges.milestone(), 5);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[badges]\nmilestone = 10\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.badges.milestone, 10);
        assert_eq!(config.profile, ProfileConfig::default());
        assert!(config.goals.highlight_overdue);
    }

    #[test]
    fn zero_milestone_is_clamped() {
        let badges = BadgeConfig { milestone: 0 };
        assert_eq!(badges.milestone(), 1);
    }

    #[test]
    fn save_then_load_keeps_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.profile.name = "Ada".into();
        config.profile.email = Some("ada@example.com".into());
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[badges\nmilestone = ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
