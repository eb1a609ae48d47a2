use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::reports::WeekStart;

fn default_username() -> String {
    "athlete".to_string()
}
fn default_bar_width() -> usize {
    28
}
fn default_sets() -> u32 {
    3
}
fn default_reps() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Name used when the profile has none yet
    #[serde(default = "default_username")]
    pub default_username: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_username: default_username(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    /// Cells in the widest bar of the weekly chart
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            bar_width: default_bar_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutConfig {
    /// Sets given to an exercise added to a routine without `--sets`
    #[serde(default = "default_sets")]
    pub default_sets: u32,
    #[serde(default = "default_reps")]
    pub default_reps: u32,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            default_sets: default_sets(),
            default_reps: default_reps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub workout: WorkoutConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "benchmark")
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
        Ok(Self::data_dir()?.join("benchmark.db"))
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
        assert_eq!(config.reports.week_start, WeekStart::Sunday);
        assert_eq!(config.workout.default_sets, 3);
        assert_eq!(config.profile.default_username, "athlete");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reports]\nweek_start = \"monday\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.reports.week_start, WeekStart::Monday);
        assert_eq!(config.reports.bar_width, 28);
        assert_eq!(config.workout.default_reps, 10);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.profile.default_username = "sam".into();
        config.workout.default_sets = 5;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.profile.default_username, "sam");
        assert_eq!(loaded.workout.default_sets, 5);
    }

    #[test]
    fn rejects_unknown_week_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reports]\nweek_start = \"friday\"\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
