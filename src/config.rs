use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::DEFAULT_CATEGORY_COLUMN;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "TWEET_EXPLORER_CONFIG";
/// Env var overriding `dataset_path`.
pub const DATASET_ENV: &str = "TWEET_EXPLORER_DATASET";
/// Config file looked up in the working directory when no env var is set.
pub const DEFAULT_CONFIG_FILE: &str = "tweet-explorer.json";

/// Runtime settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub category_column: String,
    /// Rows per table page.
    pub page_size: usize,
    /// Slider increment; `None` gives continuous sliders.
    pub slider_step: Option<f64>,
    pub point_radius: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("./datasets/ProcessedTweets.csv"),
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            page_size: 30,
            slider_step: None,
            point_radius: 2.5,
        }
    }
}

impl AppConfig {
    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Resolve the config from the environment and working directory.
    ///
    /// Order: `$TWEET_EXPLORER_CONFIG`, then `./tweet-explorer.json` if it
    /// exists, then defaults. `$TWEET_EXPLORER_DATASET` overrides the
    /// dataset path in every case.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let dataset = std::env::var_os(DATASET_ENV).map(PathBuf::from);
        Self::resolve(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE), dataset)
    }

    fn resolve(
        explicit: Option<&Path>,
        fallback: &Path,
        dataset_override: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                log::info!("Using config file {}", path.display());
                Self::from_file(path)?
            }
            None if fallback.exists() => {
                log::info!("Using config file {}", fallback.display());
                Self::from_file(fallback)?
            }
            None => {
                log::info!("No config file found, using defaults");
                Self::default()
            }
        };
        if let Some(path) = dataset_override {
            config.dataset_path = path;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "page_size": 10, "slider_step": 0.1 }}"#).unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.slider_step, Some(0.1));
        assert_eq!(config.category_column, "Month");
        assert_eq!(config.dataset_path, AppConfig::default().dataset_path);
    }

    #[test]
    fn missing_fallback_gives_defaults_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::resolve(
            None,
            &dir.path().join("absent.json"),
            Some(PathBuf::from("other.parquet")),
        )
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("other.parquet"));
        assert_eq!(config.page_size, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "page_size = 10").unwrap();
        let err = AppConfig::resolve(Some(file.path()), Path::new("unused.json"), None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }
}
