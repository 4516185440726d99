//! Dashboard Configuration
//! File locations, sampling parameters and window geometry.

use crate::data::Region;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Dashboard settings. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub california_file: String,
    pub hongkong_file: String,
    pub paris_file: String,
    pub reviews_file: String,
    pub recommendations_file: String,
    pub banner_image: String,
    pub sample_limit: usize,
    pub sample_seed: u64,
    pub window_width: f32,
    pub window_height: f32,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            california_file: "Disneyland_California.csv".to_string(),
            hongkong_file: "Disneyland_HongKong.csv".to_string(),
            paris_file: "Disneyland_Paris.csv".to_string(),
            reviews_file: "Sampled_DisneylandReviews.csv".to_string(),
            recommendations_file: "recommended_reviews.csv".to_string(),
            banner_image: "pic.png".to_string(),
            sample_limit: 10,
            sample_seed: 42,
            window_width: 1200.0,
            window_height: 900.0,
            export_width: 1400,
            export_height: 600,
        }
    }
}

impl DashboardConfig {
    /// Load `dashboard.json` from the working directory, or defaults when absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_or_default(Path::new(CONFIG_FILE_NAME))
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Path of the sentiment table for a region.
    pub fn region_path(&self, region: Region) -> PathBuf {
        let file = match region {
            Region::California => &self.california_file,
            Region::HongKong => &self.hongkong_file,
            Region::Paris => &self.paris_file,
        };
        self.data_dir.join(file)
    }

    pub fn reviews_path(&self) -> PathBuf {
        self.data_dir.join(&self.reviews_file)
    }

    pub fn recommendations_path(&self) -> PathBuf {
        self.data_dir.join(&self.recommendations_file)
    }

    pub fn banner_path(&self) -> PathBuf {
        self.data_dir.join(&self.banner_image)
    }
}
