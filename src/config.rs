use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::style::Palette;

/// Largest frame an ICO directory entry can describe.
pub const MAX_ICON_SIZE: u32 = 256;

pub const DEFAULT_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Generator configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct IconConfig {
    /// Frame sizes in pixels, kept largest first
    pub sizes: Vec<u32>,
    pub output: OutputConfig,
    /// Always the fixed gauge palette
    #[serde(skip)]
    pub palette: Palette,
}

/// Where and how the results are written
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving every output file
    pub dir: PathBuf,
    /// Multi-frame icon file name
    pub ico_name: String,
    /// Standalone PNG file name (largest frame only)
    pub png_name: String,
    /// Also write every frame as `icon_<size>.png`
    pub export_frames: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("."),
            ico_name: "icon.ico".to_string(),
            png_name: "icon.png".to_string(),
            export_frames: false,
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            sizes: DEFAULT_SIZES.to_vec(),
            output: OutputConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl OutputConfig {
    pub fn ico_path(&self) -> PathBuf {
        self.in_dir(&self.ico_name)
    }

    pub fn png_path(&self) -> PathBuf {
        self.in_dir(&self.png_name)
    }

    fn in_dir(&self, name: &str) -> PathBuf {
        if self.dir.as_os_str().is_empty() || self.dir == Path::new(".") {
            PathBuf::from(name)
        } else {
            self.dir.join(name)
        }
    }
}

impl IconConfig {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "gauge-icon")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return IconConfig::default();
        };
        if !path.exists() {
            return IconConfig::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!("{}", e);
                warn!("Using default configuration");
                IconConfig::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML document and normalize the size list.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: IconConfig = toml::from_str(contents)?;
        config.normalize()?;
        Ok(config)
    }

    /// Sort sizes largest first, drop duplicates and reject sizes the ICO
    /// container cannot hold.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::Invalid("no icon sizes configured".to_string()));
        }
        if let Some(&bad) = self
            .sizes
            .iter()
            .find(|&&s| s == 0 || s > MAX_ICON_SIZE)
        {
            return Err(ConfigError::Invalid(format!(
                "icon size {} is outside 1..={}",
                bad, MAX_ICON_SIZE
            )));
        }
        self.sizes.sort_unstable_by(|a, b| b.cmp(a));
        self.sizes.dedup();
        Ok(())
    }
}
