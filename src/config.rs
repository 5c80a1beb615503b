use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pipeline::DEFAULT_JPEG_QUALITY;

/// Top-level configuration for the exif-stamp library.
///
/// Controls output behavior (directory, JPEG quality, dry run) and the
/// defaults applied when building a record from a file name.
///
/// # Loading
///
/// ```rust,no_run
/// use exif_stamp::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.output.jpeg_quality = 85;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output behavior (directory, quality, dry run).
    pub output: OutputConfig,
    /// Defaults applied when pre-filling a record.
    pub defaults: FieldDefaults,
}

/// Output and behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory processed images are written to. `None` means "next to the
    /// original file".
    pub directory: Option<PathBuf>,
    /// JPEG re-encode quality (1–100).
    pub jpeg_quality: u8,
    /// If `true`, run the pipeline but write nothing to disk.
    pub dry_run: bool,
}

/// Defaults applied when pre-filling a record from a file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefaults {
    /// Star rating substituted for empty or unparseable input.
    pub rating: u16,
    /// Derive the title from the file stem when no title is given.
    pub title_from_file_name: bool,
    /// Pre-fill the copyright field with `© <current year>`.
    pub copyright_current_year: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                directory: None,
                jpeg_quality: DEFAULT_JPEG_QUALITY,
                dry_run: false,
            },
            defaults: FieldDefaults {
                rating: crate::metadata::DEFAULT_RATING,
                title_from_file_name: true,
                copyright_current_year: true,
            },
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }
}
