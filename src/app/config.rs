//! Persistent settings, stored as TOML in the platform config dir.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::extract::{
    ExtractOptions, DEFAULT_SENSITIVITY, DEFAULT_TOP_COLORS, SENSITIVITY_MAX, SENSITIVITY_MIN,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Extraction tunables, the only two knobs the engine exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Background removal threshold, 10-100. Reads inverted: higher
    /// values demand a bigger distance from the background estimate, so
    /// less of the image counts as garment.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u32,
    /// How many dominant colors to report per image.
    #[serde(default = "default_top_colors")]
    pub top_colors: usize,
}

fn default_sensitivity() -> u32 {
    DEFAULT_SENSITIVITY
}

fn default_top_colors() -> usize {
    DEFAULT_TOP_COLORS
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            top_colors: default_top_colors(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "threadtone", "threadtone")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Loads the config file, creating it with defaults when missing.
    /// A file that no longer parses is replaced with defaults after a
    /// warning rather than aborting the command.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            match toml::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    eprintln!("Warning: could not parse {}: {e}", path.display());
                    eprintln!("Falling back to default settings");
                    let config = Self::default();
                    config.save()?;
                    Ok(config)
                }
            }
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Merges CLI overrides over the stored settings. Sensitivity clamps
    /// into its documented 10-100 domain and `top_colors` floors at 1,
    /// wherever they came from.
    pub fn extract_options(
        &self,
        sensitivity: Option<u32>,
        top_colors: Option<usize>,
    ) -> ExtractOptions {
        let sensitivity = sensitivity
            .unwrap_or(self.extraction.sensitivity)
            .clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
        ExtractOptions {
            sensitivity: sensitivity as f32,
            top_colors: top_colors.unwrap_or(self.extraction.top_colors).max(1),
        }
    }
}
