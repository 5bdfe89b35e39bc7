// Configuration loading
//
// Priority (highest first): CLI flags, YAML config file, compiled defaults.

use crate::render::RenderOptions;
use chrono::format::{Item, StrftimeItems};
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR: &str = "tasklist";
const CONFIG_FILE: &str = "config.yml";

/// Config file contents; every key optional for partial overrides
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub prompt: Option<String>,
    pub date_format: Option<String>,
    pub color: Option<bool>,
    pub show_summary: Option<bool>,
}

/// Values supplied on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub date_format: Option<String>,
    pub no_color: bool,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub date_format: String,
    pub color: bool,
    pub show_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            prompt: "> ".to_string(),
            date_format: render.date_format,
            color: render.color,
            show_summary: render.show_summary,
        }
    }
}

impl Config {
    /// Load the config file (explicit or default location) and apply overrides
    ///
    /// A missing file at the default location means defaults; a missing file
    /// given explicitly is an error.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => load_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => load_file(&path)?,
                _ => ConfigFile::default(),
            },
        };
        if let Some(format) = &overrides.date_format {
            validate_date_format(format).context("Invalid --date-format")?;
        }
        Ok(Self::resolve(overrides, file))
    }

    fn resolve(overrides: &Overrides, file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            prompt: file.prompt.unwrap_or(defaults.prompt),
            date_format: overrides
                .date_format
                .clone()
                .or(file.date_format)
                .unwrap_or(defaults.date_format),
            color: !overrides.no_color && file.color.unwrap_or(defaults.color),
            show_summary: file.show_summary.unwrap_or(defaults.show_summary),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            date_format: self.date_format.clone(),
            color: self.color,
            show_summary: self.show_summary,
        }
    }
}

/// `$XDG_CONFIG_HOME/tasklist/config.yml` or the platform equivalent
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn load_file(path: &Path) -> Result<ConfigFile> {
    debug!(path = %path.display(), "Loading config file");

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let file: ConfigFile =
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    if let Some(format) = &file.date_format {
        validate_date_format(format)
            .with_context(|| format!("Invalid date_format in config file: {}", path.display()))?;
    }
    Ok(file)
}

/// Reject strftime strings chrono would fail to render
fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(eyre!("Unsupported date format: {}", format));
    }
    Ok(())
}
