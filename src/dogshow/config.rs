use crate::error::{DogShowError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_REPORT_TITLE: &str = "Dog Show Report";
const DEFAULT_REPORT_AUTHOR: &str = "Dog Show Administration";
const DEFAULT_REPORT_PATH: &str = "DogShowReport.html";

/// Configuration for dogshow, stored as `config.json` in the config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DogShowConfig {
    /// `ReportTitle` parameter handed to the report template
    #[serde(default = "default_report_title")]
    pub report_title: String,

    /// `Author` parameter handed to the report template
    #[serde(default = "default_report_author")]
    pub report_author: String,

    /// Where `report` writes when no path is given
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Replaces the built-in report layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_template: Option<PathBuf>,
}

fn default_report_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn default_report_author() -> String {
    DEFAULT_REPORT_AUTHOR.to_string()
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

impl Default for DogShowConfig {
    fn default() -> Self {
        Self {
            report_title: default_report_title(),
            report_author: default_report_author(),
            report_path: default_report_path(),
            report_template: None,
        }
    }
}

impl DogShowConfig {
    pub const KEYS: [&'static str; 4] = [
        "report-title",
        "report-author",
        "report-path",
        "report-template",
    ];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DogShowConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "report-title" => self.report_title.clone(),
            "report-author" => self.report_author.clone(),
            "report-path" => self.report_path.display().to_string(),
            "report-template" => self
                .report_template
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DogShowError::Config(format!("{} cannot be empty", key)));
        }
        match key {
            "report-title" => self.report_title = value.to_string(),
            "report-author" => self.report_author = value.to_string(),
            "report-path" => self.report_path = PathBuf::from(value),
            "report-template" => {
                self.report_template = match value {
                    "none" => None,
                    path => Some(PathBuf::from(path)),
                }
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|&key| self.get(key).ok().map(|value| (key, value)))
            .collect()
    }
}

fn unknown_key(key: &str) -> DogShowError {
    DogShowError::Config(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        DogShowConfig::KEYS.join(", ")
    ))
}
