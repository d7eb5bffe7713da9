//! Portal presentation settings, loadable from a JSON file

use crate::format::THOUSANDS_SEPARATOR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the config file path for the Lambda handler
pub const CONFIG_ENV_VAR: &str = "LOAN_PORTAL_CONFIG";

/// Display and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Digit grouping separator for amounts ('.' for es-CL)
    #[serde(default = "default_separator")]
    pub thousands_separator: char,

    /// Suffix printed after monetary amounts
    #[serde(default = "default_currency_label")]
    pub currency_label: String,

    /// Where the CLI writes amortization schedules by default
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,
}

fn default_separator() -> char { THOUSANDS_SEPARATOR }
fn default_currency_label() -> String { "pesos chilenos".to_string() }
fn default_schedule_path() -> String { "amortization_schedule.csv".to_string() }

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            thousands_separator: THOUSANDS_SEPARATOR,
            currency_label: default_currency_label(),
            schedule_path: default_schedule_path(),
        }
    }
}

impl PortalConfig {
    /// Parse a JSON config; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Invalid portal config")?;
        anyhow::ensure!(
            !config.thousands_separator.is_ascii_digit(),
            "thousands_separator cannot be a digit"
        );
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, otherwise from `LOAN_PORTAL_CONFIG`, otherwise defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(p) => Self::from_file(p),
                None => Ok(Self::default()),
            },
        }
    }
}
