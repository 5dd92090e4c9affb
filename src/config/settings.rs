//! User settings for DuoSpend
//!
//! Display preferences and defaults for new projects. Every field has a
//! default so older or hand-edited config files still load.

use serde::{Deserialize, Serialize};

use super::paths::DuoSpendPaths;
use crate::error::DuoSpendError;
use crate::models::ExpenseSort;

/// User settings for DuoSpend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Ordering used by `expense list` when none is given
    #[serde(default)]
    pub default_expense_sort: ExpenseSort,

    /// Pre-filled party 1 name for new projects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_party1_name: Option<String>,

    /// Pre-filled party 2 name for new projects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_party2_name: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_expense_sort: ExpenseSort::default(),
            default_party1_name: None,
            default_party2_name: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &DuoSpendPaths) -> Result<Self, DuoSpendError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DuoSpendError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| DuoSpendError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DuoSpendPaths) -> Result<(), DuoSpendError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DuoSpendError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DuoSpendError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
