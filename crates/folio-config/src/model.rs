use std::{collections::BTreeMap, env, path::PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "FOLIO_HOME";
const DEFAULT_DIR_NAME: &str = ".folio";
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Stores user-configurable dashboard preferences.
///
/// Every field falls back to its default when missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Currency code appended to amounts in text output.
    pub currency: String,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    /// Offset used for calendar boundaries. `None` means the host's local zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
    /// Reject unknown period names instead of treating them as "all".
    #[serde(default)]
    pub strict_periods: bool,
    #[serde(default = "Config::default_page_size")]
    pub page_size: usize,
    /// Chart colour overrides keyed by label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<String, String>,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_book: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            currency_precision: Self::default_currency_precision(),
            utc_offset_minutes: None,
            strict_periods: false,
            page_size: Self::default_page_size(),
            palette: BTreeMap::new(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_book: None,
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn default_page_size() -> usize {
        10
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Directory holding config and record books: `FOLIO_HOME`, then
    /// `data_root`, then `~/.folio`.
    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        if let Some(path) = &self.data_root {
            return path.clone();
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn books_dir(&self) -> PathBuf {
        self.resolve_data_root().join("books")
    }

    /// Fixed offset for calendar boundaries, if one is configured.
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        let Some(minutes) = self.utc_offset_minutes else {
            return Ok(None);
        };
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes {minutes} is outside ±{MAX_OFFSET_MINUTES}"
            )));
        }
        Ok(FixedOffset::east_opt(minutes * 60))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        self.fixed_offset()?;
        Ok(())
    }
}
