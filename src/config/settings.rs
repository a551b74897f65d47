//! User settings for Tally
//!
//! Manages user preferences: display locale, date format, the occurrence
//! limit for repeating transactions, and the calendar and distribution
//! conventions.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::{LocaleTag, MonthOverflow};

/// How a total limit is divided between categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Plain division; shares may drift from the total by rounding error
    #[default]
    Even,
    /// Whole cents, leftover cents to the first categories
    CentExact,
}

/// User settings for Tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Locale used to display currency amounts
    #[serde(default)]
    pub locale: LocaleTag,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Largest occurrence count accepted for a repeating transaction
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences: u32,

    /// Month/year arithmetic convention for days missing from the target month
    #[serde(default)]
    pub month_overflow: MonthOverflow,

    /// Distribution convention
    #[serde(default)]
    pub allocation_mode: AllocationMode,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_max_occurrences() -> u32 {
    365
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: LocaleTag::default(),
            date_format: default_date_format(),
            max_occurrences: default_max_occurrences(),
            month_overflow: MonthOverflow::default(),
            allocation_mode: AllocationMode::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TallyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.locale, LocaleTag::PtBr);
        assert_eq!(settings.max_occurrences, 365);
        assert_eq!(settings.month_overflow, MonthOverflow::Overflow);
        assert_eq!(settings.allocation_mode, AllocationMode::Even);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            locale: LocaleTag::EnUs,
            month_overflow: MonthOverflow::Clamp,
            allocation_mode: AllocationMode::CentExact,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.locale, LocaleTag::EnUs);
        assert_eq!(loaded.month_overflow, MonthOverflow::Clamp);
        assert_eq!(loaded.allocation_mode, AllocationMode::CentExact);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale": "en-US"}"#).unwrap();
        assert_eq!(settings.locale, LocaleTag::EnUs);
        assert_eq!(settings.date_format, "%d/%m/%Y");
        assert_eq!(settings.max_occurrences, 365);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["month_overflow"], "overflow");
        assert_eq!(json["allocation_mode"], "even");
        assert_eq!(json["locale"], "pt-BR");
    }
}
