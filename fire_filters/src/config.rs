//! Loading and saving the filter configuration file
//!
//! The file is TOML with an `[app]` section carrying the format version and
//! a `[filters]` section with the starting value of each filter cell. Any
//! missing section or field falls back to its default.

use shared::{AppSection, FilterConfig};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read filter config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write filter config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid filter config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize filter config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unsupported filter config version '{0}' (expected {expected})", expected = AppSection::CURRENT_VERSION)]
    UnsupportedVersion(String),
}

pub fn parse_config(content: &str) -> Result<FilterConfig, ConfigError> {
    let config: FilterConfig = toml::from_str(content)?;
    if !config.app.is_supported_version() {
        return Err(ConfigError::UnsupportedVersion(config.app.version));
    }
    Ok(config)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<FilterConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;
    log::info!("Loaded filter config from {}", path.display());
    Ok(config)
}

/// Loads the config, falling back to the built-in defaults on any error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> FilterConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            log::info!("No filter config at {}, using defaults", path.display());
            FilterConfig::default()
        }
        Err(error) => {
            log::warn!("{error}; using default filters");
            FilterConfig::default()
        }
    }
}

pub fn save_config(path: impl AsRef<Path>, config: &FilterConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let toml_content = toml::to_string_pretty(config)?;

    let content_with_header = format!(
        "# Wildfire filter configuration\n\
         # Starting values for the year, cause, state and month filters\n\
         \n\
         {toml_content}"
    );

    fs::write(path, content_with_header).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Saved filter config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FireFilters;
    use shared::{FilterValues, MonthYear, YearRange};

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            [app]
            version = "1.0.0"

            [filters]
            year_range = { min = 1992, max = 2015 }
            selected_causes = ["Lightning"]
            selected_month_year = { month = 6, year = 2010 }
            "#,
        )
        .unwrap();

        assert_eq!(config.filters.year_range, YearRange::new(1992, 2015));
        assert_eq!(config.filters.selected_causes, vec!["Lightning"]);
        assert_eq!(config.filters.selected_state, "None");
        assert_eq!(config.filters.hovered_month, None);
        assert_eq!(
            config.filters.selected_month_year,
            Some(MonthYear::new(6, 2010))
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), FilterConfig::default());
    }

    #[test]
    fn test_empty_app_section_keeps_filters() {
        let config = parse_config(
            r#"
            [app]

            [filters]
            selected_state = "Texas"
            "#,
        )
        .unwrap();

        assert_eq!(config.app, AppSection::default());
        assert_eq!(config.filters.selected_state, "Texas");
        assert_eq!(config.filters.year_range, YearRange::new(2004, 2015));
    }

    #[test]
    fn test_months_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.toml");

        let config = FilterConfig {
            filters: FilterValues {
                hovered_month: Some(3),
                selected_month: Some(11),
                selected_month_year: Some(MonthYear::new(11, 2007)),
                ..FilterValues::default()
            },
            ..FilterConfig::default()
        };
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let error = parse_config("[app]\nversion = \"9.9.9\"\n").unwrap_err();
        assert!(matches!(error, ConfigError::UnsupportedVersion(version) if version == "9.9.9"));
    }

    #[test]
    fn test_malformed_config_rejected() {
        let error = parse_config("[filters]\nyear_range = \"soon\"\n").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_then_load_into_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.toml");

        let config = FilterConfig {
            filters: FilterValues {
                selected_causes: vec!["Arson".to_string(), "Campfire".to_string()],
                selected_state: "Arizona".to_string(),
                selected_month: Some(8),
                ..FilterValues::default()
            },
            ..FilterConfig::default()
        };
        save_config(&path, &config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Wildfire filter configuration"));

        let loaded = load_config(&path).unwrap();
        let filters = FireFilters::with_defaults(loaded.filters);
        assert_eq!(filters.selected_state.get(), "Arizona");
        assert_eq!(filters.selected_causes.get(), vec!["Arson", "Campfire"]);
        assert_eq!(filters.selected_month.get(), Some(8));
        assert_eq!(filters.year_range.get(), YearRange::new(2004, 2015));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(load_config(&path), Err(ConfigError::Read { .. })));
        assert_eq!(load_config_or_default(&path), FilterConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[filters\n").unwrap();

        assert_eq!(load_config_or_default(&path), FilterConfig::default());
    }
}
