//! Configuration structures for pdf-importer.
//!
//! This module provides configuration types for the components of the application:
//!
//! - [`RegistryConfig`] - Model registry defaults and sandbox store behaviour
//! - [`TuiConfig`] - Terminal UI settings (tick rate, frame rate, colors)
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`], and every field may be
//! omitted from a configuration file.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Color scheme for the TUI.
///
/// Controls the visual appearance of the terminal interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ColorScheme {
    /// Automatically detect based on terminal settings.
    #[default]
    Auto,
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
}

/// Configuration for the model registry.
///
/// # Examples
///
/// ```
/// use pdfi_core::RegistryConfig;
///
/// let config = RegistryConfig::default();
/// assert_eq!(config.default_model_name, "Invoice Model");
/// assert_eq!(config.simulated_latency_ms, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name pre-filled into the "new model" draft.
    pub default_model_name: String,

    /// Artificial delay applied to every call against the in-memory store.
    ///
    /// Makes in-flight states (busy rows, saving) visible when exploring the
    /// sandbox interactively.
    pub simulated_latency_ms: u64,

    /// Seed the in-memory store with sample models and imports.
    pub seed_demo_data: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_model_name: "Invoice Model".to_owned(),
            simulated_latency_ms: 0,
            seed_demo_data: false,
        }
    }
}

/// Configuration for the terminal user interface.
///
/// # Examples
///
/// ```
/// use pdfi_core::{TuiConfig, ColorScheme};
///
/// let config = TuiConfig::default();
/// assert_eq!(config.tick_rate_ms, 250);
/// assert_eq!(config.color_scheme, ColorScheme::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// UI tick interval in milliseconds.
    pub tick_rate_ms: u64,

    /// Render rate in frames per second.
    pub frame_rate: u32,

    /// Color scheme for the interface.
    pub color_scheme: ColorScheme,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30,
            color_scheme: ColorScheme::Auto,
        }
    }
}

/// Root configuration for pdf-importer.
///
/// # Examples
///
/// ```
/// use pdfi_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// assert!(json.contains("default_model_name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model registry configuration.
    pub registry: RegistryConfig,

    /// Terminal UI configuration.
    pub tui: TuiConfig,
}

impl Config {
    /// Loads a configuration file (JSON) and validates it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|source| {
            ConfigError::Io {
                path: path.to_owned(),
                source,
            }
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigError::invalid_option(
                "tui.tick_rate_ms",
                "must be greater than zero",
            ));
        }
        if self.tui.frame_rate == 0 {
            return Err(ConfigError::invalid_option(
                "tui.frame_rate",
                "must be greater than zero",
            ));
        }
        if self.registry.default_model_name.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "registry.default_model_name",
                "must not be blank",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_registry_config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.default_model_name, "Invoice Model");
        assert_eq!(config.simulated_latency_ms, 0);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_tui_config_defaults() {
        let config = TuiConfig::default();
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.color_scheme, ColorScheme::Auto);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"registry": {"simulated_latency_ms": 400}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.registry.simulated_latency_ms, 400);
        // Other fields should have defaults
        assert_eq!(config.registry.default_model_name, "Invoice Model");
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_color_scheme_serialization() {
        assert_eq!(
            serde_json::to_string(&ColorScheme::Auto).unwrap(),
            r#""auto""#
        );
        assert_eq!(
            serde_json::to_string(&ColorScheme::Dark).unwrap(),
            r#""dark""#
        );
        assert_eq!(
            serde_json::to_string(&ColorScheme::Light).unwrap(),
            r#""light""#
        );
    }

    #[test]
    fn test_validate_rejects_zero_rates() {
        let mut config = Config::default();
        config.tui.frame_rate = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tui.frame_rate"));
    }

    #[test]
    fn test_validate_rejects_blank_default_name() {
        let mut config = Config::default();
        config.registry.default_model_name = "   ".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tui": {{"color_scheme": "light"}}}}"#).unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();

        let config = Config::load(path).unwrap();
        assert_eq!(config.tui.color_scheme, ColorScheme::Light);
        assert_eq!(config.tui.frame_rate, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Utf8Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let path = Utf8Path::from_path(file.path()).unwrap();

        let err = Config::load(path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
