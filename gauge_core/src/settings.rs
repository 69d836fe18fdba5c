//! # Presentation Settings
//!
//! Settings that shape how results are displayed. They never change an
//! estimate, only how it is rendered (display units, currency symbol,
//! whether formula names are listed).
//!
//! Settings load from TOML; every key is optional.
//!
//! ```toml
//! unit_system = "imperial"
//! currency_symbol = "$"
//! show_formulas = false
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::settings::{Settings, UnitSystem};
//!
//! let settings = Settings::from_toml_str("unit_system = \"imperial\"").unwrap();
//! assert_eq!(settings.unit_system, UnitSystem::Imperial);
//! assert_eq!(settings.currency_symbol, "$");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Unit system used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Centimeters, kilograms, liters
    #[default]
    Metric,
    /// Feet/inches, pounds, fluid ounces
    Imperial,
}

impl UnitSystem {
    /// Display name for the unit system
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric",
            UnitSystem::Imperial => "Imperial",
        }
    }
}

/// Global presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Units used when displaying heights, weights and volumes
    pub unit_system: UnitSystem,

    /// Symbol prefixed to currency amounts
    pub currency_symbol: String,

    /// List the names of the formulas behind each result
    pub show_formulas: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            unit_system: UnitSystem::Metric,
            currency_symbol: "$".to_string(),
            show_formulas: true,
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        toml::from_str(source).map_err(|e| CalcError::config(e.to_string()))
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), units = ?settings.unit_system, "loaded settings");
        Ok(settings)
    }

    /// Same settings with a different unit system
    pub fn with_unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    pub fn is_imperial(&self) -> bool {
        self.unit_system == UnitSystem::Imperial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.unit_system, UnitSystem::Metric);
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.show_formulas);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_full_toml() {
        let settings = Settings::from_toml_str(
            r#"
            unit_system = "imperial"
            currency_symbol = "€"
            show_formulas = false
            "#,
        )
        .unwrap();
        assert!(settings.is_imperial());
        assert_eq!(settings.currency_symbol, "€");
        assert!(!settings.show_formulas);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::from_toml_str("colour = \"blue\"").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here/gauge.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_unit_system_serialization() {
        let json = serde_json::to_string(&UnitSystem::Imperial).unwrap();
        assert_eq!(json, "\"imperial\"");
    }
}
