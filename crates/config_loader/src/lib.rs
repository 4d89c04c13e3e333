//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `FleetBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("fleet.toml")).unwrap();
//! println!("Devices: {}", blueprint.devices.len());
//! ```

mod parser;
mod validator;

pub use contracts::FleetBlueprint;
pub use parser::ConfigFormat;

use contracts::TelemetryError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<FleetBlueprint, TelemetryError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<FleetBlueprint, TelemetryError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate an already constructed blueprint
    ///
    /// Used by callers that build or mutate a blueprint in code (e.g. CLI
    /// host/port overrides) and need the same rules re-applied.
    pub fn validate(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
        validator::validate(blueprint)
    }

    /// Serialize FleetBlueprint to TOML string
    pub fn to_toml(blueprint: &FleetBlueprint) -> Result<String, TelemetryError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| TelemetryError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize FleetBlueprint to JSON string
    pub fn to_json(blueprint: &FleetBlueprint) -> Result<String, TelemetryError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| TelemetryError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, TelemetryError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            TelemetryError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            TelemetryError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, TelemetryError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<FleetBlueprint, TelemetryError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_TOML: &str = r#"
schema = "v2"

[transmit]
host = "127.0.0.1"
port = 6000
interval_secs = 0.5

[[devices]]
id = 2
battery_range = [20, 95]
[devices.position]
latitude = [37.7749, 37.7750]
longitude = [-122.4194, -122.4193]
altitude = [10.0, 100.0]

[[devices]]
id = 7
tag_class = "random"
[devices.position]
latitude = 37.7749
longitude = -122.4194
altitude = 12.0
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.devices.len(), 2);
        assert_eq!(bp.transmit.target(), "127.0.0.1:6000");
    }

    #[test]
    fn test_round_trip_toml() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(bp.schema, bp2.schema);
        assert_eq!(bp.devices.len(), bp2.devices.len());
        assert_eq!(bp.devices[0].id, bp2.devices[0].id);
        assert_eq!(bp.devices[0].battery_range, bp2.devices[0].battery_range);
    }

    #[test]
    fn test_round_trip_json() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp.schema, bp2.schema);
        assert_eq!(bp.devices[1].tag_class, bp2.devices[1].tag_class);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        // Duplicate device id should fail validation
        let content = r#"
[[devices]]
id = 2
[devices.position]
latitude = 37.7749
longitude = -122.4194
altitude = 12.0

[[devices]]
id = 2
[devices.position]
latitude = 37.7749
longitude = -122.4194
altitude = 12.0
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }
}
