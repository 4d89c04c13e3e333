//! 配置解析模块
//!
//! 支持 TOML (主要) 和 JSON (可选) 格式。

use contracts::{FleetBlueprint, TelemetryError};

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 解析 TOML 格式配置
pub fn parse_toml(content: &str) -> Result<FleetBlueprint, TelemetryError> {
    toml::from_str(content).map_err(|e| TelemetryError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 JSON 格式配置
pub fn parse_json(content: &str) -> Result<FleetBlueprint, TelemetryError> {
    serde_json::from_str(content).map_err(|e| TelemetryError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 根据格式解析配置
pub fn parse(content: &str, format: ConfigFormat) -> Result<FleetBlueprint, TelemetryError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{GeoPosition, SchemaVersion, TagClassPolicy, TransportMode};

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
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
interval_secs = 0.1
[devices.position]
latitude = 37.7749
longitude = -122.4194
altitude = 12.0
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.schema, SchemaVersion::V2);
        assert_eq!(bp.devices.len(), 2);
        assert_eq!(bp.transmit.port, 6000);
        assert!(matches!(
            bp.devices[0].position,
            Some(GeoPosition::Ranged { .. })
        ));
        assert_eq!(bp.devices[1].tag_class, TagClassPolicy::Random);
        assert!(matches!(
            bp.devices[1].position,
            Some(GeoPosition::Fixed { .. })
        ));
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "schema": "v1",
            "transmit": { "host": "10.0.0.5", "port": 7000, "mode": "log" },
            "devices": [
                { "id": 1234, "nicla_type": 1, "tag_class": { "fixed": 2 } }
            ]
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.schema, SchemaVersion::V1);
        assert_eq!(bp.transmit.mode, TransportMode::Log);
        assert_eq!(bp.devices[0].id, 1234);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, TelemetryError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
