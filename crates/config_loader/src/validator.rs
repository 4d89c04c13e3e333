//! 配置校验模块
//!
//! 校验规则：
//! - 设备列表非空，device id 唯一
//! - transmit.host 非空
//! - 发送间隔 (舰队默认与每设备覆盖) 有限且 > 0
//! - battery_range: min <= max 且 max <= 100
//! - tag_class 固定值 <= 2
//! - schema v2 下 position 必填；范围盒每轴 min <= max；经纬度在合法区间

use std::collections::HashSet;

use contracts::{FleetBlueprint, GeoPosition, SchemaVersion, TagClassPolicy, TelemetryError};

/// 校验 FleetBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    validate_roster(blueprint)?;
    validate_device_ids(blueprint)?;
    validate_transmit(blueprint)?;
    validate_intervals(blueprint)?;
    validate_battery_ranges(blueprint)?;
    validate_tag_class(blueprint)?;
    validate_positions(blueprint)?;
    Ok(())
}

/// 校验设备列表非空
fn validate_roster(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    if blueprint.devices.is_empty() {
        return Err(TelemetryError::config_validation(
            "devices",
            "at least one device is required",
        ));
    }
    Ok(())
}

/// 校验 device id 唯一性
fn validate_device_ids(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    let mut seen = HashSet::new();
    for device in &blueprint.devices {
        if !seen.insert(device.id) {
            return Err(TelemetryError::config_validation(
                format!("devices[id={}]", device.id),
                "duplicate device id",
            ));
        }
    }
    Ok(())
}

/// 校验发送目标
fn validate_transmit(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    if blueprint.transmit.host.is_empty() {
        return Err(TelemetryError::config_validation(
            "transmit.host",
            "host cannot be empty",
        ));
    }
    Ok(())
}

/// 校验发送间隔
fn validate_intervals(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    check_interval("transmit.interval_secs", blueprint.transmit.interval_secs)?;
    for device in &blueprint.devices {
        if let Some(interval) = device.interval_secs {
            check_interval(
                &format!("devices[id={}].interval_secs", device.id),
                interval,
            )?;
        }
    }
    Ok(())
}

fn check_interval(field: &str, interval: f64) -> Result<(), TelemetryError> {
    if !interval.is_finite() || interval <= 0.0 {
        return Err(TelemetryError::config_validation(
            field,
            format!("interval_secs must be > 0, got {interval}"),
        ));
    }
    Ok(())
}

/// 校验电量范围
fn validate_battery_ranges(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    for device in &blueprint.devices {
        let [min, max] = device.battery_range;
        if min > max {
            return Err(TelemetryError::config_validation(
                format!("devices[id={}].battery_range", device.id),
                format!("min ({min}) must be <= max ({max})"),
            ));
        }
        if max > 100 {
            return Err(TelemetryError::config_validation(
                format!("devices[id={}].battery_range", device.id),
                format!("battery percentage cannot exceed 100, got {max}"),
            ));
        }
    }
    Ok(())
}

/// 校验 tag_class 固定值
fn validate_tag_class(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    for device in &blueprint.devices {
        if let TagClassPolicy::Fixed(value) = device.tag_class {
            if value > 2 {
                return Err(TelemetryError::config_validation(
                    format!("devices[id={}].tag_class", device.id),
                    format!("fixed tag class must be <= 2, got {value}"),
                ));
            }
        }
    }
    Ok(())
}

/// 校验地理位置
fn validate_positions(blueprint: &FleetBlueprint) -> Result<(), TelemetryError> {
    for device in &blueprint.devices {
        let field = format!("devices[id={}].position", device.id);
        match &device.position {
            None => {
                if blueprint.schema == SchemaVersion::V2 {
                    return Err(TelemetryError::config_validation(
                        field,
                        "position is required under schema v2",
                    ));
                }
            }
            Some(GeoPosition::Fixed {
                latitude,
                longitude,
                ..
            }) => {
                check_latitude(&field, *latitude)?;
                check_longitude(&field, *longitude)?;
            }
            Some(GeoPosition::Ranged {
                latitude,
                longitude,
                altitude,
            }) => {
                check_axis_order(&field, "latitude", latitude)?;
                check_axis_order(&field, "longitude", longitude)?;
                check_axis_order(&field, "altitude", altitude)?;
                check_latitude(&field, latitude[0])?;
                check_latitude(&field, latitude[1])?;
                check_longitude(&field, longitude[0])?;
                check_longitude(&field, longitude[1])?;
            }
        }
    }
    Ok(())
}

fn check_axis_order(field: &str, axis: &str, range: &[f64; 2]) -> Result<(), TelemetryError> {
    if range[0] > range[1] {
        return Err(TelemetryError::config_validation(
            format!("{field}.{axis}"),
            format!("min ({}) must be <= max ({})", range[0], range[1]),
        ));
    }
    Ok(())
}

fn check_latitude(field: &str, value: f64) -> Result<(), TelemetryError> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(TelemetryError::config_validation(
            format!("{field}.latitude"),
            format!("latitude must be within [-90, 90], got {value}"),
        ));
    }
    Ok(())
}

fn check_longitude(field: &str, value: f64) -> Result<(), TelemetryError> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(TelemetryError::config_validation(
            format!("{field}.longitude"),
            format!("longitude must be within [-180, 180], got {value}"),
        ));
    }
    Ok(())
}
