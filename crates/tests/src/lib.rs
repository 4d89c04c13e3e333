//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - UDP 端到端测试（本机回环，无需收集器）
//! - 配置到发包的全链路验证

#[cfg(test)]
mod contract_tests {
    use contracts::{SchemaVersion, SensorTag, HEADER_LEN};

    #[test]
    fn test_wire_constants_pinned() {
        assert_eq!(HEADER_LEN, 5);
        assert_eq!(SchemaVersion::V1.packet_len(), 46);
        assert_eq!(SchemaVersion::V2.packet_len(), 77);
    }

    #[test]
    fn test_registry_order_is_stable() {
        // 消费端按 tag 顺序解析，调整顺序属于破坏性变更
        let wires: Vec<u8> = SensorTag::ALL.iter().map(|tag| tag.wire()).collect();
        assert_eq!(
            wires,
            vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use codec::decode_packet;
    use contracts::{
        DeviceConfig, FieldValue, FleetBlueprint, GeoPosition, SchemaVersion, SensorTag,
        TagClassPolicy, TransmitConfig, TransportMode,
    };
    use simulator::{DeviceFleet, FleetLimits};
    use tokio::net::UdpSocket;
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    fn udp_device(id: u16, position: Option<GeoPosition>) -> DeviceConfig {
        DeviceConfig {
            id,
            nicla_type: 1,
            tag_class: TagClassPolicy::Fixed(2),
            battery_range: [30, 70],
            interval_secs: None,
            position,
        }
    }

    fn udp_blueprint(
        schema: SchemaVersion,
        port: u16,
        devices: Vec<DeviceConfig>,
    ) -> FleetBlueprint {
        FleetBlueprint {
            schema,
            seed: Some(2024),
            transmit: TransmitConfig {
                host: "127.0.0.1".to_string(),
                port,
                interval_secs: 0.005,
                mode: TransportMode::Udp,
            },
            devices,
        }
    }

    /// End-to-end test: blueprint -> DeviceFleet -> UDP loopback -> decode
    ///
    /// 验证完整的数据流：
    /// 1. 蓝图启动双设备舰队
    /// 2. worker 生成、编码并经 UDP 发送
    /// 3. 接收端逐包解码并核对字段
    #[tokio::test]
    async fn test_e2e_udp_fleet_v2() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let devices = vec![
            udp_device(
                1,
                Some(GeoPosition::Fixed {
                    latitude: 51.5,
                    longitude: -0.12,
                    altitude: 30.0,
                }),
            ),
            udp_device(
                2,
                Some(GeoPosition::Ranged {
                    latitude: [59.0, 60.0],
                    longitude: [17.0, 19.0],
                    altitude: [0.0, 120.0],
                }),
            ),
        ];
        let blueprint = udp_blueprint(SchemaVersion::V2, port, devices);
        config_loader::ConfigLoader::validate(&blueprint).unwrap();

        let mut fleet = DeviceFleet::start(
            &blueprint,
            FleetLimits {
                max_packets: Some(3),
            },
        )
        .await
        .unwrap();

        let mut buf = [0u8; 256];
        let mut per_device: HashMap<u16, u64> = HashMap::new();

        for _ in 0..6 {
            let (len, _) = timeout(RECV_TIMEOUT, receiver.recv_from(&mut buf))
                .await
                .expect("no datagram within timeout")
                .unwrap();
            assert_eq!(len, 77);
            assert_eq!(buf[0] as usize, len);

            let packet = decode_packet(&buf[..len], SchemaVersion::V2).unwrap();
            *per_device.entry(packet.device_id).or_insert(0) += 1;

            assert_eq!(packet.nicla_type, 1);
            assert_eq!(packet.tag_class, 2);

            match packet.field(SensorTag::Battery) {
                Some(FieldValue::U8(level)) => assert!((30..=70).contains(level)),
                other => panic!("unexpected battery field: {:?}", other),
            }

            match packet.field(SensorTag::Orientation) {
                Some(FieldValue::F32x4(q)) => {
                    let norm: f32 = q.iter().map(|c| c * c).sum::<f32>().sqrt();
                    assert!((norm - 1.0).abs() < 1e-5, "norm = {norm}");
                }
                other => panic!("unexpected orientation field: {:?}", other),
            }

            if packet.device_id == 1 {
                match packet.field(SensorTag::Latitude) {
                    Some(FieldValue::F32(lat)) => assert!((*lat - 51.5).abs() < 1e-4),
                    other => panic!("unexpected latitude field: {:?}", other),
                }
            }
        }

        assert_eq!(per_device.get(&1), Some(&3));
        assert_eq!(per_device.get(&2), Some(&3));

        fleet.wait_idle().await;
        fleet.shutdown().await;
    }

    /// v1 大端布局：长度字节、设备号字节序、毫 g 加速度
    #[tokio::test]
    async fn test_e2e_udp_fleet_v1_wire_shape() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = receiver.local_addr().unwrap().port();

        let blueprint = udp_blueprint(SchemaVersion::V1, port, vec![udp_device(1234, None)]);
        config_loader::ConfigLoader::validate(&blueprint).unwrap();

        let mut fleet = DeviceFleet::start(
            &blueprint,
            FleetLimits {
                max_packets: Some(2),
            },
        )
        .await
        .unwrap();

        let mut buf = [0u8; 256];
        for _ in 0..2 {
            let (len, _) = timeout(RECV_TIMEOUT, receiver.recv_from(&mut buf))
                .await
                .expect("no datagram within timeout")
                .unwrap();
            assert_eq!(len, 46);
            assert_eq!(buf[0], 46);
            assert_eq!(buf[1..3], 1234u16.to_be_bytes());

            let packet = decode_packet(&buf[..len], SchemaVersion::V1).unwrap();

            match packet.field(SensorTag::Acceleration) {
                Some(FieldValue::I16x3(axes)) => {
                    for axis in axes {
                        assert!((-1000..=1000).contains(axis));
                    }
                }
                other => panic!("unexpected acceleration field: {:?}", other),
            }

            match packet.field(SensorTag::Temperature) {
                Some(FieldValue::F32(celsius)) => {
                    assert!((15.0f32..=35.0).contains(celsius));
                }
                other => panic!("unexpected temperature field: {:?}", other),
            }

            // v1 不携带地理字段
            assert!(packet.field(SensorTag::Latitude).is_none());
            assert!(packet.field(SensorTag::Co2).is_none());
        }

        fleet.wait_idle().await;
        fleet.shutdown().await;
    }
}

#[cfg(test)]
mod config_pipeline_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use simulator::{DeviceFleet, FleetLimits};

    const FLEET_TOML: &str = r#"
schema = "v1"
seed = 7

[transmit]
mode = "log"
interval_secs = 0.002

[[devices]]
id = 21

[[devices]]
id = 22
interval_secs = 0.001
battery_range = [50, 50]
"#;

    /// 配置字符串 -> 蓝图 -> 舰队 -> 指标全链路
    #[tokio::test]
    async fn test_toml_to_fleet_metrics() {
        let blueprint = ConfigLoader::load_from_str(FLEET_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(blueprint.devices.len(), 2);

        let mut fleet = DeviceFleet::start(
            &blueprint,
            FleetLimits {
                max_packets: Some(4),
            },
        )
        .await
        .unwrap();
        fleet.wait_idle().await;

        for (device_id, metrics) in fleet.monitors() {
            assert!(device_id == 21 || device_id == 22, "device {device_id}");
            assert_eq!(metrics.packets_sent(), 4);
            assert_eq!(metrics.bytes_sent(), 4 * 46);
            assert_eq!(metrics.send_errors(), 0);
            assert_eq!(metrics.encode_errors(), 0);
        }

        fleet.shutdown().await;
    }
}
