//! End-to-end poll cycle tests against a scripted mock transport

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::json;

use smasrv::reader::{self, RegisterTransport};
use smasrv::registers::{self, CATALOG};
use smasrv::{BridgeError, Result};

/// Scripted transport: serves canned register words per address and records
/// every request it sees.
struct MockTransport {
    registers: HashMap<u16, Vec<u16>>,
    fail_at: Option<u16>,
    requests: Vec<(u16, u16)>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            registers: HashMap::new(),
            fail_at: None,
            requests: Vec::new(),
        }
    }

    fn with_register(mut self, address: u16, words: [u16; 2]) -> Self {
        self.registers.insert(address, words.to_vec());
        self
    }

    fn failing_at(mut self, address: u16) -> Self {
        self.fail_at = Some(address);
        self
    }
}

#[async_trait]
impl RegisterTransport for MockTransport {
    async fn read_holding_registers(&mut self, address: u16, count: u16) -> Result<Vec<u16>> {
        self.requests.push((address, count));

        if self.fail_at == Some(address) {
            return Err(BridgeError::Transport("connection reset by peer".into()));
        }

        match self.registers.get(&address) {
            Some(words) => Ok(words.clone()),
            None => Ok(vec![0x0000; count as usize]),
        }
    }
}

/// Transport with every catalog register zeroed except the given overrides.
fn transport_with(overrides: &[(u16, [u16; 2])]) -> MockTransport {
    let mut transport = MockTransport::new();
    for def in CATALOG {
        transport = transport.with_register(def.address, [0x0000, 0x0000]);
    }
    for (address, words) in overrides {
        transport = transport.with_register(*address, *words);
    }
    transport
}

#[tokio::test]
async fn successful_poll_covers_every_catalog_entry() {
    let mut transport = transport_with(&[]);
    let snapshot = reader::poll(&mut transport).await.unwrap();

    assert_eq!(snapshot.len(), CATALOG.len());
    for def in CATALOG {
        assert!(snapshot.contains_key(def.name), "missing {}", def.name);
    }
}

#[tokio::test]
async fn registers_are_requested_in_catalog_order_two_at_a_time() {
    let mut transport = transport_with(&[]);
    reader::poll(&mut transport).await.unwrap();

    let expected: Vec<(u16, u16)> = CATALOG.iter().map(|d| (d.address, 2)).collect();
    assert_eq!(transport.requests, expected);
}

#[tokio::test]
async fn dc_power_reading_flows_into_the_payload() {
    // 0x00001388 == 5000 W at the dc_p address
    let mut transport = transport_with(&[(registers::DC_POWER, [0x0000, 0x1388])]);
    let snapshot = reader::poll(&mut transport).await.unwrap();

    assert_eq!(snapshot["dc_p"], Some(5000.0));
    assert_eq!(reader::payload(&snapshot).get("dc_p"), Some(&json!(5000.0)));
}

#[tokio::test]
async fn scaled_measurements_apply_the_catalog_multipliers() {
    let mut transport = transport_with(&[
        // total_return: 1_234_567 raw * 0.001 = 1234.567 kWh
        (registers::TOTAL_YIELD, [0x0012, 0xD687]),
        // dc_v: 41_000 raw * 0.01 = 410 V
        (registers::DC_VOLTAGE, [0x0000, 0xA028]),
        // dc_a: 3210 raw * 0.001 = 3.21 A
        (registers::DC_CURRENT, [0x0000, 0x0C8A]),
    ]);
    let snapshot = reader::poll(&mut transport).await.unwrap();

    let close = |actual: Option<f64>, expected: f64| {
        let actual = actual.expect("value should be available");
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    };
    close(snapshot["total_return"], 1234.567);
    close(snapshot["dc_v"], 410.0);
    close(snapshot["dc_a"], 3.21);
}

#[tokio::test]
async fn sentinel_readings_stay_in_the_snapshot_but_leave_the_payload() {
    let mut transport = transport_with(&[
        // Signed sentinel on every DC channel, as on an idle inverter
        (registers::DC_CURRENT, [0x8000, 0x0000]),
        (registers::DC_VOLTAGE, [0x8000, 0x0000]),
        (registers::DC_POWER, [0x8000, 0x0000]),
    ]);
    let snapshot = reader::poll(&mut transport).await.unwrap();

    // Present in the snapshot as absent values
    assert_eq!(snapshot["dc_a"], None);
    assert_eq!(snapshot["dc_v"], None);
    assert_eq!(snapshot["dc_p"], None);
    assert_eq!(snapshot.len(), CATALOG.len());

    // Omitted from the payload, not serialized as null
    let payload = reader::payload(&snapshot);
    assert!(!payload.contains_key("dc_a"));
    assert!(!payload.contains_key("dc_v"));
    assert!(!payload.contains_key("dc_p"));
    assert!(payload.contains_key("ac_p"));
}

#[tokio::test]
async fn all_sentinel_poll_still_produces_a_snapshot_and_empty_payload() {
    let mut transport = MockTransport::new();
    for def in CATALOG {
        let sentinel = match def.encoding {
            smasrv::EncodingKind::UInt32 => [0xFFFF, 0xFFFF],
            smasrv::EncodingKind::Int32 => [0x8000, 0x0000],
        };
        transport = transport.with_register(def.address, sentinel);
    }

    let snapshot = reader::poll(&mut transport).await.unwrap();
    assert_eq!(snapshot.len(), CATALOG.len());
    assert!(snapshot.values().all(Option::is_none));

    let payload = serde_json::Value::Object(reader::payload(&snapshot));
    assert_eq!(payload.to_string(), "{}");
}

#[tokio::test]
async fn transport_failure_aborts_the_whole_cycle() {
    let mut transport = transport_with(&[]).failing_at(registers::DC_VOLTAGE);
    let result = reader::poll(&mut transport).await;

    assert!(matches!(result, Err(BridgeError::Transport(_))));
    // The failing register is the last one requested
    assert_eq!(transport.requests.last(), Some(&(registers::DC_VOLTAGE, 2)));
}

#[tokio::test]
async fn short_response_is_a_transport_error() {
    struct ShortTransport;

    #[async_trait]
    impl RegisterTransport for ShortTransport {
        async fn read_holding_registers(&mut self, _address: u16, _count: u16) -> Result<Vec<u16>> {
            Ok(vec![0x0001])
        }
    }

    let result = reader::poll(&mut ShortTransport).await;
    assert!(matches!(result, Err(BridgeError::Transport(_))));
}
