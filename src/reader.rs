//! Poll orchestration: catalog-order reads assembled into a snapshot
//!
//! One poll cycle reads every catalog register sequentially over a
//! [`RegisterTransport`], decodes each pair of words, and assembles the
//! result into a [`Snapshot`]. A transport failure on any register aborts
//! the whole cycle; there are no partial snapshots. Sentinel readings are
//! kept in the snapshot as `None` and only dropped at the publish boundary
//! by [`payload`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::codec::decode;
use crate::error::{BridgeError, Result};
use crate::registers::CATALOG;

/// Raw register access as the reader needs it.
///
/// Implemented by [`crate::transport::ModbusTcpTransport`] for the live
/// device and by scripted mocks in tests. One transport instance belongs to
/// exactly one in-flight poll.
#[async_trait]
pub trait RegisterTransport: Send {
    /// Read `count` consecutive holding registers starting at `address`.
    async fn read_holding_registers(&mut self, address: u16, count: u16) -> Result<Vec<u16>>;
}

/// Decoded values for one poll cycle, one entry per catalog register.
///
/// `None` marks a sentinel reading ("not available"), not a failure.
pub type Snapshot = BTreeMap<&'static str, Option<f64>>;

/// Run one poll cycle against the transport.
pub async fn poll<T: RegisterTransport + ?Sized>(transport: &mut T) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();

    for def in CATALOG {
        let count = def.encoding.register_count();
        let words = transport.read_holding_registers(def.address, count).await?;
        if words.len() < count as usize {
            return Err(BridgeError::Transport(format!(
                "short response for register {}: got {} words, expected {}",
                def.address,
                words.len(),
                count
            )));
        }

        let value = decode([words[0], words[1]], def.encoding, def.scale);
        debug!(
            name = def.name,
            address = def.address,
            value = ?value,
            unit = def.unit,
            "decoded register"
        );
        snapshot.insert(def.name, value);
    }

    Ok(snapshot)
}

/// Build the publish payload from a snapshot.
///
/// Only available measurements are kept; absent values are omitted
/// entirely, never sent as null. An empty object is a valid payload
/// (all channels reporting the sentinel, e.g. at night).
pub fn payload(snapshot: &Snapshot) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in snapshot {
        if let Some(v) = value {
            map.insert((*name).to_string(), json!(v));
        }
    }
    map
}

/// Render every measurement with its unit label, for log output.
pub fn human_readable(snapshot: &Snapshot) -> BTreeMap<&'static str, String> {
    CATALOG
        .iter()
        .map(|def| {
            let text = match snapshot.get(def.name) {
                Some(Some(v)) => format!("{} {}", v, def.unit),
                _ => format!("n/a {}", def.unit),
            };
            (def.name, text)
        })
        .collect()
}
