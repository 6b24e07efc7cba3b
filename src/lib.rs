//! # smasrv - SMA Inverter Acquisition Service
//!
//! Polls an SMA photovoltaic inverter over Modbus TCP, decodes the fixed set
//! of analog measurements (DC/AC power, current, voltage, cumulative energy)
//! from raw register words into scaled physical values, and publishes the
//! available subset as a flat JSON object to an MQTT topic.
//!
//! The decoding layer is pure and transport-free: [`codec`] turns two
//! big-endian register words plus an encoding kind and scale factor into an
//! optional value ("not available" sentinel patterns decode to `None`), and
//! [`registers`] holds the static poll catalog for the SMA register map.
//! [`reader`] drives one poll cycle against anything implementing
//! [`RegisterTransport`], which keeps the orchestration testable without a
//! live device.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smasrv::{reader, transport::ModbusTcpTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut transport = ModbusTcpTransport::connect("192.168.1.40", 502).await?;
//!     let snapshot = reader::poll(&mut transport).await?;
//!     transport.disconnect().await?;
//!
//!     println!("{}", serde_json::Value::Object(reader::payload(&snapshot)));
//!     Ok(())
//! }
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Register word decoding (encoding kinds, sentinel detection, scaling)
pub mod codec;

/// SMA register map constants and the static poll catalog
pub mod registers;

/// Poll orchestration: catalog-order reads assembled into a snapshot
pub mod reader;

// ============================================================================
// I/O glue
// ============================================================================

/// Modbus TCP transport for the inverter session
pub mod transport;

/// MQTT publish glue (best-effort single delivery)
pub mod mqtt;

/// Process configuration from environment variables
pub mod config;

/// Service error types
pub mod error;

// Re-export the main API at crate root
pub use codec::{decode, EncodingKind};
pub use error::{BridgeError, Result};
pub use reader::{RegisterTransport, Snapshot};
pub use registers::{RegisterDef, CATALOG, SMA_UNIT_ID};
