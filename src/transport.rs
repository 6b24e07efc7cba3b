//! Modbus TCP transport for the inverter session
//!
//! Thin wrapper around a `tokio-modbus` TCP context, fixed to the SMA unit
//! identifier. A session lives for exactly one poll cycle: connect before
//! the first read, disconnect after the last read or on failure. Sessions
//! are never held between infrequent polls.

use async_trait::async_trait;
use tokio::net::lookup_host;
use tokio_modbus::client::{tcp, Context};
use tokio_modbus::prelude::*;
use tracing::info;

use crate::error::{BridgeError, Result};
use crate::reader::RegisterTransport;
use crate::registers::SMA_UNIT_ID;

/// Modbus TCP connection to the inverter
pub struct ModbusTcpTransport {
    ctx: Context,
}

impl ModbusTcpTransport {
    /// Resolve the device address and connect with the SMA unit identifier.
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = lookup_host((host, port))
            .await?
            .next()
            .ok_or_else(|| {
                BridgeError::Config(format!("device host {host} resolved to no address"))
            })?;

        let ctx = tcp::connect_slave(addr, Slave(SMA_UNIT_ID))
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        info!(%addr, unit = SMA_UNIT_ID, "connected to inverter");
        Ok(Self { ctx })
    }

    /// Close the session.
    pub async fn disconnect(mut self) -> Result<()> {
        self.ctx
            .disconnect()
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))
    }
}

#[async_trait]
impl RegisterTransport for ModbusTcpTransport {
    async fn read_holding_registers(&mut self, address: u16, count: u16) -> Result<Vec<u16>> {
        self.ctx
            .read_holding_registers(address, count)
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))?
            .map_err(|e| {
                BridgeError::Transport(format!("exception reading register {address}: {e:?}"))
            })
    }
}
