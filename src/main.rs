//! smasrv entry point
//!
//! One invocation runs one poll cycle: connect to the inverter, read and
//! decode every catalog register, close the session, then publish the
//! available measurements as one JSON object. Scheduling (cron, systemd
//! timer) lives outside the process.

use anyhow::Context as _;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use smasrv::config::Config;
use smasrv::mqtt::MqttPublisher;
use smasrv::reader;
use smasrv::transport::ModbusTcpTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let mut transport = ModbusTcpTransport::connect(&config.sma_host, config.sma_port)
        .await
        .context("failed to connect to inverter")?;

    let poll_result = reader::poll(&mut transport).await;

    if let Err(e) = transport.disconnect().await {
        warn!(error = %e, "error closing inverter session");
    }

    // A failed read aborts the whole cycle: no partial publish. An empty
    // payload object is different and still published (e.g. at night).
    let snapshot = poll_result.context("poll cycle failed, nothing published")?;

    for (name, text) in reader::human_readable(&snapshot) {
        debug!(measurement = name, value = %text, "reading");
    }

    let payload = serde_json::Value::Object(reader::payload(&snapshot)).to_string();
    info!(topic = %config.mqtt_publish_topic, %payload, "publishing snapshot");

    let publisher = MqttPublisher::connect(&config.mqtt_broker_host, config.mqtt_broker_port);
    if let Err(e) = publisher.publish(&config.mqtt_publish_topic, &payload).await {
        warn!(error = %e, "publish failed, measurements dropped for this cycle");
    }
    publisher.shutdown().await;

    Ok(())
}
