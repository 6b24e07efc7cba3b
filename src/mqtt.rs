//! MQTT publish glue (best-effort single delivery)
//!
//! Owns a `rumqttc` async client plus the background task driving its event
//! loop. Publishes one payload per poll at QoS 0; a failed publish is
//! reported to the caller and never retried here.

use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions, QoS};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::Result;

const CLIENT_ID: &str = "smasrv";
const KEEP_ALIVE: Duration = Duration::from_secs(30);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// MQTT client wrapper owning the background event loop task
pub struct MqttPublisher {
    client: AsyncClient,
    eventloop_handle: JoinHandle<()>,
}

impl MqttPublisher {
    /// Create the client and spawn the event loop task.
    ///
    /// The broker connection is established lazily by the event loop; a
    /// broken connection surfaces as a publish error or an event loop exit.
    pub fn connect(host: &str, port: u16) -> Self {
        let mut options = MqttOptions::new(CLIENT_ID, host, port);
        options.set_keep_alive(KEEP_ALIVE);
        options.set_clean_session(true);

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        let eventloop_handle = tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(event) => debug!(?event, "mqtt event"),
                    Err(e) => {
                        error!(error = %e, "mqtt connection error");
                        break;
                    }
                }
            }
        });

        Self {
            client,
            eventloop_handle,
        }
    }

    /// Publish one payload at QoS 0. Best effort, no retry.
    pub async fn publish(&self, topic: &str, data: &str) -> Result<()> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, data)
            .await?;
        debug!(topic, "queued payload for publishing");
        Ok(())
    }

    /// Disconnect and wait for the event loop to drain queued requests.
    pub async fn shutdown(self) {
        if let Err(e) = self.client.disconnect().await {
            error!(error = %e, "error disconnecting from mqtt broker");
        }
        // The event loop flushes the publish before processing the
        // disconnect, then exits on the closed connection.
        if tokio::time::timeout(SHUTDOWN_TIMEOUT, self.eventloop_handle)
            .await
            .is_err()
        {
            error!("mqtt event loop did not stop in time");
        }
    }
}
