//! Service error types
//!
//! One error enum for the whole service. Transport failures abort the
//! current poll cycle; MQTT failures are best-effort and only logged by the
//! caller. Sentinel ("not available") readings are not errors at all, they
//! decode to `None` in the snapshot.

use thiserror::Error;

/// Errors surfaced by the acquisition service
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Modbus transport failures: connect, read, exception response,
    /// or a response shorter than the requested register count
    #[error("transport error: {0}")]
    Transport(String),

    /// MQTT client failures
    #[error("MQTT error: {0}")]
    Mqtt(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Transport(err.to_string())
    }
}

impl From<rumqttc::ClientError> for BridgeError {
    fn from(err: rumqttc::ClientError) -> Self {
        BridgeError::Mqtt(err.to_string())
    }
}
