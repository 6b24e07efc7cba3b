//! Process configuration from environment variables
//!
//! Every setting can also be given as a command-line flag; the environment
//! variables match the names the deployment scripts export. Only the device
//! host is required, everything else has the conventional default.

use clap::Parser;

/// SMA inverter to MQTT acquisition service
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Inverter hostname or IP address
    #[arg(long, env = "SMA_HOST")]
    pub sma_host: String,

    /// Inverter Modbus TCP port
    #[arg(long, env = "SMA_PORT", default_value_t = 502)]
    pub sma_port: u16,

    /// MQTT broker hostname
    #[arg(long, env = "MQTT_BROKER_HOST", default_value = "localhost")]
    pub mqtt_broker_host: String,

    /// MQTT broker port
    #[arg(long, env = "MQTT_BROKER_PORT", default_value_t = 1883)]
    pub mqtt_broker_port: u16,

    /// Topic the measurement payload is published to
    #[arg(long, env = "MQTT_PUBLISH_TOPIC", default_value = "energy/solar/sma")]
    pub mqtt_publish_topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_host_is_given() {
        let config = Config::try_parse_from(["smasrv", "--sma-host", "192.168.1.40"]).unwrap();
        assert_eq!(config.sma_host, "192.168.1.40");
        assert_eq!(config.sma_port, 502);
        assert_eq!(config.mqtt_broker_host, "localhost");
        assert_eq!(config.mqtt_broker_port, 1883);
        assert_eq!(config.mqtt_publish_topic, "energy/solar/sma");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "smasrv",
            "--sma-host",
            "inverter.local",
            "--sma-port",
            "1502",
            "--mqtt-publish-topic",
            "energy/solar/roof",
        ])
        .unwrap();
        assert_eq!(config.sma_port, 1502);
        assert_eq!(config.mqtt_publish_topic, "energy/solar/roof");
    }

    #[test]
    fn missing_device_host_is_a_startup_error() {
        std::env::remove_var("SMA_HOST");
        assert!(Config::try_parse_from(["smasrv"]).is_err());
    }
}
