use std::time::Duration;

use crate::client::{Timings, RECONNECT_DELAY, RETRY_DELAY};
use crate::gateway::heartbeat::HEARTBEAT_INTERVAL;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5140";

pub struct Config {
    pub endpoint: String,
    pub token: String,
    pub timings: Timings,
}

impl Config {
    pub fn from_env() -> Self {
        let heartbeat_interval = std::env::var("SATORI_HEARTBEAT_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(HEARTBEAT_INTERVAL);
        let retry_delay = std::env::var("SATORI_RETRY_DELAY")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(RETRY_DELAY);
        let reconnect_delay = std::env::var("SATORI_RECONNECT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(RECONNECT_DELAY);

        Self {
            endpoint: std::env::var("SATORI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            token: std::env::var("SATORI_TOKEN").unwrap_or_default(),
            timings: Timings {
                heartbeat_interval,
                retry_delay,
                reconnect_delay,
            },
        }
    }
}
