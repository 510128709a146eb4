use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;

use crate::config::Config;
use crate::gateway::heartbeat::HEARTBEAT_INTERVAL;
use crate::gateway::session::Identity;

/// Delay before retrying a failed handshake.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);
/// Pause between losing a session and the first reconnect attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub heartbeat_interval: Duration,
    pub retry_delay: Duration,
    pub reconnect_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            heartbeat_interval: HEARTBEAT_INTERVAL,
            retry_delay: RETRY_DELAY,
            reconnect_delay: RECONNECT_DELAY,
        }
    }
}

/// Handle to one Satori endpoint.
///
/// Clones share the identity bound by the event loop, so a clone moved into
/// an event handler sends REST commands as the current login.
#[derive(Clone)]
pub struct Client {
    endpoint: String,
    token: String,
    timings: Timings,
    identity: Arc<ArcSwapOption<Identity>>,
    pub(crate) http: reqwest::Client,
}

impl Client {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
            timings: Timings::default(),
            identity: Arc::new(ArcSwapOption::empty()),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.token.clone()).with_timings(config.timings)
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Identity of the current session, `None` until the first handshake.
    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.identity.load_full()
    }

    /// Bound platform name, empty before the first handshake.
    pub fn platform(&self) -> String {
        self.identity()
            .map(|i| i.platform.clone())
            .unwrap_or_default()
    }

    /// Bound account id, empty before the first handshake.
    pub fn self_id(&self) -> String {
        self.identity()
            .map(|i| i.self_id.clone())
            .unwrap_or_default()
    }

    pub(crate) fn bind_identity(&self, identity: Identity) {
        self.identity.store(Some(Arc::new(identity)));
    }

    pub(crate) fn events_url(&self) -> String {
        format!("{}/v1/events", self.endpoint)
    }
}
