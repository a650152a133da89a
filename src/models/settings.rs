use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection, retry and polling parameters shared by every service client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    /// Scheme, host and port of the NAS, e.g. `https://nas.local:443`.
    pub endpoint: String,
    /// Retries per request on top of the first send; 0 disables retrying.
    pub retry_attempts: u32,
    pub retry_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub accept_invalid_certs: bool,
    /// Task-status checks made while waiting for a start/stop to finish.
    pub poll_attempts: u32,
    pub poll_interval_secs: u64,
    pub user_agent: Option<String>,
}

impl ClientSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".into(),
            retry_attempts: 3,
            retry_interval_secs: 30,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            accept_invalid_certs: false,
            poll_attempts: 20,
            poll_interval_secs: 5,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"endpoint":"https://nas:443","retryAttempts":5}"#).unwrap();
        assert_eq!(settings.endpoint, "https://nas:443");
        assert_eq!(settings.retry_attempts, 5);
        assert_eq!(settings.poll_attempts, 20);
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
    }
}
