use reqwest::Client;
use std::time::Duration;

use crate::models::ClientSettings;

/// SDK user-agent string derived from Cargo.toml version at compile time.
pub const SDK_USER_AGENT: &str = concat!("qnap-core-sdk/", env!("CARGO_PKG_VERSION"));

pub fn create_http_client(settings: &ClientSettings) -> Result<Client, reqwest::Error> {
    let user_agent = settings
        .user_agent
        .clone()
        .unwrap_or_else(|| SDK_USER_AGENT.to_string());

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .gzip(true)
        .pool_max_idle_per_host(3)
        .tcp_nodelay(true)
        // NAS appliances ship with self-signed certificates more often than not
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .build()
}
