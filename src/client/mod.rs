//! Shared HTTP plumbing for the service clients: request preparation, the
//! retry-on-status send loop and the prepare/send/respond template every
//! operation goes through.

#[cfg(test)]
pub(crate) mod mock;
mod request;
mod transport;

pub(crate) use request::RequestSpec;
pub use request::PreparedRequest;
pub use transport::{RawResponse, ReqwestTransport, Transport};

use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::models::ClientSettings;
use crate::utils::http_client::create_http_client;
use crate::utils::{ClientResult, Error, ErrorKind};

/// Status codes worth another attempt: timeouts, throttling and gateway errors.
pub const STATUS_CODES_FOR_RETRY: &[u16] = &[408, 429, 500, 502, 503, 504];

#[derive(Clone)]
pub struct BaseClient {
    base_uri: String,
    retries: u32,
    retry_interval: Duration,
    pub(crate) poll_attempts: u32,
    pub(crate) poll_interval: Duration,
    session_id: Option<String>,
    transport: Arc<dyn Transport>,
}

impl BaseClient {
    /// Build a client talking to `settings.endpoint` + `base_path` over reqwest.
    pub fn new(settings: &ClientSettings, base_path: &str) -> Result<Self, ErrorKind> {
        let http = create_http_client(settings)?;
        Ok(Self::with_transport(
            settings,
            base_path,
            Arc::new(ReqwestTransport::new(http)),
        ))
    }

    pub fn with_transport(
        settings: &ClientSettings,
        base_path: &str,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_uri: format!("{}{}", settings.endpoint.trim_end_matches('/'), base_path),
            retries: settings.retry_attempts,
            retry_interval: settings.retry_interval(),
            poll_attempts: settings.poll_attempts,
            poll_interval: settings.poll_interval(),
            session_id: None,
            transport,
        }
    }

    /// Attach `sid` to every request this client sends.
    pub fn with_session_id(mut self, sid: impl Into<String>) -> Self {
        self.session_id = Some(sid.into());
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub(crate) fn prepare(&self, spec: RequestSpec) -> Result<PreparedRequest, ErrorKind> {
        let mut url = Url::parse(&format!("{}{}", self.base_uri, spec.path))?;

        let mut query = spec.query;
        if let Some(sid) = &self.session_id {
            if !query.iter().any(|(k, _)| *k == "sid") {
                query.push(("sid", sid.clone()));
            }
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        Ok(PreparedRequest {
            method: spec.method,
            url,
            form: spec
                .form
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        })
    }

    /// Send with retries on transport errors and [`STATUS_CODES_FOR_RETRY`]:
    /// one initial send plus up to `retries` more. Once they run out the last
    /// outcome is returned unchanged.
    pub(crate) async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, ErrorKind> {
        let attempts = self.retries.saturating_add(1);
        let mut attempt = 1;
        loop {
            let result = self.transport.send(request).await;

            let delay = match &result {
                Ok(resp) if STATUS_CODES_FOR_RETRY.contains(&resp.status) => {
                    let honours_retry_after = resp.status
                        == StatusCode::TOO_MANY_REQUESTS.as_u16()
                        || resp.status == StatusCode::SERVICE_UNAVAILABLE.as_u16();
                    match resp.retry_after {
                        Some(after) if honours_retry_after => Some(after),
                        _ => Some(self.backoff(attempt)),
                    }
                }
                Ok(_) => None,
                Err(_) => Some(self.backoff(attempt)),
            };

            let delay = match delay {
                Some(d) if attempt < attempts => d,
                _ => return result,
            };

            match &result {
                Ok(resp) => log::warn!(
                    "{} {}: status {} (attempt {}/{}), retrying in {:?}",
                    request.method,
                    request.url.path(),
                    resp.status,
                    attempt,
                    attempts,
                    delay
                ),
                Err(e) => log::warn!(
                    "{} {}: {} (attempt {}/{}), retrying in {:?}",
                    request.method,
                    request.url.path(),
                    e,
                    attempt,
                    attempts,
                    delay
                ),
            }

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.retry_interval.saturating_mul(factor)
    }

    /// Prepare, send and decode one call. Every error is tagged with
    /// `operation`; anything but HTTP 200 is rejected before `decode` runs.
    pub(crate) async fn execute<T, F>(
        &self,
        operation: &'static str,
        spec: RequestSpec,
        decode: F,
    ) -> ClientResult<T>
    where
        F: FnOnce(&str) -> Result<T, ErrorKind>,
    {
        let request = self
            .prepare(spec)
            .map_err(|kind| Error::new(operation, kind))?;

        log::debug!("{}: {} {}", operation, request.method, request.url.path());

        let response = self
            .send(&request)
            .await
            .map_err(|kind| Error::new(operation, kind))?;

        if response.status != StatusCode::OK.as_u16() {
            return Err(Error::new(operation, ErrorKind::UnexpectedStatus(response.status))
                .with_status(response.status));
        }

        decode(&response.body)
            .map_err(|kind| Error::new(operation, kind).with_status(response.status))
    }
}
