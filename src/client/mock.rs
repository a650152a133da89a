use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{PreparedRequest, RawResponse, Transport};
use crate::utils::ErrorKind;

pub(crate) enum Reply {
    Response(RawResponse),
    Fail(String),
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Response(RawResponse::ok(body))
    }

    pub fn status(status: u16) -> Self {
        Reply::Response(RawResponse {
            status,
            retry_after: None,
            body: String::new(),
        })
    }

    pub fn throttled(retry_after: Duration) -> Self {
        Reply::Response(RawResponse {
            status: 429,
            retry_after: Some(retry_after),
            body: String::new(),
        })
    }

    pub fn unavailable(retry_after: Duration) -> Self {
        Reply::Response(RawResponse {
            status: 503,
            retry_after: Some(retry_after),
            body: String::new(),
        })
    }

    pub fn fail(message: &str) -> Self {
        Reply::Fail(message.to_string())
    }
}

/// Answers requests from a fixed script and records everything it was sent.
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, ErrorKind> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(ErrorKind::Transport(Box::new(
                std::io::Error::other(message),
            ))),
            None => panic!("unexpected request: {} {}", request.method, request.url),
        }
    }
}
