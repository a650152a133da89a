use serde::Serialize;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What went wrong, independent of which operation was running.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("Failure preparing request: {0}")]
    RequestBuild(String),

    #[error("Failure sending request: {0}")]
    Transport(#[source] BoxError),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("XML parse error: {0}")]
    ResponseParse(String),

    #[error("unauthorized")]
    AuthFailed,

    #[error("login failed")]
    LoginFailed,

    #[error("logout failed")]
    LogoutFailed,

    #[error("failed to wait for application {qname} getting {action}")]
    Timeout { qname: String, action: String },
}

impl From<reqwest::Error> for ErrorKind {
    fn from(err: reqwest::Error) -> Self {
        ErrorKind::Transport(Box::new(err))
    }
}

impl From<url::ParseError> for ErrorKind {
    fn from(err: url::ParseError) -> Self {
        ErrorKind::RequestBuild(err.to_string())
    }
}

impl From<quick_xml::DeError> for ErrorKind {
    fn from(err: quick_xml::DeError) -> Self {
        ErrorKind::ResponseParse(err.to_string())
    }
}

/// An [`ErrorKind`] tagged with the operation that produced it, e.g.
/// `apps.Client#Start`, and the HTTP status when a response was received.
#[derive(Debug, Error)]
#[error("{operation}: {kind}")]
pub struct Error {
    pub operation: &'static str,
    pub status: Option<u16>,
    #[source]
    pub kind: ErrorKind,
}

impl Error {
    pub fn new(operation: &'static str, kind: ErrorKind) -> Self {
        Self {
            operation,
            status: None,
            kind,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout { .. })
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type ClientResult<T> = Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_operation() {
        let err = Error::new("auth.Client#Login", ErrorKind::LoginFailed).with_status(200);
        assert_eq!(err.to_string(), "auth.Client#Login: login failed");
        assert_eq!(err.status, Some(200));
    }

    #[test]
    fn timeout_message_names_application() {
        let err = Error::new(
            "apps.Client#Stop",
            ErrorKind::Timeout {
                qname: "pkgA".into(),
                action: "stopped".into(),
            },
        );
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "apps.Client#Stop: failed to wait for application pkgA getting stopped"
        );
    }

    #[test]
    fn serializes_as_message_string() {
        let err = Error::new("apps.Client#List", ErrorKind::AuthFailed);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"apps.Client#List: unauthorized\"");
    }
}
