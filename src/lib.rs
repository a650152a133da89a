//! Client SDK for the QNAP NAS management CGI API.
//!
//! Two services are covered: session authentication ([`AuthClient`]) and
//! QPKG application control ([`AppsClient`]). Every operation builds a CGI
//! request, sends it through [`client::BaseClient`] with retry on transient
//! status codes, and decodes the `QDocRoot` XML envelope, failing unless the
//! server reports `authPassed == 1`.
//!
//! Clients are stateless: the session id returned by [`AuthClient::login`]
//! is handed back explicitly, either to [`AuthClient::logout`] or to
//! [`AppsClient::with_session_id`]. Dropping an operation's future cancels
//! the in-flight request and any pending retry or poll sleep.

pub mod client;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{
    Application, ApplicationDetails, ApplicationState, ApplicationTaskStatus, ClientSettings,
    Session,
};
pub use services::{AppsClient, AppsClientApi, AuthClient, AuthClientApi};
pub use utils::{ClientResult, Error, ErrorKind};
