use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::client::{BaseClient, RequestSpec};
use crate::models::{ClientSettings, Session};
use crate::utils::xml::{decode_document, ensure_auth_passed, lenient_int};
use crate::utils::{ClientResult, Error, ErrorKind};

pub const DEFAULT_BASE_PATH: &str = "/cgi-bin";

const LOGIN: &str = "auth.Client#Login";
const LOGOUT: &str = "auth.Client#Logout";

/// The parts of the login/logout `QDocRoot` this client cares about.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "QDocRoot", default)]
struct AuthDocument {
    #[serde(rename = "authPassed", deserialize_with = "lenient_int")]
    auth_passed: i64,
    #[serde(rename = "authSid")]
    auth_sid: String,
    #[serde(rename = "isAdmin")]
    is_admin: String,
    username: String,
    groupname: String,
}

/// Session login and logout. Holds no session state between calls.
#[derive(Clone)]
pub struct AuthClient {
    base: BaseClient,
}

impl AuthClient {
    pub fn new(settings: &ClientSettings) -> ClientResult<Self> {
        let base = BaseClient::new(settings, DEFAULT_BASE_PATH)
            .map_err(|kind| Error::new("auth.Client#New", kind))?;
        Ok(Self { base })
    }

    pub fn with_base(base: BaseClient) -> Self {
        Self { base }
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        // base64 is the wire format of the pwd field, not a protection
        let secret = STANDARD.encode(password.as_bytes());
        let spec = RequestSpec::post()
            .path("/authLogin.cgi")
            .form("user", username)
            .form("pwd", secret);

        let session = self.base.execute(LOGIN, spec, parse_login).await?;
        log::debug!("{}: logged in as {}", LOGIN, session.username);
        Ok(session)
    }

    pub async fn logout(&self, sid: &str) -> ClientResult<()> {
        let spec = RequestSpec::post()
            .path("/authLogout.cgi")
            .query("sid", sid)
            .form("logout", "1");

        self.base
            .execute(LOGOUT, spec, |body| {
                let doc: AuthDocument = decode_document(body)?;
                ensure_auth_passed(doc.auth_passed, ErrorKind::LogoutFailed)
            })
            .await
    }
}

fn parse_login(body: &str) -> Result<Session, ErrorKind> {
    let doc: AuthDocument = decode_document(body)?;
    ensure_auth_passed(doc.auth_passed, ErrorKind::LoginFailed)?;

    Ok(Session {
        sid: doc.auth_sid,
        is_admin: doc.is_admin == "1",
        username: doc.username,
        groupname: doc.groupname,
    })
}
