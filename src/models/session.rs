use serde::{Deserialize, Serialize};

/// Result of a successful login. The caller owns `sid` and hands it back for
/// logout or to scope later requests; the clients keep no session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub sid: String,
    pub is_admin: bool,
    pub username: String,
    pub groupname: String,
}
