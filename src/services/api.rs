//! Trait views of the service clients, so callers can swap in fakes.

use async_trait::async_trait;

use super::apps::AppsClient;
use super::auth::AuthClient;
use crate::models::{ApplicationDetails, ApplicationState, Session};
use crate::utils::ClientResult;

#[async_trait]
pub trait AuthClientApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> ClientResult<Session>;
    async fn logout(&self, sid: &str) -> ClientResult<()>;
}

#[async_trait]
pub trait AppsClientApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<ApplicationDetails>>;
    async fn list_states(&self) -> ClientResult<Vec<ApplicationState>>;
    async fn start(&self, qname: &str, dont_wait: bool) -> ClientResult<()>;
    async fn stop(&self, qname: &str, dont_wait: bool) -> ClientResult<()>;
}

#[async_trait]
impl AuthClientApi for AuthClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        AuthClient::login(self, username, password).await
    }

    async fn logout(&self, sid: &str) -> ClientResult<()> {
        AuthClient::logout(self, sid).await
    }
}

#[async_trait]
impl AppsClientApi for AppsClient {
    async fn list(&self) -> ClientResult<Vec<ApplicationDetails>> {
        AppsClient::list(self).await
    }

    async fn list_states(&self) -> ClientResult<Vec<ApplicationState>> {
        AppsClient::list_states(self).await
    }

    async fn start(&self, qname: &str, dont_wait: bool) -> ClientResult<()> {
        AppsClient::start(self, qname, dont_wait).await
    }

    async fn stop(&self, qname: &str, dont_wait: bool) -> ClientResult<()> {
        AppsClient::stop(self, qname, dont_wait).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Reply, ScriptedTransport};
    use crate::client::BaseClient;
    use crate::models::ClientSettings;
    use crate::services::apps::DEFAULT_BASE_PATH;

    #[tokio::test]
    async fn clients_are_usable_as_trait_objects() {
        let transport = ScriptedTransport::new(vec![Reply::ok(
            "<QDocRoot><authPassed>1</authPassed></QDocRoot>",
        )]);
        let settings = ClientSettings::new("http://nas:8080");
        let base = BaseClient::with_transport(&settings, DEFAULT_BASE_PATH, transport.clone());
        let apps: Box<dyn AppsClientApi> = Box::new(AppsClient::with_base(base));

        apps.stop("pkgA", true).await.unwrap();

        assert_eq!(transport.calls(), 1);
    }
}
