pub mod api;
pub mod apps;
pub mod auth;

pub use api::{AppsClientApi, AuthClientApi};
pub use apps::AppsClient;
pub use auth::AuthClient;
