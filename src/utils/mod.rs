pub mod error;
pub mod http_client;
pub mod xml;

pub use error::{ClientResult, Error, ErrorKind};
