pub mod app;
pub mod session;
pub mod settings;

pub use app::*;
pub use session::*;
pub use settings::*;
