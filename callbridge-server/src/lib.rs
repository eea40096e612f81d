pub mod app;
pub mod call;
pub mod config;
pub mod error;
pub mod signaling;

pub use app::{build_router, health_check, serve, spawn_switchboard};
pub use call::*;
pub use config::Config;
pub use error::{SwitchboardError, SwitchboardResult};
pub use signaling::*;
