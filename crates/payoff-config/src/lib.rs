//! payoff-config
//!
//! User preferences, advisor settings and directory resolution.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{env_api_key, resolve_base_dir, AdvisorSettings, Config};
