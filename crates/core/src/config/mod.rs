//! User configuration: logging, output defaults and console behaviour.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{OutputFormat, ResolvedConfig};
