//! Introspection of AviUtl plugin modules.
//!
//! Given a plugin file, the engine computes its SHA-256, classifies it by
//! extension, loads it and reads the name/description pairs it declares
//! through the host's table accessors or string resources.

pub mod config;
pub mod encoding;
pub mod error;
pub mod hasher;
pub mod introspect;
pub mod module;
pub mod plugin;
pub mod table;

pub use error::{IntrospectError, ValidationError, validate_input};
pub use introspect::Introspector;
pub use plugin::{Diagnostic, MetadataEntry, PluginCategory, PluginRecord, Stage};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
