//! Application configuration module.
//!
//! Manages the TOML config file holding the catalog access key, the
//! response locale and user-defined streaming providers.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig, mask_key};
pub use paths::resolve_config_path;
