//! Application configuration module.
//!
//! Reads the TOML config file holding the OMDb credentials and endpoint.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig, resolve_config_path};
