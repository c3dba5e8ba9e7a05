//! Configuration utilities
//!
//! - [`toml_config`] - `pricewise.toml` loading, defaults and validation

/// TOML configuration file support.
pub mod toml_config;
