//! Configuration loading and management.
//!
//! - [`types`]: config struct definitions and loading
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup checks

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError, IdentityConfig, TrackingConfig};
pub use validation::{ValidationError, validate};
