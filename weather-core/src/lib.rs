//! Core library for the weather gateway.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the upstream weather provider
//! - Client-facing summary models and provider error kinds
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::ProviderError;
pub use model::{ForecastDay, ForecastSummary, WeatherSummary};
pub use provider::{WeatherProvider, provider_from_config};
