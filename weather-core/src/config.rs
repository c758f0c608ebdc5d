use std::env;

/// Environment variable holding the OpenWeatherMap credential.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Process-wide configuration.
///
/// Constructed once at startup and handed to the provider; nothing reads the
/// environment ambiently per request. A missing credential is not a startup
/// failure, it surfaces on each request that needs it.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Credential for the upstream provider, `None` when unset.
    pub openweather_api_key: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_raw_key(env::var(API_KEY_VAR).ok())
    }

    /// Build a config with an explicit credential, e.g. in tests.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self { openweather_api_key: Some(api_key.into()) }
    }

    // An empty value counts as unset, so it fails the same way as an absent
    // variable instead of authenticating upstream with an empty key.
    fn from_raw_key(raw: Option<String>) -> Self {
        Self { openweather_api_key: raw.filter(|key| !key.is_empty()) }
    }
}
