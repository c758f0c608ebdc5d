use crate::{
    Config,
    error::ProviderError,
    model::{ForecastSummary, WeatherSummary},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Capability the HTTP layer depends on.
///
/// Each operation issues at most one outbound call and returns the reduced
/// client-facing projection, or a typed failure for the status mapping.
/// Handlers hold an `Arc<dyn WeatherProvider>`, so tests substitute a stub
/// without any network access.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> Result<WeatherSummary, ProviderError>;

    async fn current_by_coords(&self, lat: f64, lon: f64)
    -> Result<WeatherSummary, ProviderError>;

    async fn forecast(&self, city: &str) -> Result<ForecastSummary, ProviderError>;
}

/// Construct the provider from config.
///
/// An absent credential is carried into the provider rather than rejected
/// here: lookups fail per request with `ProviderError::ApiKeyMissing`.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::new(config.openweather_api_key.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn provider_without_key_fails_before_any_network_call() {
        let provider = provider_from_config(&Config::default());

        let err = provider.current_by_city("London").await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiKeyMissing));

        let err = provider.current_by_coords(51.5, -0.12).await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiKeyMissing));

        let err = provider.forecast("London").await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiKeyMissing));
    }

    #[test]
    fn provider_from_config_carries_the_credential() {
        let provider = provider_from_config(&Config::with_api_key("KEY"));
        assert!(format!("{provider:?}").contains("OpenWeatherProvider"));
    }
}
