use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reduced, client-facing projection of a current-conditions response.
///
/// All four fields must be present in the provider body; a partial summary is
/// never produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city_name: String,
    /// Air temperature in °C (the gateway always queries metric units).
    pub temperature: f64,
    pub description: String,
    /// Provider icon code, e.g. "04d"; the browser client builds the image URL.
    pub icon: String,
}

/// One midday slot of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the entry, serialized as YYYY-MM-DD.
    pub date: NaiveDate,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// Forecast projection: the resolved city plus one entry per day, in the
/// provider's chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub city: String,
    pub forecast: Vec<ForecastDay>,
}
