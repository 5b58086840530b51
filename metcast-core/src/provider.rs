use crate::{
    Config,
    error::Result,
    model::{Location, PollutionSample, WeatherSample},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::{self, Debug};

pub mod openweather;

/// The fixed OpenWeather endpoints this crate talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Geocode,
    ReverseGeocode,
    CurrentWeather,
    Forecast,
    AirPollution,
    AirPollutionForecast,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Geocode => "/geo/1.0/direct",
            Endpoint::ReverseGeocode => "/geo/1.0/reverse",
            Endpoint::CurrentWeather => "/data/2.5/weather",
            Endpoint::Forecast => "/data/2.5/forecast",
            Endpoint::AirPollution => "/data/2.5/air_pollution",
            Endpoint::AirPollutionForecast => "/data/2.5/air_pollution/forecast",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Geocode => "geocoding",
            Endpoint::ReverseGeocode => "reverse geocoding",
            Endpoint::CurrentWeather => "current weather",
            Endpoint::Forecast => "5-day forecast",
            Endpoint::AirPollution => "air pollution",
            Endpoint::AirPollutionForecast => "air pollution forecast",
        }
    }

    /// Weather endpoints take `units=metric`; geocoding and pollution do not.
    pub fn wants_metric_units(&self) -> bool {
        matches!(self, Endpoint::CurrentWeather | Endpoint::Forecast)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of raw weather records.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<Location>>;

    async fn reverse_geocode(&self, lat: f64, lon: f64, limit: u8) -> Result<Vec<Location>>;

    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherSample>;

    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<WeatherSample>>;

    async fn air_pollution(&self, lat: f64, lon: f64) -> Result<Vec<PollutionSample>>;

    async fn air_pollution_forecast(&self, lat: f64, lon: f64) -> Result<Vec<PollutionSample>>;
}

/// Construct the OpenWeather client from config, with an optional key that
/// takes precedence over the stored one (flag or environment).
pub fn provider_from_config(
    config: &Config,
    api_key_override: Option<String>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = api_key_override
        .filter(|key| !key.trim().is_empty())
        .or_else(|| config.api_key().map(str::to_owned))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `metcast configure` or set OPENWEATHER_API_KEY."
            )
        })?;

    Ok(Box::new(OpenWeatherClient::with_base_url(
        api_key,
        config.base_url(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn only_weather_endpoints_use_metric_units() {
        assert!(Endpoint::CurrentWeather.wants_metric_units());
        assert!(Endpoint::Forecast.wants_metric_units());
        assert!(!Endpoint::AirPollution.wants_metric_units());
        assert!(!Endpoint::AirPollutionForecast.wants_metric_units());
        assert!(!Endpoint::Geocode.wants_metric_units());
    }

    #[test]
    fn pollution_forecast_path_extends_current_path() {
        assert!(
            Endpoint::AirPollutionForecast
                .path()
                .starts_with(Endpoint::AirPollution.path())
        );
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg, None).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn blank_override_falls_back_to_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg, Some("  ".to_string())).is_ok());
    }

    #[test]
    fn override_works_without_stored_key() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg, Some("ENV_KEY".to_string())).is_ok());
    }
}
