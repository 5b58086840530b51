use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{
    error::{Result, WeatherError},
    model::{ForecastResponse, Location, PollutionResponse, PollutionSample, WeatherSample},
};

use super::{Endpoint, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, endpoint.path());
        Url::parse(&raw).map_err(|e| WeatherError::MalformedUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint)?;

        let mut request = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())]);
        if endpoint.wants_metric_units() {
            request = request.query(&[("units", "metric")]);
        }

        tracing::debug!(%endpoint, "requesting OpenWeather");

        let res = request
            .send()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::HttpStatus {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }

    async fn locations(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Vec<Location>> {
        let found: Vec<Location> = self.fetch(endpoint, params).await?;
        let total = found.len();

        let valid: Vec<Location> = found
            .into_iter()
            .filter(Location::has_valid_coordinates)
            .collect();
        if valid.len() < total {
            tracing::warn!(
                %endpoint,
                dropped = total - valid.len(),
                "discarding locations with out-of-range coordinates"
            );
        }

        Ok(valid)
    }
}

fn coordinates(lat: f64, lon: f64) -> [(&'static str, String); 2] {
    [("lat", lat.to_string()), ("lon", lon.to_string())]
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<Location>> {
        self.locations(
            Endpoint::Geocode,
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn reverse_geocode(&self, lat: f64, lon: f64, limit: u8) -> Result<Vec<Location>> {
        let [lat, lon] = coordinates(lat, lon);
        self.locations(Endpoint::ReverseGeocode, &[lat, lon, ("limit", limit.to_string())])
            .await
    }

    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherSample> {
        self.fetch(Endpoint::CurrentWeather, &coordinates(lat, lon))
            .await
    }

    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<WeatherSample>> {
        let parsed: ForecastResponse = self
            .fetch(Endpoint::Forecast, &coordinates(lat, lon))
            .await?;
        Ok(parsed.list)
    }

    async fn air_pollution(&self, lat: f64, lon: f64) -> Result<Vec<PollutionSample>> {
        let parsed: PollutionResponse = self
            .fetch(Endpoint::AirPollution, &coordinates(lat, lon))
            .await?;
        Ok(parsed.list)
    }

    async fn air_pollution_forecast(&self, lat: f64, lon: f64) -> Result<Vec<PollutionSample>> {
        let parsed: PollutionResponse = self
            .fetch(Endpoint::AirPollutionForecast, &coordinates(lat, lon))
            .await?;
        Ok(parsed.list)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
