use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::{
    error::{Result, WeatherError},
    forecast::{self, DailyPollutionForecast, DailyWeatherForecast},
    model::{Location, PollutionSample, WeatherSample},
    provider::WeatherProvider,
    view::{self, GeoInfo, PollutionInfo, WeatherInfo},
};

/// Everything fetched for one location.
///
/// Each data type is fetched independently, so any of them may be missing
/// while the others are present.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: Option<WeatherSample>,
    pub pollution: Option<PollutionSample>,
    pub forecast: Option<Vec<WeatherSample>>,
    pub pollution_forecast: Option<Vec<PollutionSample>>,
}

/// Display-ready view of a [`WeatherSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: Location,
    pub geo: Option<GeoInfo>,
    pub weather: Option<WeatherInfo>,
    pub pollution: Option<PollutionInfo>,
    pub weather_forecast: Option<Vec<DailyWeatherForecast>>,
    pub pollution_forecast: Option<Vec<DailyPollutionForecast>>,
}

impl WeatherSnapshot {
    /// Fetch current weather, current pollution and both forecasts for
    /// `location` concurrently. Failures are logged and leave that field empty.
    pub async fn fetch(provider: &dyn WeatherProvider, location: Location) -> Self {
        let (lat, lon) = (location.lat, location.lon);

        let (current, pollution, forecast, pollution_forecast) = tokio::join!(
            provider.current_weather(lat, lon),
            provider.air_pollution(lat, lon),
            provider.forecast(lat, lon),
            provider.air_pollution_forecast(lat, lon),
        );

        Self {
            current: keep("current weather", current),
            pollution: keep("air pollution", pollution)
                .and_then(|list| list.into_iter().next()),
            forecast: keep("weather forecast", forecast),
            pollution_forecast: keep("air pollution forecast", pollution_forecast),
            location,
        }
    }

    pub fn report(&self) -> WeatherReport {
        self.report_in(&Local)
    }

    pub fn report_in<Tz: TimeZone>(&self, tz: &Tz) -> WeatherReport {
        WeatherReport {
            location: self.location.clone(),
            geo: view::geo_info_in(Some(&self.location), self.current.as_ref(), tz),
            weather: view::weather_info(self.current.as_ref()),
            pollution: view::pollution_info(self.pollution.as_ref()),
            weather_forecast: self
                .forecast
                .as_deref()
                .map(|series| forecast::daily_weather_forecast_in(series, tz)),
            pollution_forecast: self
                .pollution_forecast
                .as_deref()
                .map(|series| forecast::daily_pollution_forecast_in(series, tz)),
        }
    }
}

fn keep<T>(what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "{what} unavailable");
            None
        }
    }
}

/// Geocode `query`, take the best match, and fetch its snapshot.
pub async fn search(provider: &dyn WeatherProvider, query: &str) -> Result<WeatherSnapshot> {
    let location = provider
        .geocode(query, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            WeatherError::MissingUpstreamData(format!("no location matches '{query}'"))
        })?;

    tracing::info!(name = %location.name, country = %location.country, "location resolved");
    Ok(WeatherSnapshot::fetch(provider, location).await)
}

/// Same as [`search`] but starting from coordinates, e.g. a device position.
pub async fn search_at(
    provider: &dyn WeatherProvider,
    lat: f64,
    lon: f64,
) -> Result<WeatherSnapshot> {
    let location = provider
        .reverse_geocode(lat, lon, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            WeatherError::MissingUpstreamData(format!(
                "no place known at {}",
                view::coordinates(lat, lon)
            ))
        })?;

    Ok(WeatherSnapshot::fetch(provider, location).await)
}
