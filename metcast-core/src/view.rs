//! Display strings for a single point in time.
//!
//! Every builder returns `None` when its inputs have not been fetched; the
//! presentation layer is expected to skip that section.

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::{
    format::{self, Axis},
    model::{Location, PollutionSample, WeatherSample},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoInfo {
    pub coordinates: String,
    pub sunrise: String,
    pub sunset: String,
    pub time_difference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherInfo {
    pub temperature: String,
    pub temp_low_high: String,
    pub temp_feels: String,
    pub cloud_coverage: String,
    pub wind_speed_direction: String,
    pub humidity: String,
    pub pressure: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollutantReading {
    pub label: &'static str,
    pub concentration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollutionInfo {
    pub items: Vec<PollutantReading>,
    pub quality: String,
}

/// "53º20'59\"N, 6º15'37\"W"
pub fn coordinates(lat: f64, lon: f64) -> String {
    format!(
        "{}, {}",
        format::dms(lat, Axis::Latitude),
        format::dms(lon, Axis::Longitude)
    )
}

pub fn geo_info(location: Option<&Location>, current: Option<&WeatherSample>) -> Option<GeoInfo> {
    geo_info_in(location, current, &Local)
}

/// Needs both the location and a current sample carrying sunrise, sunset and
/// the UTC offset.
pub fn geo_info_in<Tz: TimeZone>(
    location: Option<&Location>,
    current: Option<&WeatherSample>,
    tz: &Tz,
) -> Option<GeoInfo> {
    let location = location?;
    let current = current?;

    Some(GeoInfo {
        coordinates: coordinates(location.lat, location.lon),
        sunrise: format::clock_time(current.sunrise()?, tz),
        sunset: format::clock_time(current.sunset()?, tz),
        time_difference: format::utc_offset(current.timezone?),
    })
}

pub fn weather_info(current: Option<&WeatherSample>) -> Option<WeatherInfo> {
    let current = current?;
    let main = &current.main;
    let km_per_hour = current.wind.speed * 3.6;

    Some(WeatherInfo {
        temperature: format!("{}º", format::truncate(main.temp)),
        temp_low_high: format::temperature_range(main.temp_min, main.temp_max),
        temp_feels: format!("Feels {}º", format::truncate(main.feels_like)),
        cloud_coverage: format!("{}% coverage", current.clouds.all),
        wind_speed_direction: format!("{km_per_hour:.1} km/h, dir: {}º", current.wind.deg),
        humidity: format!("{}%", format::truncate(main.humidity)),
        pressure: format!("{} hPa", format::truncate(main.pressure)),
        description: current.condition().map(|c| c.description.clone()),
    })
}

pub fn pollution_info(sample: Option<&PollutionSample>) -> Option<PollutionInfo> {
    let sample = sample?;
    let c = &sample.components;

    let items = [
        ("CO", c.co),
        ("NO", c.no),
        ("NH3", c.nh3),
        ("O3", c.o3),
        ("PM10", c.pm10),
        ("PM2.5", c.pm2_5),
        ("SO2", c.so2),
        ("NO2", c.no2),
    ]
    .into_iter()
    .map(|(label, value)| PollutantReading {
        label,
        concentration: format!("{value:.2}"),
    })
    .collect();

    Some(PollutionInfo {
        items,
        quality: sample.aqi().label().to_string(),
    })
}
