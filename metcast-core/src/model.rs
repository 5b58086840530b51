use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidAqi;

/// A geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub local_names: Option<BTreeMap<String, String>>,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl Location {
    /// Latitude in [-90, 90] and longitude in [-180, 180].
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Localized name for `lang` when the geocoder returned one, otherwise `name`.
    pub fn display_name(&self, lang: Option<&str>) -> &str {
        lang.and_then(|lang| self.local_names.as_ref()?.get(lang))
            .map(String::as_str)
            .unwrap_or(self.name.as_str())
    }

    /// "Dublin, Leinster, IE"
    pub fn label(&self, lang: Option<&str>) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.display_name(lang), state, self.country),
            None => format!("{}, {}", self.display_name(lang), self.country),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Metres per second with `units=metric`.
    pub speed: f64,
    pub deg: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Only populated on current-weather samples. Forecast entries carry a `sys`
/// object too, but without these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub sunset: Option<DateTime<Utc>>,
}

/// One observation: either the current weather or one 3-hour forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: WeatherMain,
    pub wind: Wind,
    pub clouds: Clouds,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub sys: Option<SunTimes>,
    /// Shift in seconds from UTC at the sampled location.
    #[serde(default)]
    pub timezone: Option<i32>,
}

impl WeatherSample {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sys.as_ref()?.sunrise
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        self.sys.as_ref()?.sunset
    }
}

/// Body of `/data/2.5/forecast`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<WeatherSample>,
}

/// Air Quality Index category as reported by the air pollution API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Aqi {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl Aqi {
    pub fn label(&self) -> &'static str {
        match self {
            Aqi::Good => "Good",
            Aqi::Fair => "Fair",
            Aqi::Moderate => "Moderate",
            Aqi::Poor => "Poor",
            Aqi::VeryPoor => "Very Poor",
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Aqi::Good => 1,
            Aqi::Fair => 2,
            Aqi::Moderate => 3,
            Aqi::Poor => 4,
            Aqi::VeryPoor => 5,
        }
    }
}

impl TryFrom<u8> for Aqi {
    type Error = InvalidAqi;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Aqi::Good),
            2 => Ok(Aqi::Fair),
            3 => Ok(Aqi::Moderate),
            4 => Ok(Aqi::Poor),
            5 => Ok(Aqi::VeryPoor),
            other => Err(InvalidAqi(other)),
        }
    }
}

impl From<Aqi> for u8 {
    fn from(aqi: Aqi) -> Self {
        aqi.index()
    }
}

impl fmt::Display for Aqi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiMain {
    pub aqi: Aqi,
}

/// Concentrations in μg/m³. Keys are the API's literal names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionComponents {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionSample {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: AqiMain,
    pub components: PollutionComponents,
}

impl PollutionSample {
    pub fn aqi(&self) -> Aqi {
        self.main.aqi
    }
}

/// Body of `/data/2.5/air_pollution` and `/data/2.5/air_pollution/forecast`.
#[derive(Debug, Clone, Deserialize)]
pub struct PollutionResponse {
    pub list: Vec<PollutionSample>,
}
