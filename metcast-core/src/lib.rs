//! Core library for the `metcast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Raw API records (locations, weather and pollution samples)
//! - Forecast grouping and display formatting
//!
//! It is used by `metcast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod model;
pub mod provider;
pub mod session;
pub mod snapshot;
pub mod view;

pub use config::Config;
pub use error::{InvalidAqi, WeatherError};
pub use forecast::{DailyPollutionForecast, DailyWeatherForecast, HourIcon};
pub use model::{Aqi, Location, PollutionSample, WeatherSample};
pub use provider::{Endpoint, WeatherProvider, openweather::OpenWeatherClient};
pub use session::{SearchSession, SearchTicket};
pub use snapshot::{WeatherReport, WeatherSnapshot};
pub use view::{GeoInfo, PollutionInfo, PollutantReading, WeatherInfo};
