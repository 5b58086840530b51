//! Groups flat forecast series into per-day summaries.
//!
//! The weather forecast comes in 3-hour steps and is split positionally into
//! days of [`SAMPLES_PER_DAY`] entries. The pollution forecast is hourly and is
//! grouped by the local calendar date of each sample instead.

use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::{
    format,
    model::{Aqi, PollutionSample, WeatherSample},
};

/// One day of 3-hour steps.
pub const SAMPLES_PER_DAY: usize = 8;

/// Pollution forecast never shows more days than this.
pub const MAX_POLLUTION_DAYS: usize = 5;

pub const TODAY: &str = "Today";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HourIcon {
    pub hour: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyWeatherForecast {
    pub day: String,
    pub temp_low_high: String,
    pub hour_icon_urls: Vec<HourIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPollutionForecast {
    pub day: String,
    pub aqi: Aqi,
}

impl DailyPollutionForecast {
    pub fn quality(&self) -> &'static str {
        self.aqi.label()
    }
}

/// [`daily_weather_forecast_in`] using the device's time zone.
pub fn daily_weather_forecast(series: &[WeatherSample]) -> Vec<DailyWeatherForecast> {
    daily_weather_forecast_in(series, &Local)
}

/// Split `series` into consecutive chunks of eight samples, one entry per chunk.
///
/// The first entry is labelled "Today"; later ones get the weekday of their
/// first sample. A trailing chunk shorter than eight samples is dropped.
pub fn daily_weather_forecast_in<Tz: TimeZone>(
    series: &[WeatherSample],
    tz: &Tz,
) -> Vec<DailyWeatherForecast> {
    let days: Vec<DailyWeatherForecast> = series
        .chunks_exact(SAMPLES_PER_DAY)
        .enumerate()
        .map(|(index, chunk)| summarize_day(index, chunk, tz))
        .collect();

    let leftover = series.len() % SAMPLES_PER_DAY;
    if leftover > 0 {
        tracing::debug!(leftover, "dropping partial forecast day");
    }

    days
}

fn summarize_day<Tz: TimeZone>(
    index: usize,
    chunk: &[WeatherSample],
    tz: &Tz,
) -> DailyWeatherForecast {
    let day = match chunk.first() {
        Some(first) if index > 0 => format::weekday_label(first.dt, tz),
        _ => TODAY.to_string(),
    };

    let count = chunk.len() as f64;
    let low = chunk.iter().map(|s| s.main.temp_min).sum::<f64>() / count;
    let high = chunk.iter().map(|s| s.main.temp_max).sum::<f64>() / count;

    let hour_icon_urls = chunk
        .iter()
        .filter_map(|sample| {
            let condition = sample.condition()?;
            Some(HourIcon {
                hour: format::hour_label(sample.dt, tz),
                url: format::icon_url(&condition.icon),
            })
        })
        .collect();

    DailyWeatherForecast {
        day,
        temp_low_high: format::temperature_range(low, high),
        hour_icon_urls,
    }
}

/// [`daily_pollution_forecast_in`] using the device's time zone.
pub fn daily_pollution_forecast(series: &[PollutionSample]) -> Vec<DailyPollutionForecast> {
    daily_pollution_forecast_in(series, &Local)
}

/// One entry per local calendar day, first-seen order, at most five.
///
/// Each day reports the AQI of the first sample seen for it.
pub fn daily_pollution_forecast_in<Tz: TimeZone>(
    series: &[PollutionSample],
    tz: &Tz,
) -> Vec<DailyPollutionForecast> {
    let mut seen: Vec<NaiveDate> = Vec::with_capacity(MAX_POLLUTION_DAYS);
    let mut days = Vec::with_capacity(MAX_POLLUTION_DAYS);

    for sample in series {
        if days.len() == MAX_POLLUTION_DAYS {
            break;
        }

        let date = sample.dt.with_timezone(tz).date_naive();
        if seen.contains(&date) {
            continue;
        }
        seen.push(date);

        days.push(DailyPollutionForecast {
            day: format::weekday_label(sample.dt, tz),
            aqi: sample.aqi(),
        });
    }

    days
}
