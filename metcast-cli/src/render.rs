use metcast_core::{
    DailyPollutionForecast, DailyWeatherForecast, GeoInfo, PollutionInfo, WeatherInfo,
    WeatherReport,
};

/// Formats a report as plain-text sections. Sections with no data are left out.
pub fn report(report: &WeatherReport, lang: Option<&str>) -> String {
    let mut output = format!("{}\n\n", report.location.label(lang));

    if let Some(geo) = &report.geo {
        output.push_str(&geo_section(geo));
    }
    if let Some(weather) = &report.weather {
        output.push_str(&weather_section(weather));
    }
    if let Some(pollution) = &report.pollution {
        output.push_str(&pollution_section(pollution));
    }
    if let Some(days) = &report.weather_forecast {
        output.push_str(&forecast_section(days));
    }
    if let Some(days) = &report.pollution_forecast {
        output.push_str(&pollution_forecast_section(days));
    }

    output
}

fn geo_section(geo: &GeoInfo) -> String {
    format!(
        "GEO INFO\n  {}\n  Sunrise {}  Sunset {}\n  Time difference {}\n\n",
        geo.coordinates, geo.sunrise, geo.sunset, geo.time_difference
    )
}

fn weather_section(weather: &WeatherInfo) -> String {
    let header = match &weather.description {
        Some(description) => format!("WEATHER: {description}"),
        None => "WEATHER".to_string(),
    };
    format!(
        "{header}\n  {} {}  {}\n  {}\n  {}\n  Humidity {}  Pressure {}\n\n",
        weather.temperature,
        weather.temp_low_high,
        weather.temp_feels,
        weather.cloud_coverage,
        weather.wind_speed_direction,
        weather.humidity,
        weather.pressure
    )
}

fn pollution_section(pollution: &PollutionInfo) -> String {
    let mut output = format!("AIR QUALITY: {}\n", pollution.quality);
    // Two readings per row.
    for pair in pollution.items.chunks(2) {
        let row: Vec<String> = pair
            .iter()
            .map(|reading| {
                format!("{:<16}", format!("{}: {}", reading.label, reading.concentration))
            })
            .collect();
        output.push_str(&format!("  {}\n", row.join("").trim_end()));
    }
    output.push('\n');
    output
}

fn forecast_section(days: &[DailyWeatherForecast]) -> String {
    let mut output = String::from("5 DAY FORECAST\n");
    if days.is_empty() {
        output.push_str("  No forecast available.\n");
    }
    for day in days {
        output.push_str(&format!("  {:<6} {}\n", day.day, day.temp_low_high));
        let hours: Vec<&str> = day
            .hour_icon_urls
            .iter()
            .map(|h| h.hour.as_str())
            .collect();
        if !hours.is_empty() {
            output.push_str(&format!("         {}\n", hours.join(" ")));
        }
    }
    output.push('\n');
    output
}

fn pollution_forecast_section(days: &[DailyPollutionForecast]) -> String {
    let mut output = String::from("AIR POLLUTION INDEX FORECAST\n");
    if days.is_empty() {
        output.push_str("  No forecast available.\n");
    }
    for day in days {
        output.push_str(&format!("  {:<6} {} ({})\n", day.day, day.quality(), day.aqi.index()));
    }
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use metcast_core::{Aqi, HourIcon, Location, PollutantReading};

    fn empty_report() -> WeatherReport {
        WeatherReport {
            location: Location {
                name: "Dublin".into(),
                local_names: None,
                lat: 53.3498,
                lon: -6.2603,
                country: "IE".into(),
                state: Some("Leinster".into()),
            },
            geo: None,
            weather: None,
            pollution: None,
            weather_forecast: None,
            pollution_forecast: None,
        }
    }

    #[test]
    fn missing_sections_are_skipped() {
        let text = report(&empty_report(), None);
        assert_eq!(text, "Dublin, Leinster, IE\n\n");
    }

    #[test]
    fn renders_every_section() {
        let mut r = empty_report();
        r.geo = Some(GeoInfo {
            coordinates: "53º20'59\"N, 6º15'37\"W".into(),
            sunrise: "07:05".into(),
            sunset: "16:27".into(),
            time_difference: "+0.0H".into(),
        });
        r.weather = Some(WeatherInfo {
            temperature: "9º".into(),
            temp_low_high: "(L: 8º H: 10º)".into(),
            temp_feels: "Feels 6º".into(),
            cloud_coverage: "75% coverage".into(),
            wind_speed_direction: "4.8 km/h, dir: 96º".into(),
            humidity: "87%".into(),
            pressure: "1003 hPa".into(),
            description: Some("broken clouds".into()),
        });
        r.pollution = Some(PollutionInfo {
            items: vec![
                PollutantReading {
                    label: "CO",
                    concentration: "201.94".into(),
                },
                PollutantReading {
                    label: "NO",
                    concentration: "0.02".into(),
                },
            ],
            quality: "Fair".into(),
        });
        r.weather_forecast = Some(vec![DailyWeatherForecast {
            day: "Today".into(),
            temp_low_high: "(L: 8º H: 12º)".into(),
            hour_icon_urls: vec![HourIcon {
                hour: "0H".into(),
                url: "https://openweathermap.org/img/wn/10d@2x.png".into(),
            }],
        }]);
        r.pollution_forecast = Some(vec![DailyPollutionForecast {
            day: "Mon".into(),
            aqi: Aqi::Poor,
        }]);

        let text = report(&r, None);
        assert!(text.contains("GEO INFO\n  53º20'59\"N, 6º15'37\"W\n"));
        assert!(text.contains("WEATHER: broken clouds\n  9º (L: 8º H: 10º)  Feels 6º\n"));
        assert!(text.contains("AIR QUALITY: Fair\n  CO: 201.94      NO: 0.02\n"));
        assert!(text.contains("  Today  (L: 8º H: 12º)\n         0H\n"));
        assert!(text.contains("  Mon    Poor (4)\n"));
    }

    #[test]
    fn empty_forecast_says_so() {
        let mut r = empty_report();
        r.weather_forecast = Some(vec![]);
        assert!(report(&r, None).contains("5 DAY FORECAST\n  No forecast available.\n"));
    }
}
