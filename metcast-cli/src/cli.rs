use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use metcast_core::{
    Config, SearchSession, WeatherError,
    config::MAX_GEOCODE_LIMIT,
    provider::provider_from_config,
    snapshot, view,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "metcast", version, about = "Weather, air quality and forecasts from OpenWeather")]
pub struct Cli {
    /// OpenWeather API key; takes precedence over the configured one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and display preferences.
    Configure,

    /// List places matching a name, with their coordinates.
    Locate {
        /// Place name, e.g. "Dublin, IE".
        query: String,

        /// Number of candidates (1-5); defaults to the configured limit.
        #[arg(long)]
        limit: Option<u8>,
    },

    /// Show weather, air quality and forecasts for a place.
    Show {
        /// Place name, e.g. "Dublin, IE".
        #[arg(required_unless_present = "lat", conflicts_with = "lat")]
        place: Option<String>,

        /// Latitude in decimal degrees, used instead of a place name.
        #[arg(
            long,
            requires = "lon",
            allow_negative_numbers = true,
            value_parser = parse_latitude
        )]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(
            long,
            requires = "lat",
            allow_negative_numbers = true,
            value_parser = parse_longitude
        )]
        lon: Option<f64>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Locate { query, limit } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config, self.api_key)?;
                let limit = limit
                    .unwrap_or_else(|| config.geocode_limit())
                    .clamp(1, MAX_GEOCODE_LIMIT);

                let found = provider
                    .geocode(&query, limit)
                    .await
                    .with_context(|| format!("Failed to look up '{query}'"))?;

                if found.is_empty() {
                    println!("No locations match '{query}'.");
                }
                for location in &found {
                    println!(
                        "{}  {}",
                        location.label(config.language()),
                        view::coordinates(location.lat, location.lon)
                    );
                }
                Ok(())
            }
            Command::Show {
                place,
                lat,
                lon,
                json,
            } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config, self.api_key)?;

                let session = SearchSession::new();
                let ticket = session.begin();
                tracing::debug!(?ticket, "search started");

                let result = match (place, lat, lon) {
                    (_, Some(lat), Some(lon)) => {
                        snapshot::search_at(provider.as_ref(), lat, lon).await
                    }
                    (Some(place), _, _) => snapshot::search(provider.as_ref(), &place).await,
                    _ => anyhow::bail!("Give a place name or both --lat and --lon."),
                };

                let snapshot = match result {
                    Ok(snapshot) => snapshot,
                    Err(WeatherError::MissingUpstreamData(reason)) => {
                        anyhow::bail!(
                            "Can't show location details ({reason}), please try again."
                        )
                    }
                    Err(err) => return Err(err.into()),
                };

                session.publish(ticket, snapshot).await;
                let report = session
                    .current()
                    .await
                    .context("Search was superseded before it completed")?
                    .report();

                if json {
                    let out = serde_json::to_string_pretty(&report)
                        .context("Failed to serialize report to JSON")?;
                    println!("{out}");
                } else {
                    print!("{}", render::report(&report, config.language()));
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let language = Text::new("Preferred language for place names (e.g. \"ga\", blank for none):")
        .with_default(config.language().unwrap_or_default())
        .prompt()
        .context("Failed to read language")?;
    let language = language.trim();
    config.language = (!language.is_empty()).then(|| language.to_string());

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, 90.0)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    parse_degrees(s, 180.0)
}

fn parse_degrees(s: &str, bound: f64) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(-bound..=bound).contains(&value) {
        return Err(format!("{value} is outside [-{bound}, {bound}]"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["metcast", "show", "--lat", "53.35", "--lon", "-6.26"])
            .expect("parses");
        match cli.command {
            Command::Show {
                place,
                lat,
                lon,
                ..
            } => {
                assert_eq!(place, None);
                assert_eq!(lat, Some(53.35));
                assert_eq!(lon, Some(-6.26));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_needs_a_place_or_coordinates() {
        assert!(Cli::try_parse_from(["metcast", "show"]).is_err());
        assert!(Cli::try_parse_from(["metcast", "show", "--lat", "10"]).is_err());
        assert!(Cli::try_parse_from(["metcast", "show", "Dublin", "--json"]).is_ok());
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(parse_latitude("91").is_err());
        assert!(parse_longitude("-180").is_ok());
        assert!(parse_longitude("east").is_err());
    }
}
