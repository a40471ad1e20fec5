use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use weather_core::{Config, WeatherApiClient, WeatherOutput, current_weather};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for any location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a location and exit.
    Show {
        /// Location name, e.g. "Paris" or "90210".
        location: String,

        /// Include the air-quality block.
        #[arg(long)]
        aqi: bool,
    },

    /// Prompt for locations until you decline to continue (the default).
    Interactive,

    /// Store the WeatherAPI.com API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { location, aqi } => {
                let client = client_from_config()?;
                print_output(&current_weather(&client, &location, aqi).await);
                Ok(())
            }
            Command::Interactive => interactive().await,
        }
    }
}

fn client_from_config() -> Result<WeatherApiClient> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;

    Ok(WeatherApiClient::with_options(api_key, config.base_url(), config.timeout())?)
}

async fn interactive() -> Result<()> {
    let client = client_from_config()?;

    println!("<----------- Basic Weather App ----------->\n");

    loop {
        let location = Text::new("Enter the location (city):").prompt()?;

        let output = current_weather(&client, &location, true).await;
        print_output(&output);

        let again = Confirm::new("Do you want to check another location?")
            .with_default(true)
            .prompt()?;
        if !again {
            println!("\nExiting the weather app. Have a great day!");
            return Ok(());
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("WeatherAPI.com API key:").prompt()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Errors print as a single line; reports as a block.
fn print_output(output: &WeatherOutput) {
    match output {
        WeatherOutput::Error(reply) => println!("\n{}\n", reply.error),
        WeatherOutput::Report(report) => {
            if report.region.is_empty() {
                println!("\nWeather in {}, {}:", report.city, report.country);
            } else {
                println!("\nWeather in {}, {} ({}):", report.city, report.country, report.region);
            }
            if !report.localtime.is_empty() {
                println!("Local time: {}", report.localtime);
            }
            println!(
                "Temperature: {:.1}°C ({:.1}°F), feels like {:.1}°C",
                report.temp_c, report.temp_f, report.feelslike_c
            );
            println!("Conditions: {}", report.weather_desc);
            println!("Humidity: {}%", report.humidity);
            println!("Wind: {:.1} km/h {}", report.wind_kph, report.wind_dir);
            println!("Pressure: {:.1} mb", report.pressure_mb);
            println!("Visibility: {:.1} km", report.vis_km);
            println!("UV index: {:.1}", report.uv);
            if let Some(aq) = &report.air_quality {
                println!(
                    "Air quality (US EPA index {}): PM2.5 {:.1}, PM10 {:.1}, O3 {:.1}, NO2 {:.1}, CO {:.1}",
                    aq.us_epa_index, aq.pm2_5, aq.pm10, aq.o3, aq.no2, aq.co
                );
            }
            if !report.last_updated.is_empty() {
                println!("Last updated: {}", report.last_updated);
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_location_and_aqi_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris", "--aqi"])
            .expect("args must parse");

        match cli.command {
            Some(Command::Show { location, aqi }) => {
                assert_eq!(location, "Paris");
                assert!(aqi);
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["weather"]).expect("args must parse");
        assert!(cli.command.is_none());
    }
}
