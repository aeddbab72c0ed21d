use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::Text;

use citytemp_core::{Config, WeatherAggregator, WeatherReading};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "citytemp",
    version,
    about = "Current and same-day temperature for a city"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the temperature card for a city.
    Show {
        /// City name, e.g. "Santiago de Chile". Falls back to the configured
        /// default city when omitted.
        city: Option<String>,

        /// Print the reading as JSON instead of the card.
        #[arg(long)]
        json: bool,
    },

    /// Interactively set the default city and geocoding language.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { city, json } => show(city, json).await,
            Command::Configure => configure(),
        }
    }
}

async fn show(city: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;

    let city = match city.or_else(|| config.default_city().map(str::to_owned)) {
        Some(city) => city,
        None => bail!(
            "No city given and no default city configured.\n\
             Hint: run `citytemp configure` first, or pass a city name: \
             `citytemp show \"Santiago de Chile\"`."
        ),
    };

    let aggregator = WeatherAggregator::new().language(config.language());

    eprintln!("Fetching weather for {city}...");

    let Some(reading) = aggregator.resolve(&city).await else {
        bail!("Could not find \"{city}\" or fetch its weather. Check the spelling and try again.");
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(&reading).context("Failed to render reading as JSON")?;
        println!("{rendered}");
    } else {
        print!("{}", render_card(&reading));
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let city = Text::new("Default city:")
        .with_initial_value(config.default_city().unwrap_or(""))
        .prompt()?;
    let language = Text::new("Geocoding language:")
        .with_initial_value(config.language())
        .prompt()?;

    config.set_default_city(Some(city.trim().to_string()));
    config.set_language(Some(language.trim().to_string()));
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

/// Absent values render as a dash; the reading itself never carries placeholders.
const PLACEHOLDER: &str = "—";

fn render_card(reading: &WeatherReading) -> String {
    fn field(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or(PLACEHOLDER)
    }

    format!(
        "{label}\n\
         Current:        {temp} °C\n\
         Observed today: min {min_obs} °C / max {max_obs} °C\n\
         Forecast today: min {min_fc} °C / max {max_fc} °C\n",
        label = reading.label,
        temp = field(&reading.temp),
        min_obs = field(&reading.temp_min_observed),
        max_obs = field(&reading.temp_max_observed),
        min_fc = field(&reading.temp_min_forecast),
        max_fc = field(&reading.temp_max_forecast),
    )
}
