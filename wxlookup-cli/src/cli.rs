use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use std::{process::ExitCode, sync::Arc};
use tracing::debug;
use wxlookup_core::{
    AppConfig, Coordinator, IpGeolocator, LookupTarget, Renderer, UnitSystem,
    provider::OpenWeatherProvider,
};

use crate::terminal::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxlookup", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and unit system.
    Configure,

    /// Look up weather by city name.
    Search {
        /// City name; several words are joined with spaces.
        #[arg(num_args = 0.., trailing_var_arg = true)]
        city: Vec<String>,
    },

    /// Look up weather at your approximate location.
    Here,

    /// Look up weather at explicit coordinates.
    At {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", AppConfig::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
            Command::Search { city } => {
                let coordinator = load_coordinator()?;
                let outcome = coordinator.search(&TerminalView::new(), &city.join(" ")).await;
                Ok(exit_code(outcome.is_ok()))
            }
            Command::Here => {
                let coordinator = load_coordinator()?;
                let outcome = coordinator
                    .locate(&TerminalView::new(), &IpGeolocator::default())
                    .await;
                Ok(exit_code(outcome.is_ok()))
            }
            Command::At { latitude, longitude } => {
                let coordinator = load_coordinator()?;
                let target = LookupTarget::coordinates(latitude, longitude);
                let outcome = coordinator.lookup(&TerminalView::new(), target).await;
                Ok(exit_code(outcome.is_ok()))
            }
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Load config once and build the pipeline, weekday names in local time.
fn load_coordinator() -> anyhow::Result<Coordinator> {
    let config = AppConfig::load()?;
    debug!(base_url = %config.base_url, units = %config.units, "loaded configuration");

    let provider = OpenWeatherProvider::from_config(&config)?;
    let renderer = Renderer::new(&config).with_offset(*Local::now().offset());

    Ok(Coordinator::new(Arc::new(provider), renderer))
}

fn configure() -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = UnitSystem::all().to_vec();
    let start = units.iter().position(|u| *u == config.units).unwrap_or(0);
    let units = Select::new("Unit system:", units)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read unit system")?;

    config.api_key = Some(api_key.trim().to_string());
    config.units = units;
    config.api_key()?;
    config.save()?;

    println!("Saved configuration to {}", AppConfig::config_file_path()?.display());
    Ok(())
}
