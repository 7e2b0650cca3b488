//! climate-probe: one-shot CPU and BME280 reading as a single JSON line
//!
//! Reads the SoC thermal zone, takes one BME280 measurement over I2C and
//! prints `{"cpu":{...},"bme280":{...}}` on stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// === Modules ===

mod config;
mod error;
mod report;
mod sensors;
mod shared;

#[cfg(all(feature = "linux", target_os = "linux"))]
mod linux;

use config::Config;
use error::Result;
use report::CombinedResult;
use sensors::environment::EnvironmentalReading;

// === CLI ===

#[derive(Parser)]
#[command(name = "climate-probe")]
#[command(about = "Print CPU temperature and BME280 readings as one JSON line")]
struct Cli {
    /// Config file to use instead of ~/.config/climate-probe/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the config file location and the effective configuration
    Config {
        /// Write a default config file if none exists yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Config { init }) => run_config_command(cli.config, init)?,
        None => {
            let config = match &cli.config {
                Some(path) => Config::from_file(path)?,
                None => Config::load(),
            };
            let json = run(&config)?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Print (and optionally create) the config file
fn run_config_command(explicit: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    let config_path = explicit
        .or_else(Config::path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if init && !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, include_str!("../config.toml.example"))?;
        println!("Created config file: {}", config_path.display());
    }

    let config = if config_path.exists() {
        println!("# {}", config_path.display());
        Config::from_file(&config_path)?
    } else {
        println!("# {} (not present, using defaults)", config_path.display());
        Config::default()
    };
    print!("{}", config.to_toml()?);

    Ok(())
}

/// Acquire both readings and assemble the JSON line
fn run(config: &Config) -> Result<String> {
    let cpu = sensors::cpu::read_cpu_temperature(&config.thermal_path)?;
    let bme280 = read_bme280(config)?;

    let json = CombinedResult::new(cpu, bme280).to_json()?;
    tracing::debug!("Assembled result: {}", json);
    Ok(json)
}

#[cfg(all(feature = "linux", target_os = "linux"))]
fn read_bme280(config: &Config) -> Result<EnvironmentalReading> {
    linux::i2c::read_bme280(config)
}

#[cfg(not(all(feature = "linux", target_os = "linux")))]
fn read_bme280(_config: &Config) -> Result<EnvironmentalReading> {
    Err(shared::sensor_error("I2C support not compiled in"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::Error;

    fn config_with(thermal_path: PathBuf) -> Config {
        Config {
            thermal_path,
            // No such adapter on any test host
            i2c_bus: 9999,
            ..Config::default()
        }
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "climate-probe",
            "--config",
            "/tmp/x.toml",
            "config",
            "--init",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
        assert!(matches!(cli.command, Some(Commands::Config { init: true })));

        let cli = Cli::try_parse_from(["climate-probe"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_missing_cpu_file_stops_before_sensor() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(dir.path().join("temp"));

        assert!(matches!(run(&config), Err(Error::Read { .. })));
    }

    #[test]
    fn test_unparseable_cpu_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp");
        std::fs::write(&path, "abc").unwrap();

        assert!(matches!(run(&config_with(path)), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_bus_failure_is_sensor_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp");
        std::fs::write(&path, "45000\n").unwrap();

        let err = run(&config_with(path)).unwrap_err();
        assert!(matches!(err, Error::Sensor(_)));
        assert!(err.to_string().starts_with("failed to read BME280 data"));
    }
}
