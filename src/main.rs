use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use weathernow::{WeatherLookup, WeatherNowConfig, logging, web};

#[derive(Debug, Parser)]
#[command(author, version, about = "Current weather for a city, powered by Open-Meteo")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up the current weather for a city
    Lookup {
        /// City name, e.g. "New York"
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve lookups over HTTP at /api/weather?city=
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = WeatherNowConfig::load_from_path(cli.config)?;
    logging::init_tracing(&config.logging, cli.verbose)?;

    let lookup = WeatherLookup::from_config(&config.api)?;

    match cli.command {
        Command::Lookup { city, json } => {
            let city = city.join(" ");
            match lookup.lookup(&city).await {
                Ok(report) if json => println!("{}", serde_json::to_string_pretty(&report)?),
                Ok(report) => println!("{report}"),
                Err(err) => {
                    eprintln!("{err}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            web::run(lookup, &config.server.host, port).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
