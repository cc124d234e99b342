use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Okeanos gridpoint teleconnection mapper.
#[derive(Parser)]
#[command(
    name = "okeanos",
    version,
    about = "Gridpoint correlation and regression maps against a regional climate index"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute statistic maps for the full ensemble and write them to NetCDF.
    Map(MapArgs),
    /// Compute the regional anomaly index series and write it as JSON.
    Index(IndexArgs),
}

/// Arguments for the `map` subcommand.
#[derive(clap::Args)]
pub struct MapArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "okeanos.toml")]
    pub config: PathBuf,

    /// Override output NetCDF path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override statistic kind from config (correlation or regression).
    #[arg(short, long)]
    pub statistic: Option<String>,
}

/// Arguments for the `index` subcommand.
#[derive(clap::Args)]
pub struct IndexArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "okeanos.toml")]
    pub config: PathBuf,

    /// Path for index JSON output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
