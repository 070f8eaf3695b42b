use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daily irrigation scheduling from monthly climate data.
#[derive(Parser)]
#[command(
    name = "irrigation-schedule",
    version,
    about = "Daily irrigation schedule from monthly ETr and rainfall"
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
    /// Build the daily irrigation schedule and write it as CSV.
    Schedule(ScheduleArgs),
    /// Print monthly ETr from the configured Penman observations.
    Etr(EtrArgs),
}

/// Arguments for the `schedule` subcommand.
#[derive(clap::Args)]
pub struct ScheduleArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "irrigation.toml")]
    pub config: PathBuf,

    /// Soil type, overriding `soil_type` from config.
    #[arg(short, long)]
    pub soil: Option<String>,

    /// Crop type, overriding `crop_type` from config.
    #[arg(long)]
    pub crop: Option<String>,

    /// Override output CSV path from config; stdout when neither is set.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `etr` subcommand.
#[derive(clap::Args)]
pub struct EtrArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "irrigation.toml")]
    pub config: PathBuf,
}
