mod cli;
mod logging;

use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use irrigation_schedule::{RunConfig, assemble, monthly_etr, write_csv};

use crate::cli::{Cli, Command, EtrArgs, ScheduleArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Schedule(args) => schedule(args),
        Command::Etr(args) => etr(args),
    }
}

fn schedule(args: ScheduleArgs) -> Result<()> {
    let config = RunConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let inputs = config
        .season_inputs(args.soil.as_deref(), args.crop.as_deref())
        .context("resolving soil, crop and climate")?;
    let schedule = assemble(&inputs).context("building irrigation schedule")?;

    match args.output.or(config.output) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_csv(&schedule, BufWriter::new(file))
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "irrigation schedule saved");
        }
        None => write_csv(&schedule, io::stdout().lock()).context("writing schedule to stdout")?,
    }
    Ok(())
}

fn etr(args: EtrArgs) -> Result<()> {
    let config = RunConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if config.climate.penman.is_empty() {
        bail!("{} has no [[climate.penman]] observations", args.config.display());
    }
    let etr = monthly_etr(&config.climate.penman).context("estimating ETr")?;

    if etr.len() != config.season.months.len() {
        bail!(
            "{} Penman observations for {} season months",
            etr.len(),
            config.season.months.len()
        );
    }

    println!("Month,ETr (mm/day)");
    for (month, value) in config.season.months.iter().zip(&etr) {
        println!("{month},{value}");
    }
    Ok(())
}
