//! Terminal front end: runs one vehicle search and follows it to the end.
mod cli;
mod logging;
mod run;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use scout_logging::scout_info;

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Args::parse();
    let loaded = settings::ScoutSettings::load(&args.settings)
        .with_context(|| format!("loading settings from {}", args.settings.display()))?;
    let from_file = loaded.is_some();
    let settings = loaded.unwrap_or_default();
    logging::initialize(settings.log_destination, logging::level_for(args.verbose));
    if !from_file {
        scout_info!("No settings at {}, using defaults", args.settings.display());
    }

    let criteria = run::read_criteria(&args.criteria)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let succeeded = runtime.block_on(run::run_search(&settings, &args, criteria))?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
