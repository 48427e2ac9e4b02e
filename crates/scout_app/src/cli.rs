use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "scout", about = "Run a vehicle search job and follow its progress")]
pub struct Args {
    /// JSON file holding the search criteria.
    #[arg(short, long)]
    pub criteria: PathBuf,

    /// RON settings file. Missing files fall back to defaults.
    #[arg(short, long, default_value = "scout.ron")]
    pub settings: PathBuf,

    /// Bearer token for the job service.
    #[arg(long, env = "SCOUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Known credit balance to start the session with.
    #[arg(long)]
    pub credits: Option<f64>,

    /// More log detail; repeat for trace output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
