use anyhow::Result;
use clap::Parser;

mod capture;
mod cli;
mod config;
mod headless;
#[cfg(feature = "gui")]
mod gui;

use config::AppConfig;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::CliArgs::parse();
    let config = AppConfig::load(args.config.as_deref())?.with_windows(&args.windows);
    match args.mode {
        Some(cli::Mode::Headless { command }) => headless::run_headless(command, &config),
        None => run_gui(config),
    }
}

#[cfg(feature = "gui")]
fn run_gui(config: AppConfig) -> Result<()> {
    gui::run_gui(config)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: AppConfig) -> Result<()> {
    anyhow::bail!("GUI support disabled. Rebuild with --features gui.");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
