use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "panespace-view")]
#[command(about = "Live captures of desktop windows arranged in a 3D scene")]
pub struct CliArgs {
    /// JSON file with tracked windows, camera and interaction settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Window to track (decimal or 0x-prefixed hex); replaces the configured list.
    #[arg(long = "window", value_parser = parse_handle)]
    pub windows: Vec<u64>,
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand)]
pub enum Mode {
    Headless {
        #[command(subcommand)]
        command: HeadlessCommand,
    },
}

#[derive(Subcommand)]
pub enum HeadlessCommand {
    /// Runs a scripted pick/scale/cancel session against synthetic windows.
    Simulate(SimulateArgs),
    /// Lists capturable windows.
    Windows,
}

#[derive(Args)]
pub struct SimulateArgs {
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

fn parse_handle(text: &str) -> Result<u64, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|err| format!("invalid window id `{text}`: {err}"))
}
