//! # Breakfast Planner
//!
//! 早餐消耗估算與訂貨計劃命令列工具

use clap::Parser;

mod cli;
mod commands;
mod logging;
mod output;
mod settings;

fn main() {
    if let Err(error) = run() {
        eprintln!("breakfast-planner error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.quiet, cli.verbose)?;

    let settings = settings::Settings::load(cli.config.as_deref(), cli.data_dir.as_deref())?;
    commands::dispatch(&cli.command, &settings)
}
