mod cli;
mod logging;
mod runner;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use watch_logging::watch_error;

use crate::cli::Cli;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(level, cli.log_file.as_deref());

    let result = match Settings::load(&cli.config) {
        Ok(settings) => runner::run(settings, cli.once).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            watch_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
