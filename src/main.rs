// main.rs

mod commands;
mod config;
mod error;
mod history;
mod logging;
mod parser;
mod store;
mod util;

use std::process::ExitCode;

use tracing::debug;

use crate::config::{home_dir, Cli, Settings};
use crate::error::Result;
use crate::parser::expand_previous_shorthand;

fn main() -> ExitCode {
    match run() {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<commands::Outcome> {
    let cli = Cli::parse_args(expand_previous_shorthand(std::env::args()))?;
    logging::init_logging(&cli.log_level);

    let settings = Settings::resolve(&cli, home_dir()?)?;
    debug!(cache = %settings.cache_path.display(), mode = ?settings.mode, "resolved settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&settings, &mut out)
}
