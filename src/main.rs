use std::process::ExitCode;

use clap::Parser;
use dreamviz::config::setup_logging;
use tracing::debug;

fn main() -> ExitCode {
    let cli = dreamviz::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return ExitCode::FAILURE;
    }

    match dreamviz::run(&cli) {
        Ok(path) => {
            println!("SUCCESS: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("Run failed: {:?}", err);
            eprintln!("{}: {}", err.marker(), err);
            ExitCode::FAILURE
        }
    }
}
