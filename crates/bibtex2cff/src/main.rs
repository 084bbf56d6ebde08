//! bibtex2cff command-line entry point

use std::process::ExitCode;

use bibtex2cff::cli::{run, Cli};
use bibtex2cff::logging::init_logging;
use bibtex2cff::SystemClock;
use clap::Parser;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("warning: could not set up logging: {e}");
    }

    match run(&cli, &SystemClock) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
