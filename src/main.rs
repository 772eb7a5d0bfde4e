//! Binary entrypoint for the `subverted` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match subverted::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
