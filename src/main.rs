mod app;
mod cli;
mod clipboard;
mod constants;
mod error;
mod gist;
mod input;
mod logging;
mod output;

use std::process::ExitCode;

use crate::app::run_app;
use crate::cli::Config;
use crate::error::GostError;
use crate::logging::{init_logging, log_error};

fn main() -> ExitCode {
    init_logging();

    let result = Config::from_args()
        .map_err(anyhow::Error::from)
        .and_then(|config| run_app(&config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&format!("{e:#}"));

            match e.downcast_ref::<GostError>() {
                Some(gost_error) => {
                    eprintln!("{gost_error}");
                    ExitCode::from(gost_error.exit_code())
                }
                None => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
