//! Command-line front end shared by the converter binaries
//!
//! Each binary reads one document from a file or standard input, converts it
//! and prints the readings as JSON on standard output. Logs and diagnostics
//! go to standard error only.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono_tz::Tz;
use clap::Args;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::parse_timezone;
use crate::error::ConvertError;
use crate::output::write_readings;
use crate::pipeline::{convert_reader, SourceFormat};
use crate::types::Reading;

/// Arguments every converter accepts
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Input file; standard input is read when omitted
    #[arg(value_name = "INFILE")]
    pub input: Option<PathBuf>,

    /// Enable debug logging on standard error
    #[arg(short, long)]
    pub verbose: bool,
}

/// clap value parser for `--timezone`
pub fn timezone_arg(name: &str) -> Result<Tz, String> {
    parse_timezone(name).map_err(|e| e.to_string())
}

/// Initialize stderr logging
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "energy2json=debug"
    } else {
        "energy2json=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Convert the file at `input`, or standard input when `None`
pub fn convert_input<F: SourceFormat>(
    input: Option<&Path>,
    format: &F,
) -> Result<Vec<Reading>, ConvertError> {
    match input {
        Some(path) => {
            info!(path = %path.display(), format = F::NAME, "reading input file");
            let file = File::open(path)
                .map_err(|e| ConvertError::Io(format!("{}: {}", path.display(), e)))?;
            convert_reader(format, file)
        }
        None => {
            info!(format = F::NAME, "reading standard input");
            convert_reader(format, io::stdin().lock())
        }
    }
}

/// Run one converter to completion and map the outcome to an exit code
///
/// Nothing is written to standard output unless the whole document converted.
pub fn run<F: SourceFormat>(program: &str, args: &CommonArgs, format: &F) -> ExitCode {
    let result = convert_input(args.input.as_deref(), format)
        .and_then(|readings| write_readings(io::stdout().lock(), &readings));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", program, e);
            ExitCode::FAILURE
        }
    }
}
