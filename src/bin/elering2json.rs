//! Convert Elering metering CSV to simple JSON
//!
//! ```text
//! elering2json < Tarbimine_elekter.csv
//! elering2json Tarbimine_elekter.csv
//! ```

use std::process::ExitCode;

use chrono_tz::Tz;
use clap::Parser;

use energy2json::cli::{init_logging, run, timezone_arg, CommonArgs};
use energy2json::config::EleringConfig;
use energy2json::EleringCsv;

#[derive(Parser, Debug)]
#[command(
    name = "elering2json",
    version,
    about = "Read energy metering data CSV from Elering and generate JSON"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// IANA timezone of the CSV timestamps
    #[arg(long, value_name = "ZONE", default_value = "Europe/Tallinn", value_parser = timezone_arg)]
    timezone: Tz,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    let format = EleringCsv::new(EleringConfig::with_timezone(cli.timezone));
    run(env!("CARGO_BIN_NAME"), &cli.common, &format)
}
