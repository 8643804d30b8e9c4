//! Convert legacy Nord Pool Spot page JSON to simple JSON
//!
//! ```text
//! nordspoolspot2json < pricedata.json
//! nordspoolspot2json pricedata.json
//! ```

use std::process::ExitCode;

use chrono_tz::Tz;
use clap::Parser;

use energy2json::cli::{init_logging, run, timezone_arg, CommonArgs};
use energy2json::config::NordPoolSpotConfig;
use energy2json::NordPoolSpot;

#[derive(Parser, Debug)]
#[command(
    name = "nordspoolspot2json",
    version,
    about = "Parse Nord Pool Spot Elspot price data and output simplified JSON"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// IANA timezone of the StartTime values
    #[arg(long, value_name = "ZONE", default_value = "Europe/Paris", value_parser = timezone_arg)]
    timezone: Tz,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    let format = NordPoolSpot::new(NordPoolSpotConfig {
        timezone: cli.timezone,
    });
    run(env!("CARGO_BIN_NAME"), &cli.common, &format)
}
