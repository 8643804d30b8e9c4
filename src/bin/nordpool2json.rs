//! Convert Nord Pool day-ahead price JSON to simple JSON
//!
//! ```text
//! nordpool2json < pricedata.json
//! nordpool2json pricedata.json
//! ```

use std::process::ExitCode;

use clap::Parser;

use energy2json::cli::{init_logging, run, CommonArgs};
use energy2json::NordPool;

#[derive(Parser, Debug)]
#[command(
    name = "nordpool2json",
    version,
    about = "Parse Nord Pool day-ahead price data and output simplified JSON"
)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    run(env!("CARGO_BIN_NAME"), &cli.common, &NordPool)
}
