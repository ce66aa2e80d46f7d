mod args;
mod error;
mod iopkg;
mod logging;

use crate::args::Args;
use crate::error::CliError;
use crate::iopkg::common::{load_config, open_input, open_output};
use byteindex::{BuilderConfig, IndexSummary, build_index_with_config};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<IndexSummary, CliError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BuilderConfig::default(),
    };

    let input = open_input(&args.input)?;
    let output = open_output(&args.output)?;
    info!(
        input = %args.input,
        output = %args.output,
        width = %args.width,
        target_byte = args.target,
        include_zero = args.include_zero,
        "building index"
    );

    let summary = build_index_with_config(
        input,
        output,
        args.target,
        args.width,
        args.include_zero,
        &config,
    )?;
    Ok(summary)
}
