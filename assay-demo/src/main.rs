//! Runs the assay demonstration suite.

mod args;
mod events;
mod suite;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let args = args::CommandLineArgs::parse();

    events::init(&args.enabled_log_events);

    let registry = suite::registry().context("failed to register the demonstration suite")?;

    let mut runner = assay_core::Runner::new(args.run_options());
    let summary = runner
        .run(&registry)
        .context("test run aborted")?;

    if args.strict && !summary.all_passed() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
