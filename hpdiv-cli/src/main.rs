//! `hpdiv` entry point.
//!
//! Parses arguments, runs the selected estimate over CSV input, and writes a
//! plain-text summary to stdout. Diagnostics go to stderr through `tracing`.
//! Engine rejections exit with status 2, every other failure with 1.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use hpdiv_cli::{
    cli::{Cli, CliError, Summary, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

const INPUT_REJECTED: u8 = 2;

fn execute(cli: Cli) -> anyhow::Result<()> {
    let summary = run_cli(cli).context("command failed")?;
    write_summary(&summary)
}

fn write_summary(summary: &Summary) -> anyhow::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(summary, &mut out).context("failed to write summary")?;
    out.flush().context("failed to flush stdout")
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let Err(err) = execute(Cli::parse()) else {
        return ExitCode::SUCCESS;
    };

    let Some(code) = err.downcast_ref::<CliError>().and_then(CliError::core_code) else {
        error!(error = %format!("{err:#}"), "hpdiv failed");
        return ExitCode::FAILURE;
    };
    error!(
        error = %format!("{err:#}"),
        code = field::display(code.as_str()),
        kind = field::display(code.kind().as_str()),
        "input rejected by the engine"
    );
    ExitCode::from(INPUT_REJECTED)
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available until logging initialises"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
