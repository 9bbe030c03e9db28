//! Command-line interface orchestration for `hpdiv`.
//!
//! Three commands read headerless CSV input:
//!
//! - `divergence A.csv B.csv` estimates the divergence between two samples;
//! - `ber data.csv` bounds the Bayes error of labelled points (`label,x..`);
//! - `alpha-hat data.csv` weights clusters (`cluster,label,x..`).

mod commands;
mod input;

pub use commands::{
    AlphaHatCommand, BerCommand, Cli, CliError, Command, DivergenceCommand, GraphArgs,
    GraphKind, MethodArg, Summary, render_summary, run_cli,
};
pub use input::{read_clustered, read_labelled, read_points};
