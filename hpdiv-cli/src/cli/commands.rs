//! Command implementations and argument parsing for the hpdiv CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hpdiv_core::{
    ClusterWeightingBuilder, ClusterWeightingReport, DivergenceEstimate, DivergenceMatrix,
    DivergenceMethod, GraphMode, HpdivError, HpdivErrorCode, LabelVector, Points,
    ber_lower_bound, build_graph, cross_class_counts, estimate_divergence,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::{read_clustered, read_labelled, read_points};

const DEFAULT_NEIGHBOURS: usize = 5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "hpdiv",
    about = "Estimate Henze-Penrose divergence and Bayes error bounds."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Estimate the divergence between two samples.
    Divergence(DivergenceCommand),
    /// Bound the Bayes error of a labelled sample.
    Ber(BerCommand),
    /// Derive per-cluster alpha-hat coefficients.
    AlphaHat(AlphaHatCommand),
}

/// Options accepted by the `divergence` command.
#[derive(Debug, Args, Clone)]
pub struct DivergenceCommand {
    /// CSV file with one point of sample A per row.
    pub a: PathBuf,

    /// CSV file with one point of sample B per row.
    pub b: PathBuf,

    /// Estimator to apply.
    #[arg(long, value_enum, default_value_t = MethodArg::Mst)]
    pub method: MethodArg,
}

/// Options accepted by the `ber` command.
#[derive(Debug, Args, Clone)]
pub struct BerCommand {
    /// CSV file with `label,x1,..,xD` rows.
    pub path: PathBuf,

    /// Number of classes; defaults to the largest label plus one.
    #[arg(long)]
    pub classes: Option<usize>,

    /// Graph construction options.
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Options accepted by the `alpha-hat` command.
#[derive(Debug, Args, Clone)]
pub struct AlphaHatCommand {
    /// CSV file with `cluster,label,x1,..,xD` rows.
    pub path: PathBuf,

    /// Number of classes; defaults to the largest label plus one.
    #[arg(long)]
    pub classes: Option<usize>,

    /// Base weighting coefficient.
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    pub alpha: f64,

    /// Scale applied to each cluster's deviation from the mean.
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub beta: f64,

    /// Graph construction options.
    #[command(flatten)]
    pub graph: GraphArgs,
}

/// Graph selection shared by `ber` and `alpha-hat`.
#[derive(Debug, Args, Clone, Copy)]
pub struct GraphArgs {
    /// Graph to build over each point set.
    #[arg(long = "graph", value_enum, default_value_t = GraphKind::Mst)]
    pub kind: GraphKind,

    /// Neighbours per point when `--graph knn` is selected.
    #[arg(
        long,
        default_value_t = DEFAULT_NEIGHBOURS,
        value_parser = clap::value_parser!(usize),
    )]
    pub k: usize,
}

impl GraphArgs {
    /// Converts the parsed options into a [`GraphMode`].
    #[must_use]
    pub fn mode(self) -> GraphMode {
        match self.kind {
            GraphKind::Mst => GraphMode::MinimumSpanningTree,
            GraphKind::Knn => GraphMode::NearestNeighbours { k: self.k },
        }
    }
}

/// Divergence estimators selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Count cross-sample nearest-neighbour edges.
    #[value(name = "1nn")]
    OneNearestNeighbour,
    /// Count cross-sample minimum spanning tree edges.
    Mst,
}

impl From<MethodArg> for DivergenceMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::OneNearestNeighbour => Self::OneNearestNeighbour,
            MethodArg::Mst => Self::MinimumSpanningTree,
        }
    }
}

/// Graph kinds selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphKind {
    /// Euclidean minimum spanning tree.
    Mst,
    /// Directed k-nearest-neighbour graph.
    Knn,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The CSV reader failed, including when the file cannot be opened.
    #[error("failed to read `{path}`: {source}")]
    Csv {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying reader error.
        #[source]
        source: csv::Error,
    },
    /// A field could not be parsed as a number.
    #[error("`{path}` line {line} column {column}: `{value}` is not a valid number")]
    InvalidField {
        /// File containing the field.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// One-based column number.
        column: usize,
        /// Raw field content.
        value: String,
    },
    /// A row has too few fields for the input layout.
    #[error("`{path}` line {line}: expected at least {expected} fields, found {found}")]
    MissingColumns {
        /// File containing the row.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// Minimum number of fields.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },
    /// A label does not fit the platform's index type.
    #[error("`{path}`: label {label} is too large")]
    LabelTooLarge {
        /// File containing the label.
        path: PathBuf,
        /// Offending label.
        label: u64,
    },
    /// The engine rejected the input.
    #[error(transparent)]
    Core(#[from] HpdivError),
}

impl CliError {
    /// Returns the engine's error code when the failure came from the engine.
    #[must_use]
    pub fn core_code(&self) -> Option<HpdivErrorCode> {
        match self {
            Self::Core(err) => Some(err.code()),
            _ => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Result of `divergence`.
    Divergence {
        /// Size of sample A.
        a: usize,
        /// Size of sample B.
        b: usize,
        /// The estimate itself.
        estimate: DivergenceEstimate,
    },
    /// Result of `ber`.
    Ber {
        /// Number of labelled points.
        points: usize,
        /// Graph the matrix was derived from.
        mode: GraphMode,
        /// Normalised cross-class counts.
        matrix: DivergenceMatrix,
        /// BER lower bound.
        bound: f64,
    },
    /// Result of `alpha-hat`.
    AlphaHat {
        /// Graph used for every cluster.
        mode: GraphMode,
        /// Per-cluster reports and coefficients.
        report: ClusterWeightingReport,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading the input or running the estimate
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use hpdiv_cli::cli::{Cli, Command, DivergenceCommand, MethodArg, Summary, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let a = NamedTempFile::new()?;
/// let b = NamedTempFile::new()?;
/// std::fs::write(a.path(), "0.0\n1.0\n")?;
/// std::fs::write(b.path(), "10.0\n11.0\n")?;
/// let cli = Cli {
///     command: Command::Divergence(DivergenceCommand {
///         a: a.path().to_path_buf(),
///         b: b.path().to_path_buf(),
///         method: MethodArg::Mst,
///     }),
/// };
/// let Summary::Divergence { estimate, .. } = run_cli(cli)? else {
///     unreachable!("divergence command yields a divergence summary");
/// };
/// assert_eq!(estimate.cross_count, 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<Summary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Divergence(command) => {
            span.record("command", field::display("divergence"));
            run_divergence(command)
        }
        Command::Ber(command) => {
            span.record("command", field::display("ber"));
            run_ber(command)
        }
        Command::AlphaHat(command) => {
            span.record("command", field::display("alpha-hat"));
            run_alpha_hat(command)
        }
    }
}

#[instrument(
    name = "cli.divergence",
    err,
    skip(command),
    fields(a = field::Empty, b = field::Empty, method = field::Empty),
)]
pub(super) fn run_divergence(command: DivergenceCommand) -> Result<Summary, CliError> {
    let span = Span::current();
    span.record("a", field::display(command.a.display()));
    span.record("b", field::display(command.b.display()));
    let method = DivergenceMethod::from(command.method);
    span.record("method", method.as_str());

    let a = read_points(&command.a)?;
    let b = read_points(&command.b)?;
    let estimate = estimate_divergence(&a, &b, method)?;
    info!(
        value = estimate.value,
        cross_count = estimate.cross_count,
        "divergence estimated"
    );
    Ok(Summary::Divergence {
        a: a.len(),
        b: b.len(),
        estimate,
    })
}

#[instrument(
    name = "cli.ber",
    err,
    skip(command),
    fields(path = field::Empty, classes = field::Empty, mode = field::Empty),
)]
pub(super) fn run_ber(command: BerCommand) -> Result<Summary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    let mode = command.graph.mode();
    span.record("mode", mode.as_str());

    let (points, labels) = read_labelled(&command.path)?;
    let class_count = resolve_class_count(command.classes, &labels);
    span.record("classes", class_count);

    let graph = build_graph(&points, mode)?;
    let matrix = cross_class_counts(&graph, &labels, class_count)?;
    let bound = ber_lower_bound(&matrix, class_count)?;
    info!(bound, points = points.len(), "BER bound estimated");
    Ok(Summary::Ber {
        points: points.len(),
        mode,
        matrix,
        bound,
    })
}

#[instrument(
    name = "cli.alpha_hat",
    err,
    skip(command),
    fields(path = field::Empty, classes = field::Empty, mode = field::Empty),
)]
pub(super) fn run_alpha_hat(command: AlphaHatCommand) -> Result<Summary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));
    let mode = command.graph.mode();
    span.record("mode", mode.as_str());

    let (points, labels, membership) = read_clustered(&command.path)?;
    let class_count = resolve_class_count(command.classes, &labels);
    span.record("classes", class_count);

    let weighting = ClusterWeightingBuilder::new()
        .with_class_count(class_count)
        .with_alpha(command.alpha)
        .with_beta(command.beta)
        .with_graph_mode(mode)
        .build()?;
    let report = weighting.run(&points, &labels, &membership)?;
    Ok(Summary::AlphaHat { mode, report })
}

/// Uses the explicit class count when given, else the largest label plus
/// one. Input with a single observed class resolves to one and is rejected
/// by the engine.
pub(super) fn resolve_class_count(explicit: Option<usize>, labels: &LabelVector) -> usize {
    explicit.unwrap_or_else(|| {
        labels
            .as_slice()
            .iter()
            .max()
            .map_or(0, |max| max.saturating_add(1))
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use hpdiv_cli::cli::{Summary, render_summary};
/// # use hpdiv_core::{DivergenceEstimate, DivergenceMethod};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = Summary::Divergence {
///     a: 2,
///     b: 2,
///     estimate: DivergenceEstimate {
///         value: 0.75,
///         cross_count: 1,
///         method: DivergenceMethod::MinimumSpanningTree,
///     },
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("divergence: 0.750000\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &Summary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        Summary::Divergence { a, b, estimate } => {
            writeln!(writer, "method: {}", estimate.method)?;
            writeln!(writer, "samples: {a} x {b}")?;
            writeln!(writer, "cross edges: {}", estimate.cross_count)?;
            writeln!(writer, "divergence: {:.6}", estimate.value)?;
        }
        Summary::Ber {
            points,
            mode,
            matrix,
            bound,
        } => {
            writeln!(writer, "graph: {}", mode.as_str())?;
            writeln!(writer, "points: {points}")?;
            writeln!(writer, "classes: {}", matrix.class_count())?;
            for row in matrix.rows() {
                write_row(&mut writer, row)?;
            }
            writeln!(writer, "ber lower bound: {bound:.6}")?;
        }
        Summary::AlphaHat { mode, report } => {
            writeln!(writer, "graph: {}", mode.as_str())?;
            writeln!(writer, "clusters: {}", report.clusters().len())?;
            writeln!(writer, "cluster\tsize\tber\talpha_hat")?;
            for (cluster, alpha_hat) in report.iter() {
                writeln!(
                    writer,
                    "{}\t{}\t{:.6}\t{alpha_hat:.6}",
                    cluster.cluster, cluster.size, cluster.ber
                )?;
            }
        }
    }
    Ok(())
}

fn write_row(writer: &mut impl Write, row: &[f64]) -> io::Result<()> {
    let cells: Vec<String> = row.iter().map(|value| format!("{value:.6}")).collect();
    writeln!(writer, "{}", cells.join("\t"))
}
