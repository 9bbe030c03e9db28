//! Benchmark setup error type.

use hpdiv_core::HpdivError;

/// Errors that may occur while preparing benchmark fixtures.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The engine rejected a generated fixture.
    #[error("engine rejected fixture: {0}")]
    Core(#[from] HpdivError),
    /// A fixture was requested with too few points to build a graph.
    #[error("{context} needs at least two points, got {got}")]
    TooSmall {
        /// Which fixture was being generated.
        context: &'static str,
        /// Requested point count.
        got: usize,
    },
}
