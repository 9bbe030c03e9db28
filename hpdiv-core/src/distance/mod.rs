//! Euclidean distance primitives.
//!
//! Pairwise distances are the dominant cost of the engine: building the full
//! matrix is `O(N²·D)` time and `O(N²)` memory, and both graph modes derive
//! from it. With the `parallel` feature rows are filled concurrently.

mod euclidean;
mod matrix;

pub use self::euclidean::euclidean_distance;
pub use self::matrix::{DistanceMatrix, pairwise_distances};
