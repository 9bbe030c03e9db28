//! Benchmark support crate for hpdiv.
//!
//! Provides synthetic Gaussian fixtures and parameter types used by the
//! Criterion benchmarks for graph construction, divergence estimation, and
//! cluster weighting.

pub mod error;
pub mod params;
pub mod source;
