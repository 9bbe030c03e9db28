//! Property-based checks for graph construction.
//!
//! The dense Prim tree is compared edge-for-edge with a sequential Kruskal
//! oracle over the complete graph; both order edges by
//! `(weight, source, target)`, so equal weights cannot make them diverge.

mod oracle;
mod strategies;
