//! Graph-based Henze–Penrose divergence and Bayes error bounds.
//!
//! The engine builds a Euclidean minimum spanning tree or k-nearest-neighbour
//! graph over labelled points, counts cross-class edges into a divergence
//! matrix, and converts that matrix into a lower bound on the Bayes error
//! rate. [`ClusterWeighting`] runs the whole chain per cluster and derives
//! alpha-hat coefficients from the per-cluster bounds.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod ber;
mod cluster;
mod cross_class;
mod distance;
mod divergence;
mod error;
mod graph;
mod points;
mod weighting;

pub use crate::{
    ber::ber_lower_bound,
    cluster::{
        AlphaHatParams, ClusterId, ClusterSlice, compute_alpha_hat, split_into_clusters,
    },
    cross_class::{DivergenceMatrix, cross_class_counts},
    distance::{DistanceMatrix, euclidean_distance, pairwise_distances},
    divergence::{DivergenceEstimate, DivergenceMethod, estimate_divergence},
    error::{ErrorKind, HpdivError, HpdivErrorCode, Result},
    graph::{Graph, GraphEdge, GraphMode, build_graph, graph_from_matrix},
    points::{LabelVector, PointSet, PointView, Points},
    weighting::{
        ClusterReport, ClusterWeighting, ClusterWeightingBuilder, ClusterWeightingReport,
    },
};
