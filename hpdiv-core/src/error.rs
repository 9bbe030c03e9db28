//! Error types for the hpdiv core library.
//!
//! Every failure is reported through [`HpdivError`]. Each variant maps to a
//! stable machine-readable [`HpdivErrorCode`] and to one of the four
//! [`ErrorKind`] families callers branch on.

use std::fmt;

use thiserror::Error;

/// Broad failure families shared by all engine operations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Shape, size, or dimension mismatches and empty inputs.
    InvalidInput,
    /// Fewer points than an algorithm requires.
    InsufficientSamples,
    /// Fewer than two classes.
    InvalidClassCount,
    /// A computed quantity left the finite range and could not be clamped.
    NumericDegenerate,
}

impl ErrorKind {
    /// Return the stable name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InsufficientSamples => "INSUFFICIENT_SAMPLES",
            Self::InvalidClassCount => "INVALID_CLASS_COUNT",
            Self::NumericDegenerate => "NUMERIC_DEGENERATE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )?
                    => $code:expr, $kind:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the failure family this code belongs to.
            #[must_use]
            pub const fn kind(self) -> ErrorKind {
                match self {
                    $(Self::$CodeVariant => ErrorKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }

            /// Retrieve the [`ErrorKind`] family for this error.
            #[must_use]
            pub const fn kind(&self) -> ErrorKind {
                self.code().kind()
            }
        }
    };
}

/// Error type produced by every hpdiv engine operation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HpdivError {
    /// A point set was constructed from no rows.
    #[error("point set contains no rows")]
    EmptyPointSet,
    /// Points must have at least one coordinate.
    #[error("points must have positive dimension")]
    ZeroDimension,
    /// A row's dimension differed from the first row's.
    #[error("row {row} has dimension {found} but {expected} was expected")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Dimension established by the first row.
        expected: usize,
        /// Dimension of the offending row.
        found: usize,
    },
    /// A flat buffer did not divide evenly into rows.
    #[error("buffer of {values} values is not a multiple of dimension {dimension}")]
    BufferShape {
        /// Number of values supplied.
        values: usize,
        /// Requested row dimension.
        dimension: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("row {row} contains a non-finite value at column {column}")]
    NonFiniteCoordinate {
        /// Row containing the value.
        row: usize,
        /// Column containing the value.
        column: usize,
    },
    /// A point collection failed to yield a point inside its own bounds.
    #[error("point {index} is missing from a collection of {len} points")]
    MissingPoint {
        /// The requested index.
        index: usize,
        /// Reported collection length.
        len: usize,
    },
    /// Two point collections that must share a dimension did not.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimension of the left-hand input.
        left: usize,
        /// Dimension of the right-hand input.
        right: usize,
    },
    /// A graph was requested over too few points.
    #[error("graph construction needs at least {required} points (got {available})")]
    TooFewPoints {
        /// Minimum number of points required.
        required: usize,
        /// Number of points supplied.
        available: usize,
    },
    /// k-NN mode was requested with `k == 0`.
    #[error("k-NN graphs need k >= 1")]
    ZeroNeighbours,
    /// k-NN mode was requested with `k >= N`.
    #[error("k-NN graphs need k < N (got k={k}, N={points})")]
    TooManyNeighbours {
        /// Requested neighbour count.
        k: usize,
        /// Number of points available.
        points: usize,
    },
    /// Label vector length differed from the number of points.
    #[error("{labels} labels were given for {points} points")]
    LabelCountMismatch {
        /// Number of points.
        points: usize,
        /// Number of labels.
        labels: usize,
    },
    /// A label was outside `[0, class_count)`.
    #[error("label {label} at index {index} is outside [0, {class_count})")]
    LabelOutOfRange {
        /// Position of the offending label.
        index: usize,
        /// The offending label value.
        label: usize,
        /// Declared number of classes.
        class_count: usize,
    },
    /// An edge referenced a node outside the labelled set.
    #[error("edge references node {node}, but only {labels} labels were given")]
    EdgeOutOfRange {
        /// Node referenced by the edge.
        node: usize,
        /// Number of labels available.
        labels: usize,
    },
    /// Membership array length differed from the number of points.
    #[error("{membership} cluster memberships were given for {points} points")]
    MembershipLengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of membership entries.
        membership: usize,
    },
    /// A divergence matrix was not square or did not match the class count.
    #[error("divergence matrix row {row} has {columns} columns but {expected} were expected")]
    MatrixShape {
        /// Offending row.
        row: usize,
        /// Expected number of columns.
        expected: usize,
        /// Number of columns found.
        columns: usize,
    },
    /// A divergence matrix entry violated symmetry, sign, or zero diagonal.
    #[error("divergence matrix entry ({row}, {column}) = {value} is invalid")]
    InvalidMatrixEntry {
        /// Row of the entry.
        row: usize,
        /// Column of the entry.
        column: usize,
        /// The offending value.
        value: f64,
    },
    /// Divergence matrix was built for a different number of classes.
    #[error("divergence matrix covers {matrix} classes but {class_count} were requested")]
    ClassCountMismatch {
        /// Classes covered by the matrix.
        matrix: usize,
        /// Classes requested by the caller.
        class_count: usize,
    },
    /// Two-sample estimation needs at least two points per sample.
    #[error("sample `{sample}` has {available} points but at least {required} are required")]
    InsufficientSamples {
        /// Which sample was too small.
        sample: &'static str,
        /// Minimum number of points required.
        required: usize,
        /// Number of points supplied.
        available: usize,
    },
    /// Fewer than two classes were requested.
    #[error("at least two classes are required (got {got})")]
    InvalidClassCount {
        /// The rejected class count.
        got: usize,
    },
    /// No clusters were supplied to the alpha-hat computation.
    #[error("at least one cluster is required")]
    EmptyClusterSet,
    /// Per-cluster BER and size vectors had different lengths.
    #[error("{rates} BER estimates were given for {sizes} cluster sizes")]
    ClusterLengthMismatch {
        /// Number of BER estimates.
        rates: usize,
        /// Number of cluster sizes.
        sizes: usize,
    },
    /// All cluster sizes were zero.
    #[error("cluster sizes sum to zero")]
    ZeroTotalSize,
    /// A per-cluster BER estimate was NaN or infinite.
    #[error("BER estimate for cluster {cluster} is not finite ({value})")]
    NonFiniteRate {
        /// Position of the cluster.
        cluster: usize,
        /// The offending value.
        value: f64,
    },
    /// A weighting hyperparameter was NaN or infinite.
    #[error("parameter `{name}` must be finite (got {value})")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A pairwise distance overflowed to infinity.
    #[error("distance between points {left} and {right} is not finite")]
    NonFiniteDistance {
        /// First point index.
        left: usize,
        /// Second point index.
        right: usize,
    },
    /// A final statistic was not finite.
    #[error("computed {quantity} is not finite ({value})")]
    NonFiniteStatistic {
        /// Name of the statistic.
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`HpdivError`] variants.
    enum HpdivErrorCode for HpdivError {
        /// A point set was constructed from no rows.
        EmptyPointSet => EmptyPointSet => "HPDIV_EMPTY_POINT_SET", InvalidInput,
        /// Points must have at least one coordinate.
        ZeroDimension => ZeroDimension => "HPDIV_ZERO_DIMENSION", InvalidInput,
        /// A row's dimension differed from the first row's.
        RaggedRow => RaggedRow { .. } => "HPDIV_RAGGED_ROW", InvalidInput,
        /// A flat buffer did not divide evenly into rows.
        BufferShape => BufferShape { .. } => "HPDIV_BUFFER_SHAPE", InvalidInput,
        /// A coordinate was NaN or infinite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "HPDIV_NON_FINITE_COORDINATE", InvalidInput,
        /// A point collection failed to yield an in-bounds point.
        MissingPoint => MissingPoint { .. } => "HPDIV_MISSING_POINT", InvalidInput,
        /// Two point collections did not share a dimension.
        DimensionMismatch => DimensionMismatch { .. } => "HPDIV_DIMENSION_MISMATCH", InvalidInput,
        /// A graph was requested over too few points.
        TooFewPoints => TooFewPoints { .. } => "HPDIV_TOO_FEW_POINTS", InvalidInput,
        /// k-NN mode was requested with `k == 0`.
        ZeroNeighbours => ZeroNeighbours => "HPDIV_ZERO_NEIGHBOURS", InvalidInput,
        /// k-NN mode was requested with `k >= N`.
        TooManyNeighbours => TooManyNeighbours { .. } => "HPDIV_TOO_MANY_NEIGHBOURS", InvalidInput,
        /// Label vector length differed from the number of points.
        LabelCountMismatch => LabelCountMismatch { .. } => "HPDIV_LABEL_COUNT_MISMATCH", InvalidInput,
        /// A label was outside `[0, class_count)`.
        LabelOutOfRange => LabelOutOfRange { .. } => "HPDIV_LABEL_OUT_OF_RANGE", InvalidInput,
        /// An edge referenced a node outside the labelled set.
        EdgeOutOfRange => EdgeOutOfRange { .. } => "HPDIV_EDGE_OUT_OF_RANGE", InvalidInput,
        /// Membership array length differed from the number of points.
        MembershipLengthMismatch => MembershipLengthMismatch { .. } => "HPDIV_MEMBERSHIP_LENGTH_MISMATCH", InvalidInput,
        /// A divergence matrix had the wrong shape.
        MatrixShape => MatrixShape { .. } => "HPDIV_MATRIX_SHAPE", InvalidInput,
        /// A divergence matrix entry was invalid.
        InvalidMatrixEntry => InvalidMatrixEntry { .. } => "HPDIV_INVALID_MATRIX_ENTRY", InvalidInput,
        /// Divergence matrix was built for a different number of classes.
        ClassCountMismatch => ClassCountMismatch { .. } => "HPDIV_CLASS_COUNT_MISMATCH", InvalidInput,
        /// Two-sample estimation needs at least two points per sample.
        InsufficientSamples => InsufficientSamples { .. } => "HPDIV_INSUFFICIENT_SAMPLES", InsufficientSamples,
        /// Fewer than two classes were requested.
        InvalidClassCount => InvalidClassCount { .. } => "HPDIV_INVALID_CLASS_COUNT", InvalidClassCount,
        /// No clusters were supplied.
        EmptyClusterSet => EmptyClusterSet => "HPDIV_EMPTY_CLUSTER_SET", InvalidInput,
        /// Per-cluster vectors had different lengths.
        ClusterLengthMismatch => ClusterLengthMismatch { .. } => "HPDIV_CLUSTER_LENGTH_MISMATCH", InvalidInput,
        /// All cluster sizes were zero.
        ZeroTotalSize => ZeroTotalSize => "HPDIV_ZERO_TOTAL_SIZE", InvalidInput,
        /// A per-cluster BER estimate was NaN or infinite.
        NonFiniteRate => NonFiniteRate { .. } => "HPDIV_NON_FINITE_RATE", InvalidInput,
        /// A weighting hyperparameter was NaN or infinite.
        NonFiniteParameter => NonFiniteParameter { .. } => "HPDIV_NON_FINITE_PARAMETER", InvalidInput,
        /// A pairwise distance overflowed to infinity.
        NonFiniteDistance => NonFiniteDistance { .. } => "HPDIV_NON_FINITE_DISTANCE", NumericDegenerate,
        /// A final statistic was not finite.
        NonFiniteStatistic => NonFiniteStatistic { .. } => "HPDIV_NON_FINITE_STATISTIC", NumericDegenerate,
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HpdivError>;
