use thiserror::Error;

/// Error types for the iris-kmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// The engine configuration cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A dataset must hold at least one sample
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Malformed record in a delimited input file
    #[error("Malformed record on line {line}: {message}")]
    DataFormat { line: usize, message: String },

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dimension mismatch between data, labels or centroids
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// A feature value is NaN, infinite, or too large to square without overflow
    #[error("Invalid feature value {value} at row {row}, column {column}: must be finite with magnitude at most 1e150")]
    InvalidFeature { row: usize, column: usize, value: f64 },

    /// Fitted normalization statistics for a column are NaN or infinite
    #[error("Feature column {column} has a non-finite mean or standard deviation")]
    NonFiniteStatistics { column: usize },

    /// A feature column has zero variance and cannot be standardized
    #[error("Feature column {column} has zero standard deviation")]
    DegenerateFeature { column: usize },

    /// No k up to the bound produced homogeneous clusters
    #[error("No homogeneous clustering found for any k in 1..={max_k}")]
    SearchExhausted { max_k: usize },

    /// Engine has not been executed yet
    #[error("Engine has not been executed. Call execute() first.")]
    NotFitted,
}
