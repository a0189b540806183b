use thiserror::Error;

/// Error raised by a [`KMeansStrategy`](crate::KMeansStrategy) implementation.
pub type StrategyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while running a k-means calculation.
#[derive(Debug, Error)]
pub enum KMeansError {
    /// The combination of input data and [`KMeansConfig`](crate::KMeansConfig) can not be clustered.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The distance or centroid strategy failed. The original error is kept as source.
    #[error("clustering strategy failed: {0}")]
    Strategy(#[source] StrategyError),
    /// The distance strategy produced NaN while assigning a point.
    #[error("distance between point {point} and the centroid of cluster {cluster} is NaN")]
    NanDistance { point: usize, cluster: usize },
    /// The distance between a cluster's previous and its recalculated centroid is NaN.
    #[error("centroid shift of cluster {cluster} is NaN")]
    NanCentroidShift { cluster: usize },
    /// A cluster lost all of its members, while [`EmptyClusterPolicy::Fail`](crate::EmptyClusterPolicy::Fail) was configured.
    #[error("cluster {cluster} has no members after assignment in iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },
}

impl KMeansError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        KMeansError::InvalidConfiguration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, KMeansError>;
