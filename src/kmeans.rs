use crate::algorithm::{kmeans_from_centroids, kmeans_lloyd, ClusterResult};
use crate::config::KMeansConfig;
use crate::dataset::Dataset;
use crate::error::KMeansError;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// K-means clustering engine (Lloyd's algorithm).
///
/// Each engine owns its random source, used to draw initial centroids, and
/// keeps the result of its latest run. Prefer a fresh engine per run; a new
/// `execute` call replaces the previous result.
///
/// # Example
///
/// ```
/// use iris_kmeans::{Dataset, KMeans, KMeansConfig, Sample};
///
/// let data = Dataset::from_samples(vec![
///     Sample::new(vec![0.0, 0.0], "a"),
///     Sample::new(vec![0.1, 0.0], "a"),
///     Sample::new(vec![9.0, 9.0], "b"),
/// ])
/// .unwrap();
///
/// let mut kmeans = KMeans::new(KMeansConfig::new(42));
/// let result = kmeans.execute(&data, 1).unwrap();
/// assert_eq!(result.clusters[0].len(), 3);
/// assert!(!kmeans.is_homogeneous().unwrap());
/// ```
pub struct KMeans<R = ChaCha8Rng> {
    /// Model configuration
    config: KMeansConfig,

    /// Source for initial centroid draws
    rng: R,

    /// Latest run (None if not yet executed)
    result: Option<ClusterResult>,
}

impl KMeans<ChaCha8Rng> {
    /// Create an engine whose random source is seeded from `config.seed`.
    pub fn new(config: KMeansConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> KMeans<R> {
    /// Create an engine drawing initial centroids from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: KMeansConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            result: None,
        }
    }

    /// Cluster `data` into `k` groups.
    ///
    /// The previous result is discarded first, so after a failed call
    /// [`is_homogeneous`](Self::is_homogeneous) returns `NotFitted`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `k` is 0
    /// - The configuration is unusable (`max_iters` is 0)
    pub fn execute(&mut self, data: &Dataset, k: usize) -> Result<&ClusterResult, KMeansError> {
        self.result = None;
        let result = kmeans_lloyd(data, k, &self.config, &mut self.rng)?;
        Ok(self.result.insert(result))
    }

    /// Cluster `data` starting from caller-provided centroids, one row per
    /// cluster. No random draws are made. Like [`execute`](Self::execute),
    /// the previous result is discarded first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `centroids` has no rows
    /// - `centroids` has a different number of columns than `data` has features
    /// - `centroids` holds a NaN, infinite or oversized value
    pub fn execute_from(
        &mut self,
        data: &Dataset,
        centroids: Array2<f64>,
    ) -> Result<&ClusterResult, KMeansError> {
        self.result = None;
        let result = kmeans_from_centroids(data, centroids, &self.config)?;
        Ok(self.result.insert(result))
    }

    /// Whether every cluster of the latest run holds a single label.
    ///
    /// Empty clusters count as homogeneous.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NotFitted`] before the first run.
    pub fn is_homogeneous(&self) -> Result<bool, KMeansError> {
        self.result
            .as_ref()
            .map(|r| r.homogeneous)
            .ok_or(KMeansError::NotFitted)
    }

    /// The latest run, if any
    pub fn result(&self) -> Option<&ClusterResult> {
        self.result.as_ref()
    }

    /// Take ownership of the latest run
    pub fn into_result(self) -> Option<ClusterResult> {
        self.result
    }

    /// Centroids of the latest run
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.result.as_ref().map(|r| &r.centroids)
    }

    /// Sample indices per cluster of the latest run
    pub fn clusters(&self) -> Option<&[Vec<usize>]> {
        self.result.as_ref().map(|r| r.clusters.as_slice())
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
