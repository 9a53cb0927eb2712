use crate::config::KMeansConfig;
use crate::dataset::{check_feature_values, Dataset, SampleView};
use crate::distance::{assign_nearest, max_centroid_shift};
use crate::error::KMeansError;
use crate::homogeneity::is_homogeneous;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Result of one K-means run
#[derive(Debug, Clone)]
pub struct ClusterResult {
    /// Final centroids, shape (k, n_features)
    pub centroids: Array2<f64>,

    /// Centroid index of every sample, in dataset order
    pub assignments: Array1<usize>,

    /// Sample indices per centroid index; clusters may be empty
    pub clusters: Vec<Vec<usize>>,

    /// Sum of squared distances from each sample to its assigned centroid
    pub inertia: f64,

    /// Inertia observed at each assignment pass
    pub inertia_trace: Vec<f64>,

    pub n_iterations: usize,

    /// False when the run stopped at `max_iters`
    pub converged: bool,

    /// Every cluster holds a single label
    pub homogeneous: bool,
}

impl ClusterResult {
    /// Number of clusters
    pub fn k(&self) -> usize {
        self.centroids.nrows()
    }

    /// Members of cluster `index`, in dataset order
    pub fn cluster_samples<'a>(
        &'a self,
        data: &'a Dataset,
        index: usize,
    ) -> impl Iterator<Item = SampleView<'a>> + 'a {
        self.clusters
            .get(index)
            .into_iter()
            .flatten()
            .filter_map(move |&i| data.sample(i))
    }
}

/// Run Lloyd's algorithm from randomly drawn initial centroids.
///
/// `k` initial centroids are copies of samples drawn uniformly with
/// replacement, so `k` may exceed the number of samples.
pub fn kmeans_lloyd<R: Rng + ?Sized>(
    data: &Dataset,
    k: usize,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<ClusterResult, KMeansError> {
    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    let centroids = initialize_centroids(&data.features(), k, rng);
    kmeans_from_centroids(data, centroids, config)
}

/// Run Lloyd's algorithm from the given initial centroids.
///
/// Every iteration assigns each sample to its nearest centroid, then moves
/// each non-empty cluster's centroid to the mean of its members. Empty
/// clusters keep their centroid. The run stops once the largest centroid
/// component change is within `config.tol`, or after `config.max_iters`
/// iterations.
pub fn kmeans_from_centroids(
    data: &Dataset,
    mut centroids: Array2<f64>,
    config: &KMeansConfig,
) -> Result<ClusterResult, KMeansError> {
    let n_samples = data.len();
    let n_features = data.n_features();
    let k = centroids.nrows();

    // Validate inputs
    if k == 0 {
        return Err(KMeansError::InvalidK(
            "at least one initial centroid is required".to_string(),
        ));
    }
    if centroids.ncols() != n_features {
        return Err(KMeansError::InvalidDimensions(format!(
            "Expected {} features, got {}",
            n_features,
            centroids.ncols()
        )));
    }
    check_feature_values(&centroids.view())?;
    if config.max_iters == 0 {
        return Err(KMeansError::InvalidConfig(
            "max_iters must be greater than 0".to_string(),
        ));
    }

    debug!(
        samples = n_samples,
        features = n_features,
        k,
        "starting k-means"
    );

    let features = data.features();
    let mut assignments = Array1::zeros(n_samples);
    let mut inertia_trace = Vec::new();
    let mut n_iterations = 0;
    let mut converged = false;

    for iteration in 0..config.max_iters {
        let iter_start = Instant::now();
        n_iterations = iteration + 1;

        let (labels, inertia) = assign_nearest(&features, &centroids.view());
        assignments = labels;
        inertia_trace.push(inertia);

        let (updated, empty_clusters) = update_centroids(&features, &assignments, &centroids);
        if !empty_clusters.is_empty() {
            trace!(?empty_clusters, "empty clusters keep their centroid");
        }

        let shift = max_centroid_shift(&centroids.view(), &updated.view());
        centroids = updated;

        debug!(
            iteration = iteration + 1,
            shift,
            inertia,
            elapsed_us = iter_start.elapsed().as_micros() as u64,
            "k-means iteration"
        );

        if config.tol >= 0.0 && shift <= config.tol {
            converged = true;
            break;
        }
    }

    if converged {
        info!(k, iterations = n_iterations, "k-means converged");
    } else {
        warn!(
            k,
            max_iters = config.max_iters,
            "k-means stopped before converging"
        );
    }

    let clusters = group_by_cluster(&assignments, k);
    let homogeneous = is_homogeneous(&clusters, data.labels());
    let inertia = inertia_trace.last().copied().unwrap_or_default();

    Ok(ClusterResult {
        centroids,
        assignments,
        clusters,
        inertia,
        inertia_trace,
        n_iterations,
        converged,
        homogeneous,
    })
}

/// Initialize centroids by drawing k data points uniformly with replacement
fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Array2<f64> {
    let n_samples = data.nrows();
    let selected: Vec<usize> = (0..k).map(|_| rng.gen_range(0..n_samples)).collect();
    trace!(?selected, "initial centroid samples");

    data.select(Axis(0), &selected)
}

/// Mean of each cluster's members; empty clusters keep their previous
/// centroid. Returns the new centroids and the indices of empty clusters.
fn update_centroids(
    data: &ArrayView2<f64>,
    labels: &Array1<usize>,
    centroids: &Array2<f64>,
) -> (Array2<f64>, Vec<usize>) {
    let k = centroids.nrows();
    let mut sums: Array2<f64> = Array2::zeros(centroids.raw_dim());
    let mut counts = vec![0usize; k];

    for (row, &label) in data.outer_iter().zip(labels.iter()) {
        let mut sum = sums.row_mut(label);
        sum += &row;
        counts[label] += 1;
    }

    let mut updated = centroids.clone();
    let mut empty_clusters = Vec::new();
    for (cluster_idx, &count) in counts.iter().enumerate() {
        if count > 0 {
            let mean = &sums.row(cluster_idx) / count as f64;
            updated.row_mut(cluster_idx).assign(&mean);
        } else {
            empty_clusters.push(cluster_idx);
        }
    }

    (updated, empty_clusters)
}

/// Partition sample indices by their assigned cluster
fn group_by_cluster(labels: &Array1<usize>, k: usize) -> Vec<Vec<usize>> {
    let mut clusters = vec![Vec::new(); k];
    for (sample_idx, &label) in labels.iter().enumerate() {
        clusters[label].push(sample_idx);
    }
    clusters
}
