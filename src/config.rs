/// Configuration for a single K-means run
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Upper bound on assign/update passes. Hitting it ends the run
    /// unconverged instead of looping forever.
    pub max_iters: usize,

    /// Convergence tolerance on the largest absolute centroid component change
    /// of one iteration. The run stops once the shift is `<= tol`; `0.0` only
    /// stops on bit-identical centroids. Set to a negative value to disable
    /// early stopping.
    pub tol: f64,

    /// Random seed for centroid initialization
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iters: 300,
            tol: 1e-9,
            seed: 0,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Configuration for the minimal-k search
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Settings for every engine run the search performs
    pub kmeans: KMeansConfig,

    /// Largest k to try. `None` bounds the search by the dataset size.
    pub max_k: Option<usize>,
}

impl SearchConfig {
    pub fn new(kmeans: KMeansConfig) -> Self {
        Self { kmeans, max_k: None }
    }

    /// Set the largest k to try
    pub fn with_max_k(mut self, max_k: usize) -> Self {
        self.max_k = Some(max_k);
        self
    }
}
