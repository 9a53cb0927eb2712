use crate::algorithm::ClusterResult;
use crate::config::SearchConfig;
use crate::dataset::Dataset;
use crate::error::KMeansError;
use crate::homogeneity::mixed_clusters;
use crate::kmeans::KMeans;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Smallest homogeneous k found by a search, with the run that achieved it
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub k: usize,
    pub result: ClusterResult,
}

/// Minimal-k searches over the raw and the normalized version of a dataset
#[derive(Debug, Clone)]
pub struct Comparison {
    pub raw: SearchOutcome,
    pub normalized: SearchOutcome,
}

impl Comparison {
    /// The larger of the two minimal k values
    pub fn larger_k(&self) -> usize {
        self.raw.k.max(self.normalized.k)
    }
}

/// Linear search for the smallest k whose clustering is homogeneous.
///
/// Every k gets a fresh engine and a fresh random initialization, drawn from
/// the search's own random source.
pub struct MinimalKSearch<R = ChaCha8Rng> {
    config: SearchConfig,
    rng: R,
}

impl MinimalKSearch<ChaCha8Rng> {
    /// Create a search whose random source is seeded from `config.kmeans.seed`.
    pub fn new(config: SearchConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.kmeans.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> MinimalKSearch<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Try k = 1, 2, ... until a run is homogeneous.
    ///
    /// The search is bounded by `config.max_k`, or by the dataset size when
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `config.max_k` is 0
    /// - No k within the bound is homogeneous (`SearchExhausted`)
    /// - An engine run fails
    pub fn run(&mut self, data: &Dataset) -> Result<SearchOutcome, KMeansError> {
        let max_k = self.config.max_k.unwrap_or(data.len());
        if max_k == 0 {
            return Err(KMeansError::InvalidK(
                "max_k must be greater than 0".to_string(),
            ));
        }

        for k in 1..=max_k {
            let result = self.rerun(data, k)?;
            if result.homogeneous {
                info!(k, iterations = result.n_iterations, "found homogeneous clustering");
                return Ok(SearchOutcome { k, result });
            }

            debug!(
                k,
                mixed = mixed_clusters(&result.clusters, data.labels()).len(),
                "clustering is not homogeneous"
            );
        }

        Err(KMeansError::SearchExhausted { max_k })
    }

    /// One fresh run at `k`
    pub fn rerun(&mut self, data: &Dataset, k: usize) -> Result<ClusterResult, KMeansError> {
        let mut engine = KMeans::with_rng(self.config.kmeans.clone(), &mut self.rng);
        engine.execute(data, k)?;
        engine.into_result().ok_or(KMeansError::NotFitted)
    }

    /// Search the raw and the normalized dataset independently.
    pub fn compare(
        &mut self,
        raw: &Dataset,
        normalized: &Dataset,
    ) -> Result<Comparison, KMeansError> {
        let raw = self.run(raw)?;
        let normalized = self.run(normalized)?;
        Ok(Comparison { raw, normalized })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KMeansConfig;
    use crate::dataset::Sample;

    fn separated(per_class: usize) -> Dataset {
        let centers = [(0.0, 0.0, "a"), (20.0, 0.0, "b"), (0.0, 20.0, "c")];
        let samples = centers.iter().flat_map(|&(x, y, label)| {
            (0..per_class).map(move |i| Sample::new(vec![x + 0.1 * i as f64, y], label))
        });
        Dataset::from_samples(samples).unwrap()
    }

    #[test]
    fn test_single_class_needs_one_cluster() {
        let data = Dataset::from_samples(vec![
            Sample::new(vec![1.0], "a"),
            Sample::new(vec![5.0], "a"),
        ])
        .unwrap();

        let outcome = MinimalKSearch::new(SearchConfig::default()).run(&data).unwrap();
        assert_eq!(outcome.k, 1);
        assert!(outcome.result.homogeneous);
    }

    #[test]
    fn test_three_classes_need_at_least_three() {
        let data = separated(4);
        let outcome = MinimalKSearch::new(SearchConfig::new(KMeansConfig::new(5)))
            .run(&data)
            .unwrap();

        assert!(outcome.k >= 3);
        assert!(outcome.k <= data.len());
        assert_eq!(outcome.result.k(), outcome.k);
    }

    #[test]
    fn test_inseparable_data_exhausts() {
        // identical features, different labels: no k can separate them
        let data = Dataset::from_samples(vec![
            Sample::new(vec![1.0, 1.0], "a"),
            Sample::new(vec![1.0, 1.0], "b"),
            Sample::new(vec![1.0, 1.0], "c"),
        ])
        .unwrap();

        let err = MinimalKSearch::new(SearchConfig::default())
            .run(&data)
            .unwrap_err();
        assert!(matches!(err, KMeansError::SearchExhausted { max_k: 3 }));
    }

    #[test]
    fn test_max_k_bounds_search() {
        let data = separated(3);
        let config = SearchConfig::default().with_max_k(1);

        let err = MinimalKSearch::new(config).run(&data).unwrap_err();
        assert!(matches!(err, KMeansError::SearchExhausted { max_k: 1 }));

        let config = SearchConfig::default().with_max_k(0);
        let err = MinimalKSearch::new(config).run(&data).unwrap_err();
        assert!(matches!(err, KMeansError::InvalidK(_)));
    }

    #[test]
    fn test_compare_and_larger_k() {
        let data = separated(3);
        let mut search = MinimalKSearch::new(SearchConfig::default());

        let comparison = search.compare(&data, &data).unwrap();
        assert_eq!(
            comparison.larger_k(),
            comparison.raw.k.max(comparison.normalized.k)
        );

        let rerun = search.rerun(&data, comparison.larger_k()).unwrap();
        assert_eq!(rerun.k(), comparison.larger_k());
    }
}
