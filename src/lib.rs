//! # iris-kmeans
//!
//! K-means clustering of labeled feature data, and a search for the smallest
//! number of clusters at which every cluster holds a single label.
//!
//! ## Features
//!
//! - **Lloyd's algorithm**: random initialization with replacement, squared
//!   Euclidean assignment with lowest-index tie-break, mean update, and
//!   tolerance-based convergence with an iteration cap
//! - **Injectable randomness**: engines own their random source; seeded
//!   `ChaCha8Rng` by default for reproducible runs
//! - **Homogeneity search**: linear search over k, bounded by the dataset size
//! - **z-score normalization** with an explicit zero-variance policy
//! - **ndarray compatible**: features and centroids are `Array2<f64>`
//!
//! ## Example
//!
//! ```rust
//! use iris_kmeans::{normalize, Dataset, KMeansError, MinimalKSearch, SearchConfig};
//!
//! let records = "5.1,3.5,1.4,0.2,Iris-setosa\n\
//!                4.9,3.0,1.4,0.2,Iris-setosa\n\
//!                7.0,3.2,4.7,1.4,Iris-versicolor\n\
//!                6.3,3.3,6.0,2.5,Iris-virginica\n";
//! let raw = Dataset::from_reader(records.as_bytes()).unwrap();
//! let normalized = normalize(&raw).unwrap();
//!
//! let mut search = MinimalKSearch::new(SearchConfig::default());
//! match search.compare(&raw, &normalized) {
//!     Ok(comparison) => {
//!         println!("raw: k = {}", comparison.raw.k);
//!         println!("normalized: k = {}", comparison.normalized.k);
//!         assert!(comparison.normalized.result.homogeneous);
//!     }
//!     // initialization is random, so a tiny dataset may never separate
//!     Err(KMeansError::SearchExhausted { max_k }) => assert_eq!(max_k, raw.len()),
//!     Err(e) => panic!("{}", e),
//! }
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use iris_kmeans::{Dataset, KMeans, KMeansConfig, Sample};
//!
//! let data = Dataset::from_samples(vec![
//!     Sample::new(vec![0.0], "low"),
//!     Sample::new(vec![10.0], "high"),
//! ])
//! .unwrap();
//!
//! let config = KMeansConfig {
//!     max_iters: 50,
//!     tol: 0.0, // stop only on bit-identical centroids
//!     seed: 42,
//! };
//!
//! let mut kmeans = KMeans::new(config);
//! let result = kmeans.execute(&data, 2).unwrap();
//! assert_eq!(result.centroids.nrows(), 2);
//! ```

mod algorithm;
mod config;
mod dataset;
mod distance;
mod error;
mod homogeneity;
mod kmeans;
mod normalize;
mod report;
mod search;

pub use algorithm::ClusterResult;
pub use config::{KMeansConfig, SearchConfig};
pub use dataset::{Dataset, Sample, SampleView, MAX_FEATURE_MAGNITUDE};
pub use distance::{assign_nearest, nearest_centroid, squared_euclidean};
pub use error::KMeansError;
pub use homogeneity::{cluster_is_homogeneous, is_homogeneous, mixed_clusters};
pub use kmeans::KMeans;
pub use normalize::{normalize, ZScore, ZeroVariance};
pub use report::RunReport;
pub use search::{Comparison, MinimalKSearch, SearchOutcome};
