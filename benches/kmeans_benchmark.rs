use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iris_kmeans::{normalize, Dataset, KMeans, KMeansConfig, MinimalKSearch, SearchConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::time::Duration;

/// Iris-shaped data: 4 features, 3 labels, overlapping classes
fn labeled_data(n_samples: usize, n_features: usize) -> Dataset {
    let mut features = Array2::random((n_samples, n_features), Uniform::new(0.0f64, 1.0));
    let labels = (0..n_samples)
        .map(|i| {
            let class = i % 3;
            features[[i, 0]] += class as f64 * 0.8;
            format!("class-{}", class)
        })
        .collect();
    Dataset::new(features, labels).unwrap()
}

fn benchmark_kmeans_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let k = 3;
    let sample_sizes = [150, 1_500, 15_000];

    for n_samples in sample_sizes.iter() {
        group.throughput(Throughput::Elements(*n_samples as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_samples),
            n_samples,
            |b, &n_samples| {
                let data = labeled_data(n_samples, 4);
                let config = KMeansConfig::new(42);

                b.iter(|| {
                    let mut kmeans = KMeans::new(config.clone());
                    kmeans.execute(black_box(&data), k).unwrap();
                    kmeans
                });
            },
        );
    }
    group.finish();
}

fn benchmark_kmeans_varying_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_clusters");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let data = labeled_data(1_500, 4);
    let cluster_counts = [2, 8, 32];

    for k in cluster_counts.iter() {
        group.throughput(Throughput::Elements(*k as u64));
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            let config = KMeansConfig::new(42);

            b.iter(|| {
                let mut kmeans = KMeans::new(config.clone());
                kmeans.execute(black_box(&data), k).unwrap();
                kmeans
            });
        });
    }
    group.finish();
}

fn benchmark_minimal_k_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimal_k_search");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    let raw = labeled_data(150, 4);
    let normalized = normalize(&raw).unwrap();

    group.bench_function("150_samples_raw_vs_normalized", |b| {
        b.iter(|| {
            let mut search = MinimalKSearch::new(SearchConfig::new(KMeansConfig::new(42)));
            // overlapping classes may exhaust the search; both outcomes are timed
            black_box(search.compare(black_box(&raw), black_box(&normalized)))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_kmeans_varying_samples,
    benchmark_kmeans_varying_clusters,
    benchmark_minimal_k_search,
);

criterion_main!(benches);
