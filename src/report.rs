use crate::algorithm::ClusterResult;
use crate::dataset::Dataset;
use ndarray::ArrayView1;
use std::fmt;

/// Human-readable summary of one clustering run: minimal k, centroids and,
/// optionally, the cluster of every sample.
pub struct RunReport<'a> {
    /// Describes the feature space, e.g. "without normalization"
    pub title: &'a str,
    pub minimal_k: usize,
    pub data: &'a Dataset,
    pub result: &'a ClusterResult,
    pub show_assignments: bool,
}

impl<'a> RunReport<'a> {
    pub fn new(title: &'a str, minimal_k: usize, data: &'a Dataset, result: &'a ClusterResult) -> Self {
        Self {
            title,
            minimal_k,
            data,
            result,
            show_assignments: true,
        }
    }

    /// Set whether per-sample assignments are listed
    pub fn with_assignments(mut self, show: bool) -> Self {
        self.show_assignments = show;
        self
    }
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f, "Minimum clusters {}: {}", self.title, self.minimal_k)?;
        writeln!(
            f,
            "Final centroids {} (k = {}, {}, {} iterations{}, inertia {:.4}):",
            self.title,
            result.k(),
            if result.homogeneous { "homogeneous" } else { "mixed" },
            result.n_iterations,
            if result.converged { "" } else { ", not converged" },
            result.inertia
        )?;
        for (i, centroid) in result.centroids.outer_iter().enumerate() {
            writeln!(
                f,
                "Centroid {}: {} ({} samples)",
                i,
                Vector(centroid),
                result.clusters[i].len()
            )?;
        }

        if self.show_assignments {
            writeln!(f)?;
            writeln!(f, "Cluster assignments {}:", self.title)?;
            for cluster_idx in 0..result.clusters.len() {
                for sample in result.cluster_samples(self.data, cluster_idx) {
                    writeln!(
                        f,
                        "Sample {} ({}) -> Cluster {}",
                        Vector(sample.features),
                        sample.label,
                        cluster_idx
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Formats a feature vector as `[a, b, c]`
struct Vector<'a>(ArrayView1<'a, f64>);

impl fmt::Display for Vector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", x)?;
        }
        write!(f, "]")
    }
}
