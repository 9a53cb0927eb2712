use crate::error::KMeansError;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Largest accepted feature magnitude. Squared differences of values within
/// this bound stay finite for any practical feature count.
pub const MAX_FEATURE_MAGNITUDE: f64 = 1e150;

fn is_valid_feature(value: f64) -> bool {
    value.is_finite() && value.abs() <= MAX_FEATURE_MAGNITUDE
}

/// First value of `matrix` that is non-finite or exceeds
/// [`MAX_FEATURE_MAGNITUDE`], reported as [`KMeansError::InvalidFeature`].
pub(crate) fn check_feature_values(matrix: &ArrayView2<f64>) -> Result<(), KMeansError> {
    for ((row, column), &value) in matrix.indexed_iter() {
        if !is_valid_feature(value) {
            return Err(KMeansError::InvalidFeature { row, column, value });
        }
    }
    Ok(())
}

/// A labeled feature vector, used to build a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: String,
}

impl Sample {
    pub fn new(features: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }
}

/// Borrowed view of one sample of a [`Dataset`]
#[derive(Debug, Clone, Copy)]
pub struct SampleView<'a> {
    pub features: ArrayView1<'a, f64>,
    pub label: &'a str,
}

/// Ordered, non-empty collection of labeled samples sharing one feature
/// dimensionality.
///
/// Features are stored row-major as an `(n_samples, n_features)` matrix with
/// a parallel label vector. A dataset is never mutated after construction;
/// normalization produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Vec<String>,
}

impl Dataset {
    /// Build a dataset from a feature matrix and one label per row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The matrix has no rows (`EmptyDataset`)
    /// - The matrix has no columns or the label count differs from the row count
    /// - A value is NaN, infinite, or larger in magnitude than
    ///   [`MAX_FEATURE_MAGNITUDE`] (`InvalidFeature`)
    pub fn new(features: Array2<f64>, labels: Vec<String>) -> Result<Self, KMeansError> {
        if features.nrows() == 0 {
            return Err(KMeansError::EmptyDataset);
        }
        if features.ncols() == 0 {
            return Err(KMeansError::InvalidDimensions(
                "samples must have at least one feature".to_string(),
            ));
        }
        if labels.len() != features.nrows() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} labels, got {}",
                features.nrows(),
                labels.len()
            )));
        }
        check_feature_values(&features.view())?;

        Ok(Self { features, labels })
    }

    /// Build a dataset from owned samples, checking that all of them have the
    /// same number of features.
    pub fn from_samples<I>(samples: I) -> Result<Self, KMeansError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let samples: Vec<Sample> = samples.into_iter().collect();
        let first = samples.first().ok_or(KMeansError::EmptyDataset)?;
        let n_features = first.features.len();

        let mut values = Vec::with_capacity(samples.len() * n_features);
        let mut labels = Vec::with_capacity(samples.len());
        for (i, sample) in samples.into_iter().enumerate() {
            if sample.features.len() != n_features {
                return Err(KMeansError::InvalidDimensions(format!(
                    "Sample {} has {} features, expected {}",
                    i,
                    sample.features.len(),
                    n_features
                )));
            }
            values.extend(sample.features);
            labels.push(sample.label);
        }

        let features = Array2::from_shape_vec((labels.len(), n_features), values)
            .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))?;
        Self::new(features, labels)
    }

    /// Load a dataset from a comma-separated file.
    ///
    /// See [`Dataset::from_reader`] for the record format.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, KMeansError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            samples = dataset.len(),
            features = dataset.n_features(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse records of the form `f1,f2,...,fF,label`, one per line.
    ///
    /// Fields are trimmed and blank lines skipped. Every record must have the
    /// same field count as the first one. Features must parse to finite
    /// numbers no larger in magnitude than [`MAX_FEATURE_MAGNITUDE`], so
    /// `NaN` and `inf` are rejected. Any malformed record aborts the load; no
    /// partial dataset is returned.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, KMeansError> {
        let mut samples = Vec::new();
        let mut n_fields = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let record = line.trim();
            if record.is_empty() {
                continue;
            }

            let fields: Vec<&str> = record.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                return Err(KMeansError::DataFormat {
                    line: line_no,
                    message: "expected at least one feature followed by a label".to_string(),
                });
            }
            match n_fields {
                None => n_fields = Some(fields.len()),
                Some(expected) if expected != fields.len() => {
                    return Err(KMeansError::DataFormat {
                        line: line_no,
                        message: format!("expected {} fields, found {}", expected, fields.len()),
                    });
                }
                Some(_) => {}
            }

            let (label, feature_fields) = fields.split_last().ok_or(KMeansError::DataFormat {
                line: line_no,
                message: "empty record".to_string(),
            })?;
            if label.is_empty() {
                return Err(KMeansError::DataFormat {
                    line: line_no,
                    message: "missing label".to_string(),
                });
            }

            let features = feature_fields
                .iter()
                .enumerate()
                .map(|(col, field)| -> Result<f64, KMeansError> {
                    let value = field.parse::<f64>().map_err(|e| KMeansError::DataFormat {
                        line: line_no,
                        message: format!("feature {} ({:?}): {}", col, field, e),
                    })?;
                    if !is_valid_feature(value) {
                        return Err(KMeansError::DataFormat {
                            line: line_no,
                            message: format!(
                                "feature {} ({:?}) must be finite with magnitude at most {:e}",
                                col, field, MAX_FEATURE_MAGNITUDE
                            ),
                        });
                    }
                    Ok(value)
                })
                .collect::<Result<Vec<f64>, _>>()?;

            samples.push(Sample::new(features, *label));
        }

        Self::from_samples(samples)
    }

    /// Same labels, new feature matrix of identical shape.
    pub fn with_features(&self, features: Array2<f64>) -> Result<Self, KMeansError> {
        if features.dim() != self.features.dim() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected shape {:?}, got {:?}",
                self.features.dim(),
                features.dim()
            )));
        }
        Self::new(features, self.labels.clone())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }

    /// Number of features per sample
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The sample at `index`, or `None` when out of range
    pub fn sample(&self, index: usize) -> Option<SampleView<'_>> {
        let label = self.labels.get(index)?;
        Some(SampleView {
            features: self.features.row(index),
            label,
        })
    }

    /// Samples in dataset order
    pub fn iter(&self) -> impl Iterator<Item = SampleView<'_>> + '_ {
        self.features
            .axis_iter(Axis(0))
            .zip(self.labels.iter())
            .map(|(features, label)| SampleView { features, label })
    }

    /// Distinct labels, sorted
    pub fn classes(&self) -> Vec<&str> {
        let classes: BTreeSet<&str> = self.labels.iter().map(String::as_str).collect();
        classes.into_iter().collect()
    }
}
