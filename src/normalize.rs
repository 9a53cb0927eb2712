use crate::dataset::Dataset;
use crate::error::KMeansError;
use ndarray::{Array1, Axis, Zip};

/// What to do with a feature column whose standard deviation is zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroVariance {
    /// Fail with [`KMeansError::DegenerateFeature`]
    #[default]
    Fail,
    /// Map every value of the column to 0.0
    Zero,
}

/// Per-feature z-score standardization: `(x - mean) / std`, using the
/// population standard deviation.
#[derive(Debug, Clone)]
pub struct ZScore {
    means: Array1<f64>,
    std_devs: Array1<f64>,
    zero_variance: ZeroVariance,
}

impl ZScore {
    /// Compute column means and population standard deviations of `data`.
    pub fn fit(data: &Dataset) -> Self {
        let features = data.features();
        // Dataset guarantees at least one row, so the mean always exists.
        let means = features
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(data.n_features()));
        let std_devs = features.std_axis(Axis(0), 0.0);

        Self {
            means,
            std_devs,
            zero_variance: ZeroVariance::default(),
        }
    }

    /// Set the zero-variance column policy
    pub fn with_zero_variance(mut self, policy: ZeroVariance) -> Self {
        self.zero_variance = policy;
        self
    }

    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    pub fn std_devs(&self) -> &Array1<f64> {
        &self.std_devs
    }

    /// Standardize `data` with the fitted statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` has a different number of features than the fitted data
    /// - A fitted mean or standard deviation is NaN or infinite
    /// - A column has zero standard deviation under [`ZeroVariance::Fail`]
    pub fn transform(&self, data: &Dataset) -> Result<Dataset, KMeansError> {
        if data.n_features() != self.means.len() {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.means.len(),
                data.n_features()
            )));
        }

        if let Some(column) = Zip::from(&self.means)
            .and(&self.std_devs)
            .map_collect(|mean, std| mean.is_finite() && std.is_finite())
            .iter()
            .position(|&finite| !finite)
        {
            return Err(KMeansError::NonFiniteStatistics { column });
        }

        if self.zero_variance == ZeroVariance::Fail {
            if let Some(column) = self.std_devs.iter().position(|&s| s == 0.0) {
                return Err(KMeansError::DegenerateFeature { column });
            }
        }

        let mut features = data.features().to_owned();
        for mut row in features.rows_mut() {
            Zip::from(&mut row)
                .and(&self.means)
                .and(&self.std_devs)
                .for_each(|x, &mean, &std| {
                    *x = if std == 0.0 { 0.0 } else { (*x - mean) / std };
                });
        }

        data.with_features(features)
    }
}

/// Fit and apply a z-score transform, failing on zero-variance columns.
pub fn normalize(data: &Dataset) -> Result<Dataset, KMeansError> {
    ZScore::fit(data).transform(data)
}
