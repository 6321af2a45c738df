#[cfg(feature = "parallel")]
use crate::fitting::parallel::ModelFitterPar;
#[cfg(feature = "serial")]
use crate::fitting::serial::ModelFitter;
use crate::validation::{rows_to_array, DataValidator};
use crate::{EvaluatorError, EvaluatorParams, FittedModel};
use ndarray::{Array1, Array2};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

/// The goodness-of-fit metrics that can be requested for each k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Within-cluster sum of squared errors (the model inertia).
    Wss,
    /// The mean silhouette coefficient over all samples.
    SilhouetteScore,
    /// The silhouette coefficient of every sample.
    SilhouetteSample,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Wss => "wss",
            Metric::SilhouetteScore => "silhouette_score",
            Metric::SilhouetteSample => "silhouette_sample",
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Metric {
    type Err = EvaluatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wss" => Ok(Metric::Wss),
            "silhouette_score" => Ok(Metric::SilhouetteScore),
            "silhouette_sample" => Ok(Metric::SilhouetteSample),
            other => Err(EvaluatorError::UnknownMetric(other.to_string())),
        }
    }
}

/// The value of a metric for one k: a single number, or one number per sample.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue<F> {
    Scalar(F),
    Samples(Array1<F>),
}

impl<F: Copy> MetricValue<F> {
    /// The scalar value, or `None` for per-sample values.
    pub fn as_scalar(&self) -> Option<F> {
        match self {
            MetricValue::Scalar(value) => Some(*value),
            MetricValue::Samples(_) => None,
        }
    }

    /// The per-sample values, or `None` for a scalar.
    pub fn as_samples(&self) -> Option<&Array1<F>> {
        match self {
            MetricValue::Scalar(_) => None,
            MetricValue::Samples(samples) => Some(samples),
        }
    }
}

/// Fits one k-means model for every candidate number of clusters k and evaluates them,
/// to help select the ideal number of clusters. Generic over floating point numeric types.
///
/// Models are fitted once, when the evaluator is created, and every metric and chart is
/// derived from those cached models without refitting.
#[derive(Debug, Clone)]
pub struct KMeansEvaluator<F> {
    data: Array2<F>,
    params: EvaluatorParams,
    seed: u64,
    models: BTreeMap<usize, FittedModel<F>>,
}

impl<F: linfa::Float> KMeansEvaluator<F> {
    /// Fits a k-means model for every k in the configured range.
    ///
    /// # Parameters
    /// * `data` - the samples to cluster, one row per sample. Must be non-empty, contain
    ///            only finite values, and have more samples than the largest k.
    /// * `params` - the parameter configuration.
    ///
    /// # Returns
    /// * A result that, if successful, contains the evaluator with one fitted model per k.
    ///
    /// # Examples
    /// ```
    ///use kmeanseval::{EvaluatorParams, KMeansEvaluator};
    ///use ndarray::array;
    ///
    ///let data = array![
    ///    [1.0, 1.1], [1.2, 0.9], [0.9, 1.0],
    ///    [5.0, 5.1], [5.2, 4.9], [4.9, 5.0],
    ///    [9.0, 1.0], [9.1, 1.2], [8.9, 0.9],
    ///];
    ///let params = EvaluatorParams::builder().k_range(2..5).seed(7).build();
    ///let evaluator = KMeansEvaluator::fit(data, params).unwrap();
    ///assert_eq!(3, evaluator.n_models());
    /// ```
    #[cfg(feature = "serial")]
    pub fn fit(data: Array2<F>, params: EvaluatorParams) -> Result<Self, EvaluatorError> {
        DataValidator::new(&data, &params).validate_input_data()?;
        let seed = params.seed.unwrap_or_else(rand::random);
        let models = ModelFitter::new(&data, &params, seed).fit_models()?;
        Ok(Self::from_models(data, params, seed, models))
    }

    /// Fits a k-means model for every k in the configured range, fitting the models in
    /// parallel. For the same seed, the fitted models are identical to those of
    /// [`KMeansEvaluator::fit`].
    #[cfg(feature = "parallel")]
    pub fn fit_par(data: Array2<F>, params: EvaluatorParams) -> Result<Self, EvaluatorError> {
        DataValidator::new(&data, &params).validate_input_data()?;
        let seed = params.seed.unwrap_or_else(rand::random);
        let models = ModelFitterPar::new(&data, &params, seed).fit_models()?;
        Ok(Self::from_models(data, params, seed, models))
    }

    /// Same as [`KMeansEvaluator::fit`], for data given as a collection of row vectors.
    /// An error is returned if the rows have mismatched dimensions.
    #[cfg(feature = "serial")]
    pub fn from_rows(rows: &[Vec<F>], params: EvaluatorParams) -> Result<Self, EvaluatorError> {
        Self::fit(rows_to_array(rows)?, params)
    }

    /// Same as [`KMeansEvaluator::fit_par`], for data given as a collection of row vectors.
    #[cfg(feature = "parallel")]
    pub fn from_rows_par(rows: &[Vec<F>], params: EvaluatorParams) -> Result<Self, EvaluatorError> {
        Self::fit_par(rows_to_array(rows)?, params)
    }

    fn from_models(
        data: Array2<F>,
        params: EvaluatorParams,
        seed: u64,
        models: BTreeMap<usize, FittedModel<F>>,
    ) -> Self {
        tracing::info!(
            n_models = models.len(),
            n_samples = data.nrows(),
            seed,
            "fitted k-means models for k = {:?}",
            params.k_range
        );
        KMeansEvaluator { data, params, seed, models }
    }

    /// The number of fitted models, one per k.
    pub fn n_models(&self) -> usize {
        self.models.len()
    }

    pub fn k_range(&self) -> Range<usize> {
        self.params.k_range.clone()
    }

    /// The evaluated values of k, in ascending order.
    pub fn k_values(&self) -> Vec<usize> {
        self.models.keys().copied().collect()
    }

    pub fn data(&self) -> &Array2<F> {
        &self.data
    }

    pub fn params(&self) -> &EvaluatorParams {
        &self.params
    }

    /// The seed the models were fitted with; drawn at random if none was configured.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The model fitted with `k` clusters, if k is in the evaluated range.
    pub fn model(&self, k: usize) -> Option<&FittedModel<F>> {
        self.models.get(&k)
    }

    /// All fitted models, in ascending order of k.
    pub fn models(&self) -> impl Iterator<Item = &FittedModel<F>> {
        self.models.values()
    }

    /// Calculates the requested metric for every k, in ascending order of k.
    ///
    /// # Returns
    /// * One value per k: scalars for [`Metric::Wss`] and [`Metric::SilhouetteScore`],
    ///   per-sample arrays for [`Metric::SilhouetteSample`].
    pub fn get_metrics(&self, metric: Metric) -> Result<Vec<MetricValue<F>>, EvaluatorError> {
        match metric {
            Metric::Wss => Ok(self.wss().into_iter().map(MetricValue::Scalar).collect()),
            Metric::SilhouetteScore => Ok(self
                .silhouette_scores()?
                .into_iter()
                .map(MetricValue::Scalar)
                .collect()),
            Metric::SilhouetteSample => Ok(self
                .silhouette_samples()
                .into_iter()
                .map(MetricValue::Samples)
                .collect()),
        }
    }

    /// Calculates a metric given by name: `"wss"`, `"silhouette_score"` or
    /// `"silhouette_sample"`. Any other name falls back to `"wss"` with a warning.
    pub fn get_metrics_by_name(&self, name: &str) -> Result<Vec<MetricValue<F>>, EvaluatorError> {
        let metric = name.parse().unwrap_or_else(|_| {
            tracing::warn!("invalid metric '{name}' supplied, defaulting to wss");
            Metric::Wss
        });
        self.get_metrics(metric)
    }

    /// The within-cluster sum of squared errors of every model.
    pub fn wss(&self) -> Vec<F> {
        self.models.values().map(FittedModel::inertia).collect()
    }

    /// The average silhouette score of every model.
    pub fn silhouette_scores(&self) -> Result<Vec<F>, EvaluatorError> {
        self.models
            .values()
            .map(|model| model.silhouette_score(&self.data))
            .collect()
    }

    /// The per-sample silhouette coefficients of every model.
    pub fn silhouette_samples(&self) -> Vec<Array1<F>> {
        self.models
            .values()
            .map(|model| model.silhouette_samples(&self.data).clone())
            .collect()
    }
}
