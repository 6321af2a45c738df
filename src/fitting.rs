use crate::{EvaluatorError, EvaluatorParams, FittedModel};
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;

#[cfg(feature = "parallel")]
pub(crate) mod parallel;
#[cfg(feature = "serial")]
pub(crate) mod serial;

/// Fits a single k-means model with `k` clusters. The clustering itself is delegated
/// to `linfa-clustering`; labels are assigned to the nearest fitted centroid.
pub(crate) fn fit_model<F: linfa::Float>(
    data: &Array2<F>,
    k: usize,
    params: &EvaluatorParams,
    seed: u64,
) -> Result<FittedModel<F>, EvaluatorError> {
    let rng = Isaac64Rng::seed_from_u64(seed);
    let dataset = DatasetBase::from(data.view());
    let model = KMeans::params_with_rng(k, rng)
        .n_runs(params.n_runs)
        .max_n_iterations(params.max_n_iterations)
        .tolerance(F::cast(params.tolerance))
        .fit(&dataset)
        .map_err(|e| EvaluatorError::Fit { k, reason: e.to_string() })?;

    let labels: Array1<usize> = model.predict(data);
    let centroids = model.centroids().to_owned();
    let fitted = FittedModel::new(k, labels, centroids, data);
    tracing::debug!(k, inertia = ?fitted.inertia(), "fitted k-means model");
    Ok(fitted)
}
