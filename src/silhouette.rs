use crate::distance::euclidean_distance;
use crate::EvaluatorError;
use ndarray::{Array1, Array2, ArrayView1};
use num_traits::Float;

/// Computes the average silhouette coefficient of a labelling from its per-sample
/// coefficients, so members of singleton clusters count as 0.
pub(crate) fn silhouette_score<F: Float>(samples: &Array1<F>, k: usize) -> Result<F, EvaluatorError> {
    if samples.is_empty() {
        return Err(EvaluatorError::Silhouette { k, reason: String::from("no samples") });
    }
    let n_samples = F::from(samples.len()).unwrap_or_else(F::one);
    Ok(samples.sum() / n_samples)
}

/// Computes the silhouette coefficient of every sample.
///
/// For a sample `i`, `a` is its mean distance to the other members of its own cluster
/// and `b` is the smallest mean distance to the members of any other (non-empty)
/// cluster. The coefficient is `(b - a) / max(a, b)`, and 0 for members of singleton
/// clusters.
#[cfg_attr(feature = "parallel", allow(dead_code))]
pub(crate) fn silhouette_samples<F: Float>(
    data: &Array2<F>,
    labels: &Array1<usize>,
    n_clusters: usize,
) -> Array1<F> {
    let cluster_sizes = cluster_sizes(labels, n_clusters);
    data.rows()
        .into_iter()
        .zip(labels.iter())
        .map(|(point, &label)| sample_coefficient(point, label, data, labels, &cluster_sizes))
        .collect()
}

/// Computes the silhouette coefficient of every sample, with samples spread over the
/// rayon thread pool.
#[cfg(feature = "parallel")]
pub(crate) fn silhouette_samples_par<F: Float + Send + Sync>(
    data: &Array2<F>,
    labels: &Array1<usize>,
    n_clusters: usize,
) -> Array1<F> {
    use rayon::prelude::*;

    let cluster_sizes = cluster_sizes(labels, n_clusters);
    let coefficients: Vec<F> = (0..data.nrows())
        .into_par_iter()
        .map(|n| sample_coefficient(data.row(n), labels[n], data, labels, &cluster_sizes))
        .collect();
    Array1::from(coefficients)
}

pub(crate) fn cluster_sizes(labels: &Array1<usize>, n_clusters: usize) -> Vec<usize> {
    let n_clusters = labels.iter().map(|&label| label + 1).fold(n_clusters, usize::max);
    let mut sizes = vec![0; n_clusters];
    for &label in labels.iter() {
        sizes[label] += 1;
    }
    sizes
}

fn sample_coefficient<F: Float>(
    point: ArrayView1<F>,
    label: usize,
    data: &Array2<F>,
    labels: &Array1<usize>,
    cluster_sizes: &[usize],
) -> F {
    if cluster_sizes[label] <= 1 {
        return F::zero();
    }
    let mut dist_sums = vec![F::zero(); cluster_sizes.len()];
    for (other, &other_label) in data.rows().into_iter().zip(labels.iter()) {
        dist_sums[other_label] = dist_sums[other_label] + euclidean_distance(point, other);
    }

    // The distance of the point to itself is zero, so it only affects the divisor
    let a = dist_sums[label] / F::from(cluster_sizes[label] - 1).unwrap_or_else(F::one);
    let b = dist_sums
        .iter()
        .zip(cluster_sizes.iter())
        .enumerate()
        .filter(|&(cluster, (_, &size))| cluster != label && size > 0)
        .map(|(_, (&sum, &size))| sum / F::from(size).unwrap_or_else(F::one))
        .fold(F::infinity(), F::min);
    if b.is_infinite() {
        return F::zero();
    }

    let max_ab = a.max(b);
    if max_ab == F::zero() {
        F::zero()
    } else {
        (b - a) / max_ab
    }
}
