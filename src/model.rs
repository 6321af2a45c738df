use crate::distance::squared_euclidean_distance;
#[cfg(not(feature = "parallel"))]
use crate::silhouette::silhouette_samples as calc_silhouette_samples;
#[cfg(feature = "parallel")]
use crate::silhouette::silhouette_samples_par as calc_silhouette_samples;
use crate::{silhouette, EvaluatorError};
use ndarray::{Array1, Array2};
use std::sync::OnceLock;

/// A k-means model fitted for one candidate number of clusters, together with the
/// goodness-of-fit values derived from it. Derived values are computed on first use
/// and cached for the lifetime of the model.
#[derive(Debug, Clone)]
pub struct FittedModel<F> {
    k: usize,
    labels: Array1<usize>,
    centroids: Array2<F>,
    inertia: F,
    silhouette_score: OnceLock<F>,
    silhouette_samples: OnceLock<Array1<F>>,
}

impl<F: linfa::Float> FittedModel<F> {
    pub(crate) fn new(k: usize, labels: Array1<usize>, centroids: Array2<F>, data: &Array2<F>) -> Self {
        let inertia = calc_inertia(data, &labels, &centroids);
        FittedModel {
            k,
            labels,
            centroids,
            inertia,
            silhouette_score: OnceLock::new(),
            silhouette_samples: OnceLock::new(),
        }
    }

    /// The number of clusters the model was fitted with.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The cluster label of each sample, in the order of the input data.
    pub fn labels(&self) -> &Array1<usize> {
        &self.labels
    }

    /// The fitted cluster centroids, one row per cluster.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// The within-cluster sum of squared errors: the sum over all samples of the squared
    /// Euclidean distance to the centroid of their cluster.
    pub fn inertia(&self) -> F {
        self.inertia
    }

    /// The number of samples in each cluster, indexed by label.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        silhouette::cluster_sizes(&self.labels, self.k)
    }

    pub(crate) fn silhouette_score(&self, data: &Array2<F>) -> Result<F, EvaluatorError> {
        if let Some(score) = self.silhouette_score.get() {
            return Ok(*score);
        }
        let score = silhouette::silhouette_score(self.silhouette_samples(data), self.k)?;
        Ok(*self.silhouette_score.get_or_init(|| score))
    }

    pub(crate) fn silhouette_samples(&self, data: &Array2<F>) -> &Array1<F> {
        self.silhouette_samples
            .get_or_init(|| calc_silhouette_samples(data, &self.labels, self.k))
    }
}

fn calc_inertia<F: linfa::Float>(data: &Array2<F>, labels: &Array1<usize>, centroids: &Array2<F>) -> F {
    data.rows()
        .into_iter()
        .zip(labels.iter())
        .map(|(point, &label)| squared_euclidean_distance(point, centroids.row(label)))
        .fold(F::zero(), std::ops::Add::add)
}
