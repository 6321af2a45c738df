use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_isaac::Isaac64Rng;

/// Configuration of a set of isotropic Gaussian blobs, as generated by [`make_blobs`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlobsConfig {
    pub n_samples: usize,
    pub n_features: usize,
    pub centers: usize,
    pub cluster_std: f64,
    pub center_box: (f64, f64),
    pub seed: u64,
}

impl Default for BlobsConfig {
    fn default() -> Self {
        BlobsConfig {
            n_samples: 100,
            n_features: 2,
            centers: 3,
            cluster_std: 1.0,
            center_box: (-10.0, 10.0),
            seed: 0,
        }
    }
}

/// Generates isotropic Gaussian blobs for clustering.
///
/// Cluster centres are drawn uniformly from `center_box` in every dimension. Samples are
/// split as evenly as possible between the centres, with the first centres taking the
/// remainder, and are ordered by centre. With no centres there is nothing to draw
/// around, and the result has no samples.
///
/// # Returns
/// * The samples, one row per sample, and the index of the centre each was drawn around.
///
/// # Examples
/// ```
///use kmeanseval::{make_blobs, BlobsConfig};
///
///let config = BlobsConfig { n_samples: 10, centers: 3, ..BlobsConfig::default() };
///let (data, labels) = make_blobs(&config);
///assert_eq!((10, 2), data.dim());
///assert_eq!(vec![0, 0, 0, 0, 1, 1, 1, 2, 2, 2], labels.to_vec());
/// ```
pub fn make_blobs(config: &BlobsConfig) -> (Array2<f64>, Array1<usize>) {
    let mut rng = Isaac64Rng::seed_from_u64(config.seed);
    let (low, high) = config.center_box;
    let centers = Array2::from_shape_fn((config.centers, config.n_features), |_| {
        if high > low {
            rng.gen_range(low..high)
        } else {
            low
        }
    });

    let std = if config.cluster_std.is_finite() && config.cluster_std > 0.0 {
        config.cluster_std
    } else {
        0.0
    };
    let noise = Normal::new(0.0, std).ok();

    let n_samples = if config.centers == 0 { 0 } else { config.n_samples };
    let mut data = Array2::zeros((n_samples, config.n_features));
    let mut labels = Array1::zeros(n_samples);
    let n_centers = config.centers.max(1);
    let (per_center, remainder) = (n_samples / n_centers, n_samples % n_centers);
    let mut row = 0;
    for center in 0..config.centers {
        let n_center_samples = per_center + usize::from(center < remainder);
        for _ in 0..n_center_samples {
            for feature in 0..config.n_features {
                let offset = noise.as_ref().map_or(0.0, |normal| normal.sample(&mut rng));
                data[[row, feature]] = centers[[center, feature]] + offset;
            }
            labels[row] = center;
            row += 1;
        }
    }
    (data, labels)
}
