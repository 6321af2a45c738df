//! Calculate and plot evaluation metrics for k-means clustering over a range of different k
//! values, in order to help select the ideal number of clusters. Generic over floating point
//! numeric types.
//!
//! One k-means model is fitted for every candidate k when a [`KMeansEvaluator`] is created.
//! The models are cached, and every metric and chart is derived from them without refitting:
//!  1. The within-cluster sum of squared errors ("WSS", or inertia) of each model, whose
//!     "elbow" suggests the point of diminishing returns of adding clusters;
//!  2. The average silhouette score of each model, where higher is better; and
//!  3. The silhouette coefficient of every sample, which shows how well each cluster is
//!     separated from its neighbours.
//!
//! The clustering itself is performed by `linfa-clustering`. Charts are laid out as a
//! [`Chart`] and serialized to SVG.
//!
//! # Examples
//! ```
//!use kmeanseval::{make_blobs, BlobsConfig, ChartStyle, EvaluatorParams, KMeansEvaluator, Metric};
//!
//!let blobs = BlobsConfig { n_samples: 60, centers: 3, cluster_std: 0.1, seed: 3, ..BlobsConfig::default() };
//!let (data, _) = make_blobs(&blobs);
//!let params = EvaluatorParams::builder().k_range(2..6).seed(42).build();
//!let evaluator = KMeansEvaluator::fit(data, params).unwrap();
//!
//!let wss = evaluator.get_metrics(Metric::Wss).unwrap();
//!assert_eq!(4, wss.len());
//!
//!let elbow = evaluator.plot_elbow(ChartStyle::metric_default());
//!assert!(elbow.to_svg().contains("Within-cluster-sum of squared errors"));
//! ```
//!
//! # References
//! * [Rousseeuw, P.J. Silhouettes: a graphical aid to the interpretation and validation of cluster analysis.](https://doi.org/10.1016/0377-0427(87)90125-7)
//! * [Selecting the number of clusters with silhouette analysis on KMeans clustering](https://scikit-learn.org/stable/auto_examples/cluster/plot_kmeans_silhouette_analysis.html)

pub use crate::chart::{Axis, Chart, ChartStyle, Element};
pub use crate::colormap::{nipy_spectral, Rgb};
pub use crate::error::EvaluatorError;
pub use crate::evaluator::{KMeansEvaluator, Metric, MetricValue};
pub use crate::hyper_parameters::{EvaluatorParams, EvaluatorParamsBuilder};
pub use crate::model::FittedModel;
pub use crate::synthetic::{make_blobs, BlobsConfig};

mod chart;
mod colormap;
mod distance;
mod error;
mod evaluator;
mod fitting;
mod hyper_parameters;
mod model;
mod plots;
mod silhouette;
mod synthetic;
mod validation;
