use thiserror::Error;

/// Possible errors that arise due to issues with the input data, the hyper parameters or the
/// underlying clustering library.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("The dataset provided is empty")]
    EmptyDataset,
    #[error("Input vectors have mismatched dimensions: {0}")]
    WrongDimension(String),
    #[error("Non finite coordinate: {0}")]
    NonFiniteCoordinate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("The range of k values to evaluate is empty")]
    EmptyKRange,
    #[error("k = {k} needs more than {k} samples, but the dataset has {n_samples}")]
    TooFewSamples { k: usize, n_samples: usize },
    #[error("Unknown metric '{0}', expected one of wss, silhouette_score, silhouette_sample")]
    UnknownMetric(String),
    #[error("K-means fit failed for k = {k}: {reason}")]
    Fit { k: usize, reason: String },
    #[error("Silhouette score failed for k = {k}: {reason}")]
    Silhouette { k: usize, reason: String },
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}
