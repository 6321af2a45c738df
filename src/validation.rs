use crate::{EvaluatorError, EvaluatorParams};
use ndarray::Array2;
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    data: &'a Array2<T>,
    params: &'a EvaluatorParams,
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a Array2<T>, params: &'a EvaluatorParams) -> Self {
        Self { data, params }
    }

    pub(crate) fn validate_input_data(&self) -> Result<(), EvaluatorError> {
        let (n_samples, n_dims) = self.data.dim();
        if n_samples == 0 {
            return Err(EvaluatorError::EmptyDataset);
        }
        if n_dims == 0 {
            return Err(EvaluatorError::WrongDimension(String::from(
                "data points must have at least one dimension",
            )));
        }
        for (n, datapoint) in self.data.rows().into_iter().enumerate() {
            if datapoint.iter().any(|element| !element.is_finite()) {
                return Err(EvaluatorError::NonFiniteCoordinate(format!(
                    "{n}th vector contains non-finite element(s)"
                )));
            }
        }
        self.validate_k_range(n_samples)
    }

    fn validate_k_range(&self, n_samples: usize) -> Result<(), EvaluatorError> {
        let k_range = &self.params.k_range;
        if k_range.is_empty() {
            return Err(EvaluatorError::EmptyKRange);
        }
        // Silhouette coefficients need 2 <= n_labels <= n_samples - 1
        let k_max = k_range.end - 1;
        if k_max >= n_samples {
            return Err(EvaluatorError::TooFewSamples { k: k_max, n_samples });
        }
        Ok(())
    }
}

/// Converts a collection of row vectors into a matrix, checking that every row has
/// the same dimensionality.
pub(crate) fn rows_to_array<T: Float>(rows: &[Vec<T>]) -> Result<Array2<T>, EvaluatorError> {
    if rows.is_empty() {
        return Err(EvaluatorError::EmptyDataset);
    }
    let dims_0th = rows[0].len();
    for (n, datapoint) in rows.iter().enumerate() {
        let dims_nth = datapoint.len();
        if dims_nth != dims_0th {
            return Err(EvaluatorError::WrongDimension(format!(
                "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
            )));
        }
    }
    let flat: Vec<T> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), dims_0th), flat)
        .map_err(|e| EvaluatorError::WrongDimension(e.to_string()))
}
