use super::fit_model;
use crate::{EvaluatorError, EvaluatorParams, FittedModel};
use ndarray::Array2;
use std::collections::BTreeMap;

pub(crate) struct ModelFitter<'a, F> {
    data: &'a Array2<F>,
    params: &'a EvaluatorParams,
    seed: u64,
}

impl<'a, F: linfa::Float> ModelFitter<'a, F> {
    pub(crate) fn new(data: &'a Array2<F>, params: &'a EvaluatorParams, seed: u64) -> Self {
        Self { data, params, seed }
    }

    pub(crate) fn fit_models(&self) -> Result<BTreeMap<usize, FittedModel<F>>, EvaluatorError> {
        let mut models = BTreeMap::new();
        for k in self.params.k_range.clone() {
            let model = fit_model(self.data, k, self.params, self.seed)?;
            models.insert(k, model);
        }
        Ok(models)
    }
}
