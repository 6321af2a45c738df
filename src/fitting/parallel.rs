#![cfg(feature = "parallel")]
use super::fit_model;
use crate::{EvaluatorError, EvaluatorParams, FittedModel};
use ndarray::Array2;
use rayon::prelude::*;
use std::collections::BTreeMap;

pub(crate) struct ModelFitterPar<'a, F> {
    data: &'a Array2<F>,
    params: &'a EvaluatorParams,
    seed: u64,
}

impl<'a, F: linfa::Float> ModelFitterPar<'a, F> {
    pub(crate) fn new(data: &'a Array2<F>, params: &'a EvaluatorParams, seed: u64) -> Self {
        Self { data, params, seed }
    }

    /// Every k gets its own generator seeded identically, so the fitted models do not
    /// depend on which thread fits them or in what order.
    pub(crate) fn fit_models(&self) -> Result<BTreeMap<usize, FittedModel<F>>, EvaluatorError> {
        self.params
            .k_range
            .clone()
            .into_par_iter()
            .map(|k| fit_model(self.data, k, self.params, self.seed).map(|model| (k, model)))
            .collect()
    }
}
