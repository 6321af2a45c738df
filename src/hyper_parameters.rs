use std::ops::Range;

// Defaults for parameters
const K_RANGE_DEFAULT: Range<usize> = 2..11;
const N_RUNS_DEFAULT: usize = 10;
const MAX_N_ITERATIONS_DEFAULT: u64 = 300;
const TOLERANCE_DEFAULT: f64 = 1e-4;

// Valid minimums/left bounds of parameters
const K_MINIMUM: usize = 2;
const N_RUNS_MINIMUM: usize = 1;
const MAX_N_ITERATIONS_MINIMUM: u64 = 1;

/// A wrapper around the parameters used when fitting the k-means models of a
/// [`KMeansEvaluator`](crate::KMeansEvaluator).
/// Only use if you want to tune the parameters. Otherwise use `EvaluatorParams::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorParams {
    pub(crate) k_range: Range<usize>,
    pub(crate) n_runs: usize,
    pub(crate) max_n_iterations: u64,
    pub(crate) tolerance: f64,
    pub(crate) seed: Option<u64>,
}

/// Builder object to set custom parameters.
#[derive(Debug, Clone, Default)]
pub struct EvaluatorParamsBuilder {
    k_range: Option<Range<usize>>,
    n_runs: Option<usize>,
    max_n_iterations: Option<u64>,
    tolerance: Option<f64>,
    seed: Option<u64>,
}

impl Default for EvaluatorParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EvaluatorParams {
    /// Enters the builder pattern, allowing custom parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn builder() -> EvaluatorParamsBuilder {
        EvaluatorParamsBuilder::default()
    }

    /// The half-open range of cluster counts that will be evaluated.
    pub fn k_range(&self) -> Range<usize> {
        self.k_range.clone()
    }

    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The random seed, if one was set explicitly.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl EvaluatorParamsBuilder {
    /// Sets the candidate cluster counts, a half-open range like `2..11`.
    /// One k-means model is fitted for each value in the range. The silhouette
    /// coefficient is undefined for a single cluster, so a start below 2 is raised to 2.
    /// Defaults to `2..11`.
    ///
    /// # Parameters
    /// * k_range - the range of k values
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn k_range(mut self, k_range: Range<usize>) -> EvaluatorParamsBuilder {
        let start = EvaluatorParamsBuilder::validate_input_left_bound(
            k_range.start, K_MINIMUM, "k_range.start");
        self.k_range = Some(start..k_range.end);
        self
    }

    /// Sets the number of times k-means is run with different centroid seeds for
    /// each k. The run with the lowest inertia is kept. Defaults to 10.
    ///
    /// # Parameters
    /// * n_runs - the number of runs per k
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn n_runs(mut self, n_runs: usize) -> EvaluatorParamsBuilder {
        let valid_n_runs = EvaluatorParamsBuilder::validate_input_left_bound(
            n_runs, N_RUNS_MINIMUM, "n_runs");
        self.n_runs = Some(valid_n_runs);
        self
    }

    /// Sets the maximum number of iterations of a single k-means run. Defaults to 300.
    ///
    /// # Parameters
    /// * max_n_iterations - the iteration cap
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> EvaluatorParamsBuilder {
        let valid_max_n_iterations = EvaluatorParamsBuilder::validate_input_left_bound(
            max_n_iterations, MAX_N_ITERATIONS_MINIMUM, "max_n_iterations");
        self.max_n_iterations = Some(valid_max_n_iterations);
        self
    }

    /// Sets the convergence tolerance of a k-means run. Non-positive or non-finite
    /// values are ignored in favour of the default of 1e-4.
    ///
    /// # Parameters
    /// * tolerance - the convergence tolerance
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn tolerance(mut self, tolerance: f64) -> EvaluatorParamsBuilder {
        if tolerance.is_finite() && tolerance > 0.0 {
            self.tolerance = Some(tolerance);
        } else {
            tracing::warn!(
                "tolerance ({tolerance}) must be positive and finite. Set to {TOLERANCE_DEFAULT}."
            );
            self.tolerance = Some(TOLERANCE_DEFAULT);
        }
        self
    }

    /// Sets the seed of the random number generator used to initialise centroids.
    /// The same seed is used for every k, making results reproducible. If no seed
    /// is set, one is drawn at random when the evaluator is fitted.
    ///
    /// # Parameters
    /// * seed - the random seed
    ///
    /// # Returns
    /// * the parameter configuration builder
    pub fn seed(mut self, seed: u64) -> EvaluatorParamsBuilder {
        self.seed = Some(seed);
        self
    }

    /// Finishes the building of the parameter configuration. A call to this method is
    /// required to exit the builder pattern and complete the construction of the parameters.
    ///
    /// # Returns
    /// * The completed parameter configuration.
    pub fn build(self) -> EvaluatorParams {
        EvaluatorParams {
            k_range: self.k_range.unwrap_or(K_RANGE_DEFAULT),
            n_runs: self.n_runs.unwrap_or(N_RUNS_DEFAULT),
            max_n_iterations: self.max_n_iterations.unwrap_or(MAX_N_ITERATIONS_DEFAULT),
            tolerance: self.tolerance.unwrap_or(TOLERANCE_DEFAULT),
            seed: self.seed,
        }
    }

    fn validate_input_left_bound<P>(input_param: P, left_bound: P, param: &str) -> P
    where
        P: PartialOrd + std::fmt::Display + Copy,
    {
        if input_param < left_bound {
            tracing::warn!(
                "{param} ({input_param}) cannot be lower than {left_bound}. Set to {left_bound}."
            );
            left_bound
        } else {
            input_param
        }
    }
}
