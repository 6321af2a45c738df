#![allow(dead_code)]
use kmeanseval::{
    make_blobs, BlobsConfig, ChartStyle, Element, EvaluatorError, EvaluatorParams,
    KMeansEvaluator, Metric, MetricValue, Rgb,
};
use ndarray::{array, Array2};

pub(crate) type FitFn = fn(Array2<f64>, EvaluatorParams) -> Result<KMeansEvaluator<f64>, EvaluatorError>;

pub(crate) const N_SAMPLES: usize = 200;
pub(crate) const N_CENTERS: usize = 5;

pub(crate) fn blobs() -> Array2<f64> {
    let config = BlobsConfig {
        n_samples: N_SAMPLES,
        n_features: 8,
        centers: N_CENTERS,
        cluster_std: 0.001,
        seed: 123,
        ..BlobsConfig::default()
    };
    make_blobs(&config).0
}

pub(crate) fn params() -> EvaluatorParams {
    EvaluatorParams::builder().k_range(2..8).seed(123).build()
}

pub(crate) fn test_instantiation(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    assert_eq!(6, evaluator.n_models());
    assert_eq!(vec![2, 3, 4, 5, 6, 7], evaluator.k_values());
    for k in 2..8 {
        let model = evaluator.model(k).unwrap();
        assert_eq!(k, model.k());
        assert_eq!(N_SAMPLES, model.labels().len());
        assert_eq!((k, 8), model.centroids().dim());
        assert_eq!(N_SAMPLES, model.cluster_sizes().iter().sum::<usize>());
    }
    assert!(evaluator.model(8).is_none());
    assert_eq!(123, evaluator.seed());
}

pub(crate) fn test_wss_matches_single_fits(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let wss = evaluator.wss();

    // Each k fitted on its own with the same seed gives the same model
    let single_fits: Vec<f64> = (2..8)
        .map(|k| {
            let params = EvaluatorParams::builder().k_range(k..k + 1).seed(123).build();
            fit(blobs(), params).unwrap().wss()[0]
        })
        .collect();
    let total: f64 = wss.iter().sum();
    let single_total: f64 = single_fits.iter().sum();
    assert!((total - single_total).abs() <= 1e-9 * total.max(1.0));
}

pub(crate) fn test_wss_elbow(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let wss = evaluator.wss();
    assert_eq!(6, wss.len());
    // Once every blob has its own cluster, almost no error remains
    let at_true_k = wss[N_CENTERS - 2];
    assert!(at_true_k < 1e-2 * wss[0]);
    assert!(wss.iter().all(|&value| value >= 0.0));

    let metrics = evaluator.get_metrics(Metric::Wss).unwrap();
    let scalars: Vec<f64> = metrics.iter().map(|m| m.as_scalar().unwrap()).collect();
    assert_eq!(wss, scalars);
}

pub(crate) fn test_silhouette_scores(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let scores = evaluator.silhouette_scores().unwrap();
    assert_eq!(6, scores.len());
    assert!(scores.iter().all(|&s| (-1.0..=1.0).contains(&s)));

    let best = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(n, _)| evaluator.k_values()[n])
        .unwrap();
    assert_eq!(N_CENTERS, best);
    assert!(scores[N_CENTERS - 2] > 0.99);

    // The average score is the mean of the per-sample coefficients
    for (score, samples) in scores.iter().zip(evaluator.silhouette_samples()) {
        let mean = samples.sum() / samples.len() as f64;
        assert!((score - mean).abs() < 1e-6);
    }
}

pub(crate) fn test_silhouette_samples(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let metrics = evaluator.get_metrics(Metric::SilhouetteSample).unwrap();
    assert_eq!(6, metrics.len());
    for metric in &metrics {
        assert!(metric.as_scalar().is_none());
        let samples = metric.as_samples().unwrap();
        assert_eq!(N_SAMPLES, samples.len());
        assert!(samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }
}

pub(crate) fn test_metrics_are_cached(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let labels_before = evaluator.model(4).unwrap().labels().clone();
    let first = evaluator.get_metrics(Metric::SilhouetteScore).unwrap();
    let second = evaluator.get_metrics(Metric::SilhouetteScore).unwrap();
    assert_eq!(first, second);
    let first = evaluator.get_metrics(Metric::SilhouetteSample).unwrap();
    let second = evaluator.get_metrics(Metric::SilhouetteSample).unwrap();
    assert_eq!(first, second);
    let _ = evaluator.plot_silhouette_scores(ChartStyle::silhouette_default()).unwrap();
    assert_eq!(&labels_before, evaluator.model(4).unwrap().labels());
    assert_eq!(6, evaluator.n_models());
}

pub(crate) fn test_invalid_metric_defaults_to_wss(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let fallback = evaluator.get_metrics_by_name("inertia").unwrap();
    let wss = evaluator.get_metrics_by_name("wss").unwrap();
    assert_eq!(wss, fallback);
    let scores = evaluator.get_metrics_by_name("silhouette_score").unwrap();
    assert!(matches!(scores[0], MetricValue::Scalar(_)));
}

pub(crate) fn test_empty_data(fit: FitFn) {
    let data = Array2::<f64>::zeros((0, 2));
    let result = fit(data, params());
    assert!(matches!(result, Err(EvaluatorError::EmptyDataset)));
}

pub(crate) fn test_non_finite_coordinate(fit: FitFn) {
    let data = array![[1.5, 2.2], [1.0, f64::INFINITY], [1.2, 1.4], [0.8, 1.0]];
    let params = EvaluatorParams::builder().k_range(2..3).build();
    let result = fit(data, params);
    assert!(matches!(result, Err(EvaluatorError::NonFiniteCoordinate(..))));

    let data = array![[1.5, 2.2], [1.0, 1.1], [f64::NAN, 1.4], [0.8, 1.0]];
    let params = EvaluatorParams::builder().k_range(2..3).build();
    let result = fit(data, params);
    assert!(matches!(result, Err(EvaluatorError::NonFiniteCoordinate(..))));
}

pub(crate) fn test_empty_k_range(fit: FitFn) {
    let params = EvaluatorParams::builder().k_range(5..5).build();
    let result = fit(blobs(), params);
    assert!(matches!(result, Err(EvaluatorError::EmptyKRange)));
}

pub(crate) fn test_too_few_samples(fit: FitFn) {
    let data = array![[1.0, 1.0], [1.1, 1.0], [5.0, 5.0], [5.1, 5.0]];
    let params = EvaluatorParams::builder().k_range(2..5).build();
    let result = fit(data, params);
    assert!(matches!(result, Err(EvaluatorError::TooFewSamples { k: 4, n_samples: 4 })));
}

pub(crate) fn test_plot_elbow(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let chart = evaluator.plot_elbow(ChartStyle::metric_default());
    assert_eq!(
        "Within-cluster-sum of squared errors for K = 2 through 7",
        chart.title
    );
    assert_eq!("k", chart.x_label);
    assert_eq!("Within-cluster-sum of squared errors", chart.y_label);
    assert_eq!(vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0], chart.x_axis.ticks);
    assert_eq!(1, chart.elements.len());
    match &chart.elements[0] {
        Element::Line { points, markers, .. } => {
            assert!(*markers);
            assert_eq!(6, points.len());
            assert_eq!((2.0, evaluator.wss()[0]), points[0]);
        }
        other => panic!("expected a line, got {other:?}"),
    }
    let wss_max = evaluator.wss().into_iter().fold(f64::MIN, f64::max);
    assert!(chart.y_axis.max > wss_max);
}

pub(crate) fn test_plot_avg_silhouette_scores(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let chart = evaluator
        .plot_avg_silhouette_scores(ChartStyle::metric_default())
        .unwrap();
    assert_eq!("Average silhouette score for K = 2 through 7", chart.title);
    assert_eq!("Average silhouette score", chart.y_label);
    assert_eq!(1600.0, chart.style.width_px());
    assert_eq!(800.0, chart.style.height_px());
    assert!(chart.to_svg().contains("Average silhouette score for K = 2 through 7"));
}

pub(crate) fn test_plot_silhouette_scores(fit: FitFn) {
    let evaluator = fit(blobs(), params()).unwrap();
    let charts = evaluator
        .plot_silhouette_scores(ChartStyle::silhouette_default())
        .unwrap();
    assert_eq!(evaluator.n_models(), charts.len());

    let scores = evaluator.silhouette_scores().unwrap();
    for ((chart, k), score) in charts.iter().zip(evaluator.k_values()).zip(scores) {
        assert_eq!(
            format!("Silhouette plot for the various clusters for k = {k}"),
            chart.title
        );
        assert_eq!("Silhouette coefficient values", chart.x_label);
        assert_eq!("Cluster label", chart.y_label);
        assert_eq!((-1.0, 1.0), (chart.x_axis.min, chart.x_axis.max));
        assert_eq!(11, chart.x_axis.ticks.len());
        assert_eq!(0.0, chart.y_axis.min);
        assert_eq!((N_SAMPLES + (k + 1) * 10) as f64, chart.y_axis.max);
        assert!(chart.y_axis.ticks.is_empty());

        let bands: Vec<_> = chart.bands().collect();
        assert_eq!(k, bands.len());
        for (cluster, band) in bands.iter().enumerate() {
            match band {
                Element::Band { colour, opacity, .. } => {
                    assert_eq!(kmeanseval::nipy_spectral(cluster as f64 / k as f64), *colour);
                    assert_eq!(0.7, *opacity);
                }
                other => panic!("expected a band, got {other:?}"),
            }
        }

        let labels: Vec<&str> = chart
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let expected: Vec<String> = (0..k).map(|i| i.to_string()).collect();
        assert_eq!(expected, labels);

        let average_line = chart.elements.iter().find_map(|e| match e {
            Element::VLine { x, colour, dashed } => Some((*x, *colour, *dashed)),
            _ => None,
        });
        assert_eq!(Some((score, Rgb::RED, true)), average_line);
    }
}

pub(crate) fn test_silhouette_band_layout(fit: FitFn) {
    let data = array![
        [0.0, 0.0], [0.1, 0.0], [0.0, 0.1],
        [5.0, 5.0], [5.1, 5.0],
    ];
    let params = EvaluatorParams::builder().k_range(2..3).seed(1).build();
    let evaluator = fit(data, params).unwrap();
    let sizes = evaluator.model(2).unwrap().cluster_sizes();
    let charts = evaluator
        .plot_silhouette_scores(ChartStyle::silhouette_default())
        .unwrap();
    let bands: Vec<_> = charts[0].bands().collect();

    // The first band starts 10 above the axis, the next 10 above the end of the first
    let mut y_lower = 10.0;
    for (band, size) in bands.iter().zip(sizes) {
        match band {
            Element::Band { polygon, .. } => {
                assert_eq!(size + 2, polygon.len());
                assert_eq!((0.0, y_lower), polygon[0]);
                let values: Vec<f64> = polygon[1..=size].iter().map(|&(x, _)| x).collect();
                assert!(values.windows(2).all(|w| w[0] <= w[1]));
                assert_eq!(y_lower + (size - 1) as f64, polygon[size].1);
            }
            other => panic!("expected a band, got {other:?}"),
        }
        y_lower += size as f64 + 10.0;
    }
    // 5 samples plus (k + 1) gaps of 10
    assert_eq!(35.0, charts[0].y_axis.max);
}

pub(crate) fn test_outlier_cluster(fit: FitFn) {
    let data = array![[0.0], [0.1], [0.2], [5.0], [5.1], [100.0]];
    let params = EvaluatorParams::builder().k_range(3..4).seed(7).build();
    let evaluator = fit(data, params).unwrap();
    let model = evaluator.model(3).unwrap();
    let outlier = model.labels()[5];
    assert_eq!(1, model.cluster_sizes()[outlier]);

    let samples = &evaluator.silhouette_samples()[0];
    assert_eq!(0.0, samples[5]);
    let score = evaluator.silhouette_scores().unwrap()[0];
    assert!((score - samples.sum() / 6.0).abs() < 1e-12);
    assert!((score - 0.81313).abs() < 1e-3);

    // The dashed average line agrees with the bands next to it
    let charts = evaluator
        .plot_silhouette_scores(ChartStyle::silhouette_default())
        .unwrap();
    let average_line = charts[0].elements.iter().find_map(|e| match e {
        Element::VLine { x, .. } => Some(*x),
        _ => None,
    });
    assert_eq!(Some(score), average_line);
}

pub(crate) fn test_fewer_distinct_points_than_k(fit: FitFn) {
    let data = array![[0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [1.0, 1.0]];
    let params = EvaluatorParams::builder().k_range(2..5).seed(3).build();
    let evaluator = fit(data, params).unwrap();
    assert_eq!(vec![2, 3, 4], evaluator.k_values());

    for score in evaluator.silhouette_scores().unwrap() {
        assert!((score - 0.8).abs() < 1e-12);
    }

    let charts = evaluator
        .plot_silhouette_scores(ChartStyle::silhouette_default())
        .unwrap();
    for ((chart, k), model) in charts.iter().zip(evaluator.k_values()).zip(evaluator.models()) {
        let sizes = model.cluster_sizes();
        assert_eq!(k, sizes.len());
        assert_eq!(5, sizes.iter().sum::<usize>());

        let bands: Vec<_> = chart.bands().collect();
        assert_eq!(k, bands.len());
        let labels = chart
            .elements
            .iter()
            .filter(|e| matches!(e, Element::Label { .. }))
            .count();
        assert_eq!(k, labels);

        for (band, &size) in bands.iter().zip(&sizes) {
            if let Element::Band { polygon, .. } = band {
                assert_eq!(size + 2, polygon.len());
                if size == 0 {
                    // An empty cluster leaves a band with no height
                    assert_eq!(polygon[0], polygon[1]);
                    assert_eq!(0.0, polygon[0].0);
                }
            }
        }
        assert!(sizes.iter().any(|&size| size == 0) || k == 2);
    }
}
