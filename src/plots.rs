use crate::chart::{Axis, Chart, ChartStyle, Element};
use crate::colormap::{cluster_colour, Rgb};
use crate::{EvaluatorError, KMeansEvaluator};
use num_traits::ToPrimitive;

const WSS_TITLE: &str = "Within-cluster-sum of squared errors";
const AVG_SILHOUETTE_TITLE: &str = "Average silhouette score";

// Blank space, in samples, below and between the clusters of a silhouette chart
const CLUSTER_GAP: usize = 10;
const BAND_OPACITY: f64 = 0.7;
const LABEL_X: f64 = -0.05;

impl<F: linfa::Float> KMeansEvaluator<F> {
    /// Creates an elbow chart of the within-cluster sum of squared errors over the range of k.
    ///
    /// # Parameters
    /// * `style` - the figure and text size, usually [`ChartStyle::metric_default`]
    pub fn plot_elbow(&self, style: ChartStyle) -> Chart {
        self.metric_chart(&self.wss(), WSS_TITLE, style)
    }

    /// Creates a chart of the average silhouette score over the range of k.
    ///
    /// # Parameters
    /// * `style` - the figure and text size, usually [`ChartStyle::metric_default`]
    pub fn plot_avg_silhouette_scores(&self, style: ChartStyle) -> Result<Chart, EvaluatorError> {
        Ok(self.metric_chart(&self.silhouette_scores()?, AVG_SILHOUETTE_TITLE, style))
    }

    /// Creates one silhouette chart per k, showing the sorted silhouette coefficients of
    /// the samples of each cluster as a filled band, and the average score as a dashed line.
    ///
    /// # Parameters
    /// * `style` - the figure and text size, usually [`ChartStyle::silhouette_default`]
    ///
    /// # Returns
    /// * A result that, if successful, contains one chart per k in ascending order of k.
    pub fn plot_silhouette_scores(&self, style: ChartStyle) -> Result<Vec<Chart>, EvaluatorError> {
        self.models()
            .map(|model| -> Result<Chart, EvaluatorError> {
                let k = model.k();
                let average = to_f64(model.silhouette_score(self.data())?);
                let samples = model.silhouette_samples(self.data());
                let n_samples = self.data().nrows();

                let mut elements = Vec::with_capacity(2 * k + 1);
                let mut y_lower = CLUSTER_GAP;
                for cluster in 0..k {
                    let mut values: Vec<f64> = samples
                        .iter()
                        .zip(model.labels().iter())
                        .filter(|&(_, &label)| label == cluster)
                        .map(|(&value, _)| to_f64(value))
                        .collect();
                    values.sort_by(f64::total_cmp);

                    let size = values.len();
                    let colour = cluster_colour(cluster, k);
                    elements.push(Element::Band {
                        polygon: band_polygon(&values, y_lower),
                        colour,
                        opacity: BAND_OPACITY,
                    });
                    elements.push(Element::Label {
                        x: LABEL_X,
                        y: y_lower as f64 + 0.5 * size as f64,
                        text: cluster.to_string(),
                    });
                    y_lower += size + CLUSTER_GAP;
                }
                elements.push(Element::VLine { x: average, colour: Rgb::RED, dashed: true });

                Ok(Chart {
                    style,
                    title: format!("Silhouette plot for the various clusters for k = {k}"),
                    x_label: String::from("Silhouette coefficient values"),
                    y_label: String::from("Cluster label"),
                    x_axis: Axis::new(-1.0, 1.0, (0..=10).map(|n| -1.0 + 0.2 * n as f64).collect()),
                    y_axis: Axis::new(0.0, (n_samples + (k + 1) * CLUSTER_GAP) as f64, Vec::new()),
                    elements,
                })
            })
            .collect()
    }

    fn metric_chart(&self, values: &[F], title: &str, style: ChartStyle) -> Chart {
        let k_values = self.k_values();
        let points = k_values
            .iter()
            .zip(values.iter())
            .map(|(&k, &value)| (k as f64, to_f64(value)))
            .collect();
        let (first, last) = match (k_values.first(), k_values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => (0, 0),
        };
        Chart::line(
            style,
            format!("{title} for K = {first} through {last}"),
            "k",
            title,
            points,
        )
    }
}

/// The outline of a band filled horizontally from x = 0 to each sorted value, one sample
/// per unit of height starting at `y_lower`.
fn band_polygon(values: &[f64], y_lower: usize) -> Vec<(f64, f64)> {
    let y_lower = y_lower as f64;
    let mut polygon = Vec::with_capacity(values.len() + 2);
    polygon.push((0.0, y_lower));
    polygon.extend(values.iter().enumerate().map(|(n, &value)| (value, y_lower + n as f64)));
    polygon.push((0.0, y_lower + values.len().saturating_sub(1) as f64));
    polygon
}

fn to_f64<F: ToPrimitive>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
