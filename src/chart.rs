use crate::colormap::Rgb;
use crate::EvaluatorError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const PIXELS_PER_INCH: f64 = 100.0;
const POINTS_PER_INCH: f64 = 72.0;

// Fractions of the figure occupied by the plotting area
const PLOT_LEFT: f64 = 0.125;
const PLOT_RIGHT: f64 = 0.9;
const PLOT_TOP: f64 = 0.12;
const PLOT_BOTTOM: f64 = 0.89;

const MARGIN_FRACTION: f64 = 0.05;
const MAX_TICKS: usize = 8;

/// Figure size in inches and text size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub text_size: f64,
}

impl ChartStyle {
    pub fn new(width_in: f64, height_in: f64, text_size: f64) -> Self {
        ChartStyle { width_in, height_in, text_size }
    }

    /// The style of the elbow and average silhouette charts: 16 x 8 inches, 15pt text.
    pub fn metric_default() -> Self {
        Self::new(16.0, 8.0, 15.0)
    }

    /// The style of the per-k silhouette charts: 10 x 5 inches, 12pt text.
    pub fn silhouette_default() -> Self {
        Self::new(10.0, 5.0, 12.0)
    }

    pub fn width_px(&self) -> f64 {
        self.width_in * PIXELS_PER_INCH
    }

    pub fn height_px(&self) -> f64 {
        self.height_in * PIXELS_PER_INCH
    }

    fn font_px(&self) -> f64 {
        self.text_size * PIXELS_PER_INCH / POINTS_PER_INCH
    }
}

/// Data limits and tick positions of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

impl Axis {
    pub fn new(min: f64, max: f64, ticks: Vec<f64>) -> Self {
        Axis { min, max, ticks }
    }

    fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (value - self.min) / span
        } else {
            0.5
        }
    }
}

/// A drawable item, positioned in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A polyline, optionally with a circular marker on every point.
    Line { points: Vec<(f64, f64)>, colour: Rgb, markers: bool },
    /// A filled polygon.
    Band { polygon: Vec<(f64, f64)>, colour: Rgb, opacity: f64 },
    /// A text label anchored at its left end.
    Label { x: f64, y: f64, text: String },
    /// A vertical line spanning the full height of the plot.
    VLine { x: f64, colour: Rgb, dashed: bool },
}

/// The layout of a single chart. Build one with the renderers on
/// [`KMeansEvaluator`](crate::KMeansEvaluator), then serialize it with
/// [`Chart::to_svg`] or [`Chart::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub style: ChartStyle,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub elements: Vec<Element>,
}

impl Chart {
    /// A line chart with circular markers, with axis limits padded around the data.
    pub(crate) fn line(
        style: ChartStyle,
        title: String,
        x_label: &str,
        y_label: &str,
        points: Vec<(f64, f64)>,
    ) -> Self {
        let x_values: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        let y_values: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
        let (x_min, x_max) = padded_limits(&x_values);
        let (y_min, y_max) = padded_limits(&y_values);
        Chart {
            style,
            title,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_axis: Axis::new(x_min, x_max, x_values),
            y_axis: Axis::new(y_min, y_max, nice_ticks(y_min, y_max, MAX_TICKS)),
            elements: vec![Element::Line { points, colour: Rgb::DEFAULT_LINE, markers: true }],
        }
    }

    /// The filled bands of the chart, in drawing order.
    pub fn bands(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| matches!(e, Element::Band { .. }))
    }

    /// Serializes the chart to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing to a String cannot fail
        let _ = self.write_svg(&mut svg);
        svg
    }

    fn write_svg(&self, svg: &mut String) -> std::fmt::Result {
        let width = self.style.width_px();
        let height = self.style.height_px();
        let font = self.style.font_px();
        let (left, right) = (PLOT_LEFT * width, PLOT_RIGHT * width);
        let (top, bottom) = (PLOT_TOP * height, PLOT_BOTTOM * height);
        let px = |x: f64| left + self.x_axis.fraction(x) * (right - left);
        let py = |y: f64| bottom - self.y_axis.fraction(y) * (bottom - top);

        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
             viewBox=\"0 0 {width:.0} {height:.0}\" font-family=\"sans-serif\">"
        )?;
        svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
        writeln!(
            svg,
            "  <clipPath id=\"plot-area\"><rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            right - left,
            bottom - top
        )?;

        svg.push_str("  <g clip-path=\"url(#plot-area)\">\n");
        for element in &self.elements {
            match element {
                Element::Line { points, colour, markers } => {
                    writeln!(
                        svg,
                        "    <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
                        svg_points(points.iter().map(|&(x, y)| (px(x), py(y)))),
                        colour.to_hex()
                    )?;
                    if *markers {
                        for &(x, y) in points {
                            writeln!(
                                svg,
                                "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"5\" fill=\"{}\"/>",
                                px(x),
                                py(y),
                                colour.to_hex()
                            )?;
                        }
                    }
                }
                Element::Band { polygon, colour, opacity } => {
                    writeln!(
                        svg,
                        "    <polygon points=\"{}\" fill=\"{hex}\" stroke=\"{hex}\" \
                         fill-opacity=\"{opacity}\" stroke-opacity=\"{opacity}\"/>",
                        svg_points(polygon.iter().map(|&(x, y)| (px(x), py(y)))),
                        hex = colour.to_hex()
                    )?;
                }
                Element::Label { x, y, text } => {
                    writeln!(
                        svg,
                        "    <text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{font:.1}\" dominant-baseline=\"middle\">{}</text>",
                        px(*x),
                        py(*y),
                        escape(text)
                    )?;
                }
                Element::VLine { x, colour, dashed } => {
                    let dash = if *dashed { " stroke-dasharray=\"8,5\"" } else { "" };
                    writeln!(
                        svg,
                        "    <line x1=\"{x:.2}\" y1=\"{top:.2}\" x2=\"{x:.2}\" y2=\"{bottom:.2}\" stroke=\"{}\" stroke-width=\"1.5\"{dash}/>",
                        colour.to_hex(),
                        x = px(*x)
                    )?;
                }
            }
        }
        svg.push_str("  </g>\n");

        // Frame, ticks and tick labels
        writeln!(
            svg,
            "  <rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"#000000\"/>",
            right - left,
            bottom - top
        )?;
        for &tick in &self.x_axis.ticks {
            let x = px(tick);
            writeln!(
                svg,
                "  <line x1=\"{x:.2}\" y1=\"{bottom:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"#000000\"/>",
                bottom + 5.0
            )?;
            writeln!(
                svg,
                "  <text x=\"{x:.2}\" y=\"{:.2}\" font-size=\"{font:.1}\" text-anchor=\"middle\">{}</text>",
                bottom + 8.0 + font,
                format_tick(tick)
            )?;
        }
        for &tick in &self.y_axis.ticks {
            let y = py(tick);
            writeln!(
                svg,
                "  <line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{left:.2}\" y2=\"{y:.2}\" stroke=\"#000000\"/>",
                left - 5.0
            )?;
            writeln!(
                svg,
                "  <text x=\"{:.2}\" y=\"{y:.2}\" font-size=\"{font:.1}\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>",
                left - 8.0,
                format_tick(tick)
            )?;
        }

        // Title and axis labels
        let centre_x = (left + right) / 2.0;
        let centre_y = (top + bottom) / 2.0;
        writeln!(
            svg,
            "  <text x=\"{centre_x:.2}\" y=\"{:.2}\" font-size=\"{font:.1}\" text-anchor=\"middle\">{}</text>",
            top - font,
            escape(&self.title)
        )?;
        writeln!(
            svg,
            "  <text x=\"{centre_x:.2}\" y=\"{:.2}\" font-size=\"{font:.1}\" text-anchor=\"middle\">{}</text>",
            bottom + 16.0 + 2.0 * font,
            escape(&self.x_label)
        )?;
        let label_x = (left - 16.0 - 4.0 * font).max(font);
        writeln!(
            svg,
            "  <text x=\"{label_x:.2}\" y=\"{centre_y:.2}\" font-size=\"{font:.1}\" text-anchor=\"middle\" \
             transform=\"rotate(-90 {label_x:.2} {centre_y:.2})\">{}</text>",
            escape(&self.y_label)
        )?;
        svg.push_str("</svg>\n");
        Ok(())
    }

    /// Writes the chart as an SVG file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EvaluatorError> {
        fs::write(path.as_ref(), self.to_svg())?;
        tracing::debug!(path = %path.as_ref().display(), "saved chart");
        Ok(())
    }
}

fn svg_points<I: Iterator<Item = (f64, f64)>>(points: I) -> String {
    points
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(crate) fn format_tick(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    // Avoid printing "-0"
    if rounded == 0.0 {
        String::from("0")
    } else {
        format!("{rounded}")
    }
}

/// Data limits widened by a margin on both sides. A degenerate span is widened by one unit.
fn padded_limits(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return (0.0, 1.0);
    }
    let span = max - min;
    let margin = if span > 0.0 { span * MARGIN_FRACTION } else { 1.0 };
    (min - margin, max + margin)
}

/// Evenly spaced ticks inside `[min, max]` at a step of 1, 2 or 5 times a power of ten.
pub(crate) fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() || max_ticks == 0 {
        return vec![min];
    }
    let raw_step = span / max_ticks as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil();
    let last = (max / step).floor();
    let n_ticks = (last - first).max(0.0) as usize + 1;
    (0..n_ticks)
        .map(|n| (first + n as f64) * step)
        .collect()
}
