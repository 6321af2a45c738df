/// An opaque colour with 8 bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    pub const DEFAULT_LINE: Rgb = Rgb { r: 31, g: 119, b: 180 };

    /// The colour as an SVG/CSS hex string, e.g. `#1f77b4`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// Control points of the nipy_spectral colormap, evenly spaced at 0.05 steps from 0 to 1.
const RED: [f64; 21] = [
    0.0, 0.4667, 0.5333, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.7333, 0.9333, 1.0,
    1.0, 1.0, 0.8667, 0.8, 0.8,
];
const GREEN: [f64; 21] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.4667, 0.6, 0.6667, 0.6667, 0.6, 0.7333, 0.8667, 1.0, 1.0, 0.9333,
    0.8, 0.6, 0.0, 0.0, 0.0, 0.8,
];
const BLUE: [f64; 21] = [
    0.0, 0.5333, 0.6, 0.6667, 0.8667, 0.8667, 0.8667, 0.6667, 0.5333, 0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.8,
];

/// Samples the nipy_spectral colormap (black through purple, blue, green, yellow and red
/// to grey) at `x`, which is clamped to `[0, 1]`.
pub fn nipy_spectral(x: f64) -> Rgb {
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let position = x * (RED.len() - 1) as f64;
    let lower = (position.floor() as usize).min(RED.len() - 2);
    let frac = position - lower as f64;
    let channel = |table: &[f64; 21]| {
        let value = table[lower] + (table[lower + 1] - table[lower]) * frac;
        (value * 255.0).round() as u8
    };
    Rgb { r: channel(&RED), g: channel(&GREEN), b: channel(&BLUE) }
}

/// The colour of cluster `cluster` out of `n_clusters`.
pub fn cluster_colour(cluster: usize, n_clusters: usize) -> Rgb {
    nipy_spectral(cluster as f64 / n_clusters.max(1) as f64)
}
