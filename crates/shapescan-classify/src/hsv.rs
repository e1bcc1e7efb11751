//! RGB → HSV conversion in OpenCV-compatible units.
//!
//! Hue is in half-degrees (0–180 exclusive), saturation and value in
//! 0–255. The color interval table is written in these units, so the
//! conversion keeps them rather than normalizing to [0, 1].

/// A color in hue/saturation/value space, OpenCV scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue in half-degrees, `0.0..180.0`.
    pub h: f64,
    /// Saturation, `0.0..=255.0`.
    pub s: f64,
    /// Value, `0.0..=255.0`.
    pub v: f64,
}

impl Hsv {
    /// Convert a mean RGB color (each channel `0.0..=255.0`) to HSV.
    pub fn from_rgb_mean(rgb: [f64; 3]) -> Self {
        let [r, g, b] = rgb;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let v = max;
        let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

        let h = if delta <= f64::EPSILON {
            0.0
        } else {
            let deg = if max == r {
                60.0 * ((g - b) / delta)
            } else if max == g {
                60.0 * ((b - r) / delta) + 120.0
            } else {
                60.0 * ((r - g) / delta) + 240.0
            };
            let deg = if deg < 0.0 { deg + 360.0 } else { deg };
            deg / 2.0
        };

        Self { h, s, v }
    }
}
