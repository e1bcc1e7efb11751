use serde::{Deserialize, Serialize};

/// Configuration for the segmentation pipeline.
///
/// Area bounds are in px² and scale with the input resolution; the
/// defaults are tuned for webcam-sized frames (~640×480 and up) with
/// shapes drawn as large high-contrast marks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterParams {
    /// Binarization threshold on blurred luminance (0–255).
    pub threshold: u8,
    /// Foreground polarity. `true` assumes bright shapes on a dark
    /// background (pixels above the threshold become foreground);
    /// `false` flips the comparison for dark shapes on a bright
    /// background.
    pub bright_foreground: bool,
    /// Gaussian blur standard deviation applied before thresholding.
    /// 1.1 matches a 5×5 smoothing kernel.
    pub blur_sigma: f32,
    /// L∞ radius of the square structuring element used for the
    /// morphological open/close cleanup. Radius 2 is a 5×5 kernel.
    pub morph_radius: u8,
    /// Minimum enclosed area (px²) for a candidate region, inclusive.
    pub min_area: f64,
    /// Maximum enclosed area (px²) for a candidate region, inclusive.
    pub max_area: f64,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            threshold: 220,
            bright_foreground: true,
            blur_sigma: 1.1,
            morph_radius: 2,
            min_area: 5_000.0,
            max_area: 500_000.0,
        }
    }
}

impl SegmenterParams {
    /// Validate tunables that can be expressed but make no sense.
    pub fn validate(&self) -> Result<(), String> {
        if self.blur_sigma <= 0.0 {
            return Err(format!(
                "blur_sigma must be positive (got {})",
                self.blur_sigma
            ));
        }
        if self.min_area > self.max_area {
            return Err(format!(
                "min_area ({}) exceeds max_area ({})",
                self.min_area, self.max_area
            ));
        }
        if self.min_area < 0.0 {
            return Err(format!("min_area must be non-negative (got {})", self.min_area));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SegmenterParams::default().validate().unwrap();
    }

    #[test]
    fn inverted_area_bounds_are_rejected() {
        let params = SegmenterParams {
            min_area: 10.0,
            max_area: 5.0,
            ..SegmenterParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_sigma_is_rejected() {
        let params = SegmenterParams {
            blur_sigma: 0.0,
            ..SegmenterParams::default()
        };
        assert!(params.validate().is_err());
    }
}
