//! Foreground segmentation: frame → binary mask → candidate regions.
//!
//! The pipeline is fixed in order (luminance, blur, threshold,
//! morphological open/close, contour tracing, area filtering) but every
//! tunable — threshold level, polarity, kernel sizes, area bounds — lives
//! on [`SegmenterParams`] rather than in constants, because the useful
//! values are scale-dependent on the input resolution.

mod candidates;
mod mask;
mod params;

pub use candidates::Candidates;
pub use params::SegmenterParams;

use image::GrayImage;
use shapescan_core::Frame;

/// Error raised when a frame is rejected before any pipeline stage runs.
#[derive(thiserror::Error, Debug)]
pub enum ProcessingError {
    #[error("empty frame passed to segmentation ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
}

/// Candidate-region extractor.
#[derive(Clone, Debug)]
pub struct Segmenter {
    params: SegmenterParams,
}

impl Segmenter {
    pub fn new(params: SegmenterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    /// Build the binary foreground mask for a frame.
    ///
    /// Exposed separately from [`Segmenter::segment`] so tests and debug
    /// dumps can inspect the intermediate mask.
    pub fn foreground_mask(&self, frame: &Frame) -> Result<GrayImage, ProcessingError> {
        if frame.is_empty() {
            return Err(ProcessingError::EmptyFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }
        Ok(mask::foreground_mask(frame.image(), &self.params))
    }

    /// Segment a frame into candidate shape regions.
    ///
    /// Returns a lazy, finite, non-restartable sequence: each candidate is
    /// produced once for this frame and the iterator cannot be rewound.
    /// Regions with enclosed area outside `[min_area, max_area]` are
    /// dropped before they are ever yielded.
    pub fn segment(&self, frame: &Frame) -> Result<Candidates, ProcessingError> {
        let mask = self.foreground_mask(frame)?;
        let candidates = candidates::extract(&mask, &self.params);
        log::debug!(
            "segmented {}x{} frame: {} raw contours",
            frame.width(),
            frame.height(),
            candidates.raw_contours()
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn empty_frame_is_rejected_before_any_stage() {
        let seg = Segmenter::new(SegmenterParams::default());
        let err = seg
            .segment(&Frame::from_image(RgbImage::new(0, 0)))
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::EmptyFrame {
                width: 0,
                height: 0
            }
        ));
    }
}
