use std::path::PathBuf;

use ab_glyph::FontVec;
use image::Rgb;
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut, draw_text_mut};
use serde::{Deserialize, Serialize};
use shapescan_core::{CandidateRegion, ColorLabel, Frame, ShapeLabel};

use crate::error::ConfigError;

/// Annotation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateParams {
    /// Outline and label color, RGB.
    pub outline: [u8; 3],
    /// Mark the region centroid with a small cross.
    pub mark_centroid: bool,
    /// Optional TrueType/OpenType font for the `"{color}, {shape}"` text
    /// label. Without a font only the outline and centroid mark are
    /// drawn; the labels are still available on the detection result.
    pub font_path: Option<PathBuf>,
    /// Label text height in pixels.
    pub label_scale: f32,
}

impl Default for AnnotateParams {
    fn default() -> Self {
        Self {
            outline: [0, 0, 0],
            mark_centroid: true,
            font_path: None,
            label_scale: 18.0,
        }
    }
}

/// Draws detection outlines and labels directly into the frame buffer.
pub struct Annotator {
    params: AnnotateParams,
    font: Option<FontVec>,
}

impl Annotator {
    pub fn new(params: AnnotateParams) -> Result<Self, ConfigError> {
        let font = match &params.font_path {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|source| ConfigError::FontUnavailable {
                    path: path.clone(),
                    source,
                })?;
                let font = FontVec::try_from_vec(bytes).map_err(|_| ConfigError::FontInvalid {
                    path: path.clone(),
                })?;
                Some(font)
            }
            None => None,
        };
        Ok(Self { params, font })
    }

    /// Draw one classified region into the frame, in place.
    pub fn annotate(
        &self,
        frame: &mut Frame,
        region: &CandidateRegion,
        shape: ShapeLabel,
        color: ColorLabel,
    ) {
        let outline = Rgb(self.params.outline);
        let image = frame.image_mut();

        let points = region.points();
        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            draw_line_segment_mut(image, (p.x, p.y), (q.x, q.y), outline);
        }

        let centroid = region.centroid();
        let cx = centroid.x.round() as i32;
        let cy = centroid.y.round() as i32;
        if self.params.mark_centroid {
            draw_cross_mut(image, outline, cx, cy);
        }

        if let Some(font) = &self.font {
            let text = format!("{color}, {shape}");
            draw_text_mut(
                image,
                outline,
                (cx - 40).max(0),
                cy.max(0),
                self.params.label_scale,
                font,
                &text,
            );
        }
    }
}
