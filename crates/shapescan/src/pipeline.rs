use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use shapescan_classify::{ColorClassifier, ColorTable, ShapeClassifier, ShapeParams};
use shapescan_core::{ColorLabel, Frame, ShapeLabel};
use shapescan_segment::{ProcessingError, Segmenter, SegmenterParams};

use crate::annotate::{AnnotateParams, Annotator};
use crate::error::ConfigError;
use crate::sink::{DetectionEvent, DetectionSink};

/// Complete pipeline configuration, loadable from one JSON document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub segmenter: SegmenterParams,
    pub shape: ShapeParams,
    pub colors: ColorTable,
    pub annotate: AnnotateParams,
}

impl DetectorConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Unparsable {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// One detected region at the component boundary.
#[derive(Clone, Debug)]
pub struct Detection {
    pub shape: ShapeLabel,
    pub color: ColorLabel,
    pub centroid: Point2<f32>,
    /// Simplified-polygon vertex count (descriptive; the circle test can
    /// override it for the label).
    pub vertex_count: usize,
    pub area: f64,
}

/// Result of processing one frame: per-region detections plus a
/// count-by-shape tally. Immutable after construction; the tally is
/// fresh per call, never cumulative across frames.
#[derive(Clone, Debug, Default)]
pub struct DetectionResult {
    pub detections: Vec<Detection>,
    pub counts: HashMap<ShapeLabel, usize>,
}

impl DetectionResult {
    /// `"2x Circle, 1x Triangle"`-style summary, sorted by label name so
    /// output is stable.
    pub fn summary(&self) -> String {
        if self.counts.is_empty() {
            return "no shapes detected".to_string();
        }
        let mut entries: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(label, count)| (label.to_string(), *count))
            .collect();
        entries.sort();
        entries
            .iter()
            .map(|(label, count)| format!("{count}x {label}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The per-frame detection pipeline: segment, classify, annotate, tally.
///
/// Stateless across calls; a failed cycle never corrupts the next one.
pub struct ShapeDetector {
    segmenter: Segmenter,
    shapes: ShapeClassifier,
    colors: ColorClassifier,
    annotator: Annotator,
}

impl ShapeDetector {
    /// Validate the configuration and build the pipeline.
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.segmenter.validate().map_err(ConfigError::Invalid)?;
        config.shape.validate().map_err(ConfigError::Invalid)?;
        let annotator = Annotator::new(config.annotate)?;
        Ok(Self {
            segmenter: Segmenter::new(config.segmenter),
            shapes: ShapeClassifier::new(config.shape),
            colors: ColorClassifier::new(config.colors),
            annotator,
        })
    }

    /// Run one full cycle on a frame, mutating it in place with
    /// annotations and emitting one event per accepted region.
    ///
    /// Classification reads the frame before any annotation is drawn, so
    /// sampled colors never include outline pixels.
    pub fn process(
        &self,
        frame: &mut Frame,
        sink: &mut dyn DetectionSink,
    ) -> Result<DetectionResult, ProcessingError> {
        let candidates: Vec<_> = self.segmenter.segment(frame)?.collect();

        let mut classified = Vec::with_capacity(candidates.len());
        for region in candidates {
            let class = self.shapes.classify(&region);
            let color = self.colors.classify(frame, &region);
            classified.push((region, class, color));
        }

        let mut detections = Vec::with_capacity(classified.len());
        let mut counts = HashMap::new();
        for (region, class, color) in &classified {
            self.annotator.annotate(frame, region, class.label, *color);

            detections.push(Detection {
                shape: class.label,
                color: *color,
                centroid: region.centroid(),
                vertex_count: class.vertex_count,
                area: region.area(),
            });
            *counts.entry(class.label).or_insert(0) += 1;

            sink.record(&DetectionEvent {
                timestamp: Utc::now(),
                shape: class.label,
                color: *color,
            });
            log::debug!(
                "detected {} {} at ({:.0},{:.0}), area {:.0} px^2",
                color,
                class.label,
                region.centroid().x,
                region.centroid().y,
                region.area()
            );
        }

        Ok(DetectionResult { detections, counts })
    }
}
