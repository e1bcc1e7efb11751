//! High-level facade for the `shapescan-*` workspace.
//!
//! One processing cycle is a blocking call chain: acquire a frame from a
//! [`FrameSource`], run [`ShapeDetector::process`] to segment, classify,
//! and annotate it, then hand the returned [`DetectionResult`] to whatever
//! presentation layer drives the loop. The core never polls, sleeps, or
//! retries; a failed cycle reports a typed error and leaves the source
//! usable for the next cycle.
//!
//! ## Quickstart
//!
//! ```no_run
//! use shapescan::{DetectorConfig, FrameSource, CameraOptions, ShapeDetector, Source};
//! use shapescan::sink::NullSink;
//!
//! # fn main() -> Result<(), shapescan::Error> {
//! let source = Source::Image { path: "shot.png".into() };
//! let mut frames = FrameSource::open(&source, &CameraOptions::default())?;
//! let detector = ShapeDetector::new(DetectorConfig::default())?;
//!
//! let mut frame = frames.next_frame()?;
//! let result = detector.process(&mut frame, &mut NullSink)?;
//! for (shape, count) in &result.counts {
//!     println!("{shape}: {count}");
//! }
//! frames.release();
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`shapescan_core`] (re-exported as [`core`]): frames, labels,
//!   candidate regions, geometry.
//! - [`shapescan_segment`] (as [`segment`]): foreground mask + candidates.
//! - [`shapescan_classify`] (as [`classify`]): shape and color classifiers.
//! - this crate: sources, the pipeline, annotation, detection sinks, CLI.

pub use shapescan_classify as classify;
pub use shapescan_core as core;
pub use shapescan_segment as segment;

mod annotate;
#[cfg(feature = "camera")]
mod camera;
mod error;
mod pipeline;
pub mod sink;
mod source;

pub use annotate::{AnnotateParams, Annotator};
pub use error::{CaptureError, ConfigError, Error, SourceError};
pub use pipeline::{Detection, DetectionResult, DetectorConfig, ShapeDetector};
pub use sink::{DetectionEvent, DetectionSink};
pub use source::{CameraOptions, FrameSource, Source};

pub use shapescan_core::{init_with_level, ColorLabel, Frame, ShapeLabel};
pub use shapescan_segment::ProcessingError;

/// Install a tracing subscriber reading `RUST_LOG`-style filters from the
/// environment. Alternative to the plain stderr logger for deployments
/// that already ship tracing.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
