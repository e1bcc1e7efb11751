use std::path::PathBuf;

pub use shapescan_segment::ProcessingError;

/// Invalid configuration: rejected at construction, never retried.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid parameter: {0}")]
    Invalid(String),
    #[error("could not read config file {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}")]
    Unparsable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not load label font {path}")]
    FontUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid label font {path}")]
    FontInvalid { path: PathBuf },
}

/// Failure to construct a frame source. Fatal for this attempt; the
/// caller decides whether to retry with a different [`crate::Source`].
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("image not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not open camera device {index}")]
    DeviceUnavailable {
        index: u32,
        #[source]
        source: std::io::Error,
    },
    #[error("camera device {index} requested but this build has no `camera` feature")]
    CameraSupportDisabled { index: u32 },
}

/// Per-cycle capture failure. The source stays valid; the next
/// `next_frame` call may succeed.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("failed to capture frame from camera")]
    ReadFailure(#[source] std::io::Error),
    #[error("unsupported camera pixel format {fourcc}")]
    UnsupportedFormat { fourcc: String },
    #[error("frame requested from a released source")]
    SourceReleased,
}

/// Top-level error for facade entry points and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error("could not write output image {path}")]
    OutputImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not create detection log in {dir}")]
    LogSink {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
