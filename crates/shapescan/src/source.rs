use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shapescan_core::Frame;

use crate::error::{CaptureError, SourceError};

/// Where frames come from. Exactly one variant, enforced at the type
/// level — there is no representable "neither configured" state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// A capture device, addressed by platform index.
    Camera { index: u32 },
    /// A still image decoded once and replayed on every `next_frame`.
    Image { path: PathBuf },
}

/// Camera-specific options.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Explicit device node overriding index-based selection.
    ///
    /// Index 0 is the platform's default built-in device; external USB
    /// devices do not always enumerate where expected, so deployments pin
    /// them by path here instead of relying on magic indices.
    pub device_path: Option<PathBuf>,
}

enum Backend {
    Still { frame: Frame },
    #[cfg(feature = "camera")]
    Camera(crate::camera::CameraCapture),
}

enum State {
    Open(Backend),
    Released,
}

/// Uniform frame acquisition over a camera or a still image.
///
/// Internally a two-state machine: `Open` (the only state `next_frame`
/// is valid in) and `Released`. `release` is an idempotent transition to
/// `Released` from any state and is safe for image sources that never
/// held a device handle. The camera handle, when present, is exclusively
/// owned here and dropped on release.
pub struct FrameSource {
    state: State,
}

impl FrameSource {
    /// Open a source, classifying every failure.
    pub fn open(source: &Source, options: &CameraOptions) -> Result<Self, SourceError> {
        let backend = match source {
            Source::Image { path } => {
                if !path.exists() {
                    return Err(SourceError::NotFound(path.clone()));
                }
                let image = image::open(path)
                    .map_err(|source| SourceError::Decode {
                        path: path.clone(),
                        source,
                    })?
                    .to_rgb8();
                log::info!(
                    "loaded image {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Backend::Still {
                    frame: Frame::from_path_image(image, path.clone()),
                }
            }
            Source::Camera { index } => Self::open_camera(*index, options)?,
        };
        Ok(Self {
            state: State::Open(backend),
        })
    }

    #[cfg(feature = "camera")]
    fn open_camera(index: u32, options: &CameraOptions) -> Result<Backend, SourceError> {
        let capture = crate::camera::CameraCapture::open(index, options)?;
        Ok(Backend::Camera(capture))
    }

    #[cfg(not(feature = "camera"))]
    fn open_camera(index: u32, _options: &CameraOptions) -> Result<Backend, SourceError> {
        Err(SourceError::CameraSupportDisabled { index })
    }

    /// True for sources that produce a live stream, i.e. worth polling in
    /// a loop rather than processing once.
    pub fn is_live(&self) -> bool {
        match &self.state {
            #[cfg(feature = "camera")]
            State::Open(Backend::Camera(_)) => true,
            _ => false,
        }
    }

    /// Acquire the next frame.
    ///
    /// For a still image this is idempotent: every call returns a fresh
    /// copy of the same decoded pixels, so downstream annotation never
    /// touches the cached original. For a camera a read failure is
    /// reported for this cycle only; the handle stays valid.
    pub fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        match &mut self.state {
            State::Released => Err(CaptureError::SourceReleased),
            State::Open(Backend::Still { frame }) => Ok(frame.clone()),
            #[cfg(feature = "camera")]
            State::Open(Backend::Camera(capture)) => capture.read_frame(),
        }
    }

    /// Release the underlying device, if any.
    ///
    /// Idempotent: calling it twice, or on a source that never opened a
    /// device, is a no-op.
    pub fn release(&mut self) {
        if matches!(self.state, State::Open(_)) {
            log::info!("frame source released");
        }
        self.state = State::Released;
    }
}

// Hand-written because the camera backend holds a device handle with no
// `Debug` of its own.
impl fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Open(Backend::Still { .. }) => "Open(Still)",
            #[cfg(feature = "camera")]
            State::Open(Backend::Camera(_)) => "Open(Camera)",
            State::Released => "Released",
        };
        f.debug_struct("FrameSource").field("state", &state).finish()
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.release();
    }
}
