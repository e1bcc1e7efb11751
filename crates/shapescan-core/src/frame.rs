use std::path::{Path, PathBuf};

use image::RgbImage;

/// An owned RGB frame flowing through the pipeline.
///
/// Channel order is RGB for the whole pipeline. The frame is mutated in
/// place only during annotation; every other stage reads it. The optional
/// `path` records where a still frame was decoded from, for diagnostics
/// only — camera frames carry no path.
#[derive(Clone, Debug)]
pub struct Frame {
    image: RgbImage,
    path: Option<PathBuf>,
}

impl Frame {
    pub fn from_image(image: RgbImage) -> Self {
        Self { image, path: None }
    }

    pub fn from_path_image(image: RgbImage, path: impl Into<PathBuf>) -> Self {
        Self {
            image,
            path: Some(path.into()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when either dimension is zero; such frames are rejected before
    /// any pipeline stage runs.
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
