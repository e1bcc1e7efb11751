//! Classification of candidate regions: shape topology and dominant color.

mod color;
mod hsv;
mod shape;

pub use color::{ColorClassifier, ColorTable, HsvBand};
pub use hsv::Hsv;
pub use shape::{ShapeClass, ShapeClassifier, ShapeParams};
