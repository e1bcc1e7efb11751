use nalgebra::Point2;

use crate::geometry::{
    min_enclosing_circle, perimeter, polygon_area, polygon_centroid, EnclosingCircle,
};

/// One candidate shape boundary extracted from the foreground mask,
/// with its geometric descriptors computed once at construction.
///
/// Ephemeral: built and consumed within a single frame's processing
/// pass, never persisted across frames.
#[derive(Clone, Debug)]
pub struct CandidateRegion {
    points: Vec<Point2<f32>>,
    area: f64,
    perimeter: f64,
    centroid: Point2<f32>,
    enclosing: EnclosingCircle,
}

impl CandidateRegion {
    /// Build a region from an ordered closed boundary (the last point is
    /// implicitly connected back to the first; do not repeat it).
    pub fn from_boundary(points: Vec<Point2<f32>>) -> Self {
        let area = polygon_area(&points);
        let perimeter = perimeter(&points);
        let centroid = polygon_centroid(&points);
        let enclosing = min_enclosing_circle(&points);
        Self {
            points,
            area,
            perimeter,
            centroid,
            enclosing,
        }
    }

    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    /// Enclosed area in px².
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Closed boundary length in px.
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    pub fn centroid(&self) -> Point2<f32> {
        self.centroid
    }

    pub fn enclosing_circle(&self) -> EnclosingCircle {
        self.enclosing
    }

    /// Isoperimetric ratio 4π·area / perimeter²; 1 for a perfect circle,
    /// 0 for a degenerate boundary.
    pub fn circularity(&self) -> f64 {
        if self.perimeter <= 0.0 {
            return 0.0;
        }
        4.0 * std::f64::consts::PI * self.area / (self.perimeter * self.perimeter)
    }

    /// Fraction of the minimal enclosing circle this region fills.
    pub fn area_ratio(&self) -> f64 {
        let circle_area = self.enclosing.area();
        if circle_area <= 0.0 {
            return 0.0;
        }
        self.area / circle_area
    }
}
