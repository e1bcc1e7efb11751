//! Contour tracing and lazy candidate-region extraction.

use image::GrayImage;
use imageproc::contours::{find_contours, Contour};
use imageproc::point::Point;
use nalgebra::Point2;
use shapescan_core::CandidateRegion;

use crate::SegmenterParams;

/// Lazy, finite, non-restartable sequence of candidate regions for one
/// frame. Area filtering happens here, so out-of-bounds regions are never
/// observed downstream.
pub struct Candidates {
    contours: std::vec::IntoIter<Contour<i32>>,
    raw: usize,
    min_area: f64,
    max_area: f64,
}

impl Candidates {
    /// Number of contours traced before area filtering.
    pub fn raw_contours(&self) -> usize {
        self.raw
    }
}

// The pending contours are elided; only the filter state is useful in
// test failure output.
impl std::fmt::Debug for Candidates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidates")
            .field("raw", &self.raw)
            .field("min_area", &self.min_area)
            .field("max_area", &self.max_area)
            .finish_non_exhaustive()
    }
}

impl Iterator for Candidates {
    type Item = CandidateRegion;

    fn next(&mut self) -> Option<CandidateRegion> {
        for contour in self.contours.by_ref() {
            let boundary = compress_boundary(&contour.points);
            if boundary.len() < 3 {
                continue;
            }
            let region = CandidateRegion::from_boundary(boundary);
            if region.area() < self.min_area || region.area() > self.max_area {
                log::trace!("dropping contour with area {:.0} px^2", region.area());
                continue;
            }
            return Some(region);
        }
        None
    }
}

/// Trace all borders of the mask (outer and nested holes, full tree
/// hierarchy) and wrap them into a lazy candidate sequence.
pub(crate) fn extract(mask: &GrayImage, params: &SegmenterParams) -> Candidates {
    let contours = find_contours::<i32>(mask);
    let raw = contours.len();
    Candidates {
        contours: contours.into_iter(),
        raw,
        min_area: params.min_area,
        max_area: params.max_area,
    }
}

/// Collapse collinear runs of border pixels, keeping only
/// direction-change vertices.
///
/// Traced borders are 8-connected pixel chains, so straight edges are
/// long runs with an identical step vector; only the corners carry
/// geometric information.
fn compress_boundary(points: &[Point<i32>]) -> Vec<Point2<f32>> {
    if points.len() < 3 {
        return points
            .iter()
            .map(|p| Point2::new(p.x as f32, p.y as f32))
            .collect();
    }

    let n = points.len();
    let step = |from: Point<i32>, to: Point<i32>| {
        ((to.x - from.x).signum(), (to.y - from.y).signum())
    };

    let mut out = Vec::new();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        if step(prev, cur) != step(cur, next) {
            out.push(Point2::new(cur.x as f32, cur.y as f32));
        }
    }

    // A pixel-perfect straight loop collapses entirely; keep the raw
    // chain so the caller can still reject it by area.
    if out.len() < 3 {
        return points
            .iter()
            .map(|p| Point2::new(p.x as f32, p.y as f32))
            .collect();
    }
    out
}
