use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use shapescan_core::{CandidateRegion, ShapeLabel};

/// Tunables for shape classification.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    /// Polygon simplification tolerance as a fraction of the boundary
    /// perimeter. Proportional rather than absolute so classification is
    /// scale-invariant.
    pub epsilon_ratio: f64,
    /// Lower bound on circularity (4π·area/perimeter²) for the circle
    /// test.
    pub min_circularity: f64,
    /// Lower bound on the fill ratio of the minimal enclosing circle for
    /// the circle test.
    pub min_area_ratio: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            epsilon_ratio: 0.01,
            min_circularity: 0.8,
            min_area_ratio: 0.8,
        }
    }
}

impl ShapeParams {
    /// Validate tunables that can be expressed but make no sense.
    ///
    /// A non-positive `epsilon_ratio` would be rejected deep inside the
    /// polygon simplification, mid-frame; both ratio bounds live in
    /// `[0, 1]` because the descriptors they gate do.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.epsilon_ratio.is_finite() && self.epsilon_ratio > 0.0) {
            return Err(format!(
                "epsilon_ratio must be positive (got {})",
                self.epsilon_ratio
            ));
        }
        if !(0.0..=1.0).contains(&self.min_circularity) {
            return Err(format!(
                "min_circularity must be within [0, 1] (got {})",
                self.min_circularity
            ));
        }
        if !(0.0..=1.0).contains(&self.min_area_ratio) {
            return Err(format!(
                "min_area_ratio must be within [0, 1] (got {})",
                self.min_area_ratio
            ));
        }
        Ok(())
    }
}

/// Classification outcome with the descriptors that produced it.
#[derive(Clone, Copy, Debug)]
pub struct ShapeClass {
    pub label: ShapeLabel,
    /// Vertex count of the simplified polygon (kept even when the circle
    /// test overrides it).
    pub vertex_count: usize,
    pub circularity: f64,
    pub area_ratio: f64,
}

/// Assigns a [`ShapeLabel`] to a candidate region.
#[derive(Clone, Debug, Default)]
pub struct ShapeClassifier {
    params: ShapeParams,
}

impl ShapeClassifier {
    pub fn new(params: ShapeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    /// Classify one region.
    ///
    /// The circle test is evaluated first and, when both the circularity
    /// and the enclosing-circle fill ratio agree, it wins regardless of
    /// the simplified vertex count. Only then is the vertex count mapped
    /// to a polygon label.
    pub fn classify(&self, region: &CandidateRegion) -> ShapeClass {
        let vertex_count = self.simplified_vertex_count(region);
        let circularity = region.circularity();
        let area_ratio = region.area_ratio();

        let label = if circularity > self.params.min_circularity
            && area_ratio > self.params.min_area_ratio
        {
            ShapeLabel::Circle
        } else {
            ShapeLabel::from_vertex_count(vertex_count)
        };

        log::trace!(
            "region area={:.0} circularity={:.3} area_ratio={:.3} vertices={} -> {}",
            region.area(),
            circularity,
            area_ratio,
            vertex_count,
            label
        );

        ShapeClass {
            label,
            vertex_count,
            circularity,
            area_ratio,
        }
    }

    fn simplified_vertex_count(&self, region: &CandidateRegion) -> usize {
        let points = region.points();
        if points.len() <= 3 {
            return points.len();
        }
        let epsilon = self.params.epsilon_ratio * region.perimeter();
        simplify_ring(points, epsilon)
    }
}

/// Douglas-Peucker vertex count for a closed boundary ring.
///
/// `approximate_polygon_dp` only simplifies open chains correctly: its
/// closed mode expects the first vertex repeated at the end, which the
/// boundary rings here never do. The ring is instead cut at two mutually
/// distant anchors (the vertex farthest from the vertex mean, then the
/// vertex farthest from that one). Farthest points are hull vertices, so
/// both anchors are genuine corners and safe to pin as chain endpoints;
/// the two halves are simplified independently and share exactly the two
/// anchors.
fn simplify_ring(points: &[Point2<f32>], epsilon: f64) -> usize {
    let n = points.len();
    let mean = Point2::new(
        points.iter().map(|p| p.x).sum::<f32>() / n as f32,
        points.iter().map(|p| p.y).sum::<f32>() / n as f32,
    );
    let a = farthest_from(points, mean);
    let b = farthest_from(points, points[a]);
    if a == b {
        // All vertices coincide; nothing to simplify.
        return n;
    }

    // Rotate the ring to start at `a`, close it explicitly, cut at `b`.
    let ring: Vec<Point<f32>> = (0..=n)
        .map(|i| {
            let p = points[(a + i) % n];
            Point::new(p.x, p.y)
        })
        .collect();
    let cut = (b + n - a) % n;
    let head = approximate_polygon_dp(&ring[..=cut], epsilon, false);
    let tail = approximate_polygon_dp(&ring[cut..], epsilon, false);
    // Both halves keep their endpoints, so `a` and `b` are counted twice.
    head.len() + tail.len() - 2
}

fn farthest_from(points: &[Point2<f32>], origin: Point2<f32>) -> usize {
    let mut best = 0;
    let mut best_d = f32::MIN;
    for (i, p) in points.iter().enumerate() {
        let (dx, dy) = (p.x - origin.x, p.y - origin.y);
        let d = dx * dx + dy * dy;
        if d > best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn regular_polygon(n: usize, r: f32) -> CandidateRegion {
        let pts = (0..n)
            .map(|i| {
                let t = (i as f32) / (n as f32) * std::f32::consts::TAU;
                Point2::new(200.0 + r * t.cos(), 200.0 + r * t.sin())
            })
            .collect();
        CandidateRegion::from_boundary(pts)
    }

    #[test]
    fn defaults_validate_and_zero_tolerance_is_rejected() {
        ShapeParams::default().validate().unwrap();
        let params = ShapeParams {
            epsilon_ratio: 0.0,
            ..ShapeParams::default()
        };
        assert!(params.validate().is_err());
        let params = ShapeParams {
            min_circularity: 1.5,
            ..ShapeParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn polygon_vertex_counts_label_polygons() {
        let classifier = ShapeClassifier::default();
        let cases = [
            (3usize, ShapeLabel::Triangle),
            (4, ShapeLabel::Quadrilateral),
            (5, ShapeLabel::Pentagon),
        ];
        for (n, expected) in cases {
            let class = classifier.classify(&regular_polygon(n, 120.0));
            assert_eq!(class.label, expected, "n = {n}");
        }
    }

    #[test]
    fn simplified_vertex_count_matches_polygon_order() {
        let classifier = ShapeClassifier::default();
        for n in 3..=6 {
            let class = classifier.classify(&regular_polygon(n, 120.0));
            assert_eq!(class.vertex_count, n, "n = {n}");
        }
    }

    #[test]
    fn near_collinear_jag_is_merged_into_the_edge() {
        // A square whose top edge carries a one-pixel rasterization jag;
        // the tolerance (1% of the ~800 px perimeter) absorbs it, and the
        // anchors pinned by the ring cut must not resurrect it.
        let region = CandidateRegion::from_boundary(vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 1.0),
            Point2::new(200.0, 0.0),
            Point2::new(200.0, 200.0),
            Point2::new(0.0, 200.0),
        ]);
        let class = ShapeClassifier::default().classify(&region);
        assert_eq!(class.vertex_count, 4);
        assert_eq!(class.label, ShapeLabel::Quadrilateral);
    }

    #[test]
    fn dense_regular_boundary_is_a_circle_despite_many_vertices() {
        // 64 vertices, but both circle criteria agree: circle precedence.
        let classifier = ShapeClassifier::default();
        let class = classifier.classify(&regular_polygon(64, 120.0));
        assert!(class.circularity > 0.8);
        assert!(class.area_ratio > 0.8);
        assert_eq!(class.label, ShapeLabel::Circle);
    }

    #[test]
    fn hexagon_passes_vertex_test_when_circle_test_fails() {
        // A regular hexagon has circularity ~0.907 but only fills ~0.827
        // of its circumcircle; tighten the fill bound so the circle test
        // fails and the vertex count decides.
        let params = ShapeParams {
            min_area_ratio: 0.9,
            ..ShapeParams::default()
        };
        let classifier = ShapeClassifier::new(params);
        let class = classifier.classify(&regular_polygon(6, 120.0));
        assert_eq!(class.vertex_count, 6);
        assert_eq!(class.label, ShapeLabel::Hexagon);
    }

    #[test]
    fn spiky_many_vertex_region_is_unknown() {
        // An 8-pointed star: low circularity, low fill, 16 vertices.
        let pts = (0..16)
            .map(|i| {
                let t = (i as f32) / 16.0 * std::f32::consts::TAU;
                let r = if i % 2 == 0 { 120.0 } else { 40.0 };
                Point2::new(200.0 + r * t.cos(), 200.0 + r * t.sin())
            })
            .collect();
        let region = CandidateRegion::from_boundary(pts);
        let class = ShapeClassifier::default().classify(&region);
        assert!(class.circularity < 0.8);
        assert_eq!(class.label, ShapeLabel::Unknown);
    }

    #[test]
    fn elongated_rectangle_fails_both_circle_criteria() {
        let region = CandidateRegion::from_boundary(vec![
            Point2::new(0.0, 0.0),
            Point2::new(300.0, 0.0),
            Point2::new(300.0, 40.0),
            Point2::new(0.0, 40.0),
        ]);
        let class = ShapeClassifier::default().classify(&region);
        assert!(class.circularity < 0.8);
        assert!(class.area_ratio < 0.8);
        assert_eq!(class.label, ShapeLabel::Quadrilateral);
    }
}
