//! Plain polygon geometry for candidate-region descriptors.
//!
//! All functions treat the input slice as a closed polygon (last vertex
//! implicitly connected back to the first) and are tolerant of degenerate
//! input: empty and single-point boundaries yield zero-sized results
//! rather than panicking.

use nalgebra::Point2;

/// Minimal circle enclosing a point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnclosingCircle {
    pub center: Point2<f32>,
    pub radius: f32,
}

impl EnclosingCircle {
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * (self.radius as f64) * (self.radius as f64)
    }
}

/// Absolute shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point2<f32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        acc += (p.x as f64) * (q.y as f64) - (q.x as f64) * (p.y as f64);
    }
    acc.abs() * 0.5
}

/// Closed arc length of a polygon boundary.
pub fn perimeter(points: &[Point2<f32>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut acc = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        let dx = (q.x - p.x) as f64;
        let dy = (q.y - p.y) as f64;
        acc += (dx * dx + dy * dy).sqrt();
    }
    acc
}

/// Area-weighted centroid of a closed polygon.
///
/// Falls back to the vertex mean when the signed area is numerically
/// zero (collinear or tiny boundaries), so every non-empty boundary has
/// a finite centroid to anchor annotations on.
pub fn polygon_centroid(points: &[Point2<f32>]) -> Point2<f32> {
    if points.is_empty() {
        return Point2::origin();
    }

    let mut twice_area = 0.0f64;
    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        let cross = (p.x as f64) * (q.y as f64) - (q.x as f64) * (p.y as f64);
        twice_area += cross;
        cx += ((p.x + q.x) as f64) * cross;
        cy += ((p.y + q.y) as f64) * cross;
    }

    if twice_area.abs() < 1e-9 {
        let n = points.len() as f32;
        let (sx, sy) = points
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        return Point2::new(sx / n, sy / n);
    }

    let scale = 1.0 / (3.0 * twice_area);
    Point2::new((cx * scale) as f32, (cy * scale) as f32)
}

/// Minimal enclosing circle via the iterative Welzl construction.
///
/// Deterministic (no shuffling); quadratic in the worst case, which is
/// fine for compressed contour boundaries of at most a few hundred
/// vertices.
pub fn min_enclosing_circle(points: &[Point2<f32>]) -> EnclosingCircle {
    let mut circle = match points {
        [] => {
            return EnclosingCircle {
                center: Point2::origin(),
                radius: 0.0,
            }
        }
        [p] => circle_one(*p),
        _ => circle_two(points[0], points[1]),
    };

    for i in 0..points.len() {
        if contains(&circle, points[i]) {
            continue;
        }
        circle = circle_one(points[i]);
        for j in 0..i {
            if contains(&circle, points[j]) {
                continue;
            }
            circle = circle_two(points[i], points[j]);
            for k in 0..j {
                if !contains(&circle, points[k]) {
                    circle = circle_three(points[i], points[j], points[k]);
                }
            }
        }
    }

    circle
}

fn contains(c: &EnclosingCircle, p: Point2<f32>) -> bool {
    let dx = (p.x - c.center.x) as f64;
    let dy = (p.y - c.center.y) as f64;
    (dx * dx + dy * dy).sqrt() <= (c.radius as f64) * (1.0 + 1e-7) + 1e-7
}

fn circle_one(p: Point2<f32>) -> EnclosingCircle {
    EnclosingCircle {
        center: p,
        radius: 0.0,
    }
}

fn circle_two(a: Point2<f32>, b: Point2<f32>) -> EnclosingCircle {
    let center = Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    EnclosingCircle {
        center,
        radius: ((dx * dx + dy * dy).sqrt() * 0.5) as f32,
    }
}

/// Circumcircle of three points; collinear triples degrade to the widest
/// two-point circle.
fn circle_three(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> EnclosingCircle {
    let ax = a.x as f64;
    let ay = a.y as f64;
    let bx = b.x as f64;
    let by = b.y as f64;
    let cx = c.x as f64;
    let cy = c.y as f64;

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d.abs() < 1e-9 {
        let ab = circle_two(a, b);
        let ac = circle_two(a, c);
        let bc = circle_two(b, c);
        let mut widest = ab;
        if ac.radius > widest.radius {
            widest = ac;
        }
        if bc.radius > widest.radius {
            widest = bc;
        }
        return widest;
    }

    let a2 = ax * ax + ay * ay;
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
    let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;

    let center = Point2::new(ux as f32, uy as f32);
    let dx = ax - ux;
    let dy = ay - uy;
    EnclosingCircle {
        center,
        radius: ((dx * dx + dy * dy).sqrt()) as f32,
    }
}
