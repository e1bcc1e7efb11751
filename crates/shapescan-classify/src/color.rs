use image::GrayImage;
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};
use shapescan_core::{CandidateRegion, ColorLabel, Frame};

use crate::hsv::Hsv;

/// One inclusive HSV interval box. Bounds are in OpenCV units
/// (hue 0–180, saturation/value 0–255) and inclusive on both ends.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HsvBand {
    pub label: ColorLabel,
    pub lo: [u8; 3],
    pub hi: [u8; 3],
}

impl HsvBand {
    fn contains(&self, hsv: Hsv) -> bool {
        hsv.h >= f64::from(self.lo[0])
            && hsv.h <= f64::from(self.hi[0])
            && hsv.s >= f64::from(self.lo[1])
            && hsv.s <= f64::from(self.hi[1])
            && hsv.v >= f64::from(self.lo[2])
            && hsv.v <= f64::from(self.hi[2])
    }
}

/// Ordered table of named-color intervals. First match wins; overlaps are
/// resolved by table order and nothing else.
///
/// The default table carries *two* red bands — one at each end of the hue
/// axis, covering the circular wrap-around at 0° and 360° — that resolve
/// to the single `red` label. This is deliberately kept as two flat bands
/// rather than a circular hue metric, for compatibility with existing
/// calibrations. No other label spans multiple bands.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorTable {
    pub bands: Vec<HsvBand>,
}

impl Default for ColorTable {
    fn default() -> Self {
        let band = |label, lo, hi| HsvBand { label, lo, hi };
        Self {
            bands: vec![
                band(ColorLabel::Red, [0, 70, 50], [10, 255, 255]),
                band(ColorLabel::Red, [170, 70, 50], [180, 255, 255]),
                band(ColorLabel::Orange, [11, 70, 50], [20, 255, 255]),
                band(ColorLabel::Yellow, [21, 70, 50], [35, 255, 255]),
                band(ColorLabel::Green, [36, 70, 50], [85, 255, 255]),
                band(ColorLabel::Cyan, [86, 70, 50], [100, 255, 255]),
                band(ColorLabel::Blue, [101, 70, 50], [130, 255, 255]),
                band(ColorLabel::Violet, [131, 70, 50], [180, 255, 255]),
                band(ColorLabel::White, [0, 0, 200], [180, 40, 255]),
                band(ColorLabel::Gray, [0, 0, 40], [180, 40, 200]),
                band(ColorLabel::Black, [0, 0, 0], [180, 255, 40]),
            ],
        }
    }
}

impl ColorTable {
    /// Name an HSV color: first matching band wins, no match is `Unknown`.
    pub fn lookup(&self, hsv: Hsv) -> ColorLabel {
        self.bands
            .iter()
            .find(|band| band.contains(hsv))
            .map(|band| band.label)
            .unwrap_or(ColorLabel::Unknown)
    }
}

/// Names the dominant color inside a candidate region.
#[derive(Clone, Debug, Default)]
pub struct ColorClassifier {
    table: ColorTable,
}

impl ColorClassifier {
    pub fn new(table: ColorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    /// Mean color over the filled interior of the region, mapped through
    /// the interval table.
    pub fn classify(&self, frame: &Frame, region: &CandidateRegion) -> ColorLabel {
        match mean_interior_color(frame, region) {
            Some(rgb) => {
                let hsv = Hsv::from_rgb_mean(rgb);
                let label = self.table.lookup(hsv);
                log::trace!(
                    "mean rgb ({:.0},{:.0},{:.0}) -> hsv ({:.1},{:.1},{:.1}) -> {}",
                    rgb[0],
                    rgb[1],
                    rgb[2],
                    hsv.h,
                    hsv.s,
                    hsv.v,
                    label
                );
                label
            }
            None => ColorLabel::Unknown,
        }
    }
}

/// Arithmetic per-channel mean over the filled polygon interior.
///
/// The mask covers exactly the filled boundary, mirroring a filled
/// contour draw; `None` when the rasterized interior is empty.
fn mean_interior_color(frame: &Frame, region: &CandidateRegion) -> Option<[f64; 3]> {
    let mut poly: Vec<Point<i32>> = region
        .points()
        .iter()
        .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect();
    poly.dedup();
    // A closed polygon must not repeat its first vertex.
    if poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    if poly.len() < 3 {
        return None;
    }

    let mut mask = GrayImage::new(frame.width(), frame.height());
    draw_polygon_mut(&mut mask, &poly, image::Luma([255u8]));

    let image = frame.image();
    let mut sum = [0.0f64; 3];
    let mut count = 0u64;
    for (x, y, m) in mask.enumerate_pixels() {
        if m.0[0] == 0 {
            continue;
        }
        let px = image.get_pixel(x, y);
        sum[0] += f64::from(px.0[0]);
        sum[1] += f64::from(px.0[1]);
        sum[2] += f64::from(px.0[2]);
        count += 1;
    }

    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some([sum[0] / n, sum[1] / n, sum[2] / n])
}
