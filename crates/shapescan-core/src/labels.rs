use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of shape classes the pipeline can assign.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ShapeLabel {
    Circle,
    Triangle,
    Quadrilateral,
    Pentagon,
    Hexagon,
    Unknown,
}

impl ShapeLabel {
    /// Map a simplified-polygon vertex count to a label.
    ///
    /// Only 3..=6 vertices name a polygon; everything else is `Unknown`.
    /// The circle test takes precedence over this mapping and is applied
    /// by the shape classifier before calling here.
    pub fn from_vertex_count(n: usize) -> Self {
        match n {
            3 => ShapeLabel::Triangle,
            4 => ShapeLabel::Quadrilateral,
            5 => ShapeLabel::Pentagon,
            6 => ShapeLabel::Hexagon,
            _ => ShapeLabel::Unknown,
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeLabel::Circle => "Circle",
            ShapeLabel::Triangle => "Triangle",
            ShapeLabel::Quadrilateral => "Quadrilateral",
            ShapeLabel::Pentagon => "Pentagon",
            ShapeLabel::Hexagon => "Hexagon",
            ShapeLabel::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Closed set of named hues the color classifier can assign.
///
/// `Red` covers two hue bands (the circular wrap-around at both ends of
/// the hue axis); no other label merges bands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Violet,
    White,
    Gray,
    Black,
    Unknown,
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorLabel::Red => "red",
            ColorLabel::Orange => "orange",
            ColorLabel::Yellow => "yellow",
            ColorLabel::Green => "green",
            ColorLabel::Cyan => "cyan",
            ColorLabel::Blue => "blue",
            ColorLabel::Violet => "violet",
            ColorLabel::White => "white",
            ColorLabel::Gray => "gray",
            ColorLabel::Black => "black",
            ColorLabel::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_map_to_polygon_labels() {
        assert_eq!(ShapeLabel::from_vertex_count(3), ShapeLabel::Triangle);
        assert_eq!(ShapeLabel::from_vertex_count(4), ShapeLabel::Quadrilateral);
        assert_eq!(ShapeLabel::from_vertex_count(5), ShapeLabel::Pentagon);
        assert_eq!(ShapeLabel::from_vertex_count(6), ShapeLabel::Hexagon);
        for n in [0usize, 1, 2, 7, 8, 12] {
            assert_eq!(ShapeLabel::from_vertex_count(n), ShapeLabel::Unknown);
        }
    }

    #[test]
    fn display_matches_annotation_text() {
        assert_eq!(ShapeLabel::Quadrilateral.to_string(), "Quadrilateral");
        assert_eq!(ColorLabel::Red.to_string(), "red");
        assert_eq!(ColorLabel::Unknown.to_string(), "unknown");
    }
}
