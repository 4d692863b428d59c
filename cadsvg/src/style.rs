//! Styling (§4.9): plain value records consumed by the SVG emitter. They
//! carry no mutable, cross-cutting state.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Line style for one edge visibility class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f64,
    pub dash: Option<Vec<u32>>,
}

impl LineStyle {
    pub fn new(color: Rgba, width: f64) -> Self {
        LineStyle {
            color,
            width: width.abs(),
            dash: None,
        }
    }

    pub fn with_dash(mut self, dash: Vec<u32>) -> Self {
        self.dash = Some(dash);
        self
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::new(Rgba::BLACK, 0.0)
    }
}

/// Fill/stroke style for the surface group's polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceStyle {
    pub stroke_color: Rgba,
    pub width: f64,
    pub dash: Option<Vec<u32>>,
}

impl FaceStyle {
    pub fn new(stroke_color: Rgba) -> Self {
        FaceStyle {
            stroke_color,
            width: 0.03,
            dash: None,
        }
    }
}

impl Default for FaceStyle {
    fn default() -> Self {
        FaceStyle::new(Rgba::BLACK)
    }
}

/// A coordinate-axis arrow: shaft + triangular head + label.
///
/// Head width/length are derived from `stroke_width` at construction
/// (`3×`/`4×`), not independently settable — this is a deliberate departure
/// from the simpler `1×`/`2×` default of the system this was distilled
/// from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub stroke_width: f64,
    pub head_width: f64,
    pub head_length: f64,
    pub label: Option<String>,
    pub font_size: f64,
    pub color: Rgba,
}

impl ArrowStyle {
    pub fn new(stroke_width: f64, font_size: f64, color: Rgba) -> Self {
        ArrowStyle {
            stroke_width,
            head_width: 3.0 * stroke_width,
            head_length: 4.0 * stroke_width,
            label: None,
            font_size,
            color,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Size and per-axis styling of the projected coordinate-system glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordSystemStyle {
    pub size: f64,
    pub x: ArrowStyle,
    pub y: ArrowStyle,
    pub z: ArrowStyle,
    pub margin: f64,
}

impl CoordSystemStyle {
    /// Conventional CAD axis coloring (X red, Y green, Z blue), stroke
    /// width `size / 20`, label font size `size / 5`, margin `2 * size`.
    pub fn new(size: f64) -> Self {
        let stroke_width = size / 20.0;
        let font_size = size / 5.0;
        CoordSystemStyle {
            size,
            x: ArrowStyle::new(stroke_width, font_size, Rgba::opaque(200, 30, 30)).with_label("X"),
            y: ArrowStyle::new(stroke_width, font_size, Rgba::opaque(30, 170, 30)).with_label("Y"),
            z: ArrowStyle::new(stroke_width, font_size, Rgba::opaque(30, 30, 200)).with_label("Z"),
            margin: 2.0 * size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_head_dimensions_are_derived_from_stroke_width() {
        let arrow = ArrowStyle::new(2.0, 5.0, Rgba::BLACK);
        assert_eq!(arrow.head_width, 6.0);
        assert_eq!(arrow.head_length, 8.0);
    }

    #[test]
    fn coord_system_style_derives_margin_and_font_size() {
        let style = CoordSystemStyle::new(10.0);
        assert_eq!(style.margin, 20.0);
        assert_eq!(style.x.font_size, 2.0);
        assert_eq!(style.x.stroke_width, 0.5);
    }

    #[test]
    fn line_style_width_is_never_negative() {
        let style = LineStyle::new(Rgba::BLACK, -3.0);
        assert_eq!(style.width, 3.0);
    }
}
