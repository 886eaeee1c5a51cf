pub use kurbo::{Point, Vec2};

/// Side length of one cell in normalized glyph units.
///
/// At `scale = 1.0` a cell is exactly this many pixels wide and tall, so a 10×10 board
/// covers 400×400 pixels. Board layout depends on this value.
pub const CELL_UNITS: f64 = 40.0;

/// Extent of the border box outline, one unit inside the cell edge.
pub const BOX_UNITS: f64 = 39.0;

/// Pixel side length of one cell at the given scale.
#[inline]
pub fn cell_px(scale: f64) -> f64 {
    CELL_UNITS * scale
}
