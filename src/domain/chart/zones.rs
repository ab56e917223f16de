use super::coordinates::PriceProjection;
use crate::domain::errors::MappingError;
use crate::domain::markers::MarkerSet;

/// Zones narrower than this are widened so they stay visible.
pub const MIN_ZONE_WIDTH_PX: f64 = 1.0;

/// Axis-aligned rectangle in overlay pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Risk (stop-loss ↔ entry) and reward (entry ↔ take-profit) rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneGeometry {
    pub risk: PixelRect,
    pub reward: PixelRect,
    pub entry_y: f64,
}

impl ZoneGeometry {
    /// Vertical extents come from `min`/`max` because the stop can sit on
    /// either side of the entry.
    pub fn compute(
        markers: &MarkerSet,
        left_x: f64,
        right_x: f64,
        projection: &dyn PriceProjection,
    ) -> Result<Self, MappingError> {
        let sl_y = projection.price_to_y(markers.stop_loss.price.value())?;
        let entry_y = projection.price_to_y(markers.entry.price.value())?;
        let tp_y = projection.price_to_y(markers.take_profit.price.value())?;

        let x = left_x.min(right_x);
        let width = (right_x - left_x).abs().max(MIN_ZONE_WIDTH_PX);

        let span = |a: f64, b: f64| PixelRect { x, y: a.min(b), width, height: (a - b).abs() };

        Ok(Self { risk: span(sl_y, entry_y), reward: span(entry_y, tp_y), entry_y })
    }
}

/// Everything the overlay needs to paint one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneFrame {
    pub markers: MarkerSet,
    pub geometry: ZoneGeometry,
    /// True while the second point still follows the pointer.
    pub preview: bool,
}
