pub mod canvas_renderer;
pub mod overlay_renderer;
pub mod surface;

pub use canvas_renderer::{CandleGeometry, CanvasRenderer, candle_geometry, candle_handler};
pub use overlay_renderer::{ZoneRenderer, overlay_handler};
pub use surface::{CanvasOverlay, DrawCommand, OverlaySurface, RecordingSurface};
