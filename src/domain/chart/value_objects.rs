use crate::domain::market_data::CandleSeries;

/// Pixel position relative to the chart's top-left corner.
/// X grows to the right, Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Value Object - Viewport
///
/// The horizontal axis is measured in logical bar indices (bar `i` of the
/// series sits at logical `i`), the vertical one in price.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub logical_from: f64,
    pub logical_to: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            logical_from: -0.5,
            logical_to: 0.5,
            min_price: 0.0,
            max_price: 100.0,
            width: 800,
            height: 500,
        }
    }
}

/// Fraction of the price range kept free above and below the data.
const PRICE_PADDING: f64 = 0.05;
/// Padding floor relative to the price level, for flat series.
const FLAT_PADDING: f64 = 1e-3;
/// Narrowest zoom, in bars across the viewport.
const MIN_VISIBLE_BARS: f64 = 2.0;

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn bar_span(&self) -> f64 {
        self.logical_to - self.logical_from
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    /// Show the whole series with a little headroom on the price axis.
    pub fn fit(&mut self, series: &CandleSeries) {
        let Some((low, high)) = series.price_range() else {
            return;
        };
        self.logical_from = -0.5;
        self.logical_to = series.len() as f64 - 0.5;

        let padding = ((high.value() - low.value()) * PRICE_PADDING)
            .max(high.value().abs() * FLAT_PADDING)
            .max(1e-8);
        self.min_price = low.value() - padding;
        self.max_price = high.value() + padding;
    }

    /// Zoom the time axis keeping the bar under `center_x` (0..1) in place.
    pub fn zoom(&mut self, factor: f64, center_x: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let current = self.bar_span();
        let new_span = (current / factor).max(MIN_VISIBLE_BARS);
        let center = self.logical_from + current * center_x;

        self.logical_from = center - new_span * center_x;
        self.logical_to = self.logical_from + new_span;
    }

    /// Drag by a pixel delta: content follows the pointer.
    pub fn pan(&mut self, delta_x_px: f64, delta_y_px: f64) {
        if self.width > 0 {
            let bars = -delta_x_px / self.width as f64 * self.bar_span();
            self.logical_from += bars;
            self.logical_to += bars;
        }
        if self.height > 0 {
            let price = delta_y_px / self.height as f64 * self.price_range();
            self.min_price += price;
            self.max_price += price;
        }
    }

    /// Pixel size changes; visible ranges stay the same.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn logical_to_x(&self, logical: f64) -> f64 {
        if self.bar_span() == 0.0 {
            return 0.0;
        }
        (logical - self.logical_from) / self.bar_span() * self.width as f64
    }

    pub fn x_to_logical(&self, x: f64) -> f64 {
        if self.width == 0 {
            return self.logical_from;
        }
        self.logical_from + x / self.width as f64 * self.bar_span()
    }

    /// Pixel width of one bar slot
    pub fn bar_width(&self) -> f64 {
        if self.bar_span() == 0.0 {
            return 0.0;
        }
        self.width as f64 / self.bar_span()
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= 0.0 && x <= self.width as f64
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgba(((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8, 1.0)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    pub const BULL: Color = Color::from_hex(0x26a69a);
    pub const BEAR: Color = Color::from_hex(0xef5350);
    pub const TEXT: Color = Color::from_hex(0xd1d4dc);
    pub const BACKGROUND: Color = Color::from_hex(0x131722);
    pub const ENTRY: Color = Color::from_hex(0x2962ff);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}
