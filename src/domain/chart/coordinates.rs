//! Pixel ↔ (price, time) conversions.
//!
//! Screen Y grows downward while price grows upward; every projection here
//! applies the inversion in both directions so a forward/inverse pair
//! round-trips.

use super::value_objects::{ScreenPos, Viewport};
use crate::domain::errors::MappingError;
use crate::domain::market_data::{CandleSeries, Price, Timestamp};
use crate::domain::markers::PricePoint;

/// Vertical projection between price and pixel Y.
pub trait PriceProjection {
    fn price_to_y(&self, price: f64) -> Result<f64, MappingError>;
    fn y_to_price(&self, y: f64) -> Result<f64, MappingError>;
}

impl PriceProjection for Viewport {
    fn price_to_y(&self, price: f64) -> Result<f64, MappingError> {
        if self.price_range() <= 0.0 || self.height == 0 {
            return Err(MappingError::DegenerateProjection);
        }
        let normalized = (price - self.min_price) / self.price_range();
        Ok(self.height as f64 * (1.0 - normalized))
    }

    fn y_to_price(&self, y: f64) -> Result<f64, MappingError> {
        if self.price_range() <= 0.0 || self.height == 0 {
            return Err(MappingError::DegenerateProjection);
        }
        let normalized = 1.0 - y / self.height as f64;
        Ok(self.min_price + self.price_range() * normalized)
    }
}

/// Price projection rebuilt from two sampled `(y, price)` pairs.
///
/// Used when only point samples of the scale are at hand. Values outside the
/// two samples are extrapolated along the same line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearPriceInterpolator {
    y0: f64,
    price0: f64,
    y1: f64,
    price1: f64,
}

impl LinearPriceInterpolator {
    pub fn new(first: (f64, f64), second: (f64, f64)) -> Result<Self, MappingError> {
        let (y0, price0) = first;
        let (y1, price1) = second;
        if y0 == y1 || price0 == price1 || ![y0, y1, price0, price1].iter().all(|v| v.is_finite()) {
            return Err(MappingError::DegenerateProjection);
        }
        Ok(Self { y0, price0, y1, price1 })
    }

    /// Sample an existing projection at the top and bottom of a pane.
    pub fn sample(projection: &dyn PriceProjection, height: u32) -> Result<Self, MappingError> {
        let bottom = height as f64;
        Self::new((0.0, projection.y_to_price(0.0)?), (bottom, projection.y_to_price(bottom)?))
    }
}

impl PriceProjection for LinearPriceInterpolator {
    fn price_to_y(&self, price: f64) -> Result<f64, MappingError> {
        Ok(self.y0 + (price - self.price0) * (self.y1 - self.y0) / (self.price1 - self.price0))
    }

    fn y_to_price(&self, y: f64) -> Result<f64, MappingError> {
        Ok(self.price0 + (y - self.y0) * (self.price1 - self.price0) / (self.y1 - self.y0))
    }
}

/// Horizontal projection over the loaded bars.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale<'a> {
    series: &'a CandleSeries,
    viewport: &'a Viewport,
}

impl<'a> TimeScale<'a> {
    pub fn new(series: &'a CandleSeries, viewport: &'a Viewport) -> Self {
        Self { series, viewport }
    }

    /// Pixel X of the bar opened at `time`.
    pub fn time_to_x(&self, time: Timestamp) -> Result<f64, MappingError> {
        let index = self.series.index_of(time).ok_or(MappingError::UnknownTime(time.value()))?;
        Ok(self.viewport.logical_to_x(index as f64))
    }

    /// Time of the bar nearest to pixel X. Only pixels inside the visible
    /// area that land on a loaded bar are accepted.
    pub fn x_to_time(&self, x: f64) -> Result<Timestamp, MappingError> {
        if self.series.is_empty() {
            return Err(MappingError::NoData);
        }
        if !x.is_finite() || !self.viewport.contains_x(x) {
            return Err(MappingError::OutsideTimeRange { x });
        }
        let index = self.viewport.x_to_logical(x).round();
        if index < 0.0 || index >= self.series.len() as f64 {
            return Err(MappingError::OutsideTimeRange { x });
        }
        self.series
            .get(index as usize)
            .map(|candle| candle.time)
            .ok_or(MappingError::OutsideTimeRange { x })
    }
}

/// Converts between pixels and chart domain values for one frame.
pub struct CoordinateMapper<'a> {
    price: &'a dyn PriceProjection,
    time: TimeScale<'a>,
    height: u32,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(series: &'a CandleSeries, viewport: &'a Viewport) -> Self {
        Self { price: viewport, time: TimeScale::new(series, viewport), height: viewport.height }
    }

    /// Same time axis, different price projection.
    pub fn with_price_projection(
        series: &'a CandleSeries,
        viewport: &'a Viewport,
        price: &'a dyn PriceProjection,
    ) -> Self {
        Self { price, time: TimeScale::new(series, viewport), height: viewport.height }
    }

    pub fn time_scale(&self) -> &TimeScale<'a> {
        &self.time
    }

    pub fn price_projection(&self) -> &dyn PriceProjection {
        self.price
    }

    pub fn pixel_to_domain(&self, pos: ScreenPos) -> Result<PricePoint, MappingError> {
        let time = self.time.x_to_time(pos.x)?;
        if !pos.y.is_finite() || pos.y < 0.0 || pos.y > self.height as f64 {
            return Err(MappingError::OutsidePriceArea { y: pos.y });
        }
        let price = self.price.y_to_price(pos.y)?;
        Ok(PricePoint::new(Price::new(price), time))
    }

    pub fn domain_to_pixel(&self, point: &PricePoint) -> Result<ScreenPos, MappingError> {
        let x = self.time.time_to_x(point.time)?;
        let y = self.price.price_to_y(point.price.value())?;
        Ok(ScreenPos::new(x, y))
    }
}
