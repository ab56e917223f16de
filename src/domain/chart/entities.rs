use super::coordinates::{CoordinateMapper, LinearPriceInterpolator, PriceProjection};
use super::value_objects::Viewport;
use crate::domain::market_data::CandleSeries;

/// Domain entity - chart: one candle series and the view onto it
#[derive(Debug, Clone)]
pub struct Chart {
    series: CandleSeries,
    pub viewport: Viewport,
    /// Price scale as last seen while the viewport could project.
    last_projection: Option<LinearPriceInterpolator>,
}

impl Chart {
    pub fn new(width: u32, height: u32) -> Self {
        Self { series: CandleSeries::default(), viewport: Viewport::new(width, height), last_projection: None }
    }

    /// Replace the whole history and fit the view to it.
    pub fn set_historical_data(&mut self, series: CandleSeries) {
        self.series = series;
        self.viewport.fit(&self.series);
        self.remember_projection();
    }

    pub fn series(&self) -> &CandleSeries {
        &self.series
    }

    /// Mapper for the current frame. While the viewport cannot project
    /// prices (a collapsed pane), the last good price scale stands in.
    pub fn mapper(&self) -> CoordinateMapper<'_> {
        match &self.last_projection {
            Some(fallback) if self.viewport.price_to_y(self.viewport.min_price).is_err() => {
                CoordinateMapper::with_price_projection(&self.series, &self.viewport, fallback)
            }
            _ => CoordinateMapper::new(&self.series, &self.viewport),
        }
    }

    pub fn zoom(&mut self, factor: f64, center_x: f64) {
        self.viewport.zoom(factor, center_x);
        self.remember_projection();
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.viewport.pan(delta_x, delta_y);
        self.remember_projection();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.remember_projection();
    }

    fn remember_projection(&mut self) {
        if let Ok(projection) = LinearPriceInterpolator::sample(&self.viewport, self.viewport.height) {
            self.last_projection = Some(projection);
        }
    }
}
