use crate::domain::{
    chart::{Color, PriceProjection, Viewport},
    errors::InfrastructureError,
    events::ChartEvent,
    logging::LogComponent,
    market_data::{Candle, CandleSeries},
};
use crate::{log_debug, log_error};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Precomputed pixel geometry of one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleGeometry {
    pub x: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub body_width: f64,
    pub bullish: bool,
}

const BODY_WIDTH_RATIO: f64 = 0.6;
const PRICE_LABELS: usize = 5;
const MIN_BODY_HEIGHT_PX: f64 = 1.0;

/// Geometry for bar `index`; `None` when the view's price axis is degenerate.
pub fn candle_geometry(index: usize, candle: &Candle, viewport: &Viewport) -> Option<CandleGeometry> {
    let x = viewport.logical_to_x(index as f64);
    let y = |price: f64| viewport.price_to_y(price).ok();

    let open_y = y(candle.ohlc.open.value())?;
    let close_y = y(candle.ohlc.close.value())?;

    Some(CandleGeometry {
        x,
        high_y: y(candle.ohlc.high.value())?,
        low_y: y(candle.ohlc.low.value())?,
        body_top: open_y.min(close_y),
        body_height: (open_y - close_y).abs().max(MIN_BODY_HEIGHT_PX),
        body_width: (viewport.bar_width() * BODY_WIDTH_RATIO).max(1.0),
        bullish: candle.is_bullish(),
    })
}

/// Canvas 2D renderer for the candle layer
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, InfrastructureError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| InfrastructureError::BrowserApi("failed to get 2D context".to_string()))?
            .ok_or_else(|| InfrastructureError::BrowserApi("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| InfrastructureError::BrowserApi("failed to cast to 2D context".to_string()))?;
        Ok(Self { canvas, context })
    }

    /// Draw the visible part of `series`.
    pub fn render(&self, series: &CandleSeries, viewport: &Viewport) -> Result<(), InfrastructureError> {
        if self.canvas.width() != viewport.width || self.canvas.height() != viewport.height {
            self.canvas.set_width(viewport.width);
            self.canvas.set_height(viewport.height);
        }

        let (width, height) = (viewport.width as f64, viewport.height as f64);
        let ctx = &self.context;
        ctx.set_fill_style(&JsValue::from(Color::BACKGROUND.to_css()));
        ctx.fill_rect(0.0, 0.0, width, height);

        if series.is_empty() {
            return self.render_no_data_message(viewport);
        }

        let first = viewport.logical_from.floor().max(0.0) as usize;
        let last = (viewport.logical_to.ceil().max(0.0) as usize).min(series.len().saturating_sub(1));

        let mut drawn = 0usize;
        for index in first..=last {
            let Some(candle) = series.get(index) else {
                continue;
            };
            if let Some(geometry) = candle_geometry(index, candle, viewport) {
                self.draw_candle(&geometry);
                drawn += 1;
            }
        }

        self.render_price_scale(viewport)?;

        log_debug!(LogComponent::Infrastructure("CanvasRenderer"), "rendered {} of {} candles", drawn, series.len());
        Ok(())
    }

    fn draw_candle(&self, g: &CandleGeometry) {
        let ctx = &self.context;
        let color = JsValue::from(if g.bullish { Color::BULL } else { Color::BEAR }.to_css());

        ctx.set_stroke_style(&color);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(g.x, g.high_y);
        ctx.line_to(g.x, g.low_y);
        ctx.stroke();

        ctx.set_fill_style(&color);
        ctx.fill_rect(g.x - g.body_width / 2.0, g.body_top, g.body_width, g.body_height);
    }

    fn render_price_scale(&self, viewport: &Viewport) -> Result<(), InfrastructureError> {
        let ctx = &self.context;
        ctx.set_fill_style(&JsValue::from(Color::TEXT.to_css()));
        ctx.set_font("11px sans-serif");

        let step = viewport.height as f64 / PRICE_LABELS as f64;
        for i in 0..PRICE_LABELS {
            let y = step * (i as f64 + 0.5);
            let Ok(price) = viewport.y_to_price(y) else {
                continue;
            };
            ctx.fill_text(&format!("{price:.2}"), viewport.width as f64 - 60.0, y)
                .map_err(|e| InfrastructureError::Rendering(format!("{e:?}")))?;
        }
        Ok(())
    }

    fn render_no_data_message(&self, viewport: &Viewport) -> Result<(), InfrastructureError> {
        let ctx = &self.context;
        ctx.set_fill_style(&JsValue::from(Color::TEXT.to_css()));
        ctx.set_font("14px sans-serif");
        ctx.fill_text("No chart data - loading...", 20.0, viewport.height as f64 / 2.0)
            .map_err(|e| InfrastructureError::Rendering(format!("{e:?}")))
    }
}

/// Event handler repainting the candle layer whenever data or view change.
pub fn candle_handler(renderer: Rc<RefCell<CanvasRenderer>>) -> impl FnMut(&ChartEvent) + 'static {
    let mut series = CandleSeries::default();
    move |event: &ChartEvent| {
        let viewport = match event {
            ChartEvent::DataLoaded { series: loaded, viewport } => {
                series = loaded.clone();
                viewport
            }
            ChartEvent::ViewportChanged { viewport, .. } => viewport,
            _ => return,
        };
        let Ok(renderer) = renderer.try_borrow() else {
            return;
        };
        if let Err(e) = renderer.render(&series, viewport) {
            log_error!(LogComponent::Infrastructure("CanvasRenderer"), "render failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{Ohlc, Price, Timestamp};

    fn candle(o: f64, h: f64, l: f64, c: f64) -> Candle {
        Candle::new(
            Timestamp::new(60),
            Ohlc::new(Price::new(o), Price::new(h), Price::new(l), Price::new(c)),
        )
    }

    #[test]
    fn geometry_follows_viewport() {
        let viewport = Viewport {
            logical_from: -0.5,
            logical_to: 1.5,
            min_price: 0.0,
            max_price: 100.0,
            width: 200,
            height: 100,
        };
        let g = candle_geometry(1, &candle(40.0, 80.0, 20.0, 60.0), &viewport).unwrap();
        assert!((g.x - 150.0).abs() < 1e-9);
        assert!((g.high_y - 20.0).abs() < 1e-9);
        assert!((g.low_y - 80.0).abs() < 1e-9);
        assert!((g.body_top - 40.0).abs() < 1e-9);
        assert!((g.body_height - 20.0).abs() < 1e-9);
        assert!((g.body_width - 60.0).abs() < 1e-9);
        assert!(g.bullish);
    }

    #[test]
    fn doji_keeps_a_visible_body() {
        let viewport = Viewport { min_price: 0.0, max_price: 100.0, ..Viewport::new(100, 100) };
        let g = candle_geometry(0, &candle(50.0, 60.0, 40.0, 50.0), &viewport).unwrap();
        assert_eq!(g.body_height, MIN_BODY_HEIGHT_PX);
    }
}
