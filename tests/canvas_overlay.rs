#![cfg(target_arch = "wasm32")]

use trade_zones_wasm::domain::chart::{Color, PixelRect, ScreenPos, Viewport, ZoneFrame, ZoneGeometry};
use trade_zones_wasm::domain::market_data::{Price, Timestamp};
use trade_zones_wasm::domain::markers::{MarkerSet, PricePoint, RiskReward};
use trade_zones_wasm::infrastructure::rendering::{CanvasOverlay, OverlaySurface, ZoneRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    document.create_element("canvas").unwrap().dyn_into::<HtmlCanvasElement>().unwrap()
}

#[wasm_bindgen_test]
fn overlay_follows_chart_size() {
    let mut overlay = CanvasOverlay::new(canvas()).unwrap();
    overlay.resize(640, 360);
    assert_eq!(overlay.size(), (640, 360));
}

#[wasm_bindgen_test]
fn zones_paint_onto_a_real_canvas() {
    let viewport = Viewport { min_price: 0.0, max_price: 256.0, ..Viewport::new(400, 256) };
    let point = |price: f64, time: u64| PricePoint::new(Price::new(price), Timestamp::new(time));
    let markers = MarkerSet::from_points(point(80.0, 1), point(100.0, 2), RiskReward::default());
    let geometry = ZoneGeometry::compute(&markers, 50.0, 150.0, &viewport).unwrap();

    let mut overlay = CanvasOverlay::new(canvas()).unwrap();
    overlay.resize(400, 256);
    ZoneRenderer::default().render(&mut overlay, Some(&ZoneFrame { markers, geometry, preview: false }));
    overlay.fill_rect(&PixelRect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 }, Color::ENTRY);
    overlay.line(ScreenPos::new(0.0, 0.0), ScreenPos::new(1.0, 1.0), Color::ENTRY);
    overlay.clear();
    assert_eq!(overlay.size(), (400, 256));
}
