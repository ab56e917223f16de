use std::cell::RefCell;
use std::rc::Rc;

use trade_zones_wasm::application::ChartSession;
use trade_zones_wasm::domain::chart::{
    MIN_ZONE_WIDTH_PX, PixelRect, PriceProjection, ScreenPos, Viewport, ZoneFrame, ZoneGeometry,
};
use trade_zones_wasm::domain::market_data::{Price, Timestamp, sample_series};
use trade_zones_wasm::domain::markers::{MarkerSet, PlacementOutcome, PricePoint, RiskReward};
use trade_zones_wasm::infrastructure::rendering::{DrawCommand, RecordingSurface, ZoneRenderer, overlay_handler};

fn point(price: f64, time: u64) -> PricePoint {
    PricePoint::new(Price::new(price), Timestamp::new(time))
}

/// One pixel per price unit: `y = 256 - price`.
fn unit_viewport() -> Viewport {
    Viewport { min_price: 0.0, max_price: 256.0, ..Viewport::new(400, 256) }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Pixel position of `price` in the column of bar `bar`.
fn click_at(session: &ChartSession, price: f64, bar: usize) -> ScreenPos {
    let viewport = &session.chart().viewport;
    ScreenPos::new(viewport.logical_to_x(bar as f64), viewport.price_to_y(price).unwrap())
}

#[test]
fn geometry_spans_stop_entry_and_target() {
    let set = MarkerSet::from_points(point(80.0, 1), point(100.0, 2), RiskReward::default());
    let geometry = ZoneGeometry::compute(&set, 50.0, 150.0, &unit_viewport()).unwrap();

    assert_eq!(geometry.risk, PixelRect { x: 50.0, y: 166.0, width: 100.0, height: 10.0 });
    assert_eq!(geometry.reward, PixelRect { x: 50.0, y: 156.0, width: 100.0, height: 10.0 });
    assert_eq!(geometry.entry_y, 166.0);
}

#[test]
fn short_setup_and_reversed_columns_still_give_positive_rects() {
    let set = MarkerSet::from_points(point(100.0, 1), point(60.0, 2), RiskReward::default());
    let geometry = ZoneGeometry::compute(&set, 150.0, 50.0, &unit_viewport()).unwrap();

    for rect in [geometry.risk, geometry.reward] {
        assert!(rect.width > 0.0 && rect.height > 0.0);
        assert_eq!(rect.x, 50.0);
    }
    assert_eq!(geometry.risk.y, 156.0);
    assert_eq!(geometry.reward.bottom(), 196.0);
}

#[test]
fn same_bar_placement_gets_minimum_width() {
    let set = MarkerSet::from_points(point(80.0, 1), point(100.0, 1), RiskReward::default());
    let geometry = ZoneGeometry::compute(&set, 75.0, 75.0, &unit_viewport()).unwrap();
    assert_eq!(geometry.risk.width, MIN_ZONE_WIDTH_PX);
    assert_eq!(geometry.reward.width, MIN_ZONE_WIDTH_PX);
}

#[test]
fn render_clears_before_painting_and_labels_levels() {
    let set = MarkerSet::from_points(point(80.0, 1), point(100.0, 2), RiskReward::default());
    let geometry = ZoneGeometry::compute(&set, 50.0, 150.0, &unit_viewport()).unwrap();
    let frame = ZoneFrame { markers: set, geometry, preview: false };

    let renderer = ZoneRenderer::default();
    let mut surface = RecordingSurface::new(400, 256);
    renderer.render(&mut surface, Some(&frame));
    renderer.render(&mut surface, Some(&frame));

    assert_eq!(surface.commands[0], DrawCommand::Clear);
    assert_eq!(surface.clear_count(), 2);
    assert_eq!(surface.filled_rects(), vec![geometry.risk, geometry.reward]);

    let labels: Vec<String> = surface
        .current_frame()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["SL 80.00", "EP 90.00", "TP 100.00"]);
}

#[test]
fn render_without_frame_leaves_an_empty_overlay() {
    let mut surface = RecordingSurface::new(400, 256);
    ZoneRenderer::default().render(&mut surface, None);
    assert_eq!(surface.commands, vec![DrawCommand::Clear]);
}

#[test]
fn preview_uses_lighter_fill() {
    let set = MarkerSet::from_points(point(80.0, 1), point(100.0, 2), RiskReward::default());
    let geometry = ZoneGeometry::compute(&set, 50.0, 150.0, &unit_viewport()).unwrap();
    let renderer = ZoneRenderer::default();

    let alpha_of = |preview: bool| {
        let mut surface = RecordingSurface::new(400, 256);
        renderer.render(&mut surface, Some(&ZoneFrame { markers: set, geometry, preview }));
        surface
            .current_frame()
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillRect { color, .. } => Some(color.a),
                _ => None,
            })
            .unwrap()
    };
    assert!(alpha_of(true) < alpha_of(false));
}

#[test]
fn sample_data_two_clicks_paint_risk_and_reward_zones() {
    let mut session = ChartSession::new(RiskReward::default(), 800, 500);
    let surface = Rc::new(RefCell::new(RecordingSurface::new(800, 500)));
    session.subscribe(overlay_handler(surface.clone(), ZoneRenderer::default()));
    session.load(sample_series());

    let first = session.chart().series().candles()[0];
    assert_eq!(first.time, Timestamp::new(1701388800));
    assert_eq!(first.ohlc.open, Price::new(80.0));

    let outcome = session.click(click_at(&session, 80.0, 2)).unwrap();
    let PlacementOutcome::Started(stop_loss) = outcome else {
        panic!("first click should start a placement, got {outcome:?}");
    };
    assert!(approx(stop_loss.price.value(), 80.0));

    let outcome = session.click(click_at(&session, 100.0, 8)).unwrap();
    let PlacementOutcome::Completed(set) = outcome else {
        panic!("second click should complete, got {outcome:?}");
    };
    assert!(approx(set.stop_loss.price.value(), 80.0));
    assert!(approx(set.entry.price.value(), 90.0));
    assert!(approx(set.take_profit.price.value(), 100.0));

    let viewport = session.chart().viewport.clone();
    let rects = surface.borrow().filled_rects();
    assert_eq!(rects.len(), 2);
    let (risk, reward) = (rects[0], rects[1]);

    assert!(approx(risk.y, viewport.price_to_y(90.0).unwrap()));
    assert!(approx(risk.bottom(), viewport.price_to_y(80.0).unwrap()));
    assert!(approx(reward.y, viewport.price_to_y(100.0).unwrap()));
    assert!(approx(reward.bottom(), viewport.price_to_y(90.0).unwrap()));
    assert!(approx(risk.x, viewport.logical_to_x(2.0)));
    assert!(approx(risk.right(), viewport.logical_to_x(8.0)));
}

#[test]
fn pointer_moves_repaint_a_live_preview() {
    let mut session = ChartSession::new(RiskReward::default(), 800, 500);
    let surface = Rc::new(RefCell::new(RecordingSurface::new(800, 500)));
    session.subscribe(overlay_handler(surface.clone(), ZoneRenderer::default()));
    session.load(sample_series());

    assert_eq!(session.pointer_moved(click_at(&session, 90.0, 3)), None);
    assert!(surface.borrow().filled_rects().is_empty());

    session.click(click_at(&session, 80.0, 2));
    let preview = session.pointer_moved(click_at(&session, 110.0, 6)).unwrap();
    assert!(approx(preview.entry.price.value(), 95.0));
    assert!(session.markers().is_none());
    assert_eq!(surface.borrow().filled_rects().len(), 2);

    // Leaving the chart drops the preview but keeps the first point.
    session.pointer_left();
    assert!(surface.borrow().filled_rects().is_empty());
    assert!(session.zone_frame().is_none());
}
