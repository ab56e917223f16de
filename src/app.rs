use leptos::html::{Canvas, Div};
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use futures::future::Abortable;
use wasm_bindgen_futures::spawn_local;

use crate::{
    application::{ChartSession, LoadHistoryUseCase, LoadedHistory},
    config::{BinanceConfig, ChartConfig},
    domain::{
        chart::ScreenPos,
        logging::LogComponent,
        markers::{MarkerKind, MarkerSet, PlacementOutcome, RejectReason, RiskReward},
    },
    event_utils::{DragTracker, element_size, on_window_resize},
    infrastructure::{
        http::BinanceRestClient,
        rendering::{CanvasOverlay, CanvasRenderer, ZoneRenderer, candle_handler, overlay_handler},
        services::{JsRandomPicker, now_ms},
    },
    log_debug, log_error, log_info,
};

type SharedSession = Rc<RefCell<ChartSession>>;

const ZOOM_STEP: f64 = 1.1;

/// Root component
#[component]
pub fn App(config: ChartConfig) -> impl IntoView {
    view! {
        <style>
            {r#"
            .trade-zones-app {
                font-family: -apple-system, BlinkMacSystemFont, sans-serif;
                background: #131722;
                color: #d1d4dc;
                min-height: 100vh;
                padding: 16px;
            }
            .toolbar { display: flex; gap: 8px; margin-bottom: 8px; }
            .toolbar button {
                background: #2a2e39; color: #d1d4dc; border: 1px solid #363a45;
                border-radius: 4px; padding: 4px 12px; cursor: pointer;
            }
            .toolbar button.armed { border-color: #2962ff; color: #ffffff; }
            .chart-wrapper { position: relative; width: 100%; }
            .chart-wrapper canvas { position: absolute; left: 0; top: 0; }
            .chart-wrapper canvas.overlay { cursor: crosshair; }
            .status { margin-top: 8px; font-size: 13px; }
            "#}
        </style>
        <div class="trade-zones-app">
            <ChartContainer config=config />
        </div>
    }
}

/// Candle canvas, zone overlay and the marker toolbar
#[component]
fn ChartContainer(config: ChartConfig) -> impl IntoView {
    let (status, set_status) = create_signal("Loading market data...".to_string());
    let (title, set_title) = create_signal(String::new());
    let (armed, set_armed) = create_signal::<Option<MarkerKind>>(None);

    let container_ref = create_node_ref::<Div>();
    let chart_ref = create_node_ref::<Canvas>();
    let overlay_ref = create_node_ref::<Canvas>();

    let session: SharedSession = Rc::new(RefCell::new(ChartSession::from_config(&config).unwrap_or_else(|e| {
        log_error!(LogComponent::Presentation("Chart"), "bad chart config ({}), using defaults", e);
        ChartSession::new(RiskReward::default(), config.chart.width, config.chart.height)
    })));
    let drag = Rc::new(RefCell::new(DragTracker::default()));
    let resize_listener = Rc::new(RefCell::new(None));

    let fallback_size = (config.chart.width, config.chart.height);
    let binance = config.binance.clone();

    // Wire renderers once both canvases exist, then load data.
    {
        let session = session.clone();
        let resize_listener = resize_listener.clone();
        let binance = binance.clone();
        let wired = Rc::new(std::cell::Cell::new(false));
        create_effect(move |_| {
            let (Some(chart_canvas), Some(overlay_canvas), Some(container)) =
                (chart_ref.get(), overlay_ref.get(), container_ref.get())
            else {
                return;
            };
            if wired.replace(true) {
                return;
            }

            let chart_canvas: &web_sys::HtmlCanvasElement = &chart_canvas;
            let overlay_canvas: &web_sys::HtmlCanvasElement = &overlay_canvas;
            let renderers = CanvasRenderer::new(chart_canvas.clone())
                .and_then(|candles| Ok((candles, CanvasOverlay::new(overlay_canvas.clone())?)));
            let (candles, overlay) = match renderers {
                Ok(pair) => pair,
                Err(e) => {
                    log_error!(LogComponent::Presentation("Chart"), "canvas setup failed: {}", e);
                    set_status.set(format!("Canvas unavailable: {e}"));
                    return;
                }
            };

            let container: &web_sys::HtmlDivElement = &container;
            let container = container.clone();
            {
                let mut session = session.borrow_mut();
                session.subscribe(candle_handler(Rc::new(RefCell::new(candles))));
                session.subscribe(overlay_handler(Rc::new(RefCell::new(overlay)), ZoneRenderer::default()));
                let (width, height) = element_size(&container).unwrap_or(fallback_size);
                session.resize(width, height);
            }

            let on_resize = {
                let session = session.clone();
                move || {
                    let width = element_size(&container).map(|(w, _)| w).unwrap_or(fallback_size.0);
                    if let Ok(mut session) = session.try_borrow_mut() {
                        let height = session.chart().viewport.height;
                        session.resize(width, height);
                    }
                }
            };
            *resize_listener.borrow_mut() = on_window_resize(on_resize);

            log_info!(LogComponent::Presentation("Chart"), "chart mounted");
            fetch_history(session.clone(), binance.clone(), set_status, set_title);
        });
    }

    {
        let session = session.clone();
        let resize_listener = resize_listener.clone();
        on_cleanup(move || {
            resize_listener.borrow_mut().take();
            if let Ok(mut session) = session.try_borrow_mut() {
                session.destroy();
            }
        });
    }

    let on_click = {
        let session = session.clone();
        let drag = drag.clone();
        move |ev: web_sys::MouseEvent| {
            if drag.borrow_mut().take_click_suppression() {
                return;
            }
            let pos = ScreenPos::new(ev.offset_x() as f64, ev.offset_y() as f64);
            let Ok(mut session) = session.try_borrow_mut() else {
                return;
            };
            if let Some(outcome) = session.click(pos) {
                set_status.set(describe_outcome(&outcome, session.placement().ratio()));
            }
            set_armed.set(session.placement().armed());
        }
    };

    let on_mouse_down = {
        let drag = drag.clone();
        move |ev: web_sys::MouseEvent| {
            if ev.button() == 0 {
                drag.borrow_mut().press(ev.offset_x() as f64, ev.offset_y() as f64);
            }
        }
    };

    let on_mouse_move = {
        let session = session.clone();
        let drag = drag.clone();
        move |ev: web_sys::MouseEvent| {
            let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
            let Ok(mut session) = session.try_borrow_mut() else {
                return;
            };
            match drag.borrow_mut().moved(x, y) {
                Some((dx, dy)) if (ev.buttons() & 1) == 1 => session.drag(dx, dy, ScreenPos::new(x, y)),
                _ => {
                    session.pointer_moved(ScreenPos::new(x, y));
                }
            }
        }
    };

    let on_mouse_up = {
        let drag = drag.clone();
        move |_ev: web_sys::MouseEvent| drag.borrow_mut().release()
    };

    let on_mouse_leave = {
        let session = session.clone();
        let drag = drag.clone();
        move |_ev: web_sys::MouseEvent| {
            drag.borrow_mut().cancel();
            if let Ok(mut session) = session.try_borrow_mut() {
                session.pointer_left();
            }
        }
    };

    let on_wheel = {
        let session = session.clone();
        move |ev: web_sys::WheelEvent| {
            ev.prevent_default();
            let factor = if ev.delta_y() < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
            if let Ok(mut session) = session.try_borrow_mut() {
                session.zoom(factor, ev.offset_x() as f64);
            }
        }
    };

    let level_button = {
        let session = session.clone();
        move |kind: MarkerKind| {
            let session = session.clone();
            view! {
                <button
                    class=move || if armed.get() == Some(kind) { "armed" } else { "" }
                    on:click=move |_| {
                        let Ok(mut session) = session.try_borrow_mut() else {
                            return;
                        };
                        if session.placement().armed() == Some(kind) {
                            session.disarm();
                            set_status.set(format!("{kind} button released"));
                        } else {
                            session.arm(kind);
                            set_status.set(format!("Click the chart to set {kind}"));
                        }
                        set_armed.set(session.placement().armed());
                    }
                >
                    {kind.to_string()}
                </button>
            }
        }
    };

    let on_reset = {
        let session = session.clone();
        move |_| {
            if let Ok(mut session) = session.try_borrow_mut() {
                session.reset_markers();
                set_armed.set(None);
                set_status.set("Click to place the stop-loss".to_string());
            }
        }
    };

    let on_random = {
        let session = session.clone();
        let binance = binance.clone();
        move |_| fetch_history(session.clone(), binance.clone(), set_status, set_title)
    };

    let on_sample = {
        let session = session.clone();
        move |_| show_history(&session, LoadedHistory::sample(), set_status, set_title)
    };

    view! {
        <div class="chart-container">
            <h2>{move || title.get()}</h2>
            <div class="toolbar">
                {level_button(MarkerKind::StopLoss)}
                {level_button(MarkerKind::Entry)}
                {level_button(MarkerKind::TakeProfit)}
                <button on:click=on_reset>"Reset"</button>
                <button on:click=on_random>"Random pair"</button>
                <button on:click=on_sample>"Sample data"</button>
            </div>
            <div
                class="chart-wrapper"
                node_ref=container_ref
                style=format!("height: {}px;", fallback_size.1)
            >
                <canvas node_ref=chart_ref />
                <canvas
                    class="overlay"
                    node_ref=overlay_ref
                    on:click=on_click
                    on:mousedown=on_mouse_down
                    on:mousemove=on_mouse_move
                    on:mouseup=on_mouse_up
                    on:mouseleave=on_mouse_leave
                    on:wheel=on_wheel
                />
            </div>
            <div class="status">{move || status.get()}</div>
        </div>
    }
}

/// Start a live fetch; the result replaces the chart data unless the
/// session aborted it first.
fn fetch_history(
    session: SharedSession,
    config: BinanceConfig,
    set_status: WriteSignal<String>,
    set_title: WriteSignal<String>,
) {
    let Some(registration) = session.try_borrow_mut().ok().and_then(|mut s| s.begin_fetch()) else {
        return;
    };
    set_status.set("Loading market data...".to_string());

    spawn_local(async move {
        let mut use_case = LoadHistoryUseCase::new(BinanceRestClient::from_config(&config), JsRandomPicker, config);
        let loaded = Abortable::new(async move { use_case.execute(now_ms()).await }, registration).await;
        match loaded {
            Ok(history) => {
                if let Ok(mut s) = session.try_borrow_mut() {
                    s.finish_fetch();
                }
                show_history(&session, history, set_status, set_title);
            }
            Err(_) => {
                log_debug!(LogComponent::Presentation("Chart"), "history fetch aborted");
            }
        }
    });
}

fn show_history(
    session: &SharedSession,
    history: LoadedHistory,
    set_status: WriteSignal<String>,
    set_title: WriteSignal<String>,
) {
    let Ok(mut session) = session.try_borrow_mut() else {
        return;
    };
    if session.is_disposed() {
        return;
    }
    set_title.set(history.origin.to_string());
    set_status.set(format!("{} candles loaded. Click to place the stop-loss", history.series.len()));
    session.load(history.series);
}

fn describe_markers(set: &MarkerSet, ratio: RiskReward) -> String {
    format!(
        "SL {} · EP {} · TP {} ({})",
        set.stop_loss.price, set.entry.price, set.take_profit.price, ratio
    )
}

fn describe_outcome(outcome: &PlacementOutcome, ratio: RiskReward) -> String {
    match outcome {
        PlacementOutcome::Started(stop_loss) => {
            format!("Stop-loss at {}. Click again for the take-profit", stop_loss.price)
        }
        PlacementOutcome::Completed(set) | PlacementOutcome::Updated(set) => describe_markers(set, ratio),
        PlacementOutcome::Rejected(RejectReason::OutOfRange(_)) => "Click inside the candles".to_string(),
        PlacementOutcome::Rejected(RejectReason::AlreadyComplete) => {
            "Placement complete. Reset or pick a level to change it".to_string()
        }
        PlacementOutcome::Rejected(RejectReason::MissingPrerequisite(kind)) => {
            format!("{kind} needs a complete placement first")
        }
    }
}
