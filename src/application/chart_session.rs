use crate::config::ChartConfig;
use crate::domain::{
    chart::{Chart, ScreenPos, ZoneFrame, ZoneGeometry},
    errors::AppError,
    events::{ChartEvent, EventBus, SubscriptionId, ViewChange},
    logging::LogComponent,
    market_data::CandleSeries,
    markers::{MarkerKind, MarkerPlacement, MarkerSet, PlacementOutcome, PlacementState, RiskReward},
};
use crate::{log_debug, log_info, log_trace, log_warn};
use futures::future::{AbortHandle, AbortRegistration};

/// One interactive chart: data, view, marker placement and the listeners
/// that repaint it.
///
/// Every mutation publishes a [`ChartEvent`] carrying the zones to show, so
/// handlers never need to reach back into the session.
#[derive(Debug)]
pub struct ChartSession {
    chart: Chart,
    placement: MarkerPlacement,
    events: EventBus,
    pointer: Option<ScreenPos>,
    pending_fetch: Option<AbortHandle>,
    disposed: bool,
}

impl ChartSession {
    pub fn new(ratio: RiskReward, width: u32, height: u32) -> Self {
        Self {
            chart: Chart::new(width, height),
            placement: MarkerPlacement::new(ratio),
            events: EventBus::new(),
            pointer: None,
            pending_fetch: None,
            disposed: false,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Result<Self, AppError> {
        Ok(Self::new(config.risk_reward()?, config.chart.width, config.chart.height))
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn placement(&self) -> &MarkerPlacement {
        &self.placement
    }

    pub fn markers(&self) -> Option<&MarkerSet> {
        self.placement.markers()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.len()
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Replace the data. Markers refer to the old bars, so they are dropped,
    /// and a fetch still in flight is aborted so it cannot overwrite this data.
    pub fn load(&mut self, series: CandleSeries) {
        if self.ignore_disposed("load") {
            return;
        }
        if let Some(handle) = self.pending_fetch.take() {
            log_debug!(LogComponent::Application("ChartSession"), "load supersedes pending fetch");
            handle.abort();
        }
        log_info!(LogComponent::Application("ChartSession"), "loading {} candles", series.len());
        self.chart.set_historical_data(series);
        self.placement.reset();
        self.events.publish(&ChartEvent::DataLoaded {
            series: self.chart.series().clone(),
            viewport: self.chart.viewport.clone(),
        });
        self.publish_markers();
    }

    /// A click on the chart at pixel `pos`; `None` once disposed.
    pub fn click(&mut self, pos: ScreenPos) -> Option<PlacementOutcome> {
        if self.ignore_disposed("click") {
            return None;
        }
        let mapped = self.chart.mapper().pixel_to_domain(pos);
        let outcome = self.placement.click(mapped, pos);
        if !matches!(outcome, PlacementOutcome::Rejected(_)) {
            self.publish_markers();
        }
        Some(outcome)
    }

    /// Pointer moved over the chart. Returns the preview set while the
    /// second point is pending.
    pub fn pointer_moved(&mut self, pos: ScreenPos) -> Option<MarkerSet> {
        if self.disposed {
            return None;
        }
        self.pointer = Some(pos);
        let zones = self.zone_frame();
        self.events.publish(&ChartEvent::CrosshairMoved { position: Some(pos), zones });
        zones.filter(|frame| frame.preview).map(|frame| frame.markers)
    }

    pub fn pointer_left(&mut self) {
        if self.disposed {
            return;
        }
        self.pointer = None;
        let zones = self.zone_frame();
        self.events.publish(&ChartEvent::CrosshairMoved { position: None, zones });
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        if self.ignore_disposed("pan") {
            return;
        }
        self.chart.pan(delta_x, delta_y);
        self.publish_view(ViewChange::Pan);
    }

    /// Drag the chart with the pointer now at `pos`; a pending preview keeps
    /// following the cursor.
    pub fn drag(&mut self, delta_x: f64, delta_y: f64, pos: ScreenPos) {
        if self.ignore_disposed("drag") {
            return;
        }
        self.pointer = Some(pos);
        self.chart.pan(delta_x, delta_y);
        self.publish_view(ViewChange::Pan);
    }

    /// Zoom the time axis around pixel column `x`.
    pub fn zoom(&mut self, factor: f64, x: f64) {
        if self.ignore_disposed("zoom") {
            return;
        }
        let width = self.chart.viewport.width.max(1) as f64;
        self.chart.zoom(factor, (x / width).clamp(0.0, 1.0));
        self.publish_view(ViewChange::Zoom);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.ignore_disposed("resize") {
            return;
        }
        if (self.chart.viewport.width, self.chart.viewport.height) == (width, height) {
            return;
        }
        log_debug!(LogComponent::Application("ChartSession"), "resize to {}x{}", width, height);
        self.chart.resize(width, height);
        self.publish_view(ViewChange::Resize);
    }

    /// Arm a level button: the next click sets `kind` directly.
    pub fn arm(&mut self, kind: MarkerKind) {
        if self.ignore_disposed("arm") {
            return;
        }
        self.placement.arm(kind);
    }

    /// Cancel an armed level button without placing anything.
    pub fn disarm(&mut self) {
        if self.ignore_disposed("disarm") {
            return;
        }
        self.placement.disarm();
    }

    pub fn reset_markers(&mut self) {
        if self.ignore_disposed("reset") {
            return;
        }
        self.placement.reset();
        self.publish_markers();
    }

    /// Zones to paint right now: the live preview while the second point
    /// follows the pointer, otherwise the committed set.
    pub fn zone_frame(&self) -> Option<ZoneFrame> {
        let mapper = self.chart.mapper();
        let time_scale = mapper.time_scale();

        let (markers, left, right, preview) = match self.placement.state() {
            PlacementState::Idle => return None,
            PlacementState::Complete(set) => {
                let left = time_scale.time_to_x(set.stop_loss.time).ok()?;
                let right = time_scale.time_to_x(set.take_profit.time).ok()?;
                (*set, left, right, false)
            }
            PlacementState::AwaitingSecondPoint { stop_loss, anchor } => {
                let pointer = self.pointer?;
                let point = mapper.pixel_to_domain(pointer).ok()?;
                let set = self.placement.preview(&point)?;
                let left = time_scale.time_to_x(stop_loss.time).unwrap_or(anchor.x);
                (set, left, pointer.x, true)
            }
        };

        match ZoneGeometry::compute(&markers, left, right, mapper.price_projection()) {
            Ok(geometry) => Some(ZoneFrame { markers, geometry, preview }),
            Err(e) => {
                log_trace!(LogComponent::Application("ChartSession"), "zones not projectable: {}", e);
                None
            }
        }
    }

    /// Register a new data fetch, aborting any earlier one still running.
    pub fn begin_fetch(&mut self) -> Option<AbortRegistration> {
        if self.ignore_disposed("fetch") {
            return None;
        }
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.pending_fetch.replace(handle) {
            log_debug!(LogComponent::Application("ChartSession"), "superseding pending fetch");
            previous.abort();
        }
        Some(registration)
    }

    pub fn finish_fetch(&mut self) {
        self.pending_fetch = None;
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// Tear down: abort in-flight work and drop every listener. Later calls
    /// are ignored.
    pub fn destroy(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(handle) = self.pending_fetch.take() {
            handle.abort();
        }
        self.events.clear();
        self.pointer = None;
        self.disposed = true;
        log_info!(LogComponent::Application("ChartSession"), "session destroyed");
    }

    fn ignore_disposed(&self, operation: &str) -> bool {
        if self.disposed {
            log_warn!(LogComponent::Application("ChartSession"), "{} on a destroyed session ignored", operation);
        }
        self.disposed
    }

    fn publish_markers(&mut self) {
        let event = ChartEvent::MarkersChanged { markers: self.placement.markers().copied(), zones: self.zone_frame() };
        self.events.publish(&event);
    }

    fn publish_view(&mut self, change: ViewChange) {
        let event = ChartEvent::ViewportChanged {
            change,
            viewport: self.chart.viewport.clone(),
            zones: self.zone_frame(),
        };
        self.events.publish(&event);
    }
}
