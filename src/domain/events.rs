use crate::domain::chart::{ScreenPos, Viewport, ZoneFrame};
use crate::domain::market_data::CandleSeries;
use crate::domain::logging::LogComponent;
use crate::domain::markers::MarkerSet;
use crate::log_trace;

/// What moved the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Pan,
    Zoom,
    Resize,
}

/// Events published by a chart session
#[derive(Debug, Clone)]
pub enum ChartEvent {
    DataLoaded {
        series: CandleSeries,
        viewport: Viewport,
    },
    ViewportChanged {
        change: ViewChange,
        viewport: Viewport,
        zones: Option<ZoneFrame>,
    },
    CrosshairMoved {
        position: Option<ScreenPos>,
        zones: Option<ZoneFrame>,
    },
    MarkersChanged {
        markers: Option<MarkerSet>,
        zones: Option<ZoneFrame>,
    },
}

impl ChartEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ChartEvent::DataLoaded { .. } => "DataLoaded",
            ChartEvent::ViewportChanged { .. } => "ViewportChanged",
            ChartEvent::CrosshairMoved { .. } => "CrosshairMoved",
            ChartEvent::MarkersChanged { .. } => "MarkersChanged",
        }
    }

    /// Zones to show after this event; `None` means an empty overlay.
    pub fn zones(&self) -> Option<&ZoneFrame> {
        match self {
            ChartEvent::DataLoaded { .. } => None,
            ChartEvent::ViewportChanged { zones, .. }
            | ChartEvent::CrosshairMoved { zones, .. }
            | ChartEvent::MarkersChanged { zones, .. } => zones.as_ref(),
        }
    }

    /// Viewport carried by the event, if the view itself changed.
    pub fn viewport(&self) -> Option<&Viewport> {
        match self {
            ChartEvent::DataLoaded { viewport, .. } | ChartEvent::ViewportChanged { viewport, .. } => Some(viewport),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&ChartEvent)>;

/// Single-threaded publish/subscribe for chart events
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ChartEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn publish(&mut self, event: &ChartEvent) {
        log_trace!(LogComponent::Domain("Events"), "{} -> {} subscribers", event.event_type(), self.handlers.len());
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("subscribers", &self.handlers.len()).finish()
    }
}
