use gloo::events::EventListener;
use web_sys::Element;

/// Calls `callback` on every window resize until the returned listener is
/// dropped. `None` outside a browser window.
pub fn on_window_resize(mut callback: impl FnMut() + 'static) -> Option<EventListener> {
    let window = web_sys::window()?;
    Some(EventListener::new(&window, "resize", move |_| callback()))
}

/// Client size of `element`, or `None` while it is not laid out yet.
pub fn element_size(element: &Element) -> Option<(u32, u32)> {
    let (width, height) = (element.client_width(), element.client_height());
    if width <= 0 || height <= 0 {
        return None;
    }
    Some((width as u32, height as u32))
}

/// Pointer movement below this many pixels is still a click, not a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Tracks a primary-button drag so the click ending it can be told apart
/// from a plain click.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragTracker {
    last: Option<(f64, f64)>,
    origin: Option<(f64, f64)>,
    dragged: bool,
}

impl DragTracker {
    pub fn press(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.last = Some((x, y));
        self.dragged = false;
    }

    /// Delta since the previous move while a drag is under way.
    pub fn moved(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (ox, oy) = self.origin?;
        let (lx, ly) = self.last?;
        if !self.dragged && (x - ox).hypot(y - oy) < DRAG_THRESHOLD_PX {
            return None;
        }
        self.dragged = true;
        self.last = Some((x, y));
        Some((x - lx, y - ly))
    }

    pub fn release(&mut self) {
        self.origin = None;
        self.last = None;
    }

    /// Pointer left the element: no click will follow, so nothing is
    /// suppressed.
    pub fn cancel(&mut self) {
        self.release();
        self.dragged = false;
    }

    /// True once for the click that finishes a drag.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.dragged)
    }
}
