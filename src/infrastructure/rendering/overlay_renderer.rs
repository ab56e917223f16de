use super::surface::OverlaySurface;
use crate::domain::chart::{Color, ScreenPos, ZoneFrame};
use crate::domain::events::ChartEvent;
use crate::domain::logging::LogComponent;
use crate::domain::markers::MarkerKind;
use crate::log_trace;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;

/// Paints risk/reward zones onto an overlay surface
#[derive(Debug, Clone)]
pub struct ZoneRenderer {
    pub risk_color: Color,
    pub reward_color: Color,
    pub entry_color: Color,
    pub label_color: Color,
    pub fill_alpha: f32,
    pub preview_alpha: f32,
}

impl Default for ZoneRenderer {
    fn default() -> Self {
        Self {
            risk_color: Color::BEAR,
            reward_color: Color::BULL,
            entry_color: Color::ENTRY,
            label_color: Color::TEXT,
            fill_alpha: 0.25,
            preview_alpha: 0.15,
        }
    }
}

const LABEL_OFFSET_PX: f64 = 4.0;

impl ZoneRenderer {
    /// Full repaint: the previous frame is always wiped first.
    pub fn render(&self, surface: &mut dyn OverlaySurface, frame: Option<&ZoneFrame>) {
        surface.clear();

        let Some(frame) = frame else {
            return;
        };

        let alpha = if frame.preview { self.preview_alpha } else { self.fill_alpha };
        let geometry = &frame.geometry;
        surface.fill_rect(&geometry.risk, self.risk_color.with_alpha(alpha));
        surface.fill_rect(&geometry.reward, self.reward_color.with_alpha(alpha));

        let left = geometry.risk.x;
        let right = geometry.risk.right();
        surface.line(ScreenPos::new(left, geometry.entry_y), ScreenPos::new(right, geometry.entry_y), self.entry_color);

        for kind in MarkerKind::iter() {
            let y = match kind {
                MarkerKind::StopLoss => risk_edge(geometry.risk.y, geometry.risk.bottom(), geometry.entry_y),
                MarkerKind::Entry => geometry.entry_y,
                MarkerKind::TakeProfit => risk_edge(geometry.reward.y, geometry.reward.bottom(), geometry.entry_y),
            };
            let label = format!("{} {}", kind, frame.markers.level(kind).price);
            surface.text(&label, ScreenPos::new(right + LABEL_OFFSET_PX, y), self.label_color);
        }

        log_trace!(
            LogComponent::Infrastructure("Overlay"),
            "zones painted (preview: {})",
            frame.preview
        );
    }
}

/// The edge of a zone that is not the entry line.
fn risk_edge(top: f64, bottom: f64, entry_y: f64) -> f64 {
    if (top - entry_y).abs() < (bottom - entry_y).abs() { bottom } else { top }
}

/// Event handler keeping an overlay in lockstep with a chart session: resizes
/// the surface with the chart and repaints on every view, pointer or marker
/// change.
pub fn overlay_handler<S>(surface: Rc<RefCell<S>>, renderer: ZoneRenderer) -> impl FnMut(&ChartEvent) + 'static
where
    S: OverlaySurface + 'static,
{
    move |event: &ChartEvent| {
        let Ok(mut surface) = surface.try_borrow_mut() else {
            return;
        };
        if let Some(viewport) = event.viewport() {
            if surface.size() != (viewport.width, viewport.height) {
                surface.resize(viewport.width, viewport.height);
            }
        }
        renderer.render(&mut *surface, event.zones());
    }
}
