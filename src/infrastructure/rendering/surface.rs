use crate::domain::chart::{Color, PixelRect, ScreenPos};
use crate::domain::errors::InfrastructureError;
use crate::domain::logging::LogComponent;
use crate::log_warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Transparent drawing layer stacked on top of the candle canvas.
pub trait OverlaySurface {
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32);
    /// Wipe the whole surface.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: &PixelRect, color: Color);
    fn line(&mut self, from: ScreenPos, to: ScreenPos, color: Color);
    fn text(&mut self, text: &str, at: ScreenPos, color: Color);
}

/// Browser canvas implementation
pub struct CanvasOverlay {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasOverlay {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, InfrastructureError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| InfrastructureError::BrowserApi("failed to get 2D context".to_string()))?
            .ok_or_else(|| InfrastructureError::BrowserApi("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| InfrastructureError::BrowserApi("failed to cast to 2D context".to_string()))?;
        Ok(Self { canvas, context })
    }
}

impl OverlaySurface for CanvasOverlay {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: &PixelRect, color: Color) {
        self.context.set_fill_style(&JsValue::from(color.to_css()));
        self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn line(&mut self, from: ScreenPos, to: ScreenPos, color: Color) {
        self.context.set_stroke_style(&JsValue::from(color.to_css()));
        self.context.set_line_width(1.0);
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }

    fn text(&mut self, text: &str, at: ScreenPos, color: Color) {
        self.context.set_fill_style(&JsValue::from(color.to_css()));
        self.context.set_font("11px sans-serif");
        if let Err(e) = self.context.fill_text(text, at.x, at.y) {
            log_warn!(LogComponent::Infrastructure("Overlay"), "fill_text failed: {:?}", e);
        }
    }
}

/// What a [`RecordingSurface`] was asked to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    Clear,
    FillRect { rect: PixelRect, color: Color },
    Line { from: ScreenPos, to: ScreenPos, color: Color },
    Text { text: String, at: ScreenPos },
}

/// Surface that only records commands; lets rendering be checked off-browser.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    /// Commands issued since the last clear.
    pub fn current_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn filled_rects(&self) -> Vec<PixelRect> {
        self.current_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(&self) -> usize {
        self.commands.iter().filter(|c| **c == DrawCommand::Clear).count()
    }
}

impl OverlaySurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: &PixelRect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect: *rect, color });
    }

    fn line(&mut self, from: ScreenPos, to: ScreenPos, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, text: &str, at: ScreenPos, _color: Color) {
        self.commands.push(DrawCommand::Text { text: text.to_string(), at });
    }
}
