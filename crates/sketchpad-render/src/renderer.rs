//! Renderer trait abstraction.

use crate::display_list::{DisplayList, DrawItem, SELECTION_COLOR};
use kurbo::Size;
use peniko::Color;
use sketchpad_core::Canvas;
use std::fmt::Write as _;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

impl From<std::fmt::Error> for RendererError {
    fn from(e: std::fmt::Error) -> Self {
        RendererError::RenderFailed(e.to_string())
    }
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: SELECTION_COLOR,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Display list for this frame, live preview included.
    pub fn display_list(&self) -> DisplayList {
        let canvas = self.canvas;
        DisplayList::build_with_color(
            canvas.drawing().shapes(),
            canvas.selection(),
            canvas.in_progress(),
            self.selection_color,
        )
    }
}

/// Trait for rendering backends.
///
/// Called after every handler that reports a change.
pub trait Renderer: Send + Sync {
    /// Build the output for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Renders frames to an SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    svg: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last frame built.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn take_svg(&mut self) -> String {
        std::mem::take(&mut self.svg)
    }

    fn write_item(&mut self, item: &DrawItem) -> RenderResult<()> {
        let (stroke, stroke_opacity) = css_color(item.stroke);
        write!(self.svg, r#"<path d="{}""#, item.path.to_svg())?;
        match item.fill {
            Some(fill) => {
                let (fill, fill_opacity) = css_color(fill);
                write!(self.svg, r#" fill="{fill}""#)?;
                if fill_opacity < 1.0 {
                    write!(self.svg, r#" fill-opacity="{fill_opacity:.3}""#)?;
                }
            }
            None => self.svg.push_str(r#" fill="none""#),
        }
        write!(self.svg, r#" stroke="{stroke}" stroke-width="{}""#, item.stroke_width)?;
        if stroke_opacity < 1.0 {
            write!(self.svg, r#" stroke-opacity="{stroke_opacity:.3}""#)?;
        }
        if let Some([on, off]) = item.dash {
            write!(self.svg, r#" stroke-dasharray="{on} {off}""#)?;
        }
        self.svg.push_str("/>\n");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let Size { width, height } = ctx.viewport_size;
        if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
            return Err(RendererError::Surface(format!(
                "invalid viewport {width}x{height}"
            )));
        }

        self.svg.clear();
        writeln!(
            self.svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        let (background, _) = css_color(self.background_color(ctx));
        writeln!(
            self.svg,
            r#"<rect width="{width}" height="{height}" fill="{background}"/>"#
        )?;

        let list = ctx.display_list();
        for item in list.iter() {
            self.write_item(item)?;
        }
        self.svg.push_str("</svg>\n");
        log::debug!("rendered {} draw items to SVG", list.len());
        Ok(())
    }
}

/// `#rrggbb` plus opacity in `0..=1`.
fn css_color(color: Color) -> (String, f32) {
    let c = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
        f32::from(c.a) / 255.0,
    )
}
