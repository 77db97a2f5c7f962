//! Sketchpad Render Library
//!
//! Turns the drawing model into ordered draw items and defines the renderer
//! contract, with an SVG backend.

mod display_list;
mod renderer;

pub use display_list::{from_peniko, to_peniko, DisplayList, DrawItem, DrawRole, SELECTION_COLOR};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, SvgRenderer};
