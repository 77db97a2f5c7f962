//! Tool system: which tool is active and what the current gesture is doing.

use crate::shapes::{Circle, Freehand, Line, Rectangle, Shape, ShapeId, ShapeStyle};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Select,
    #[default]
    #[serde(rename = "rect", alias = "rectangle")]
    Rectangle,
    Circle,
    Line,
    Pencil,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Pencil,
        ToolKind::Eraser,
    ];

    /// Name used by the tool palette.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Rectangle => "rect",
            ToolKind::Circle => "circle",
            ToolKind::Line => "line",
            ToolKind::Pencil => "pencil",
            ToolKind::Eraser => "eraser",
        }
    }

    /// Whether pressing on empty canvas with this tool starts a new shape.
    pub fn creates_shapes(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Circle | ToolKind::Line | ToolKind::Pencil
        )
    }

    /// Create the degenerate shape a gesture with this tool starts from.
    pub fn start_shape(self, id: ShapeId, at: Point, style: ShapeStyle) -> Option<Shape> {
        let mut shape = match self {
            ToolKind::Rectangle => Shape::Rectangle(Rectangle::new(id, at, 0.0, 0.0)),
            ToolKind::Circle => Shape::Circle(Circle::new(id, at, 0.0)),
            ToolKind::Line => Shape::Line(Line::new(id, at, at)),
            ToolKind::Pencil => Shape::Freehand(Freehand::new(id, at)),
            ToolKind::Select | ToolKind::Eraser => return None,
        };
        *shape.style_mut() = style;
        Some(shape)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tool name the palette does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool: {0:?}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(ToolKind::Select),
            "rect" | "rectangle" => Ok(ToolKind::Rectangle),
            "circle" => Ok(ToolKind::Circle),
            "line" => Ok(ToolKind::Line),
            "pencil" => Ok(ToolKind::Pencil),
            "eraser" => Ok(ToolKind::Eraser),
            _ => Err(UnknownTool(s.to_string())),
        }
    }
}

/// How a shape being moved follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grab {
    /// Reference point = pointer − offset (rectangles, circles).
    Offset(Vec2),
    /// Translate by the pointer delta since this position (lines, strokes).
    Pointer(Point),
}

impl Grab {
    /// How `shape` should be grabbed when pressed at `pointer`.
    pub fn for_shape(shape: &Shape, pointer: Point) -> Self {
        match shape.reference_point() {
            Some(reference) => Grab::Offset(pointer - reference),
            None => Grab::Pointer(pointer),
        }
    }

    /// Drag `shape` to follow the pointer now at `current`.
    pub fn drag(&mut self, shape: &mut Shape, current: Point) {
        match self {
            Grab::Offset(offset) => shape.set_reference_point(current - *offset),
            Grab::Pointer(last) => {
                shape.translate(current - *last);
                *last = current;
            }
        }
    }
}

/// State of the current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A new shape is being drawn out from `anchor`.
    Drawing { shape: ShapeId, anchor: Point },
    /// An existing shape is being dragged.
    Moving { shape: ShapeId, grab: Grab },
}

impl Interaction {
    /// The shape the gesture is acting on.
    pub fn shape(&self) -> Option<ShapeId> {
        match *self {
            Interaction::Idle => None,
            Interaction::Drawing { shape, .. } | Interaction::Moving { shape, .. } => Some(shape),
        }
    }
}

/// Reshape an in-progress shape for the pointer now at `current`.
///
/// Rectangles span anchor→pointer (signed), circles take the anchor
/// distance as radius, lines move their second endpoint and strokes
/// append the pointer unless `max_points` is reached. Returns whether the
/// shape changed.
pub fn extend_shape(shape: &mut Shape, anchor: Point, current: Point, max_points: Option<usize>) -> bool {
    match shape {
        Shape::Rectangle(rect) => {
            rect.position = anchor;
            rect.set_corner(current);
        }
        Shape::Circle(circle) => {
            circle.center = anchor;
            circle.set_rim(current);
        }
        Shape::Line(line) => line.set_end(current),
        Shape::Freehand(stroke) => {
            if max_points.is_some_and(|max| stroke.len() >= max) {
                log::debug!("stroke {} reached {} points, dropping input", stroke.id, stroke.len());
                return false;
            }
            stroke.add_point(current);
        }
    }
    true
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current gesture.
    pub interaction: Interaction,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.interaction, Interaction::Idle)
    }

    /// End the gesture, returning what it was.
    pub fn finish(&mut self) -> Interaction {
        std::mem::take(&mut self.interaction)
    }
}
