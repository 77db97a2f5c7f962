//! Flattening a drawing into ordered draw items.

use kurbo::{BezPath, Shape as _};
use peniko::Color;
use sketchpad_core::shapes::{SerializableColor, Shape, ShapeId};
use sketchpad_core::Canvas;

/// Default selection highlight color.
pub const SELECTION_COLOR: Color = Color::from_rgba8(59, 130, 246, 255);

/// How far the highlight of a closed shape sits outside its bounds.
const OUTLINE_MARGIN: f64 = 4.0;
const OUTLINE_WIDTH: f64 = 1.5;
const OUTLINE_DASH: [f64; 2] = [4.0, 2.0];
/// Open shapes are highlighted by tracing them with a wider dashed stroke.
const TRACE_EXTRA_WIDTH: f64 = 2.0;
const TRACE_DASH: [f64; 2] = [10.0, 5.0];

pub fn to_peniko(color: SerializableColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

pub fn from_peniko(color: Color) -> SerializableColor {
    let rgba = color.to_rgba8();
    SerializableColor::new(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Why an item is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawRole {
    /// A committed shape.
    Shape,
    /// The shape being drawn by the current gesture.
    Preview,
    /// Highlight around the selected shape.
    SelectionOutline,
}

/// One path to fill and/or stroke.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub shape: ShapeId,
    pub role: DrawRole,
    pub path: BezPath,
    pub stroke: Color,
    pub stroke_width: f64,
    /// On/off lengths; `None` for a solid stroke.
    pub dash: Option<[f64; 2]>,
    pub fill: Option<Color>,
}

/// Draw items in paint order. Selection outlines come last.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    items: Vec<DrawItem>,
}

impl DisplayList {
    /// Build the display list for `shapes` (back to front).
    pub fn build(shapes: &[Shape], selection: Option<ShapeId>, in_progress: Option<ShapeId>) -> Self {
        Self::build_with_color(shapes, selection, in_progress, SELECTION_COLOR)
    }

    pub fn from_canvas(canvas: &Canvas) -> Self {
        Self::build(canvas.drawing().shapes(), canvas.selection(), canvas.in_progress())
    }

    pub(crate) fn build_with_color(
        shapes: &[Shape],
        selection: Option<ShapeId>,
        in_progress: Option<ShapeId>,
        selection_color: Color,
    ) -> Self {
        let mut items: Vec<DrawItem> = shapes
            .iter()
            .map(|shape| {
                let role = if in_progress == Some(shape.id()) {
                    DrawRole::Preview
                } else {
                    DrawRole::Shape
                };
                shape_item(shape, role)
            })
            .collect();

        if let Some(selected) = selection.and_then(|id| shapes.iter().find(|s| s.id() == id)) {
            items.push(selection_outline(selected, selection_color));
        }

        log::trace!("display list: {} items for {} shapes", items.len(), shapes.len());
        Self { items }
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The selection highlight, if a shape is selected.
    pub fn selection_outline(&self) -> Option<&DrawItem> {
        self.items.iter().find(|i| i.role == DrawRole::SelectionOutline)
    }
}

fn is_closed(shape: &Shape) -> bool {
    matches!(shape, Shape::Rectangle(_) | Shape::Circle(_))
}

fn shape_item(shape: &Shape, role: DrawRole) -> DrawItem {
    let style = shape.style();
    // Lines and strokes are never filled, whatever their fill color says.
    let fill = if is_closed(shape) {
        style.fill().map(to_peniko)
    } else {
        None
    };
    DrawItem {
        shape: shape.id(),
        role,
        path: shape.to_path(),
        stroke: to_peniko(style.stroke_color),
        stroke_width: style.stroke_width.as_f64(),
        dash: style.dash.lengths(),
        fill,
    }
}

fn selection_outline(shape: &Shape, color: Color) -> DrawItem {
    let (path, stroke_width, dash) = if let Shape::Circle(circle) = shape {
        let outline = kurbo::Circle::new(circle.center, circle.radius + OUTLINE_MARGIN);
        (outline.to_path(0.1), OUTLINE_WIDTH, OUTLINE_DASH)
    } else if is_closed(shape) {
        let outline = shape.bounds().inflate(OUTLINE_MARGIN, OUTLINE_MARGIN);
        (outline.to_path(0.1), OUTLINE_WIDTH, OUTLINE_DASH)
    } else {
        (
            shape.to_path(),
            shape.style().stroke_width.as_f64() + TRACE_EXTRA_WIDTH,
            TRACE_DASH,
        )
    };
    DrawItem {
        shape: shape.id(),
        role: DrawRole::SelectionOutline,
        path,
        stroke: color,
        stroke_width,
        dash: Some(dash),
        fill: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};
    use sketchpad_core::shapes::{Circle, Freehand, Line, Rectangle};
    use sketchpad_core::ToolKind;

    fn rgba(color: Color) -> (u8, u8, u8, u8) {
        let c = color.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    fn sample() -> Vec<Shape> {
        let mut rect = Rectangle::new(ShapeId::new(1), Point::new(10.0, 10.0), 40.0, 30.0);
        rect.style.fill_color = SerializableColor::rgb(255, 255, 0);
        let mut line = Line::new(ShapeId::new(2), Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        line.style.fill_color = SerializableColor::rgb(255, 0, 0);
        vec![
            Shape::Rectangle(rect),
            Shape::Line(line),
            Shape::Circle(Circle::new(ShapeId::new(3), Point::new(50.0, 50.0), 5.0)),
            Shape::Freehand(Freehand::from_points(
                ShapeId::new(4),
                vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)],
            )),
        ]
    }

    #[test]
    fn test_color_conversion() {
        let color = SerializableColor::new(1, 2, 3, 4);
        assert_eq!(rgba(to_peniko(color)), (1, 2, 3, 4));
        assert_eq!(from_peniko(to_peniko(color)), color);
    }

    #[test]
    fn test_one_item_per_shape_in_order() {
        let list = DisplayList::build(&sample(), None, None);
        let ids: Vec<_> = list.iter().map(|i| i.shape.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(list.iter().all(|i| i.role == DrawRole::Shape));
        assert!(list.selection_outline().is_none());
    }

    #[test]
    fn test_only_closed_shapes_are_filled() {
        let list = DisplayList::build(&sample(), None, None);
        let fills: Vec<_> = list.iter().map(|i| i.fill.map(rgba)).collect();
        assert_eq!(fills, vec![Some((255, 255, 0, 255)), None, None, None]);
    }

    #[test]
    fn test_rectangle_outline_is_enlarged_bounds() {
        let list = DisplayList::build(&sample(), Some(ShapeId::new(1)), None);
        assert_eq!(list.len(), 5);
        let outline = list.items().last().unwrap();
        assert_eq!(outline.role, DrawRole::SelectionOutline);
        assert_eq!(outline.shape, ShapeId::new(1));
        assert_eq!(outline.path.bounding_box(), Rect::new(6.0, 6.0, 54.0, 44.0));
        assert_eq!(outline.stroke_width, 1.5);
        assert_eq!(outline.dash, Some([4.0, 2.0]));
        assert_eq!(rgba(outline.stroke), (59, 130, 246, 255));
    }

    #[test]
    fn test_circle_outline_is_larger_circle() {
        let list = DisplayList::build(&sample(), Some(ShapeId::new(3)), None);
        let outline = list.selection_outline().unwrap();
        let bounds = outline.path.bounding_box();
        let expected = Rect::new(41.0, 41.0, 59.0, 59.0);
        for (got, want) in [
            (bounds.x0, expected.x0),
            (bounds.y0, expected.y0),
            (bounds.x1, expected.x1),
            (bounds.y1, expected.y1),
        ] {
            assert!((got - want).abs() < 1e-9, "{bounds:?} != {expected:?}");
        }
        // Round, not the inflated bounding box.
        assert_eq!(outline.path.winding(Point::new(42.0, 42.0)), 0);
        assert_ne!(outline.path.winding(Point::new(50.0, 58.0)), 0);
        assert_eq!(outline.stroke_width, 1.5);
        assert_eq!(outline.dash, Some([4.0, 2.0]));
    }

    #[test]
    fn test_line_outline_traces_the_line() {
        let list = DisplayList::build(&sample(), Some(ShapeId::new(2)), None);
        let outline = list.selection_outline().unwrap();
        assert_eq!(outline.path.bounding_box(), Rect::new(0.0, 0.0, 100.0, 0.0));
        assert_eq!(outline.stroke_width, 4.0);
        assert_eq!(outline.dash, Some([10.0, 5.0]));
    }

    #[test]
    fn test_missing_selection_has_no_outline() {
        let list = DisplayList::build(&sample(), Some(ShapeId::new(99)), None);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_in_progress_shape_is_preview() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Circle);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_move(Point::new(103.0, 104.0));

        let list = DisplayList::from_canvas(&canvas);
        assert_eq!(list.items()[0].role, DrawRole::Preview);
        assert!(list.selection_outline().is_some());

        canvas.pointer_up();
        let list = DisplayList::from_canvas(&canvas);
        assert_eq!(list.items()[0].role, DrawRole::Shape);
    }
}
