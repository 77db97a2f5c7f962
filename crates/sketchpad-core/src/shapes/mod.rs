//! Shape definitions for the drawing surface.

mod circle;
mod freehand;
mod line;
mod rectangle;
mod style;

pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use style::{DashPattern, SerializableColor, ShapeStyle, StrokeWidth};

use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for shapes within a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(u64);

impl ShapeId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Distance from a point to a line segment (a→b).
///
/// A degenerate segment (`a == b`) measures the distance to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Fewer than two points yields `f64::INFINITY`.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the normalized bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape.
    ///
    /// `tolerance` is the reach of stroked outlines (lines, freehand);
    /// closed shapes test their area exactly.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Move every coordinate by `delta`.
    fn translate(&mut self, delta: Vec2);
}

/// Variant tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
    Freehand,
}

/// A shape in the drawing.
///
/// Stored as an object tagged by `"type"`: `rect`, `circle`, `line` or `pencil`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    #[serde(rename = "rect")]
    Rectangle(Rectangle),
    #[serde(rename = "circle")]
    Circle(Circle),
    #[serde(rename = "line")]
    Line(Line),
    #[serde(rename = "pencil")]
    Freehand(Freehand),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Freehand(_) => ShapeKind::Freehand,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    /// The point a drag offset is measured from: the rectangle's anchor
    /// corner or the circle's center. Lines and strokes have none and are
    /// dragged by incremental deltas instead.
    pub fn reference_point(&self) -> Option<Point> {
        match self {
            Shape::Rectangle(r) => Some(r.position),
            Shape::Circle(c) => Some(c.center),
            Shape::Line(_) | Shape::Freehand(_) => None,
        }
    }

    /// Put the reference point at `point`. No effect on lines and strokes.
    pub fn set_reference_point(&mut self, point: Point) {
        match self {
            Shape::Rectangle(r) => r.position = point,
            Shape::Circle(c) => c.center = point,
            Shape::Line(_) | Shape::Freehand(_) => {}
        }
    }

    /// Describe what makes this shape's geometry unusable, if anything.
    pub(crate) fn geometry_defect(&self) -> Option<&'static str> {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        match self {
            Shape::Rectangle(r) => (!finite(&r.position)
                || !r.width.is_finite()
                || !r.height.is_finite())
            .then_some("non-finite coordinate"),
            Shape::Circle(c) if !finite(&c.center) => Some("non-finite coordinate"),
            Shape::Circle(c) if !(c.radius.is_finite() && c.radius >= 0.0) => {
                Some("radius must be finite and non-negative")
            }
            Shape::Circle(_) => None,
            Shape::Line(l) => (!l.points().iter().all(finite)).then_some("non-finite coordinate"),
            Shape::Freehand(f) if f.is_empty() => Some("stroke has no points"),
            Shape::Freehand(f) => (!f.points.iter().all(finite)).then_some("non-finite coordinate"),
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Line(s) => s,
            Shape::Freehand(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
            Shape::Line(s) => s,
            Shape::Freehand(s) => s,
        }
    }
}

/// Serde adapters storing points as a flat coordinate list.
pub(crate) mod flat_points {
    use kurbo::Point;
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(points: &[Point], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(points.len() * 2))?;
        for p in points {
            seq.serialize_element(&p.x)?;
            seq.serialize_element(&p.y)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
        let coords = Vec::<f64>::deserialize(deserializer)?;
        if coords.len() % 2 != 0 {
            return Err(D::Error::custom(format!(
                "expected an even number of coordinates, got {}",
                coords.len()
            )));
        }
        Ok(coords
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect())
    }

    /// Exactly two points, stored as four coordinates.
    pub mod pair {
        use kurbo::Point;
        use serde::de::Error as _;
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(points: &[Point; 2], serializer: S) -> Result<S::Ok, S::Error> {
            super::serialize(points, serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[Point; 2], D::Error> {
            let points = super::deserialize(deserializer)?;
            let count = points.len() * 2;
            <[Point; 2]>::try_from(points).map_err(|_| {
                D::Error::custom(format!("expected 4 coordinates, got {count}"))
            })
        }
    }
}
