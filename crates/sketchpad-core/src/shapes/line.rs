//! Straight line segment.

use super::{flat_points, point_to_segment_dist, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A line segment between two endpoints.
///
/// Stored as a flat `points` list `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    #[serde(rename = "points", with = "flat_points::pair")]
    endpoints: [Point; 2],
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Line {
    pub fn new(id: ShapeId, start: Point, end: Point) -> Self {
        Self {
            id,
            endpoints: [start, end],
            style: ShapeStyle::default(),
        }
    }

    pub fn start(&self) -> Point {
        self.endpoints[0]
    }

    pub fn end(&self) -> Point {
        self.endpoints[1]
    }

    /// Move the second endpoint; the first stays fixed.
    pub fn set_end(&mut self, end: Point) {
        self.endpoints[1] = end;
    }

    pub fn points(&self) -> &[Point] {
        &self.endpoints
    }

    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    pub fn midpoint(&self) -> Point {
        self.start().midpoint(self.end())
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start(), self.end()) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start());
        path.line_to(self.end());
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.endpoints {
            *p += delta;
        }
    }
}
