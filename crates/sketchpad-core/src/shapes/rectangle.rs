//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
///
/// Width and height are signed: while the user drags up or left of the
/// anchor they go negative and the rectangle extends from `position` in
/// that direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Anchor corner (`x`, `y` in the stored form).
    #[serde(flatten)]
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle with the default style.
    pub fn new(id: ShapeId, position: Point, width: f64, height: f64) -> Self {
        Self {
            id,
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle from two corner points, normalized to a positive size.
    pub fn from_corners(id: ShapeId, p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(id, rect.origin(), rect.width(), rect.height())
    }

    /// Stretch the rectangle so its far corner sits at `corner`.
    pub fn set_corner(&mut self, corner: Point) {
        let size = corner - self.position;
        self.width = size.x;
        self.height = size.y;
    }

    /// The same area expressed with a top-left origin and non-negative size.
    pub fn normalized(&self) -> Self {
        let rect = self.as_rect();
        Self {
            position: rect.origin(),
            width: rect.width(),
            height: rect.height(),
            ..self.clone()
        }
    }

    /// Get the rectangle as a kurbo Rect with min/max ordered bounds.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
        .abs()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        // Edges count as inside.
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(ShapeId::new(1), Point::new(x, y), w, h)
    }

    #[test]
    fn test_rectangle_from_corners() {
        let r = Rectangle::from_corners(
            ShapeId::new(1),
            Point::new(100.0, 100.0),
            Point::new(50.0, 50.0),
        );
        assert!((r.position.x - 50.0).abs() < f64::EPSILON);
        assert!((r.position.y - 50.0).abs() < f64::EPSILON);
        assert!((r.width - 50.0).abs() < f64::EPSILON);
        assert!((r.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let r = rect(10.0, 10.0, 40.0, 30.0);
        assert!(r.hit_test(Point::new(25.0, 25.0), 0.0));
        assert!(r.hit_test(Point::new(50.0, 40.0), 0.0));
        assert!(!r.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(!r.hit_test(Point::new(50.5, 20.0), 0.0));
    }

    #[test]
    fn test_negative_size_matches_normalized() {
        let dragged = rect(50.0, 40.0, -40.0, -30.0);
        let normal = dragged.normalized();
        assert_eq!(normal.position, Point::new(10.0, 10.0));
        assert_eq!((normal.width, normal.height), (40.0, 30.0));

        for x in (0..=60).step_by(5) {
            for y in (0..=50).step_by(5) {
                let p = Point::new(f64::from(x), f64::from(y));
                assert_eq!(dragged.hit_test(p, 0.0), normal.hit_test(p, 0.0), "{p:?}");
            }
        }
    }

    #[test]
    fn test_set_corner_goes_negative() {
        let mut r = rect(10.0, 10.0, 0.0, 0.0);
        r.set_corner(Point::new(0.0, 4.0));
        assert_eq!((r.width, r.height), (-10.0, -6.0));
        assert_eq!(r.bounds(), Rect::new(0.0, 4.0, 10.0, 10.0));
    }

    #[test]
    fn test_translate() {
        let mut r = rect(10.0, 20.0, 5.0, 5.0);
        r.translate(Vec2::new(-3.0, 4.0));
        assert_eq!(r.position, Point::new(7.0, 24.0));
    }
}
