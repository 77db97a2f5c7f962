//! Freehand pencil stroke.

use super::{flat_points, point_to_polyline_dist, point_to_segment_dist, ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke: the pointer positions recorded while drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Points in recording order (flat `[x0, y0, x1, y1, ...]` when stored).
    #[serde(with = "flat_points")]
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Freehand {
    /// Start a stroke at `start`.
    pub fn new(id: ShapeId, start: Point) -> Self {
        Self::from_points(id, vec![start])
    }

    pub fn from_points(id: ShapeId, points: Vec<Point>) -> Self {
        Self {
            id,
            points,
            style: ShapeStyle::default(),
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop points that deviate less than `tolerance` from the simplified path.
    pub fn simplify(&mut self, tolerance: f64) {
        if self.points.len() < 3 {
            return;
        }
        let mut keep = vec![false; self.points.len()];
        keep[0] = true;
        keep[self.points.len() - 1] = true;
        mark_significant(&self.points, 0, self.points.len() - 1, tolerance, &mut keep);

        let mut flags = keep.into_iter();
        self.points.retain(|_| flags.next().unwrap_or(true));
    }
}

/// Ramer-Douglas-Peucker: flag the points between `first` and `last` that must stay.
fn mark_significant(points: &[Point], first: usize, last: usize, tolerance: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }
    let (a, b) = (points[first], points[last]);
    let farthest = (first + 1..last)
        .map(|i| (i, point_to_segment_dist(points[i], a, b)))
        .max_by(|x, y| x.1.total_cmp(&y.1));

    if let Some((index, dist)) = farthest {
        if dist > tolerance {
            keep[index] = true;
            mark_significant(points, first, index, tolerance, keep);
            mark_significant(points, index, last, tolerance, keep);
        }
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some((&first, rest)) = self.points.split_first() else {
            return Rect::ZERO;
        };
        rest.iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
    }

    /// A stroke with a single point has no segments and is never hit.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((&first, rest)) = self.points.split_first() {
            path.move_to(first);
            for &p in rest {
                path.line_to(p);
            }
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}
