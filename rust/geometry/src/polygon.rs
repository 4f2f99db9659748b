// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simple 2D polygons in a plane's local frame.

use nalgebra::{Point2, Rotation2, Vector2};

/// Polygons with less area than this are considered degenerate
pub const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Where a point sits relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRelationship {
    Inside,
    OnBoundary,
    Outside,
}

/// A closed 2D polygon. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    pub vertices: Vec<Point2<f64>>,
}

impl Polygon2D {
    pub fn new(vertices: Vec<Point2<f64>>) -> Self {
        Self { vertices }
    }

    /// Build from `(x, y)` tuples.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate the edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Signed area: positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for (a, b) in self.edges() {
            area += a.x * b.y - b.x * a.y;
        }
        area * 0.5
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// At least three vertices enclosing a non-degenerate area.
    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= 3 && self.area() > MIN_AREA_THRESHOLD
    }

    pub fn reverse(&self) -> Self {
        Self::new(self.vertices.iter().rev().cloned().collect())
    }

    /// Counter-clockwise copy (outer boundaries).
    pub fn ensure_ccw(&self) -> Self {
        if self.is_clockwise() {
            self.reverse()
        } else {
            self.clone()
        }
    }

    /// Clockwise copy (holes).
    pub fn ensure_cw(&self) -> Self {
        if self.signed_area() > 0.0 {
            self.reverse()
        } else {
            self.clone()
        }
    }

    pub fn translate(&self, offset: &Vector2<f64>) -> Self {
        Self::new(self.vertices.iter().map(|p| *p + *offset).collect())
    }

    /// Rotate counter-clockwise by `angle` radians about `origin`.
    pub fn rotate(&self, angle: f64, origin: &Point2<f64>) -> Self {
        let rot = Rotation2::new(angle);
        Self::new(
            self.vertices
                .iter()
                .map(|p| *origin + rot * (*p - *origin))
                .collect(),
        )
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for p in self.vertices.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Classify a point as inside, on the boundary (within `tolerance`) or outside.
    pub fn point_relationship(&self, point: &Point2<f64>, tolerance: f64) -> PointRelationship {
        if self.vertices.len() < 3 {
            return PointRelationship::Outside;
        }
        if self
            .edges()
            .any(|(a, b)| distance_to_segment(point, a, b) <= tolerance)
        {
            return PointRelationship::OnBoundary;
        }
        if self.is_point_inside(point) {
            PointRelationship::Inside
        } else {
            PointRelationship::Outside
        }
    }

    /// Ray-casting inside test. Boundary points may land either way.
    pub fn is_point_inside(&self, point: &Point2<f64>) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = &self.vertices[i];
            let pj = &self.vertices[j];
            if ((pi.y > point.y) != (pj.y > point.y))
                && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// True if every vertex of `other` is inside or on this polygon and at
    /// least one edge midpoint of `other` is strictly inside.
    ///
    /// The midpoint check keeps two identical polygons, or polygons that only
    /// share boundary, from counting as nested.
    pub fn is_polygon_inside(&self, other: &Polygon2D, tolerance: f64) -> bool {
        if other.vertices.len() < 3 || other.area() > self.area() {
            return false;
        }
        let all_in = other
            .vertices
            .iter()
            .all(|p| self.point_relationship(p, tolerance) != PointRelationship::Outside);
        if !all_in {
            return false;
        }
        let strictly_inside =
            |p: &Point2<f64>| self.point_relationship(p, tolerance) == PointRelationship::Inside;
        other.vertices.iter().any(|p| strictly_inside(p))
            || other.edges().any(|(a, b)| {
                let mid = Point2::from((a.coords + b.coords) * 0.5);
                strictly_inside(&mid)
            })
    }

    /// True if no vertex of `other` is strictly inside this polygon, no
    /// vertex of this polygon is strictly inside `other` and no pair of
    /// edges properly crosses.
    pub fn is_polygon_outside(&self, other: &Polygon2D, tolerance: f64) -> bool {
        !other
            .vertices
            .iter()
            .any(|p| self.point_relationship(p, tolerance) == PointRelationship::Inside)
            && !self
                .vertices
                .iter()
                .any(|p| other.point_relationship(p, tolerance) == PointRelationship::Inside)
            && !self.edges_cross(other, tolerance)
    }

    /// True if an edge of this polygon properly crosses an edge of `other`.
    ///
    /// Endpoints within `tolerance` of the other segment's line count as
    /// touching, not crossing.
    pub fn edges_cross(&self, other: &Polygon2D, tolerance: f64) -> bool {
        self.edges().any(|(a, b)| {
            other
                .edges()
                .any(|(c, d)| segments_cross(a, b, c, d, tolerance))
        })
    }

    /// Drop consecutive duplicates and vertices that sit on the line through
    /// their neighbours (within `tolerance`).
    pub fn remove_colinear_vertices(&self, tolerance: f64) -> Self {
        let mut pts: Vec<Point2<f64>> = Vec::with_capacity(self.vertices.len());
        for p in &self.vertices {
            if pts.last().map_or(true, |q| (*p - *q).norm() > tolerance) {
                pts.push(*p);
            }
        }
        while pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() <= tolerance {
            pts.pop();
        }
        if pts.len() <= 3 {
            return Self::new(pts);
        }

        let mut changed = true;
        while changed && pts.len() > 3 {
            changed = false;
            let n = pts.len();
            for i in 0..n {
                let prev = pts[(i + n - 1) % n];
                let next = pts[(i + 1) % n];
                if distance_to_segment(&pts[i], &prev, &next) <= tolerance {
                    pts.remove(i);
                    changed = true;
                    break;
                }
            }
        }
        Self::new(pts)
    }
}

/// Proper crossing of segments `a`-`b` and `c`-`d`: each segment's endpoints
/// lie strictly on opposite sides of the other's line, more than `tolerance`
/// away from it.
pub fn segments_cross(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    d: &Point2<f64>,
    tolerance: f64,
) -> bool {
    let (Some(da), Some(db)) = (side_of_line(a, c, d, tolerance), side_of_line(b, c, d, tolerance))
    else {
        return false;
    };
    let (Some(dc), Some(dd)) = (side_of_line(c, a, b, tolerance), side_of_line(d, a, b, tolerance))
    else {
        return false;
    };
    da != db && dc != dd
}

/// Which side of the line through `a`-`b` the point is on, or `None` when
/// it is within `tolerance` of the line.
fn side_of_line(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>, tolerance: f64) -> Option<bool> {
    let ab = *b - *a;
    let len = ab.norm();
    if len == 0.0 {
        return None;
    }
    let distance = (ab.x * (p.y - a.y) - ab.y * (p.x - a.x)) / len;
    if distance.abs() <= tolerance {
        None
    } else {
        Some(distance > 0.0)
    }
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (*p - closest_point_on_segment(p, a, b)).norm()
}

/// Closest point to `p` on the segment `a`-`b`.
pub fn closest_point_on_segment(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> Point2<f64> {
    let ab = *b - *a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return *a;
    }
    let t = ((*p - *a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    *a + ab * t
}
