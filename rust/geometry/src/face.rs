// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar 3D faces with optional holes.
//!
//! A [`Face3D`] stores its boundary in world coordinates together with the
//! [`Plane`] that defines its local 2D frame. Merging works on the 2D side
//! ([`Face3D::polygon2d`]) and rebuilds faces with
//! [`Face3D::from_polygon2d`] / [`Face3D::from_punched_polygon2d`].

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::plane::Plane;
use crate::polygon::{PointRelationship, Polygon2D};

/// A planar polygon in 3D, possibly punched with holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Face3D {
    boundary: Vec<Point3<f64>>,
    holes: Vec<Vec<Point3<f64>>>,
    plane: Plane,
}

impl Face3D {
    /// Create a face from its boundary vertices.
    ///
    /// The plane normal comes from Newell's method so concave boundaries
    /// work; the origin is the first vertex.
    pub fn from_vertices(vertices: Vec<Point3<f64>>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::InvalidPolygon(format!(
                "Face needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let normal = newell_normal(&vertices);
        let plane = Plane::new(normal, vertices[0])?;
        Ok(Self {
            boundary: vertices,
            holes: Vec::new(),
            plane,
        })
    }

    /// Lift a 2D polygon expressed in `plane`'s frame into a 3D face.
    pub fn from_polygon2d(plane: &Plane, polygon: &Polygon2D) -> Result<Self> {
        if !polygon.is_valid() {
            return Err(Error::InvalidPolygon(
                "Boundary polygon has no area".to_string(),
            ));
        }
        let boundary = polygon.vertices.iter().map(|p| plane.xy_to_xyz(p)).collect();
        Ok(Self {
            boundary,
            holes: Vec::new(),
            plane: plane.clone(),
        })
    }

    /// Lift an outer polygon plus hole polygons into a punched 3D face.
    ///
    /// The outer boundary is stored counter-clockwise and holes clockwise in
    /// the plane's frame.
    pub fn from_punched_polygon2d(
        plane: &Plane,
        outer: &Polygon2D,
        holes: &[Polygon2D],
    ) -> Result<Self> {
        if !outer.is_valid() {
            return Err(Error::InvalidPolygon(
                "Boundary polygon has no area".to_string(),
            ));
        }
        let lift = |p: &Polygon2D| -> Vec<Point3<f64>> {
            p.vertices.iter().map(|v| plane.xy_to_xyz(v)).collect()
        };
        Ok(Self {
            boundary: lift(&outer.ensure_ccw()),
            holes: holes
                .iter()
                .filter(|h| h.is_valid())
                .map(|h| lift(&h.ensure_cw()))
                .collect(),
            plane: plane.clone(),
        })
    }

    pub fn boundary(&self) -> &[Point3<f64>] {
        &self.boundary
    }

    pub fn holes(&self) -> &[Vec<Point3<f64>>] {
        &self.holes
    }

    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn normal(&self) -> &Vector3<f64> {
        &self.plane.normal
    }

    /// Every vertex, boundary first then holes.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.boundary.iter().chain(self.holes.iter().flatten())
    }

    /// The outer boundary in the face's own 2D frame.
    pub fn polygon2d(&self) -> Polygon2D {
        Polygon2D::new(self.boundary.iter().map(|p| self.plane.xyz_to_xy(p)).collect())
    }

    /// The holes in the face's own 2D frame.
    pub fn hole_polygons2d(&self) -> Vec<Polygon2D> {
        self.holes
            .iter()
            .map(|h| Polygon2D::new(h.iter().map(|p| self.plane.xyz_to_xy(p)).collect()))
            .collect()
    }

    /// Net area: outer boundary minus holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.hole_polygons2d().iter().map(Polygon2D::area).sum();
        self.polygon2d().area() - holes
    }

    /// Check whether a point lies on the face (boundary included).
    ///
    /// The point must be within `tolerance` of the plane, within the outer
    /// boundary and not strictly inside a hole.
    pub fn is_point_on_face(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        if self.plane.distance_to_point(point) > tolerance {
            return false;
        }
        let p2 = self.plane.xyz_to_xy(point);
        if self.polygon2d().point_relationship(&p2, tolerance) == PointRelationship::Outside {
            return false;
        }
        !self
            .hole_polygons2d()
            .iter()
            .any(|h| h.point_relationship(&p2, tolerance) == PointRelationship::Inside)
    }

    /// Check whether `sub_face` is a valid sub-face (window/door) of this face.
    ///
    /// Normals must agree within `angle_tolerance` (radians), every vertex of
    /// the sub-face must lie within `tolerance` of this plane, its boundary
    /// must sit inside the outer boundary and clear of every hole (no vertex
    /// inside a hole, no hole vertex inside the sub-face, no crossing edges).
    pub fn is_sub_face(&self, sub_face: &Face3D, tolerance: f64, angle_tolerance: f64) -> bool {
        if self.plane.normal_angle(&sub_face.plane) > angle_tolerance {
            return false;
        }
        if sub_face
            .boundary
            .iter()
            .any(|p| self.plane.distance_to_point(p) > tolerance)
        {
            return false;
        }

        let sub2d = Polygon2D::new(
            sub_face
                .boundary
                .iter()
                .map(|p| self.plane.xyz_to_xy(p))
                .collect(),
        );
        let outer = self.polygon2d();
        if sub2d
            .vertices
            .iter()
            .any(|p| outer.point_relationship(p, tolerance) == PointRelationship::Outside)
        {
            return false;
        }
        self.hole_polygons2d()
            .iter()
            .all(|h| h.is_polygon_outside(&sub2d, tolerance))
    }
}

/// Polygon normal by Newell's method (unnormalized).
pub fn newell_normal(vertices: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    let n = vertices.len();
    for i in 0..n {
        let curr = &vertices[i];
        let next = &vertices[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall(x0: f64, x1: f64, z0: f64, z1: f64) -> Face3D {
        Face3D::from_vertices(vec![
            Point3::new(x0, 0.0, z0),
            Point3::new(x1, 0.0, z0),
            Point3::new(x1, 0.0, z1),
            Point3::new(x0, 0.0, z1),
        ])
        .unwrap()
    }

    #[test]
    fn wall_normal_and_area() {
        let face = wall(0.0, 2.0, 0.0, 3.0);
        assert_relative_eq!(*face.normal(), Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(face.area(), 6.0, epsilon = 1e-12);
        assert!(!face.polygon2d().is_clockwise());
    }

    #[test]
    fn too_few_vertices_is_an_error() {
        let result = Face3D::from_vertices(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        assert!(matches!(result, Err(Error::InvalidPolygon(_))));
    }

    #[test]
    fn polygon2d_round_trip_through_plane() {
        let face = wall(1.0, 3.0, 0.0, 2.0);
        let rebuilt = Face3D::from_polygon2d(face.plane(), &face.polygon2d()).unwrap();
        for (a, b) in face.boundary().iter().zip(rebuilt.boundary()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn punched_face_area_subtracts_holes() {
        let plane = Plane::new(Vector3::z(), Point3::origin()).unwrap();
        let outer = Polygon2D::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]);
        let hole = Polygon2D::from_coords(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let face = Face3D::from_punched_polygon2d(&plane, &outer, &[hole]).unwrap();

        assert!(face.has_holes());
        assert_relative_eq!(face.area(), 8.0, epsilon = 1e-12);
        assert!(face.hole_polygons2d()[0].is_clockwise());
    }

    #[test]
    fn point_on_face_respects_plane_and_holes() {
        let plane = Plane::new(Vector3::z(), Point3::origin()).unwrap();
        let outer = Polygon2D::from_coords(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]);
        let hole = Polygon2D::from_coords(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let face = Face3D::from_punched_polygon2d(&plane, &outer, &[hole]).unwrap();

        assert!(face.is_point_on_face(&Point3::new(0.5, 0.5, 0.0), 0.01));
        assert!(face.is_point_on_face(&Point3::new(3.0, 3.0, 0.005), 0.01));
        assert!(face.is_point_on_face(&Point3::new(1.0, 1.5, 0.0), 0.01));
        assert!(!face.is_point_on_face(&Point3::new(1.5, 1.5, 0.0), 0.01));
        assert!(!face.is_point_on_face(&Point3::new(0.5, 0.5, 1.0), 0.01));
        assert!(!face.is_point_on_face(&Point3::new(4.0, 0.5, 0.0), 0.01));
    }

    #[test]
    fn window_is_sub_face_of_wall() {
        let host = wall(0.0, 4.0, 0.0, 3.0);
        let window = wall(1.0, 2.0, 1.0, 2.0);
        let outside = wall(5.0, 6.0, 1.0, 2.0);
        let straddling = wall(3.5, 4.5, 1.0, 2.0);

        let angle = 1f64.to_radians();
        assert!(host.is_sub_face(&window, 0.01, angle));
        assert!(!host.is_sub_face(&outside, 0.01, angle));
        assert!(!host.is_sub_face(&straddling, 0.01, angle));
    }

    #[test]
    fn window_crossing_a_hole_is_not_a_sub_face() {
        let plane = Plane::new(Vector3::new(0.0, -1.0, 0.0), Point3::origin()).unwrap();
        let outer = Polygon2D::from_coords(&[(-4.0, -3.0), (0.0, -3.0), (0.0, 0.0), (-4.0, 0.0)]);
        // Tall hole in the middle of the wall
        let hole =
            Polygon2D::from_coords(&[(-2.5, -2.5), (-1.5, -2.5), (-1.5, -0.5), (-2.5, -0.5)]);
        let host = Face3D::from_punched_polygon2d(&plane, &outer, &[hole]).unwrap();

        // Wide window straddling the hole: no vertex of either lies inside the other
        let crossing = Face3D::from_punched_polygon2d(
            &plane,
            &Polygon2D::from_coords(&[(-3.5, -2.0), (-0.5, -2.0), (-0.5, -1.0), (-3.5, -1.0)]),
            &[],
        )
        .unwrap();
        let beside = Face3D::from_punched_polygon2d(
            &plane,
            &Polygon2D::from_coords(&[(-1.2, -2.0), (-0.5, -2.0), (-0.5, -1.0), (-1.2, -1.0)]),
            &[],
        )
        .unwrap();

        let angle = 1f64.to_radians();
        assert!(!host.is_sub_face(&crossing, 0.01, angle));
        assert!(host.is_sub_face(&beside, 0.01, angle));
    }

    #[test]
    fn reversed_window_is_not_a_sub_face() {
        let host = wall(0.0, 4.0, 0.0, 3.0);
        let reversed = wall(1.0, 2.0, 1.0, 2.0).boundary().iter().rev().cloned().collect();
        let flipped = Face3D::from_vertices(reversed).unwrap();
        assert!(!host.is_sub_face(&flipped, 0.01, 1f64.to_radians()));
    }
}
