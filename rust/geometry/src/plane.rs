// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Oriented planes with a local 2D frame.
//!
//! A [`Plane`] carries an origin, a unit normal and two orthogonal in-plane
//! axes. Points are mapped between world space and the plane's local (u, v)
//! coordinates with [`Plane::xyz_to_xy`] and [`Plane::xy_to_xyz`].

use nalgebra::{Point2, Point3, Vector3};

use crate::error::{Error, Result};

/// Normals shorter than this cannot be normalized reliably.
const MIN_NORMAL_LENGTH: f64 = 1e-12;

/// A plane with an explicit local coordinate frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Point on the plane, the (0, 0) of the local frame
    pub origin: Point3<f64>,
    /// Unit normal
    pub normal: Vector3<f64>,
    /// Local x-axis (unit, in-plane)
    pub x_axis: Vector3<f64>,
    /// Local y-axis (unit, in-plane, `normal × x_axis`)
    pub y_axis: Vector3<f64>,
}

impl Plane {
    /// Create a plane from a normal and an origin, deriving the x-axis.
    ///
    /// Vertical normals get the world X axis. Any other normal gets the
    /// horizontal vector `(n.y, -n.x, 0)` so walls keep a level x-axis.
    pub fn new(normal: Vector3<f64>, origin: Point3<f64>) -> Result<Self> {
        let n = unit(normal)?;
        let x = if n.x.abs() < MIN_NORMAL_LENGTH && n.y.abs() < MIN_NORMAL_LENGTH {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(n.y, -n.x, 0.0).normalize()
        };
        Ok(Self::from_unit_axes(n, origin, x))
    }

    /// Create a plane with an explicit x-axis.
    ///
    /// The x-axis is made orthogonal to the normal before use.
    pub fn with_x_axis(
        normal: Vector3<f64>,
        origin: Point3<f64>,
        x_axis: Vector3<f64>,
    ) -> Result<Self> {
        let n = unit(normal)?;
        let x = unit(x_axis - n * x_axis.dot(&n))?;
        Ok(Self::from_unit_axes(n, origin, x))
    }

    fn from_unit_axes(normal: Vector3<f64>, origin: Point3<f64>, x_axis: Vector3<f64>) -> Self {
        Self {
            origin,
            normal,
            x_axis,
            y_axis: normal.cross(&x_axis),
        }
    }

    /// Map a world point into this plane's local 2D frame.
    ///
    /// Points off the plane are projected along the normal.
    pub fn xyz_to_xy(&self, point: &Point3<f64>) -> Point2<f64> {
        let d = point - self.origin;
        Point2::new(d.dot(&self.x_axis), d.dot(&self.y_axis))
    }

    /// Map a local 2D point back to world space.
    pub fn xy_to_xyz(&self, point: &Point2<f64>) -> Point3<f64> {
        self.origin + self.x_axis * point.x + self.y_axis * point.y
    }

    /// Signed distance from the plane (positive on the normal side).
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Unsigned distance from the plane.
    pub fn distance_to_point(&self, point: &Point3<f64>) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Closest point on the plane.
    pub fn project_point(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal * self.signed_distance(point)
    }

    /// Angle between the two normals in radians, in `[0, π]`.
    pub fn normal_angle(&self, other: &Plane) -> f64 {
        self.normal.dot(&other.normal).clamp(-1.0, 1.0).acos()
    }

    /// Check whether two planes are the same plane within tolerance.
    ///
    /// The normals must point the same way within `angle_tolerance`
    /// (radians) and the other plane's origin must lie within `tolerance`
    /// of this plane. Opposite-facing planes are never coplanar here: a
    /// flipped frame cannot be aligned by translation and rotation alone.
    pub fn is_coplanar_tolerance(
        &self,
        other: &Plane,
        tolerance: f64,
        angle_tolerance: f64,
    ) -> bool {
        self.normal_angle(other) <= angle_tolerance
            && self.distance_to_point(&other.origin) <= tolerance
    }
}

fn unit(v: Vector3<f64>) -> Result<Vector3<f64>> {
    let len = v.norm();
    if len < MIN_NORMAL_LENGTH || !len.is_finite() {
        return Err(Error::DegeneratePlane);
    }
    Ok(v / len)
}
