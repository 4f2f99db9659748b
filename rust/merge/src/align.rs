// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinate Alignment
//!
//! Re-expresses a polygon from its own face's 2D frame in the 2D frame of a
//! reference plane, so polygons from different faces can be unioned in one
//! shared space.

use std::f64::consts::PI;

use envelope_lite_geometry::{Plane, Polygon2D, Vector3};

/// Dot products this close to 1 count as parallel axes.
const PARALLEL_DOT_TOLERANCE: f64 = 1e-9;

/// Map `polygon`, given in `plane`'s local frame, into `reference`'s frame.
///
/// The polygon is moved so `plane`'s origin lands on its position in the
/// reference frame, then rotated about that point by
/// [`rotation_angle`].
pub fn polygon2d_in_reference_space(
    polygon: &Polygon2D,
    plane: &Plane,
    reference: &Plane,
) -> Polygon2D {
    let origin = reference.xyz_to_xy(&plane.origin);
    let reference_origin = reference.xyz_to_xy(&reference.origin);
    let moved = polygon.translate(&(origin - reference_origin));

    let angle = rotation_angle(plane, reference);
    if angle == 0.0 {
        return moved;
    }
    moved.rotate(angle, &origin)
}

/// Counter-clockwise angle in `[0, 2π)` that turns `reference`'s in-plane
/// axis onto `plane`'s, seen from `reference`'s normal.
///
/// Each plane's axis is `normal × x_axis`.
pub fn rotation_angle(plane: &Plane, reference: &Plane) -> f64 {
    let reference_axis = in_plane_axis(reference);
    let axis = in_plane_axis(plane);

    let dot = reference_axis.dot(&axis).clamp(-1.0, 1.0);
    if (1.0 - dot).abs() <= PARALLEL_DOT_TOLERANCE {
        return 0.0;
    }

    let angle = dot.acos();
    if reference_axis.cross(&axis).dot(&reference.normal) < 0.0 {
        2.0 * PI - angle
    } else {
        angle
    }
}

fn in_plane_axis(plane: &Plane) -> Vector3<f64> {
    plane.normal.cross(&plane.x_axis).normalize()
}
