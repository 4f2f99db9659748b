// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Union for Coplanar Surface Merging
//!
//! Polygons that come from separate surfaces rarely share bit-identical
//! coordinates along their common edges. Before handing them to i_overlay the
//! vertices are snapped together within the model tolerance, so touching
//! edges fuse instead of leaving hairline slivers in the result.

use crate::error::{Error, Result};
use crate::polygon::{closest_point_on_segment, Polygon2D};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Union any number of polygons within `tolerance`.
///
/// Returns every contour of the result as its own polygon: outer boundaries
/// come back counter-clockwise and holes clockwise, in the order i_overlay
/// produced them. The caller decides how outer boundaries and holes relate.
///
/// # Arguments
/// * `polygons` - Polygons in one shared 2D frame, any winding
/// * `tolerance` - Distance under which vertices and edges are fused
///
/// # Returns
/// * `Ok(Vec<Polygon2D>)` - Result contours (never empty)
/// * `Err` - If the input is empty, any input polygon is degenerate, or the
///   union vanished
pub fn union_all(polygons: &[Polygon2D], tolerance: f64) -> Result<Vec<Polygon2D>> {
    if polygons.is_empty() {
        return Err(Error::InvalidPolygon(
            "Union needs at least one polygon with area".to_string(),
        ));
    }
    if let Some(index) = polygons.iter().position(|p| !p.is_valid()) {
        return Err(Error::InvalidPolygon(format!(
            "Union input {} has {} vertices and area {:e}",
            index,
            polygons[index].len(),
            polygons[index].area()
        )));
    }

    let valid: Vec<Polygon2D> = polygons.iter().map(Polygon2D::ensure_ccw).collect();

    let snapped = snap_polygons(&valid, tolerance);

    // NonZero so overlapping inputs accumulate instead of cancelling out
    let subject: Vec<Vec<[f64; 2]>> = vec![contour_to_path(&snapped[0])];
    let clip: Vec<Vec<[f64; 2]>> = snapped
        .iter()
        .skip(1)
        .map(contour_to_path)
        .collect();

    let shapes = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);

    let contours = shapes_to_polygons(&shapes, tolerance);
    if contours.is_empty() {
        return Err(Error::EmptyUnion);
    }
    Ok(contours)
}

/// Snap every vertex onto an earlier vertex, or onto another polygon's edge,
/// when it lies within `tolerance` of it.
pub fn snap_polygons(polygons: &[Polygon2D], tolerance: f64) -> Vec<Polygon2D> {
    let mut anchors: Vec<Point2<f64>> = Vec::new();
    let mut welded: Vec<Polygon2D> = Vec::with_capacity(polygons.len());

    for polygon in polygons {
        let vertices = polygon
            .vertices
            .iter()
            .map(|p| {
                match anchors
                    .iter()
                    .find(|a| (*p - **a).norm() <= tolerance)
                {
                    Some(anchor) => *anchor,
                    None => {
                        anchors.push(*p);
                        *p
                    }
                }
            })
            .collect();
        welded.push(Polygon2D::new(vertices));
    }

    // Pull vertices that sit near another polygon's edge onto that edge.
    // Exact T-junctions are then resolved by the overlay itself.
    let mut result = welded.clone();
    for (i, polygon) in result.iter_mut().enumerate() {
        for vertex in polygon.vertices.iter_mut() {
            for (j, other) in welded.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(snapped) = snap_to_edges(vertex, other, tolerance) {
                    *vertex = snapped;
                    break;
                }
            }
        }
    }
    result
}

fn snap_to_edges(point: &Point2<f64>, polygon: &Polygon2D, tolerance: f64) -> Option<Point2<f64>> {
    polygon.edges().find_map(|(a, b)| {
        let closest = closest_point_on_segment(point, a, b);
        let d = (*point - closest).norm();
        if d > 0.0 && d <= tolerance {
            Some(closest)
        } else {
            None
        }
    })
}

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Convert a polygon to i_overlay path format
fn contour_to_path(polygon: &Polygon2D) -> Vec<[f64; 2]> {
    polygon.vertices.iter().map(|p| [p.x, p.y]).collect()
}

/// Flatten i_overlay shapes into polygons.
///
/// i_overlay returns Vec<Vec<Vec<[f64; 2]>>> where:
/// - Outer Vec: list of shapes
/// - Middle Vec: list of contours per shape (first is outer, rest are holes)
/// - Inner Vec: list of points per contour
fn shapes_to_polygons(shapes: &[Vec<Vec<[f64; 2]>>], tolerance: f64) -> Vec<Polygon2D> {
    let mut polygons = Vec::new();
    for shape in shapes {
        for (idx, contour) in shape.iter().enumerate() {
            let points: Vec<Point2<f64>> =
                contour.iter().map(|p| Point2::new(p[0], p[1])).collect();
            let polygon = Polygon2D::new(points).remove_colinear_vertices(tolerance * 1e-3);
            if !polygon.is_valid() {
                continue;
            }
            if idx == 0 {
                polygons.push(polygon.ensure_ccw());
            } else {
                polygons.push(polygon.ensure_cw());
            }
        }
    }
    polygons
}
