// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merge Engine
//!
//! Collapses one cluster into the fewest faces that cover the same area.
//! The first member is the reference: its plane becomes the shared 2D frame
//! and its metadata is copied onto every face the merge produces.
//!
//! The union result is interpreted as follows:
//! - one polygon: one new face,
//! - one parent polygon plus nested children: a punched face (surfaces) or
//!   one independent element per polygon (shading),
//! - anything else: the merge is abandoned and the original members are
//!   returned as they were.

use envelope_lite_geometry::{union_all, Face3D, Plane, Polygon2D};
use envelope_lite_model::{Opening, ShadingElement, Surface};

use crate::align::polygon2d_in_reference_space;
use crate::config::MergeConfig;
use crate::error::{Error, Result};
use crate::mergeable::Mergeable;
use crate::openings::{pool_openings, reattach_openings};

/// How a cluster came out of the merge engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStatus {
    /// Nothing to merge; the members were passed through.
    Unchanged,
    /// The members were replaced by merged faces.
    Merged,
    /// The union was ambiguous; the original members were returned.
    Aborted,
}

/// Output of merging one cluster.
#[derive(Debug, Clone)]
pub struct MergeResult<T> {
    pub items: Vec<T>,
    pub status: MergeStatus,
    /// Openings no merged surface would host. Always empty for shading.
    pub orphaned_openings: Vec<Opening>,
}

impl<T> MergeResult<T> {
    fn new(items: Vec<T>, status: MergeStatus) -> Self {
        Self {
            items,
            status,
            orphaned_openings: Vec::new(),
        }
    }
}

/// Result of unioning a cluster in the reference frame.
#[derive(Debug, Clone)]
pub enum UnionShape {
    /// The union is one simple polygon.
    Single(Polygon2D),
    /// One outer polygon with nested polygons inside it.
    Punched {
        outer: Polygon2D,
        holes: Vec<Polygon2D>,
    },
    /// Zero or several top-level polygons.
    Ambiguous { parents: usize },
}

/// Union every member of `cluster` in the first member's 2D frame.
///
/// Returns the reference plane together with the classified union.
pub fn union_cluster<T: Mergeable>(
    cluster: &[&T],
    config: &MergeConfig,
) -> Result<(Plane, UnionShape)> {
    let reference = cluster.first().ok_or(Error::EmptyCluster)?;
    let reference_plane = reference.geometry().plane().clone();

    let mut polygons = Vec::with_capacity(cluster.len());
    polygons.push(reference.geometry().polygon2d());
    for member in &cluster[1..] {
        let face = member.geometry();
        polygons.push(polygon2d_in_reference_space(
            &face.polygon2d(),
            face.plane(),
            &reference_plane,
        ));
    }

    if polygons.len() > config.union_warning_threshold {
        tracing::warn!(
            reference = reference.identifier(),
            polygons = polygons.len(),
            threshold = config.union_warning_threshold,
            "Large polygon union, consider simplifying the input geometry"
        );
    }

    let mut contours = union_all(&polygons, config.tolerance)?;
    if contours.len() == 1 {
        return Ok((reference_plane, UnionShape::Single(contours.remove(0))));
    }

    let (parents, children) = classify_nesting(contours, config.tolerance);
    let shape = match <[Polygon2D; 1]>::try_from(parents) {
        Ok([outer]) => UnionShape::Punched {
            outer,
            holes: children,
        },
        Err(parents) => UnionShape::Ambiguous {
            parents: parents.len(),
        },
    };
    Ok((reference_plane, shape))
}

/// Split polygons into parents (not inside any other) and children.
pub fn classify_nesting(
    polygons: Vec<Polygon2D>,
    tolerance: f64,
) -> (Vec<Polygon2D>, Vec<Polygon2D>) {
    let nested: Vec<bool> = polygons
        .iter()
        .enumerate()
        .map(|(i, p)| {
            polygons
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.is_polygon_inside(p, tolerance))
        })
        .collect();

    let mut parents = Vec::new();
    let mut children = Vec::new();
    for (polygon, is_child) in polygons.into_iter().zip(nested) {
        if is_child {
            children.push(polygon);
        } else {
            parents.push(polygon);
        }
    }
    (parents, children)
}

fn originals<T: Clone>(cluster: &[&T]) -> Vec<T> {
    cluster.iter().map(|&m| m.clone()).collect()
}

/// Merge a cluster of surfaces and reattach their openings.
///
/// Members that already carry holes are passed through: their outer
/// boundary alone does not describe their area.
pub fn merge_surfaces(cluster: &[&Surface], config: &MergeConfig) -> Result<MergeResult<Surface>> {
    let reference = match cluster {
        [] => return Err(Error::EmptyCluster),
        [single] => return Ok(MergeResult::new(vec![(*single).clone()], MergeStatus::Unchanged)),
        [reference, ..] => *reference,
    };

    if cluster.iter().any(|s| s.geometry.has_holes()) {
        tracing::debug!(
            reference = %reference.identifier,
            "Cluster contains punched surfaces, leaving it unmerged"
        );
        return Ok(MergeResult::new(originals(cluster), MergeStatus::Unchanged));
    }

    // Pool the openings before the members are collapsed
    let openings = pool_openings(cluster);

    let (plane, shape) = union_cluster(cluster, config)?;
    let face = match shape {
        UnionShape::Single(polygon) => Face3D::from_polygon2d(&plane, &polygon)?,
        UnionShape::Punched { outer, holes } => {
            Face3D::from_punched_polygon2d(&plane, &outer, &holes)?
        }
        UnionShape::Ambiguous { parents } => {
            tracing::debug!(
                reference = %reference.identifier,
                members = cluster.len(),
                parents,
                "Ambiguous union topology, keeping original surfaces"
            );
            return Ok(MergeResult::new(originals(cluster), MergeStatus::Aborted));
        }
    };

    let mut merged = vec![reference.with_geometry(face)];
    let orphaned_openings =
        reattach_openings(&mut merged, openings, config.tolerance, config.angle_tolerance());

    Ok(MergeResult {
        items: merged,
        status: MergeStatus::Merged,
        orphaned_openings,
    })
}

/// Merge a cluster of shading elements.
///
/// A union with holes becomes one element per polygon rather than a punched
/// element. The first keeps the reference identifier; the others get
/// `"{identifier}_{n}"`.
pub fn merge_shades(
    cluster: &[&ShadingElement],
    config: &MergeConfig,
) -> Result<MergeResult<ShadingElement>> {
    let reference = match cluster {
        [] => return Err(Error::EmptyCluster),
        [single] => return Ok(MergeResult::new(vec![(*single).clone()], MergeStatus::Unchanged)),
        [reference, ..] => *reference,
    };

    if cluster.iter().any(|s| s.geometry.has_holes()) {
        return Ok(MergeResult::new(originals(cluster), MergeStatus::Unchanged));
    }

    let (plane, shape) = union_cluster(cluster, config)?;
    let pieces = match shape {
        UnionShape::Single(polygon) => vec![polygon],
        UnionShape::Punched { outer, holes } => {
            let mut pieces = Vec::with_capacity(holes.len() + 1);
            pieces.push(outer);
            pieces.extend(holes.iter().map(Polygon2D::ensure_ccw));
            pieces
        }
        UnionShape::Ambiguous { parents } => {
            tracing::debug!(
                reference = %reference.identifier,
                members = cluster.len(),
                parents,
                "Ambiguous union topology, keeping original shades"
            );
            return Ok(MergeResult::new(originals(cluster), MergeStatus::Aborted));
        }
    };

    let items = pieces
        .iter()
        .enumerate()
        .map(|(n, polygon)| -> Result<ShadingElement> {
            let mut shade = reference.with_geometry(Face3D::from_polygon2d(&plane, polygon)?);
            if n > 0 {
                shade.identifier = format!("{}_{}", reference.identifier, n);
            }
            Ok(shade)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MergeResult::new(items, MergeStatus::Merged))
}
