// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grouping Pipeline
//!
//! Partitions a flat element list into clusters that can each be merged on
//! their own, in three passes:
//!
//! 1. by [`Mergeable::group_key`] (exact equality),
//! 2. by plane, first-fit against each group's first member,
//! 3. by touching-graph connected components.
//!
//! Every pass keeps the order in which groups were first seen, so the
//! output is deterministic for a given input order. Clusters hold borrowed
//! references; nothing is copied until the merge engine builds new faces.

use envelope_lite_geometry::{Face3D, Point3};
use rustc_hash::FxHashMap;

use crate::mergeable::Mergeable;

/// Group elements by exact key equality, in first-seen key order.
pub fn group_by_key<T: Mergeable>(items: &[T]) -> Vec<Vec<&T>> {
    let mut index: FxHashMap<T::Key, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<&T>> = Vec::new();

    for item in items {
        let key = item.group_key();
        match index.get(&key) {
            Some(&i) => groups[i].push(item),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![item]);
            }
        }
    }
    groups
}

/// Split a group into coplanar sub-groups.
///
/// Each element joins the first existing sub-group whose first member's
/// plane it is coplanar with, or starts a new one. Membership can depend on
/// input order; this first-fit result is the intended behavior.
pub fn group_by_plane<'a, T: Mergeable>(
    items: &[&'a T],
    tolerance: f64,
    angle_tolerance: f64,
) -> Vec<Vec<&'a T>> {
    let mut groups: Vec<Vec<&'a T>> = Vec::new();

    for &item in items {
        let plane = item.geometry().plane();
        let existing = groups.iter_mut().find(|group| {
            group[0]
                .geometry()
                .plane()
                .is_coplanar_tolerance(plane, tolerance, angle_tolerance)
        });
        match existing {
            Some(group) => group.push(item),
            None => groups.push(vec![item]),
        }
    }
    groups
}

/// Check whether `candidate` touches `host`.
///
/// True if any vertex of `candidate` lies on `host` or coincides with one of
/// `host`'s vertices, within `tolerance`. Only `candidate`'s vertices are
/// tested, so the relation is not symmetric for every input.
pub fn are_touching(host: &Face3D, candidate: &Face3D, tolerance: f64) -> bool {
    candidate.vertices().any(|v| {
        host.is_point_on_face(v, tolerance)
            || host.vertices().any(|h| are_coincident(v, h, tolerance))
    })
}

fn are_coincident(a: &Point3<f64>, b: &Point3<f64>, tolerance: f64) -> bool {
    (a - b).norm() < tolerance
}

/// Split a coplanar group into touching-graph connected components.
///
/// Depth-first from each unvisited element, in input order. An edge runs
/// from the element being visited to a neighbor when the neighbor's
/// vertices touch it (see [`are_touching`]). The traversal uses an explicit
/// stack of `(node, next neighbor index)` frames and visits nodes in the
/// same pre-order a recursive search would.
pub fn connected_components<'a, T: Mergeable>(items: &[&'a T], tolerance: f64) -> Vec<Vec<&'a T>> {
    let n = items.len();
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        visited[start] = true;
        component.push(items[start]);
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let next = (cursor..n).find(|&j| {
                !visited[j]
                    && are_touching(items[node].geometry(), items[j].geometry(), tolerance)
            });
            match next {
                Some(j) => {
                    frame.1 = j + 1;
                    visited[j] = true;
                    component.push(items[j]);
                    stack.push((j, 0));
                }
                None => {
                    stack.pop();
                }
            }
        }

        components.push(component);
    }

    components
}

/// Run all three passes and return the clusters in discovery order.
///
/// `angle_tolerance` is in radians.
pub fn cluster<T: Mergeable>(items: &[T], tolerance: f64, angle_tolerance: f64) -> Vec<Vec<&T>> {
    group_by_key(items)
        .iter()
        .flat_map(|group| group_by_plane(group, tolerance, angle_tolerance))
        .flat_map(|group| connected_components(&group, tolerance))
        .collect()
}
