// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening pooling and reattachment.

use envelope_lite_model::{Opening, Surface};

/// Copy every opening of every member, in member order.
pub fn pool_openings(cluster: &[&Surface]) -> Vec<Opening> {
    cluster
        .iter()
        .flat_map(|surface| surface.openings().cloned())
        .collect()
}

/// Attach each opening to the first surface it is a valid sub-face of.
///
/// Windows and doors go to their own lists on the host. Openings that fit
/// no surface are returned; `angle_tolerance` is in radians.
pub fn reattach_openings(
    surfaces: &mut [Surface],
    openings: Vec<Opening>,
    tolerance: f64,
    angle_tolerance: f64,
) -> Vec<Opening> {
    let mut orphaned = Vec::new();

    for opening in openings {
        let host = surfaces.iter_mut().find(|surface| {
            surface
                .geometry
                .is_sub_face(&opening.geometry, tolerance, angle_tolerance)
        });
        match host {
            Some(surface) => surface.add_opening(opening),
            None => {
                tracing::warn!(
                    opening = %opening.identifier,
                    kind = ?opening.kind,
                    "Opening no longer fits any merged surface"
                );
                orphaned.push(opening);
            }
        }
    }

    orphaned
}
