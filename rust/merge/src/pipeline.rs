// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orchestrator: grouping followed by one merge per cluster.

use envelope_lite_model::{Opening, ShadingElement, Surface};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::MergeConfig;
use crate::engine::{merge_shades, merge_surfaces, MergeResult, MergeStatus};
use crate::error::Result;
use crate::grouping::cluster;
use crate::mergeable::Mergeable;

/// Output of one simplify call.
#[derive(Debug, Clone)]
pub struct SimplifyReport<T> {
    /// Simplified elements, cluster by cluster.
    pub items: Vec<T>,
    /// Openings that no merged surface could host.
    pub orphaned_openings: Vec<Opening>,
    pub clusters_merged: usize,
    pub clusters_unchanged: usize,
    pub clusters_aborted: usize,
}

impl<T> SimplifyReport<T> {
    fn from_results(results: Vec<MergeResult<T>>) -> Self {
        let mut report = Self {
            items: Vec::new(),
            orphaned_openings: Vec::new(),
            clusters_merged: 0,
            clusters_unchanged: 0,
            clusters_aborted: 0,
        };
        for result in results {
            match result.status {
                MergeStatus::Merged => report.clusters_merged += 1,
                MergeStatus::Unchanged => report.clusters_unchanged += 1,
                MergeStatus::Aborted => report.clusters_aborted += 1,
            }
            report.items.extend(result.items);
            report.orphaned_openings.extend(result.orphaned_openings);
        }
        report
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters_merged + self.clusters_unchanged + self.clusters_aborted
    }
}

/// Merge coplanar, touching surfaces of the same type.
///
/// `angle_tolerance_degrees` is in degrees. Openings that no merged surface
/// can host are dropped from the output; use [`simplify_with_config`] to
/// get them back.
pub fn simplify(
    surfaces: &[Surface],
    tolerance: f64,
    angle_tolerance_degrees: f64,
) -> Result<Vec<Surface>> {
    let config = MergeConfig::new(tolerance, angle_tolerance_degrees);
    Ok(simplify_with_config(surfaces, &config)?.items)
}

pub fn simplify_with_config(
    surfaces: &[Surface],
    config: &MergeConfig,
) -> Result<SimplifyReport<Surface>> {
    run(surfaces, config, merge_surfaces)
}

/// Merge coplanar, touching shading elements that share a display name.
pub fn simplify_shades(
    shades: &[ShadingElement],
    tolerance: f64,
    angle_tolerance_degrees: f64,
) -> Result<Vec<ShadingElement>> {
    let config = MergeConfig::new(tolerance, angle_tolerance_degrees);
    Ok(simplify_shades_with_config(shades, &config)?.items)
}

pub fn simplify_shades_with_config(
    shades: &[ShadingElement],
    config: &MergeConfig,
) -> Result<SimplifyReport<ShadingElement>> {
    run(shades, config, merge_shades)
}

fn run<T, F>(items: &[T], config: &MergeConfig, merge: F) -> Result<SimplifyReport<T>>
where
    T: Mergeable + Send + Sync,
    F: Fn(&[&T], &MergeConfig) -> Result<MergeResult<T>> + Sync,
{
    config.validate()?;

    let clusters = cluster(items, config.tolerance, config.angle_tolerance());
    for members in &clusters {
        tracing::debug!(
            reference = members[0].identifier(),
            key = ?members[0].group_key(),
            members = members.len(),
            "Merging cluster"
        );
    }

    let results: Vec<MergeResult<T>> = if config.parallel {
        clusters
            .par_iter()
            .map(|members| merge(members.as_slice(), config))
            .collect::<Result<_>>()?
    } else {
        clusters
            .iter()
            .map(|members| merge(members.as_slice(), config))
            .collect::<Result<_>>()?
    };

    let report = SimplifyReport::from_results(results);
    tracing::info!(
        input = items.len(),
        output = report.items.len(),
        clusters = report.cluster_count(),
        merged = report.clusters_merged,
        aborted = report.clusters_aborted,
        orphaned_openings = report.orphaned_openings.len(),
        "Simplified envelope"
    );
    Ok(report)
}

/// Keep the surfaces that bound the given set of rooms.
///
/// Surfaces facing another room of the same set are interior and dropped.
/// Surfaces facing a room outside the set stay, as do all outdoor, ground
/// and adiabatic surfaces.
pub fn exposed_surfaces(surfaces: &[Surface], room_ids: &[&str]) -> Vec<Surface> {
    let rooms: FxHashSet<&str> = room_ids.iter().copied().collect();
    surfaces
        .iter()
        .filter(|s| {
            s.boundary_condition
                .adjacent_room()
                .map_or(true, |room| !rooms.contains(room))
        })
        .cloned()
        .collect()
}
