// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests for envelope simplification.

use approx::assert_relative_eq;
use envelope_lite_geometry::{Face3D, Point3};
use envelope_lite_merge::{
    cluster, exposed_surfaces, merge_surfaces, simplify, simplify_shades, simplify_with_config,
    Error, MergeConfig, MergeStatus,
};
use envelope_lite_model::{BoundaryCondition, Opening, ShadingElement, Surface, SurfaceType};

const TOLERANCE: f64 = 0.01;
const ANGLE_TOLERANCE: f64 = 1.0;

/// Rectangle in the y = 0 plane, facing -y.
fn facade(x0: f64, x1: f64, z0: f64, z1: f64) -> Face3D {
    Face3D::from_vertices(vec![
        Point3::new(x0, 0.0, z0),
        Point3::new(x1, 0.0, z0),
        Point3::new(x1, 0.0, z1),
        Point3::new(x0, 0.0, z1),
    ])
    .unwrap()
}

/// Rectangle in the z = `z` plane, facing +z.
fn level(x0: f64, y0: f64, x1: f64, y1: f64, z: f64) -> Face3D {
    Face3D::from_vertices(vec![
        Point3::new(x0, y0, z),
        Point3::new(x1, y0, z),
        Point3::new(x1, y1, z),
        Point3::new(x0, y1, z),
    ])
    .unwrap()
}

fn wall(id: &str, geometry: Face3D) -> Surface {
    Surface::new(
        id,
        SurfaceType::Wall,
        BoundaryCondition::Outdoors,
        "ConstructionA",
        geometry,
    )
}

fn total_area(surfaces: &[Surface]) -> f64 {
    surfaces.iter().map(Surface::area).sum()
}

fn opening_ids(surfaces: &[Surface]) -> Vec<String> {
    let mut ids: Vec<String> = surfaces
        .iter()
        .flat_map(|s| s.openings().map(|o| o.identifier.clone()))
        .collect();
    ids.sort();
    ids
}

#[test]
fn two_unit_squares_become_one_rectangle() {
    let surfaces = vec![
        wall("wall_a", facade(0.0, 1.0, 0.0, 1.0)),
        wall("wall_b", facade(1.0, 2.0, 0.0, 1.0)),
    ];

    let merged = simplify(&surfaces, TOLERANCE, ANGLE_TOLERANCE).unwrap();

    assert_eq!(merged.len(), 1);
    let surface = &merged[0];
    assert_eq!(surface.identifier, "wall_a");
    assert_eq!(surface.construction, "ConstructionA");
    assert_relative_eq!(surface.area(), 2.0, epsilon = 1e-6);

    let boundary = surface.geometry.boundary();
    assert_eq!(boundary.len(), 4);
    let corners = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, 1.0),
    ];
    for corner in &corners {
        assert!(
            boundary.iter().any(|p| (p - corner).norm() < 1e-6),
            "missing corner {corner:?} in {boundary:?}"
        );
    }
}

#[test]
fn opening_is_reattached_at_its_original_position() {
    let window = Opening::window("window_1", facade(0.5, 1.5, 0.5, 1.5));
    let mut host = wall("wall_a", facade(0.0, 2.0, 0.0, 2.0));
    host.add_window(window.clone());
    let surfaces = vec![host, wall("wall_b", facade(2.0, 4.0, 0.0, 2.0))];

    let report = simplify_with_config(&surfaces, &MergeConfig::default()).unwrap();

    assert_eq!(report.items.len(), 1);
    assert!(report.orphaned_openings.is_empty());
    let merged = &report.items[0];
    assert_relative_eq!(merged.area(), 8.0, epsilon = 1e-6);
    assert_eq!(merged.windows.len(), 1);
    assert!(merged.doors.is_empty());
    assert_eq!(merged.windows[0], window);
}

#[test]
fn doors_and_windows_from_every_member_survive() {
    let mut a = wall("a", facade(0.0, 3.0, 0.0, 3.0));
    a.add_window(Opening::window("a_win", facade(0.5, 1.5, 1.0, 2.0)));
    a.add_door(Opening::door("a_door", facade(2.0, 2.8, 0.0, 2.1)));
    let mut b = wall("b", facade(3.0, 6.0, 0.0, 3.0));
    b.add_window(Opening::window("b_win", facade(4.0, 5.0, 1.0, 2.0)));
    let mut c = wall("c", facade(0.0, 6.0, 3.0, 4.0));
    c.add_window(Opening::window("c_win", facade(1.0, 5.0, 3.2, 3.8)));
    let surfaces = vec![a, b, c];

    let report = simplify_with_config(&surfaces, &MergeConfig::default()).unwrap();

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.clusters_merged, 1);
    assert!(report.orphaned_openings.is_empty());
    assert_eq!(opening_ids(&report.items), opening_ids(&surfaces));
    assert_eq!(report.items[0].doors.len(), 1);
    assert_eq!(report.items[0].windows.len(), 3);
}

#[test]
fn unhostable_opening_is_reported() {
    let mut a = wall("a", facade(0.0, 1.0, 0.0, 1.0));
    a.add_window(Opening::window("stray", facade(5.0, 6.0, 0.2, 0.8)));
    let surfaces = vec![a, wall("b", facade(1.0, 2.0, 0.0, 1.0))];

    let report = simplify_with_config(&surfaces, &MergeConfig::default()).unwrap();

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.orphaned_openings.len(), 1);
    assert_eq!(report.orphaned_openings[0].identifier, "stray");
    assert_eq!(report.items[0].opening_count(), 0);
}

#[test]
fn area_is_conserved_across_clusters() {
    let mut surfaces = Vec::new();
    for i in 0..3 {
        for j in 0..2 {
            surfaces.push(Surface::new(
                format!("floor_{i}_{j}"),
                SurfaceType::Floor,
                BoundaryCondition::Ground,
                "Slab",
                level(i as f64, j as f64, i as f64 + 1.0, j as f64 + 1.0, 0.0),
            ));
        }
    }
    surfaces.push(wall("w1", facade(0.0, 1.5, 0.0, 3.0)));
    surfaces.push(wall("w2", facade(1.5, 3.0, 0.0, 3.0)));
    surfaces.push(Surface::new(
        "roof",
        SurfaceType::RoofCeiling,
        BoundaryCondition::Outdoors,
        "Roof",
        level(0.0, 0.0, 3.0, 2.0, 3.0),
    ));

    let merged = simplify(&surfaces, TOLERANCE, ANGLE_TOLERANCE).unwrap();

    assert_eq!(merged.len(), 3);
    assert_relative_eq!(total_area(&merged), total_area(&surfaces), epsilon = 1e-6);
    let floor = merged
        .iter()
        .find(|s| s.surface_type == SurfaceType::Floor)
        .unwrap();
    assert_relative_eq!(floor.area(), 6.0, epsilon = 1e-6);
}

#[test]
fn simplify_is_idempotent() {
    let mut host = wall("wall_a", facade(0.0, 2.0, 0.0, 2.0));
    host.add_window(Opening::window("window_1", facade(0.5, 1.5, 0.5, 1.5)));
    let surfaces = vec![
        host,
        wall("wall_b", facade(2.0, 4.0, 0.0, 2.0)),
        wall("wall_c", facade(9.0, 10.0, 0.0, 2.0)),
    ];

    let once = simplify(&surfaces, TOLERANCE, ANGLE_TOLERANCE).unwrap();
    let twice = simplify(&once, TOLERANCE, ANGLE_TOLERANCE).unwrap();

    assert_eq!(once.len(), 2);
    assert_eq!(once, twice);
}

#[test]
fn single_member_cluster_is_returned_unchanged() {
    let mut only = wall("only", facade(0.0, 2.0, 0.0, 2.0)).with_display_name("North");
    only.add_door(Opening::door("door", facade(0.5, 1.5, 0.0, 1.8)));

    let result = merge_surfaces(&[&only], &MergeConfig::default()).unwrap();

    assert_eq!(result.status, MergeStatus::Unchanged);
    assert_eq!(result.items, vec![only.clone()]);
    assert!(result.orphaned_openings.is_empty());
}

#[test]
fn planes_beyond_the_angle_tolerance_never_share_a_cluster() {
    let turn = 5f64.to_radians();
    let (dx, dy) = (2.0 * turn.cos(), 2.0 * turn.sin());
    let kinked = Face3D::from_vertices(vec![
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(2.0 + dx, dy, 0.0),
        Point3::new(2.0 + dx, dy, 2.0),
        Point3::new(2.0, 0.0, 2.0),
    ])
    .unwrap();
    let surfaces = vec![wall("a", facade(0.0, 2.0, 0.0, 2.0)), wall("b", kinked)];

    let clusters = cluster(&surfaces, TOLERANCE, ANGLE_TOLERANCE.to_radians());
    assert_eq!(clusters.len(), 2);

    let merged = simplify(&surfaces, TOLERANCE, ANGLE_TOLERANCE).unwrap();
    assert_eq!(merged, surfaces);
}

#[test]
fn opposite_facing_surfaces_are_not_merged() {
    let reversed = facade(1.0, 2.0, 0.0, 1.0).boundary().iter().rev().cloned().collect();
    let back = Face3D::from_vertices(reversed).unwrap();
    let surfaces = vec![wall("front", facade(0.0, 1.0, 0.0, 1.0)), wall("back", back)];

    let merged = simplify(&surfaces, TOLERANCE, ANGLE_TOLERANCE).unwrap();
    assert_eq!(merged.len(), 2);
}

#[test]
fn different_constructions_are_not_merged() {
    let mut other = wall("b", facade(1.0, 2.0, 0.0, 1.0));
    other.construction = "ConstructionB".to_string();
    let surfaces = vec![wall("a", facade(0.0, 1.0, 0.0, 1.0)), other];

    let merged = simplify(&surfaces, TOLERANCE, ANGLE_TOLERANCE).unwrap();
    assert_eq!(merged, surfaces);
}

#[test]
fn disjoint_union_falls_back_to_the_originals() {
    let members = vec![
        wall("a", facade(0.0, 1.0, 0.0, 1.0)),
        wall("b", facade(0.5, 1.5, 0.0, 1.0)),
        wall("c", facade(5.0, 6.0, 0.0, 1.0)),
    ];
    let refs: Vec<&Surface> = members.iter().collect();

    let result = merge_surfaces(&refs, &MergeConfig::default()).unwrap();

    assert_eq!(result.status, MergeStatus::Aborted);
    assert_eq!(result.items, members);
}

#[test]
fn isolated_surface_passes_through_beside_a_merge() {
    // c touches nothing, so it ends up in its own cluster.
    let surfaces = vec![
        wall("a", facade(0.0, 1.0, 0.0, 1.0)),
        wall("b", facade(1.0, 2.0, 0.0, 1.0)),
        wall("c", facade(5.0, 6.0, 0.0, 1.0)),
    ];
    let report = simplify_with_config(&surfaces, &MergeConfig::default()).unwrap();

    assert_eq!(report.clusters_merged, 1);
    assert_eq!(report.clusters_unchanged, 1);
    assert_eq!(report.clusters_aborted, 0);
    let ids: Vec<&str> = report.items.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn parallel_and_sequential_agree() {
    let surfaces: Vec<Surface> = (0..12)
        .map(|i| {
            let z = (i / 4) as f64 * 5.0;
            let x = (i % 4) as f64;
            wall(&format!("w{i}"), facade(x, x + 1.0, z, z + 1.0))
        })
        .collect();

    let sequential = simplify_with_config(&surfaces, &MergeConfig::default()).unwrap();
    let parallel =
        simplify_with_config(&surfaces, &MergeConfig::default().with_parallel(true)).unwrap();

    assert_eq!(sequential.items.len(), 3);
    assert_eq!(sequential.items, parallel.items);
}

#[test]
fn low_union_warning_threshold_still_merges() {
    // The warning itself is asserted in the engine's unit tests.
    let surfaces = vec![
        wall("a", facade(0.0, 1.0, 0.0, 1.0)),
        wall("b", facade(1.0, 2.0, 0.0, 1.0)),
        wall("c", facade(2.0, 3.0, 0.0, 1.0)),
    ];
    let config = MergeConfig::default().with_union_warning_threshold(1);
    let report = simplify_with_config(&surfaces, &config).unwrap();
    assert_eq!(report.items.len(), 1);
    assert_relative_eq!(report.items[0].area(), 3.0, epsilon = 1e-6);
}

#[test]
fn invalid_tolerance_is_rejected() {
    let surfaces = vec![wall("a", facade(0.0, 1.0, 0.0, 1.0))];
    assert!(matches!(
        simplify(&surfaces, 0.0, ANGLE_TOLERANCE),
        Err(Error::InvalidTolerance { .. })
    ));
    assert!(matches!(
        simplify(&surfaces, TOLERANCE, -1.0),
        Err(Error::InvalidTolerance { .. })
    ));
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(simplify(&[], TOLERANCE, ANGLE_TOLERANCE).unwrap().is_empty());
}

#[test]
fn shades_merge_by_display_name() {
    let shades = vec![
        ShadingElement::new("eave_1", level(0.0, -1.0, 2.0, 0.0, 3.0)).with_display_name("Eave"),
        ShadingElement::new("eave_2", level(2.0, -1.0, 4.0, 0.0, 3.0)).with_display_name("Eave"),
        ShadingElement::new("fin_1", level(4.0, -1.0, 5.0, 0.0, 3.0)).with_display_name("Fin"),
    ];

    let merged = simplify_shades(&shades, TOLERANCE, ANGLE_TOLERANCE).unwrap();

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].identifier, "eave_1");
    assert_eq!(merged[0].display_name, "Eave");
    assert_relative_eq!(merged[0].area(), 4.0, epsilon = 1e-6);
    assert_eq!(merged[1], shades[2]);
}

#[test]
fn interior_surfaces_are_filtered_before_merging() {
    let interior = Surface::new(
        "party_wall",
        SurfaceType::Wall,
        BoundaryCondition::Surface {
            adjacent_surface: "party_wall_other".to_string(),
            adjacent_room: "room_2".to_string(),
        },
        "Partition",
        facade(0.0, 1.0, 0.0, 1.0),
    );
    let towards_podium = Surface::new(
        "podium_floor",
        SurfaceType::Floor,
        BoundaryCondition::Surface {
            adjacent_surface: "podium_ceiling".to_string(),
            adjacent_room: "retail".to_string(),
        },
        "Slab",
        level(0.0, 0.0, 1.0, 1.0, 0.0),
    );
    let surfaces = vec![
        interior,
        towards_podium,
        wall("outside", facade(0.0, 1.0, 0.0, 1.0)),
    ];

    let exposed = exposed_surfaces(&surfaces, &["room_1", "room_2"]);
    let ids: Vec<&str> = exposed.iter().map(|s| s.identifier.as_str()).collect();
    assert_eq!(ids, vec!["podium_floor", "outside"]);
}
