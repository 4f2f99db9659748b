// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque envelope surfaces (walls, roofs, floors) and their openings.

use envelope_lite_geometry::Face3D;

use crate::extensions::Extensions;
use crate::opening::Opening;
use crate::tags::{BoundaryCondition, OpeningKind, SurfaceType};

/// A planar building boundary element.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub identifier: String,
    pub display_name: String,
    pub surface_type: SurfaceType,
    pub boundary_condition: BoundaryCondition,
    /// Construction identifier. Part of the merge grouping key.
    pub construction: String,
    pub geometry: Face3D,
    pub windows: Vec<Opening>,
    pub doors: Vec<Opening>,
    pub extensions: Extensions,
}

impl Surface {
    pub fn new(
        identifier: impl Into<String>,
        surface_type: SurfaceType,
        boundary_condition: BoundaryCondition,
        construction: impl Into<String>,
        geometry: Face3D,
    ) -> Self {
        let identifier = identifier.into();
        Self {
            display_name: identifier.clone(),
            identifier,
            surface_type,
            boundary_condition,
            construction: construction.into(),
            geometry,
            windows: Vec::new(),
            doors: Vec::new(),
            extensions: Extensions::default(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn add_window(&mut self, window: Opening) {
        self.windows.push(window);
    }

    pub fn add_door(&mut self, door: Opening) {
        self.doors.push(door);
    }

    /// Attach an opening to the list matching its kind.
    pub fn add_opening(&mut self, opening: Opening) {
        match opening.kind {
            OpeningKind::Window => self.add_window(opening),
            OpeningKind::Door => self.add_door(opening),
        }
    }

    /// All openings, windows first then doors.
    pub fn openings(&self) -> impl Iterator<Item = &Opening> + '_ {
        self.windows.iter().chain(self.doors.iter())
    }

    pub fn opening_count(&self) -> usize {
        self.windows.len() + self.doors.len()
    }

    /// A new surface with this surface's metadata and the given geometry.
    ///
    /// Openings are not carried over; they have to be re-validated against
    /// the new geometry.
    pub fn with_geometry(&self, geometry: Face3D) -> Self {
        Self {
            identifier: self.identifier.clone(),
            display_name: self.display_name.clone(),
            surface_type: self.surface_type,
            boundary_condition: self.boundary_condition.clone(),
            construction: self.construction.clone(),
            geometry,
            windows: Vec::new(),
            doors: Vec::new(),
            extensions: self.extensions.clone(),
        }
    }

    /// Gross area (openings are not subtracted).
    pub fn area(&self) -> f64 {
        self.geometry.area()
    }
}
