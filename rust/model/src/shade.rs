// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detached shading elements.

use envelope_lite_geometry::Face3D;

use crate::extensions::Extensions;

/// A planar element that casts shade. No openings, no boundary condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingElement {
    pub identifier: String,
    pub display_name: String,
    pub geometry: Face3D,
    pub extensions: Extensions,
}

impl ShadingElement {
    pub fn new(identifier: impl Into<String>, geometry: Face3D) -> Self {
        let identifier = identifier.into();
        Self {
            display_name: identifier.clone(),
            identifier,
            geometry,
            extensions: Extensions::default(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// A new element with this element's metadata and the given geometry.
    pub fn with_geometry(&self, geometry: Face3D) -> Self {
        Self {
            identifier: self.identifier.clone(),
            display_name: self.display_name.clone(),
            geometry,
            extensions: self.extensions.clone(),
        }
    }

    pub fn area(&self) -> f64 {
        self.geometry.area()
    }
}
