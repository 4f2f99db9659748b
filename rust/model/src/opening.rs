// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Windows and doors hosted by a surface.

use envelope_lite_geometry::Face3D;

use crate::extensions::Extensions;
use crate::tags::OpeningKind;

/// A sub-surface (window or door) hosted by exactly one [`crate::Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub identifier: String,
    pub display_name: String,
    pub kind: OpeningKind,
    pub geometry: Face3D,
    pub extensions: Extensions,
}

impl Opening {
    pub fn new(identifier: impl Into<String>, kind: OpeningKind, geometry: Face3D) -> Self {
        let identifier = identifier.into();
        Self {
            display_name: identifier.clone(),
            identifier,
            kind,
            geometry,
            extensions: Extensions::default(),
        }
    }

    pub fn window(identifier: impl Into<String>, geometry: Face3D) -> Self {
        Self::new(identifier, OpeningKind::Window, geometry)
    }

    pub fn door(identifier: impl Into<String>, geometry: Face3D) -> Self {
        Self::new(identifier, OpeningKind::Door, geometry)
    }

    pub fn area(&self) -> f64 {
        self.geometry.area()
    }
}
