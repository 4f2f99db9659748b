// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The seam between the surface model and the merge engine.

use std::fmt::Debug;
use std::hash::Hash;

use envelope_lite_geometry::Face3D;
use envelope_lite_model::{BoundaryCondition, ShadingElement, Surface, SurfaceType};

/// A planar element the grouping pipeline and union step can work on.
pub trait Mergeable: Clone {
    /// Elements only merge with others that share an equal key.
    type Key: Eq + Hash + Clone + Debug;

    fn identifier(&self) -> &str;
    fn display_name(&self) -> &str;
    fn geometry(&self) -> &Face3D;
    fn group_key(&self) -> Self::Key;

    /// A new element carrying this element's metadata and `geometry`.
    fn with_geometry(&self, geometry: Face3D) -> Self;
}

/// Grouping key for opaque surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceKey {
    pub surface_type: SurfaceType,
    pub boundary_condition: BoundaryCondition,
    pub construction: String,
}

impl Mergeable for Surface {
    type Key = SurfaceKey;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn geometry(&self) -> &Face3D {
        &self.geometry
    }

    fn group_key(&self) -> SurfaceKey {
        SurfaceKey {
            surface_type: self.surface_type,
            boundary_condition: self.boundary_condition.clone(),
            construction: self.construction.clone(),
        }
    }

    fn with_geometry(&self, geometry: Face3D) -> Self {
        Surface::with_geometry(self, geometry)
    }
}

/// Shading elements carry no boundary condition or construction; they
/// group by display name.
impl Mergeable for ShadingElement {
    type Key = String;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn geometry(&self) -> &Face3D {
        &self.geometry
    }

    fn group_key(&self) -> String {
        self.display_name.clone()
    }

    fn with_geometry(&self, geometry: Face3D) -> Self {
        ShadingElement::with_geometry(self, geometry)
    }
}
