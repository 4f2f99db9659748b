// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Envelope-Lite Geometry
//!
//! Planar geometry primitives for building-envelope surfaces: oriented
//! planes with a local 2D frame, 2D polygons with tolerance-aware
//! containment tests, planar 3D faces with holes, and a tolerant 2D boolean
//! union built on i_overlay.

pub mod bool2d;
pub mod error;
pub mod face;
pub mod plane;
pub mod polygon;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use bool2d::union_all;
pub use error::{Error, Result};
pub use face::Face3D;
pub use plane::Plane;
pub use polygon::{PointRelationship, Polygon2D};
