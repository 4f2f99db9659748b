// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Envelope-Lite Model
//!
//! The envelope objects a building-model conversion hands to the merge
//! engine: opaque [`Surface`]s with their hosted [`Opening`]s, detached
//! [`ShadingElement`]s, and the opaque [`Extensions`] bag that rides along
//! with each of them.

pub mod extensions;
pub mod opening;
pub mod shade;
pub mod surface;
pub mod tags;

pub use extensions::{ExtValue, Extensions};
pub use opening::Opening;
pub use shade::ShadingElement;
pub use surface::Surface;
pub use tags::{BoundaryCondition, OpeningKind, SurfaceType};
