// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Role and exposure tags for envelope surfaces.
//!
//! Both tags derive `Hash` and `Eq` so they can take part in the merge
//! grouping key, and render through `Display` for logs.

use serde::{Deserialize, Serialize};

/// The role a surface plays in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceType {
    Wall,
    RoofCeiling,
    Floor,
    AirBoundary,
}

impl SurfaceType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceType::Wall => "Wall",
            SurfaceType::RoofCeiling => "RoofCeiling",
            SurfaceType::Floor => "Floor",
            SurfaceType::AirBoundary => "AirBoundary",
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What sits on the other side of a surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryCondition {
    Outdoors,
    Ground,
    Adiabatic,
    /// Interior surface facing another surface in an adjacent room.
    Surface {
        adjacent_surface: String,
        adjacent_room: String,
    },
}

impl BoundaryCondition {
    /// Short name without the adjacency details.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryCondition::Outdoors => "Outdoors",
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Adiabatic => "Adiabatic",
            BoundaryCondition::Surface { .. } => "Surface",
        }
    }

    /// The room on the other side, for surface-adjacent boundaries.
    pub fn adjacent_room(&self) -> Option<&str> {
        match self {
            BoundaryCondition::Surface { adjacent_room, .. } => Some(adjacent_room),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryCondition::Surface {
                adjacent_surface,
                adjacent_room,
            } => write!(f, "Surface({adjacent_surface}, {adjacent_room})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Kind of a sub-surface hosted by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpeningKind {
    Window,
    Door,
}
