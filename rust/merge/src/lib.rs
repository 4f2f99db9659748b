// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Envelope-Lite Merge
//!
//! Reduces a zone's envelope to the fewest surfaces that cover the same
//! area. Surfaces of the same type, boundary condition and construction that
//! lie in one plane and touch each other are unioned into one surface, and
//! their windows and doors are moved onto the result.
//!
//! ## Pipeline
//!
//! - [`grouping`]: key, plane and touching-graph clusters
//! - [`align`]: map each member into the reference member's 2D frame
//! - [`engine`]: union, hole classification, fallback to the originals
//! - [`openings`]: reattach pooled openings to the merged surfaces
//! - [`pipeline`]: [`simplify`] and friends
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use envelope_lite_merge::{simplify_with_config, MergeConfig};
//!
//! let config = MergeConfig::from_env();
//! let report = simplify_with_config(&surfaces, &config)?;
//! for opening in &report.orphaned_openings {
//!     eprintln!("unhosted opening {}", opening.identifier);
//! }
//! ```

pub mod align;
pub mod config;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod mergeable;
pub mod openings;
pub mod pipeline;

pub use align::polygon2d_in_reference_space;
pub use config::MergeConfig;
pub use engine::{merge_shades, merge_surfaces, MergeResult, MergeStatus, UnionShape};
pub use error::{Error, Result};
pub use grouping::{are_touching, cluster};
pub use mergeable::{Mergeable, SurfaceKey};
pub use pipeline::{
    exposed_surfaces, simplify, simplify_shades, simplify_shades_with_config,
    simplify_with_config, SimplifyReport,
};
