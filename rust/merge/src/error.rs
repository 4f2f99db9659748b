// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for surface merging.

/// Result type alias for merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while simplifying a surface set.
///
/// Ambiguous hole topology is not an error: the affected cluster passes
/// through unmerged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A cluster with no members reached the merge engine.
    #[error("cannot merge an empty cluster")]
    EmptyCluster,

    /// A tolerance was zero, negative or not finite.
    #[error("invalid {name}: {value} (must be finite and positive)")]
    InvalidTolerance { name: &'static str, value: f64 },

    /// Propagated from the geometry primitives.
    #[error(transparent)]
    Geometry(#[from] envelope_lite_geometry::Error),
}
