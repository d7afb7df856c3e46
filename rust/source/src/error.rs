// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for source geometry operations.

use crate::keys::{LogicalVolumeKey, PhysicalVolumeKey, SolidKey};

/// Result type alias for source geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying the source geometry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Solid key not found in the store.
    #[error("solid not found: {0:?}")]
    SolidNotFound(SolidKey),

    /// Logical volume key not found in the store.
    #[error("logical volume not found: {0:?}")]
    LogicalVolumeNotFound(LogicalVolumeKey),

    /// Physical volume key not found in the store.
    #[error("physical volume not found: {0:?}")]
    PhysicalVolumeNotFound(PhysicalVolumeKey),

    /// A replica or parameterised placement must have at least one instance.
    #[error("placement '{0}' must have at least one instance")]
    EmptyMultiplicity(String),

    /// Replica width must be positive.
    #[error("replica '{name}' has non-positive width {width}")]
    InvalidReplicaWidth { name: String, width: f64 },

    /// A placement kind that cannot be mirrored.
    #[error("cannot reflect {kind} placement '{name}'")]
    UnsupportedReflection { kind: String, name: String },
}
