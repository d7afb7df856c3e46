// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::volume::{LogicalVolumeId, PlacedVolumeId};

/// Result type alias for target registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the volume registry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The registry was closed and can no longer be modified.
    #[error("volume registry is closed")]
    Closed,

    /// Logical volume ID not registered.
    #[error("logical volume {0} not found")]
    LogicalVolumeNotFound(LogicalVolumeId),

    /// Placed volume ID not registered.
    #[error("placed volume {0} not found")]
    PlacedVolumeNotFound(PlacedVolumeId),

    /// Only a placement without a mother can be the world.
    #[error("placed volume {0} has a mother and cannot be the world")]
    NotAWorld(PlacedVolumeId),

    /// Reflection scales must be `±1` along every axis.
    #[error("unsupported reflection scale {0:?}")]
    UnsupportedScale([f64; 3]),
}
