// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use volconv_source::{LogicalVolumeKey, PhysicalVolumeKey};

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion.
///
/// Unsupported solids and unsupported placement kinds are not errors: they
/// are logged and worked around so the conversion still completes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("world volume '{name}' must have no rotation and no translation")]
    WorldNotAtOrigin { name: String },

    #[error("target volume registry is already closed")]
    RegistryClosed,

    #[error("length scale must be positive, got {0}")]
    InvalidScale(f64),

    #[error("no conversion for solid type '{entity_type}' named '{name}'")]
    UnsupportedSolid { entity_type: String, name: String },

    #[error("logical volume '{name}' contains itself through placement {placement:?}")]
    CyclicGeometry {
        name: String,
        lv: LogicalVolumeKey,
        placement: PhysicalVolumeKey,
    },

    #[error("converter was already used (stage: {0})")]
    AlreadyUsed(&'static str),

    #[error("conversion postcondition failed: {0}")]
    Postcondition(&'static str),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error(transparent)]
    Source(#[from] volconv_source::Error),

    #[error(transparent)]
    Target(#[from] volconv_target::Error),
}
