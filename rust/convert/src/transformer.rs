// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source placement transforms to target transformations.

use volconv_source::Transform;
use volconv_target::{Rotation3, Transformation3D};

use crate::scaler::Scaler;

/// Builds scaled target transformations.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
    scaler: Scaler,
}

impl Transformer {
    pub fn new(scaler: Scaler) -> Self {
        Self { scaler }
    }

    /// Converts a rigid transform; only the translation is scaled.
    pub fn convert(&self, transform: &Transform) -> Transformation3D {
        Transformation3D::new(
            self.scaler.vector(&transform.translation),
            transform.rotation.unwrap_or_else(Rotation3::identity),
        )
    }
}
