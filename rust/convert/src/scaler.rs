// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length unit scaling.

use nalgebra::Vector3;

use crate::error::{Error, Result};

/// Multiplies source lengths by a fixed positive factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    scale: f64,
}

impl Scaler {
    /// `scale` is the value of one source length unit in target units.
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale(scale));
        }
        Ok(Self { scale })
    }

    pub fn factor(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn length(&self, value: f64) -> f64 {
        value * self.scale
    }

    #[inline]
    pub fn vector(&self, value: &Vector3<f64>) -> Vector3<f64> {
        value * self.scale
    }

    /// Scales a volume, which goes with the cube of the length factor.
    #[inline]
    pub fn volume(&self, value: f64) -> f64 {
        value * self.scale.powi(3)
    }
}
