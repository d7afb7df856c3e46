// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid shape descriptions.
//!
//! All lengths are in the source unit system (millimetres); angles are in
//! radians.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::keys::SolidKey;
use crate::placement::Transform;
use crate::store::GeometryStore;

/// Category-specific parameters of a solid.
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    /// Rectangular box given by its half-lengths.
    Box { half: Vector3<f64> },
    /// Full solid sphere.
    Orb { radius: f64 },
    /// Spherical shell (full angular range).
    Sphere { rmin: f64, rmax: f64 },
    /// Cylindrical section with an optional phi segment.
    Tube {
        rmin: f64,
        rmax: f64,
        half_z: f64,
        start_phi: f64,
        delta_phi: f64,
    },
    /// Trapezoid with x/y half-lengths varying linearly along z.
    Trd {
        dx1: f64,
        dx2: f64,
        dy1: f64,
        dy2: f64,
        dz: f64,
    },
    /// Another solid moved by a rigid transform.
    Displaced { base: SolidKey, transform: Transform },
    /// Another solid scaled per axis; a negative component mirrors it.
    Reflected { base: SolidKey, scale: Vector3<f64> },
    /// A solid category the converter has no counterpart for. The volume
    /// estimate (if any) is what a Monte-Carlo estimator would report.
    Opaque {
        entity_type: String,
        cubic_volume: Option<f64>,
    },
}

impl Solid {
    /// Name of the solid category, e.g. `"Box"`.
    pub fn entity_type(&self) -> &str {
        match self {
            Solid::Box { .. } => "Box",
            Solid::Orb { .. } => "Orb",
            Solid::Sphere { .. } => "Sphere",
            Solid::Tube { .. } => "Tube",
            Solid::Trd { .. } => "Trd",
            Solid::Displaced { .. } => "DisplacedSolid",
            Solid::Reflected { .. } => "ReflectedSolid",
            Solid::Opaque { entity_type, .. } => entity_type,
        }
    }
}

/// A named solid stored in the [`GeometryStore`].
#[derive(Debug, Clone)]
pub struct SolidData {
    pub name: String,
    pub shape: Solid,
}

impl GeometryStore {
    /// Computes the cubic volume of a solid in source units.
    ///
    /// Reflected solids report a negative volume when the scale mirrors the
    /// shape. Opaque solids report their estimate, or `None` when they have
    /// none.
    pub fn cubic_volume(&self, key: SolidKey) -> Result<Option<f64>> {
        let solid = self.solid(key)?;
        let volume = match &solid.shape {
            Solid::Box { half } => 8.0 * half.x * half.y * half.z,
            Solid::Orb { radius } => 4.0 / 3.0 * PI * radius.powi(3),
            Solid::Sphere { rmin, rmax } => 4.0 / 3.0 * PI * (rmax.powi(3) - rmin.powi(3)),
            Solid::Tube {
                rmin,
                rmax,
                half_z,
                delta_phi,
                ..
            } => delta_phi * (rmax * rmax - rmin * rmin) * half_z,
            Solid::Trd {
                dx1,
                dx2,
                dy1,
                dy2,
                dz,
            } => trd_volume(*dx1, *dx2, *dy1, *dy2, *dz),
            Solid::Displaced { base, .. } => return self.cubic_volume(*base),
            Solid::Reflected { base, scale } => {
                return Ok(self
                    .cubic_volume(*base)?
                    .map(|v| v * scale.x * scale.y * scale.z))
            }
            Solid::Opaque { cubic_volume, .. } => return Ok(*cubic_volume),
        };
        Ok(Some(volume))
    }

    /// Returns the solid for the given key.
    pub fn solid(&self, key: SolidKey) -> Result<&SolidData> {
        self.solids.get(key).ok_or(Error::SolidNotFound(key))
    }
}

/// Volume of a trapezoid whose half-widths vary linearly over `2 * dz`.
pub(crate) fn trd_volume(dx1: f64, dx2: f64, dy1: f64, dy2: f64, dz: f64) -> f64 {
    let (a, b) = (dx1, dx2 - dx1);
    let (c, d) = (dy1, dy2 - dy1);
    8.0 * dz * (a * c + 0.5 * (a * d + b * c) + b * d / 3.0)
}
