// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rigid transformations of placed volumes.

use nalgebra::{Matrix3, Point3, Rotation3, Vector3};

/// Rotation followed by translation, taking daughter coordinates to mother
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation3D {
    pub translation: Vector3<f64>,
    pub rotation: Rotation3<f64>,
}

impl Default for Transformation3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation3D {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Rotation3::identity(),
        }
    }

    pub fn new(translation: Vector3<f64>, rotation: Rotation3<f64>) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            translation,
            rotation: Rotation3::identity(),
        }
    }

    /// True if the translation is zero and the rotation is the identity
    /// (within `1e-12` per matrix element).
    pub fn is_identity(&self) -> bool {
        self.translation == Vector3::zeros()
            && (self.rotation.matrix() - Matrix3::identity()).amax() < 1e-12
    }

    /// True if there is a non-trivial rotation.
    pub fn has_rotation(&self) -> bool {
        (self.rotation.matrix() - Matrix3::identity()).amax() >= 1e-12
    }

    /// Maps a point from daughter to mother coordinates.
    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.rotation * p + self.translation
    }

    /// Maps a point from mother to daughter coordinates.
    pub fn inverse_transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.rotation.inverse() * (p - self.translation)
    }

    /// Conjugates the transformation by the Z mirror `diag(1, 1, -1)`: the
    /// placement of the same daughter inside the mirror image of its mother.
    pub fn reflect_z(&self) -> Self {
        let flip = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        Self {
            translation: Vector3::new(self.translation.x, self.translation.y, -self.translation.z),
            rotation: Rotation3::from_matrix_unchecked(flip * self.rotation.matrix() * flip),
        }
    }
}
