// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unplaced shapes: solid descriptions in the shape's own frame.

use std::f64::consts::PI;
use std::sync::Arc;

use nalgebra::Vector3;

use crate::transform::Transformation3D;

/// A shape that has not been positioned in a mother yet.
///
/// Shapes are shared through `Arc`: several logical volumes (and the
/// mirrored variant of a volume) refer to the same instance.
#[derive(Debug, Clone, PartialEq)]
pub enum UnplacedShape {
    Box {
        half: Vector3<f64>,
    },
    Orb {
        radius: f64,
    },
    Sphere {
        rmin: f64,
        rmax: f64,
    },
    Tube {
        rmin: f64,
        rmax: f64,
        half_z: f64,
        start_phi: f64,
        delta_phi: f64,
    },
    Trd {
        dx1: f64,
        dx2: f64,
        dy1: f64,
        dy2: f64,
        dz: f64,
    },
    /// A shape moved within its own frame.
    Displaced {
        base: Arc<UnplacedShape>,
        transform: Transformation3D,
    },
    /// A shape scaled per axis. An odd number of negative factors is a
    /// mirror image and yields a negative capacity.
    Scaled {
        base: Arc<UnplacedShape>,
        scale: Vector3<f64>,
    },
}

impl UnplacedShape {
    /// Volume enclosed by the shape.
    ///
    /// Mirrored shapes report the negative of their base's capacity.
    pub fn capacity(&self) -> f64 {
        match self {
            UnplacedShape::Box { half } => 8.0 * half.x * half.y * half.z,
            UnplacedShape::Orb { radius } => 4.0 / 3.0 * PI * radius.powi(3),
            UnplacedShape::Sphere { rmin, rmax } => 4.0 / 3.0 * PI * (rmax.powi(3) - rmin.powi(3)),
            UnplacedShape::Tube {
                rmin,
                rmax,
                half_z,
                delta_phi,
                ..
            } => delta_phi * (rmax * rmax - rmin * rmin) * half_z,
            UnplacedShape::Trd {
                dx1,
                dx2,
                dy1,
                dy2,
                dz,
            } => {
                let (a, b) = (*dx1, dx2 - dx1);
                let (c, d) = (*dy1, dy2 - dy1);
                8.0 * dz * (a * c + 0.5 * (a * d + b * c) + b * d / 3.0)
            }
            UnplacedShape::Displaced { base, .. } => base.capacity(),
            UnplacedShape::Scaled { base, scale } => base.capacity() * scale.x * scale.y * scale.z,
        }
    }

    /// Short name of the shape category.
    pub fn type_name(&self) -> &'static str {
        match self {
            UnplacedShape::Box { .. } => "Box",
            UnplacedShape::Orb { .. } => "Orb",
            UnplacedShape::Sphere { .. } => "Sphere",
            UnplacedShape::Tube { .. } => "Tube",
            UnplacedShape::Trd { .. } => "Trd",
            UnplacedShape::Displaced { .. } => "Displaced",
            UnplacedShape::Scaled { .. } => "Scaled",
        }
    }

    /// True if the shape is a mirror image.
    pub fn is_reflected(&self) -> bool {
        match self {
            UnplacedShape::Scaled { base, scale } => {
                (scale.x * scale.y * scale.z < 0.0) != base.is_reflected()
            }
            UnplacedShape::Displaced { base, .. } => base.is_reflected(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn box_capacity() {
        let shape = UnplacedShape::Box {
            half: Vector3::new(10.0, 20.0, 30.0),
        };
        assert_relative_eq!(shape.capacity(), 48000.0);
        assert!(!shape.is_reflected());
    }

    #[test]
    fn scaled_capacity_follows_determinant() {
        let base = Arc::new(UnplacedShape::Orb { radius: 1.0 });
        let mirrored = UnplacedShape::Scaled {
            base: Arc::clone(&base),
            scale: Vector3::new(1.0, 1.0, -1.0),
        };
        assert_relative_eq!(mirrored.capacity(), -base.capacity());
        assert!(mirrored.is_reflected());

        let stretched = UnplacedShape::Scaled {
            base: Arc::clone(&base),
            scale: Vector3::new(2.0, 1.0, 1.0),
        };
        assert_relative_eq!(stretched.capacity(), 2.0 * base.capacity());
        assert!(!stretched.is_reflected());
    }

    #[test]
    fn double_mirror_is_not_reflected() {
        let base = Arc::new(UnplacedShape::Box {
            half: Vector3::new(1.0, 1.0, 1.0),
        });
        let once = Arc::new(UnplacedShape::Scaled {
            base,
            scale: Vector3::new(1.0, 1.0, -1.0),
        });
        let twice = UnplacedShape::Scaled {
            base: once,
            scale: Vector3::new(1.0, 1.0, -1.0),
        };
        assert!(!twice.is_reflected());
        assert_relative_eq!(twice.capacity(), 8.0);
    }

    #[test]
    fn displaced_keeps_capacity() {
        let base = Arc::new(UnplacedShape::Tube {
            rmin: 1.0,
            rmax: 2.0,
            half_z: 3.0,
            start_phi: 0.0,
            delta_phi: 2.0 * PI,
        });
        let displaced = UnplacedShape::Displaced {
            base: Arc::clone(&base),
            transform: Transformation3D::from_translation(Vector3::new(5.0, 0.0, 0.0)),
        };
        assert_relative_eq!(displaced.capacity(), base.capacity());
        assert_relative_eq!(base.capacity(), 18.0 * PI, max_relative = 1e-12);
    }
}
