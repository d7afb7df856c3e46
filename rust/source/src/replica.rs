// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Replicated placements: evenly spaced slices of a mother volume.

use nalgebra::{Rotation3, Vector3};

use crate::placement::Transform;

/// Axis along which a replica is sliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Radial slices: every instance sits at the mother's origin.
    Rho,
    /// Azimuthal slices: each instance is rotated about Z.
    Phi,
}

/// Replication parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicaSpec {
    pub axis: Axis,
    pub count: usize,
    /// Length (or angle, for [`Axis::Phi`]) of one slice.
    pub width: f64,
    /// Start offset (only meaningful for [`Axis::Phi`]).
    pub offset: f64,
}

impl ReplicaSpec {
    pub fn new(axis: Axis, count: usize, width: f64) -> Self {
        Self {
            axis,
            count,
            width,
            offset: 0.0,
        }
    }

    /// Transform of slice `index`.
    ///
    /// Cartesian slices are centred on the mother: slice `i` sits at
    /// `-width * (count - 1) / 2 + i * width` along the axis. Phi slices are
    /// rotated about Z by `-(offset + width * (i + 0.5))`.
    pub fn instance_transform(&self, index: usize) -> Transform {
        let i = index as f64;
        match self.axis {
            Axis::X | Axis::Y | Axis::Z => {
                let val = -self.width * 0.5 * (self.count as f64 - 1.0) + self.width * i;
                let mut translation = Vector3::zeros();
                match self.axis {
                    Axis::X => translation.x = val,
                    Axis::Y => translation.y = val,
                    _ => translation.z = val,
                }
                Transform {
                    translation,
                    rotation: None,
                }
            }
            Axis::Phi => {
                let angle = -(self.offset + self.width * (i + 0.5));
                Transform::new(
                    Vector3::zeros(),
                    Rotation3::from_axis_angle(&Vector3::z_axis(), angle),
                )
            }
            Axis::Rho => Transform::identity(),
        }
    }
}
