// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Physical volumes: placements of logical volumes inside a mother.
//!
//! A physical volume is one of four kinds. A plain placement is a single
//! instance. A replica or a parameterised placement stands for many
//! instances that are never stored individually; instead, each instance is
//! produced on demand as an [`InstanceDescriptor`] value.

use std::fmt;
use std::sync::Arc;

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::keys::LogicalVolumeKey;
use crate::replica::ReplicaSpec;

/// Rigid placement transform of a daughter frame inside its mother.
///
/// `rotation` is `None` for an unrotated placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub rotation: Option<Rotation3<f64>>,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A pure translation.
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            rotation: None,
        }
    }

    /// A translation combined with a rotation.
    pub fn new(translation: Vector3<f64>, rotation: Rotation3<f64>) -> Self {
        Self {
            translation,
            rotation: Some(rotation),
        }
    }

    /// True if there is no rotation and no translation.
    pub fn is_identity(&self) -> bool {
        self.rotation.is_none() && self.translation == Vector3::zeros()
    }

    /// Conjugates the transform by the Z mirror `diag(1, 1, -1)`.
    ///
    /// This is the placement of a daughter inside the mirror image of its
    /// mother.
    pub fn reflect_z(&self) -> Self {
        let flip = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        Self {
            translation: Vector3::new(self.translation.x, self.translation.y, -self.translation.z),
            rotation: self
                .rotation
                .map(|r| Rotation3::from_matrix_unchecked(flip * r.matrix() * flip)),
        }
    }
}

/// Callback computing the transform of each instance of a parameterised
/// placement.
pub trait Parameterisation: fmt::Debug + Send + Sync {
    /// Transform of instance `index` (in `0..multiplicity`).
    fn compute_transform(&self, index: usize) -> Transform;

    /// Material index of instance `index`, if the parameterisation varies
    /// materials.
    fn material_index(&self, _index: usize) -> Option<usize> {
        None
    }
}

/// What a physical volume represents.
#[derive(Debug, Clone)]
pub enum PlacementKind {
    /// A single instance at the stored transform.
    Placement,
    /// `spec.count` instances spaced along an axis.
    Replica(ReplicaSpec),
    /// `multiplicity` instances positioned by a callback.
    Parameterised {
        parameterisation: Arc<dyn Parameterisation>,
        multiplicity: usize,
    },
    /// A placement type the model can store but not expand.
    Other { type_name: String },
}

impl PlacementKind {
    /// Name of the placement type for diagnostics.
    pub fn type_name(&self) -> &str {
        match self {
            PlacementKind::Placement => "Placement",
            PlacementKind::Replica(_) => "Replica",
            PlacementKind::Parameterised { .. } => "Parameterised",
            PlacementKind::Other { type_name } => type_name,
        }
    }

    /// Number of instances this placement expands to.
    pub fn multiplicity(&self) -> usize {
        match self {
            PlacementKind::Placement | PlacementKind::Other { .. } => 1,
            PlacementKind::Replica(spec) => spec.count,
            PlacementKind::Parameterised { multiplicity, .. } => *multiplicity,
        }
    }
}

/// One concrete instance of a replica or parameterised placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceDescriptor {
    pub index: usize,
    pub transform: Transform,
    pub copy_no: i32,
}

/// A placement of a logical volume.
#[derive(Debug, Clone)]
pub struct PhysicalVolume {
    pub name: String,
    pub logical_volume: LogicalVolumeKey,
    /// `None` for the world placement.
    pub mother: Option<LogicalVolumeKey>,
    pub transform: Transform,
    pub copy_no: i32,
    pub kind: PlacementKind,
}

impl PhysicalVolume {
    /// Produces the descriptor of instance `index`.
    ///
    /// Plain placements only have instance 0, which is the stored transform
    /// and copy number. Replica and parameterised instances get the copy
    /// number equal to their index.
    pub fn instance(&self, index: usize) -> Option<InstanceDescriptor> {
        if index >= self.kind.multiplicity() {
            return None;
        }
        let descriptor = match &self.kind {
            PlacementKind::Placement | PlacementKind::Other { .. } => InstanceDescriptor {
                index,
                transform: self.transform,
                copy_no: self.copy_no,
            },
            PlacementKind::Replica(spec) => InstanceDescriptor {
                index,
                transform: spec.instance_transform(index),
                copy_no: index as i32,
            },
            PlacementKind::Parameterised {
                parameterisation, ..
            } => InstanceDescriptor {
                index,
                transform: parameterisation.compute_transform(index),
                copy_no: index as i32,
            },
        };
        Some(descriptor)
    }

    /// Iterates over all instances of this placement.
    pub fn instances(&self) -> impl Iterator<Item = InstanceDescriptor> + '_ {
        (0..self.kind.multiplicity()).filter_map(move |i| self.instance(i))
    }
}
