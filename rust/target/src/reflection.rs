// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement of mirror-imaged volumes.
//!
//! A placement whose scale flips an odd number of axes cannot be expressed
//! as a rigid transformation. The factory instead places a reflected copy
//! of the logical volume (a [`UnplacedShape::Scaled`] shape with a z
//! mirror) using the remaining rigid part of the transformation.
//!
//! Reflected copies are kept consistent with their constituent: when one is
//! created, the constituent's daughters are mirrored into it, and every
//! later placement into the constituent is mirrored as well. These helper
//! placements and helper logical volumes get regular registry IDs.

use std::sync::Arc;

use nalgebra::{Matrix3, Rotation3, Vector3};
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::registry::VolumeRegistry;
use crate::shape::UnplacedShape;
use crate::transform::Transformation3D;
use crate::volume::{LogicalVolumeId, PlacedVolumeId};

/// Suffix added to the name of a reflected logical volume.
pub const REFLECTED_SUFFIX: &str = "_refl";

/// Creates and tracks reflected logical volumes.
#[derive(Debug, Default)]
pub struct ReflectionFactory {
    /// Constituent to reflected copy
    reflected: FxHashMap<LogicalVolumeId, LogicalVolumeId>,
    /// Reflected copy to constituent
    constituents: FxHashMap<LogicalVolumeId, LogicalVolumeId>,
}

impl ReflectionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflected copy of `lv`, if the factory has created one.
    pub fn reflected_of(&self, lv: LogicalVolumeId) -> Option<LogicalVolumeId> {
        self.reflected.get(&lv).copied()
    }

    /// Constituent of a reflected copy created by this factory.
    pub fn constituent_of(&self, lv: LogicalVolumeId) -> Option<LogicalVolumeId> {
        self.constituents.get(&lv).copied()
    }

    pub fn is_reflected(&self, lv: LogicalVolumeId) -> bool {
        self.constituents.contains_key(&lv)
    }

    /// Places `lv` in `mother` with the full transformation
    /// `transform * diag(scale)` and returns the primary placement.
    ///
    /// Every component of `scale` must be `1` or `-1`. If their product is
    /// negative the reflected copy of `lv` is placed. If `mother` has a
    /// reflected copy the mirror image of the placement is added to it too.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        registry: &mut VolumeRegistry,
        transform: Transformation3D,
        scale: Vector3<f64>,
        name: &str,
        lv: LogicalVolumeId,
        mother: LogicalVolumeId,
        copy_no: i32,
    ) -> Result<PlacedVolumeId> {
        if scale.iter().any(|s| (s.abs() - 1.0).abs() > 1e-12) {
            return Err(Error::UnsupportedScale([scale.x, scale.y, scale.z]));
        }
        let mirrored = scale.x * scale.y * scale.z < 0.0;

        // The z mirror is absorbed by the reflected shape; what is left of
        // the scale flips an even number of axes and is a proper rotation.
        let residual = if mirrored {
            Vector3::new(scale.x, scale.y, -scale.z)
        } else {
            scale
        };
        let rigid = Transformation3D::new(
            transform.translation,
            Rotation3::from_matrix_unchecked(
                transform.rotation.matrix() * Matrix3::from_diagonal(&residual),
            ),
        );

        let placed_lv = if mirrored {
            self.opposite(registry, lv)?
        } else {
            lv
        };
        let id = registry.place(placed_lv, mother, name, rigid, copy_no)?;

        if let Some(reflected_mother) = self.reflected_of(mother) {
            let image = self.opposite(registry, placed_lv)?;
            registry.place(image, reflected_mother, name, rigid.reflect_z(), copy_no)?;
        }

        Ok(id)
    }

    /// The mirror image of `lv`: its constituent if `lv` is a reflected
    /// copy, otherwise its (possibly new) reflected copy.
    fn opposite(
        &mut self,
        registry: &mut VolumeRegistry,
        lv: LogicalVolumeId,
    ) -> Result<LogicalVolumeId> {
        if let Some(constituent) = self.constituent_of(lv) {
            return Ok(constituent);
        }
        if let Some(reflected) = self.reflected_of(lv) {
            return Ok(reflected);
        }
        self.create_reflected(registry, lv)
    }

    fn create_reflected(
        &mut self,
        registry: &mut VolumeRegistry,
        lv: LogicalVolumeId,
    ) -> Result<LogicalVolumeId> {
        let (name, shape, daughters) = {
            let source = registry.logical_volume(lv)?;
            (
                format!("{}{}", source.name, REFLECTED_SUFFIX),
                Arc::new(UnplacedShape::Scaled {
                    base: Arc::clone(&source.shape),
                    scale: Vector3::new(1.0, 1.0, -1.0),
                }),
                source.daughters.clone(),
            )
        };

        let reflected = registry.new_logical_volume(name, shape)?;
        self.reflected.insert(lv, reflected);
        self.constituents.insert(reflected, lv);

        for pv in daughters {
            let (daughter_lv, pv_name, transform, copy_no) = {
                let daughter = registry.placed_volume(pv)?;
                (
                    daughter.logical_volume,
                    daughter.name.clone(),
                    daughter.transform,
                    daughter.copy_no,
                )
            };
            let image = self.opposite(registry, daughter_lv)?;
            registry.place(image, reflected, pv_name, transform.reflect_z(), copy_no)?;
        }

        Ok(reflected)
    }
}
