// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirror-reflected volumes.
//!
//! A reflected volume is represented by a *reflection proxy*: a separate
//! logical volume whose solid is the constituent's solid scaled by
//! `(1, 1, -1)` and whose daughters are the mirror images of the
//! constituent's daughters. The store records the proxy/constituent pair in
//! both directions so consumers that understand reflection can resolve the
//! proxy back to the real geometry.

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::keys::*;
use crate::placement::{PhysicalVolume, PlacementKind, Transform};
use crate::solid::Solid;
use crate::store::GeometryStore;

/// Suffix appended to the names of reflection proxies and their solids.
pub const REFLECTED_NAME_EXTENSION: &str = "_refl";

impl GeometryStore {
    /// Returns the constituent of a reflection proxy, or `None` if `lv` is
    /// an ordinary logical volume.
    pub fn constituent_of(&self, lv: LogicalVolumeKey) -> Option<LogicalVolumeKey> {
        self.constituents.get(&lv).copied()
    }

    /// Returns the reflection proxy of `lv`, if one was created.
    pub fn reflection_of(&self, lv: LogicalVolumeKey) -> Option<LogicalVolumeKey> {
        self.reflections.get(&lv).copied()
    }

    /// True if `lv` is a reflection proxy.
    pub fn is_reflection_proxy(&self, lv: LogicalVolumeKey) -> bool {
        self.constituents.contains_key(&lv)
    }

    /// Returns the mirror image of `lv`, creating the proxy (and mirrored
    /// daughters, recursively) on first use.
    ///
    /// Mirroring a proxy gives back its constituent.
    pub fn reflect(&mut self, lv: LogicalVolumeKey) -> Result<LogicalVolumeKey> {
        if let Some(constituent) = self.constituent_of(lv) {
            return Ok(constituent);
        }
        if let Some(proxy) = self.reflection_of(lv) {
            return Ok(proxy);
        }
        // Validate the whole subtree before creating anything
        self.check_reflectable(lv)?;
        self.reflect_unchecked(lv)
    }

    /// Places the mirror image of `lv` inside `mother`.
    pub fn place_reflected(
        &mut self,
        name: impl Into<String>,
        lv: LogicalVolumeKey,
        mother: LogicalVolumeKey,
        transform: Transform,
        copy_no: i32,
    ) -> Result<PhysicalVolumeKey> {
        let proxy = self.reflect(lv)?;
        self.place(name, proxy, mother, transform, copy_no)
    }

    fn check_reflectable(&self, lv: LogicalVolumeKey) -> Result<()> {
        if self.reflection_of(lv).is_some() || self.is_reflection_proxy(lv) {
            return Ok(());
        }
        for &pv_key in &self.logical_volume(lv)?.daughters {
            let pv = self.physical_volume(pv_key)?;
            match pv.kind {
                PlacementKind::Placement | PlacementKind::Replica(_) => {
                    self.check_reflectable(pv.logical_volume)?
                }
                PlacementKind::Parameterised { .. } | PlacementKind::Other { .. } => {
                    return Err(Error::UnsupportedReflection {
                        kind: pv.kind.type_name().to_string(),
                        name: pv.name.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    fn reflect_unchecked(&mut self, lv: LogicalVolumeKey) -> Result<LogicalVolumeKey> {
        if let Some(constituent) = self.constituent_of(lv) {
            return Ok(constituent);
        }
        if let Some(proxy) = self.reflection_of(lv) {
            return Ok(proxy);
        }

        let (name, solid, daughters) = {
            let source = self.logical_volume(lv)?;
            (source.name.clone(), source.solid, source.daughters.clone())
        };
        let solid_name = format!("{}{}", self.solid(solid)?.name, REFLECTED_NAME_EXTENSION);
        let reflected_solid = self.add_solid(
            solid_name,
            Solid::Reflected {
                base: solid,
                scale: Vector3::new(1.0, 1.0, -1.0),
            },
        );
        let proxy =
            self.add_logical_volume(format!("{name}{REFLECTED_NAME_EXTENSION}"), reflected_solid);
        self.constituents.insert(proxy, lv);
        self.reflections.insert(lv, proxy);

        for pv_key in daughters {
            let pv = self.physical_volume(pv_key)?.clone();
            let mirrored_lv = self.reflect_unchecked(pv.logical_volume)?;
            self.add_daughter(PhysicalVolume {
                name: pv.name,
                logical_volume: mirrored_lv,
                mother: Some(proxy),
                transform: pv.transform.reflect_z(),
                copy_no: pv.copy_no,
                kind: pv.kind,
            })?;
        }
        Ok(proxy)
    }
}
