// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the source geometry.
//!
//! The [`GeometryStore`] owns every solid, logical volume and physical
//! volume. Logical volumes additionally keep their creation order, which
//! is the "native" order consumers use when they want their own numbering
//! to follow the order volumes were defined in.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::keys::*;
use crate::placement::PhysicalVolume;
use crate::solid::SolidData;

/// A named description: a solid plus the daughters placed inside it.
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: SolidKey,
    pub daughters: Vec<PhysicalVolumeKey>,
    /// Sequential number assigned at creation.
    pub instance_id: usize,
}

/// Owner of the whole source geometry.
///
/// # Example
///
/// ```
/// use volconv_source::{GeometryStore, Solid, Transform, Vector3};
///
/// let mut store = GeometryStore::new();
/// let world_solid = store.add_solid("world", Solid::Orb { radius: 100.0 });
/// let world = store.add_logical_volume("world", world_solid);
/// let box_solid = store.add_solid("box", Solid::Box { half: Vector3::new(1.0, 1.0, 1.0) });
/// let box_lv = store.add_logical_volume("box", box_solid);
///
/// let world_pv = store.place_world("world_pv", world);
/// store.place("box_pv", box_lv, world, Transform::from_translation(10.0, 0.0, 0.0), 0).unwrap();
///
/// assert_eq!(store.logical_volume(world).unwrap().daughters.len(), 1);
/// assert_eq!(store.physical_volume(world_pv).unwrap().logical_volume, world);
/// ```
#[derive(Debug, Default)]
pub struct GeometryStore {
    pub(crate) solids: SlotMap<SolidKey, SolidData>,
    pub(crate) logical_volumes: SlotMap<LogicalVolumeKey, LogicalVolume>,
    pub(crate) physical_volumes: SlotMap<PhysicalVolumeKey, PhysicalVolume>,

    /// Logical volumes in creation order
    pub(crate) lv_order: Vec<LogicalVolumeKey>,

    /// Reflection proxy -> constituent
    pub(crate) constituents: FxHashMap<LogicalVolumeKey, LogicalVolumeKey>,
    /// Constituent -> reflection proxy
    pub(crate) reflections: FxHashMap<LogicalVolumeKey, LogicalVolumeKey>,
}

impl GeometryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logical volume for the given key.
    pub fn logical_volume(&self, key: LogicalVolumeKey) -> Result<&LogicalVolume> {
        self.logical_volumes
            .get(key)
            .ok_or(Error::LogicalVolumeNotFound(key))
    }

    /// Returns the physical volume for the given key.
    pub fn physical_volume(&self, key: PhysicalVolumeKey) -> Result<&PhysicalVolume> {
        self.physical_volumes
            .get(key)
            .ok_or(Error::PhysicalVolumeNotFound(key))
    }

    /// Logical volumes in the order they were created.
    pub fn logical_volumes_in_order(&self) -> &[LogicalVolumeKey] {
        &self.lv_order
    }

    /// Returns the number of solids in the store.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    /// Returns the number of logical volumes in the store.
    pub fn logical_volume_count(&self) -> usize {
        self.logical_volumes.len()
    }

    /// Returns the number of physical volumes in the store.
    pub fn physical_volume_count(&self) -> usize {
        self.physical_volumes.len()
    }

    /// Finds the first logical volume with the given name.
    pub fn find_logical_volume(&self, name: &str) -> Option<LogicalVolumeKey> {
        self.lv_order
            .iter()
            .copied()
            .find(|&k| self.logical_volumes[k].name == name)
    }
}
