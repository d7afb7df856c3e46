// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for the source geometry.
//!
//! Every placement is created through the store, which checks that the
//! referenced volumes exist and appends the new placement to its mother's
//! daughter list.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::keys::*;
use crate::placement::{Parameterisation, PhysicalVolume, PlacementKind, Transform};
use crate::replica::ReplicaSpec;
use crate::solid::{Solid, SolidData};
use crate::store::{GeometryStore, LogicalVolume};

impl GeometryStore {
    /// Adds a named solid.
    pub fn add_solid(&mut self, name: impl Into<String>, shape: Solid) -> SolidKey {
        self.solids.insert(SolidData {
            name: name.into(),
            shape,
        })
    }

    /// Adds a logical volume without daughters.
    pub fn add_logical_volume(&mut self, name: impl Into<String>, solid: SolidKey) -> LogicalVolumeKey {
        let instance_id = self.lv_order.len();
        let key = self.logical_volumes.insert(LogicalVolume {
            name: name.into(),
            solid,
            daughters: Vec::new(),
            instance_id,
        });
        self.lv_order.push(key);
        key
    }

    /// Places the world volume: identity transform and no mother.
    pub fn place_world(&mut self, name: impl Into<String>, lv: LogicalVolumeKey) -> PhysicalVolumeKey {
        self.physical_volumes.insert(PhysicalVolume {
            name: name.into(),
            logical_volume: lv,
            mother: None,
            transform: Transform::identity(),
            copy_no: 0,
            kind: PlacementKind::Placement,
        })
    }

    /// Places a single instance of `lv` inside `mother`.
    pub fn place(
        &mut self,
        name: impl Into<String>,
        lv: LogicalVolumeKey,
        mother: LogicalVolumeKey,
        transform: Transform,
        copy_no: i32,
    ) -> Result<PhysicalVolumeKey> {
        self.add_daughter(PhysicalVolume {
            name: name.into(),
            logical_volume: lv,
            mother: Some(mother),
            transform,
            copy_no,
            kind: PlacementKind::Placement,
        })
    }

    /// Fills `mother` with `spec.count` slices of `lv`.
    pub fn place_replica(
        &mut self,
        name: impl Into<String>,
        lv: LogicalVolumeKey,
        mother: LogicalVolumeKey,
        spec: ReplicaSpec,
    ) -> Result<PhysicalVolumeKey> {
        let name = name.into();
        if spec.count == 0 {
            return Err(Error::EmptyMultiplicity(name));
        }
        if spec.width <= 0.0 {
            return Err(Error::InvalidReplicaWidth {
                name,
                width: spec.width,
            });
        }
        self.add_daughter(PhysicalVolume {
            name,
            logical_volume: lv,
            mother: Some(mother),
            transform: Transform::identity(),
            copy_no: 0,
            kind: PlacementKind::Replica(spec),
        })
    }

    /// Places `multiplicity` instances of `lv` positioned by a callback.
    pub fn place_parameterised(
        &mut self,
        name: impl Into<String>,
        lv: LogicalVolumeKey,
        mother: LogicalVolumeKey,
        parameterisation: Arc<dyn Parameterisation>,
        multiplicity: usize,
    ) -> Result<PhysicalVolumeKey> {
        let name = name.into();
        if multiplicity == 0 {
            return Err(Error::EmptyMultiplicity(name));
        }
        self.add_daughter(PhysicalVolume {
            name,
            logical_volume: lv,
            mother: Some(mother),
            transform: Transform::identity(),
            copy_no: 0,
            kind: PlacementKind::Parameterised {
                parameterisation,
                multiplicity,
            },
        })
    }

    /// Adds a placement of a type that consumers may not know how to expand.
    pub fn place_other(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        lv: LogicalVolumeKey,
        mother: LogicalVolumeKey,
        transform: Transform,
    ) -> Result<PhysicalVolumeKey> {
        self.add_daughter(PhysicalVolume {
            name: name.into(),
            logical_volume: lv,
            mother: Some(mother),
            transform,
            copy_no: 0,
            kind: PlacementKind::Other {
                type_name: type_name.into(),
            },
        })
    }

    /// Inserts a placement and links it into its mother.
    pub(crate) fn add_daughter(&mut self, pv: PhysicalVolume) -> Result<PhysicalVolumeKey> {
        if !self.logical_volumes.contains_key(pv.logical_volume) {
            return Err(Error::LogicalVolumeNotFound(pv.logical_volume));
        }
        let Some(mother) = pv.mother else {
            return Ok(self.physical_volumes.insert(pv));
        };
        if !self.logical_volumes.contains_key(mother) {
            return Err(Error::LogicalVolumeNotFound(mother));
        }

        let key = self.physical_volumes.insert(pv);
        self.logical_volumes[mother].daughters.push(key);
        Ok(key)
    }
}
