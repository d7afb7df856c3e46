// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry owning every logical and placed volume of the target model.
//!
//! IDs are assigned sequentially from 0 in creation order, so the registry
//! can hand out plain `Vec` indices and callers can build dense lookup
//! tables keyed by ID. Once [`VolumeRegistry::close`] has been called with a
//! world placement the registry is frozen.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::shape::UnplacedShape;
use crate::transform::Transformation3D;
use crate::volume::*;

/// Append-only store of target volumes.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use volconv_target::{Transformation3D, UnplacedShape, Vector3, VolumeRegistry};
///
/// let mut registry = VolumeRegistry::new();
/// let world = registry
///     .new_logical_volume("world", Arc::new(UnplacedShape::Orb { radius: 10.0 }))
///     .unwrap();
/// let child = registry
///     .new_logical_volume("child", Arc::new(UnplacedShape::Orb { radius: 1.0 }))
///     .unwrap();
/// let pv = registry
///     .place(child, world, "child_pv", Transformation3D::identity(), 0)
///     .unwrap();
/// let world_pv = registry.place_world(world, "world_pv", Transformation3D::identity()).unwrap();
///
/// assert_eq!(pv.0, 0);
/// assert_eq!(world_pv.0, 1);
/// registry.close(world_pv).unwrap();
/// assert!(registry.is_closed());
/// ```
#[derive(Debug, Default)]
pub struct VolumeRegistry {
    logical_volumes: Vec<LogicalVolume>,
    placed_volumes: Vec<PlacedVolume>,
    world: Option<PlacedVolumeId>,
}

impl VolumeRegistry {
    /// Creates an empty, open registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a world has been set; no further volumes may be added.
    pub fn is_closed(&self) -> bool {
        self.world.is_some()
    }

    /// The world placement, if the registry is closed.
    pub fn world(&self) -> Option<PlacedVolumeId> {
        self.world
    }

    /// Registers a logical volume and returns its ID.
    pub fn new_logical_volume(
        &mut self,
        name: impl Into<String>,
        shape: Arc<UnplacedShape>,
    ) -> Result<LogicalVolumeId> {
        self.ensure_open()?;
        let id = LogicalVolumeId(self.logical_volumes.len() as u32);
        self.logical_volumes.push(LogicalVolume {
            id,
            name: name.into(),
            shape,
            daughters: Vec::new(),
        });
        Ok(id)
    }

    /// Places `lv` inside `mother` and returns the new placement's ID.
    ///
    /// The placement is appended to the mother's daughter list.
    pub fn place(
        &mut self,
        lv: LogicalVolumeId,
        mother: LogicalVolumeId,
        name: impl Into<String>,
        transform: Transformation3D,
        copy_no: i32,
    ) -> Result<PlacedVolumeId> {
        self.ensure_open()?;
        self.logical_volume(lv)?;
        self.logical_volume(mother)?;

        let id = self.push_placed(lv, Some(mother), name.into(), transform, copy_no);
        self.logical_volumes[mother.index()].daughters.push(id);
        Ok(id)
    }

    /// Places `lv` without a mother, as a candidate world volume.
    pub fn place_world(
        &mut self,
        lv: LogicalVolumeId,
        name: impl Into<String>,
        transform: Transformation3D,
    ) -> Result<PlacedVolumeId> {
        self.ensure_open()?;
        self.logical_volume(lv)?;
        Ok(self.push_placed(lv, None, name.into(), transform, 0))
    }

    /// Freezes the registry with `world` as the top placement.
    pub fn close(&mut self, world: PlacedVolumeId) -> Result<()> {
        self.ensure_open()?;
        let pv = self.placed_volume(world)?;
        if pv.mother.is_some() {
            return Err(Error::NotAWorld(world));
        }
        self.world = Some(world);
        Ok(())
    }

    /// Drops every volume and reopens the registry.
    pub fn clear(&mut self) {
        self.logical_volumes.clear();
        self.placed_volumes.clear();
        self.world = None;
    }

    /// Returns the logical volume with the given ID.
    pub fn logical_volume(&self, id: LogicalVolumeId) -> Result<&LogicalVolume> {
        self.logical_volumes
            .get(id.index())
            .ok_or(Error::LogicalVolumeNotFound(id))
    }

    /// Returns the placed volume with the given ID.
    pub fn placed_volume(&self, id: PlacedVolumeId) -> Result<&PlacedVolume> {
        self.placed_volumes
            .get(id.index())
            .ok_or(Error::PlacedVolumeNotFound(id))
    }

    /// Looks up a logical volume by raw ID.
    pub fn find_logical_volume(&self, id: usize) -> Option<&LogicalVolume> {
        self.logical_volumes.get(id)
    }

    /// Looks up a placed volume by raw ID.
    pub fn find_placed_volume(&self, id: usize) -> Option<&PlacedVolume> {
        self.placed_volumes.get(id)
    }

    pub fn logical_volume_count(&self) -> usize {
        self.logical_volumes.len()
    }

    pub fn placed_volume_count(&self) -> usize {
        self.placed_volumes.len()
    }

    /// All logical volumes in ID order.
    pub fn logical_volumes(&self) -> &[LogicalVolume] {
        &self.logical_volumes
    }

    /// All placed volumes in ID order.
    pub fn placed_volumes(&self) -> &[PlacedVolume] {
        &self.placed_volumes
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::Closed)
        } else {
            Ok(())
        }
    }

    fn push_placed(
        &mut self,
        lv: LogicalVolumeId,
        mother: Option<LogicalVolumeId>,
        name: String,
        transform: Transformation3D,
        copy_no: i32,
    ) -> PlacedVolumeId {
        let id = PlacedVolumeId(self.placed_volumes.len() as u32);
        self.placed_volumes.push(PlacedVolume {
            id,
            name,
            logical_volume: lv,
            mother,
            transform,
            copy_no,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn cube() -> Arc<UnplacedShape> {
        Arc::new(UnplacedShape::Box {
            half: Vector3::new(1.0, 1.0, 1.0),
        })
    }

    #[test]
    fn ids_are_dense_and_sequential() {
        let mut registry = VolumeRegistry::new();
        let a = registry.new_logical_volume("a", cube()).unwrap();
        let b = registry.new_logical_volume("b", cube()).unwrap();
        assert_eq!((a.0, b.0), (0, 1));

        let p0 = registry.place(b, a, "b0", Transformation3D::identity(), 0).unwrap();
        let p1 = registry.place(b, a, "b1", Transformation3D::identity(), 1).unwrap();
        assert_eq!((p0.0, p1.0), (0, 1));
        assert_eq!(registry.logical_volume(a).unwrap().daughters, vec![p0, p1]);
        assert_eq!(registry.placed_volume(p1).unwrap().copy_no, 1);
    }

    #[test]
    fn closed_registry_rejects_changes() {
        let mut registry = VolumeRegistry::new();
        let world = registry.new_logical_volume("world", cube()).unwrap();
        let pv = registry.place_world(world, "world_pv", Transformation3D::identity()).unwrap();
        registry.close(pv).unwrap();

        assert!(matches!(
            registry.new_logical_volume("late", cube()),
            Err(Error::Closed)
        ));
        assert!(matches!(registry.close(pv), Err(Error::Closed)));

        registry.clear();
        assert!(!registry.is_closed());
        assert_eq!(registry.logical_volume_count(), 0);
    }

    #[test]
    fn daughter_cannot_be_world() {
        let mut registry = VolumeRegistry::new();
        let world = registry.new_logical_volume("world", cube()).unwrap();
        let child = registry.new_logical_volume("child", cube()).unwrap();
        let pv = registry.place(child, world, "c", Transformation3D::identity(), 0).unwrap();
        assert!(matches!(registry.close(pv), Err(Error::NotAWorld(_))));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut registry = VolumeRegistry::new();
        let world = registry.new_logical_volume("world", cube()).unwrap();
        let err = registry
            .place(LogicalVolumeId(7), world, "x", Transformation3D::identity(), 0)
            .unwrap_err();
        assert!(matches!(err, Error::LogicalVolumeNotFound(LogicalVolumeId(7))));
        assert!(registry.find_placed_volume(0).is_none());
    }
}
