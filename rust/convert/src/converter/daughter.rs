// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement of one source daughter in a converted mother.

use volconv_source::{GeometryStore, LogicalVolumeKey, PhysicalVolume, PhysicalVolumeKey};
use volconv_target::{LogicalVolumeId, ReflectionFactory, Vector3, VolumeRegistry};

use crate::error::Result;
use crate::transformer::Transformer;

/// Mutable target state shared by all placements of a run.
#[derive(Debug)]
pub(crate) struct PlacementTarget<'r> {
    pub(crate) registry: &'r mut VolumeRegistry,
    /// Present when reflected volumes go through the reflection factory
    pub(crate) factory: Option<ReflectionFactory>,
    /// Source placement of each target placement, by target ID
    pub(crate) physical_volumes: Vec<Option<PhysicalVolumeKey>>,
}

impl PlacementTarget<'_> {
    pub(crate) fn record(&mut self, id: usize, pv: PhysicalVolumeKey) {
        if self.physical_volumes.len() <= id {
            self.physical_volumes.resize(id + 1, None);
        }
        self.physical_volumes[id] = Some(pv);
    }
}

/// Places every instance of one source daughter in a target mother.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DaughterPlacer {
    daughter: LogicalVolumeId,
    mother: LogicalVolumeId,
    flip_z: bool,
}

impl DaughterPlacer {
    /// Resolves the daughter volume and converts it with `build_daughter`.
    ///
    /// With the reflection factory a reflection proxy is replaced by its
    /// constituent, and its instances are placed mirrored through Z.
    pub(crate) fn new(
        store: &GeometryStore,
        use_factory: bool,
        daughter: LogicalVolumeKey,
        mother: LogicalVolumeId,
        build_daughter: impl FnOnce(LogicalVolumeKey) -> Result<LogicalVolumeId>,
    ) -> Result<Self> {
        let constituent = if use_factory {
            store.constituent_of(daughter)
        } else {
            None
        };
        let flip_z = constituent.is_some();
        let daughter = build_daughter(constituent.unwrap_or(daughter))?;
        Ok(Self {
            daughter,
            mother,
            flip_z,
        })
    }

    /// Places all instances of `pv` and records each target ID.
    ///
    /// Plain placements yield one instance; replicas and parameterised
    /// placements yield one per copy number, all mapped to the same source
    /// placement.
    pub(crate) fn place(
        &self,
        target: &mut PlacementTarget<'_>,
        transformer: &Transformer,
        pv_key: PhysicalVolumeKey,
        pv: &PhysicalVolume,
    ) -> Result<usize> {
        let scale = Vector3::new(1.0, 1.0, if self.flip_z { -1.0 } else { 1.0 });
        let mut count = 0;
        for instance in pv.instances() {
            let transform = transformer.convert(&instance.transform);
            let id = match target.factory.as_mut() {
                // The factory is used even without a flip: the mother may
                // have a reflected copy that needs the daughter too.
                Some(factory) => factory.place(
                    target.registry,
                    transform,
                    scale,
                    &pv.name,
                    self.daughter,
                    self.mother,
                    instance.copy_no,
                )?,
                None => target.registry.place(
                    self.daughter,
                    self.mother,
                    pv.name.as_str(),
                    transform,
                    instance.copy_no,
                )?,
            };
            target.record(id.index(), pv_key);
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use volconv_source::{Axis, ReplicaSpec, Solid, Transform};
    use volconv_target::UnplacedShape;

    use crate::scaler::Scaler;

    fn orb() -> Arc<UnplacedShape> {
        Arc::new(UnplacedShape::Orb { radius: 1.0 })
    }

    #[test]
    fn replica_places_every_copy() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid("orb", Solid::Orb { radius: 1.0 });
        let mother = store.add_logical_volume("mother", solid);
        let slice = store.add_logical_volume("slice", solid);
        let pv_key = store
            .place_replica("slices", slice, mother, ReplicaSpec::new(Axis::X, 4, 2.0))
            .unwrap();

        let mut registry = VolumeRegistry::new();
        let mother_id = registry.new_logical_volume("mother", orb()).unwrap();
        let slice_id = registry.new_logical_volume("slice", orb()).unwrap();

        let placer = DaughterPlacer::new(&store, true, slice, mother_id, |_| Ok(slice_id)).unwrap();
        let mut target = PlacementTarget {
            registry: &mut registry,
            factory: Some(ReflectionFactory::new()),
            physical_volumes: Vec::new(),
        };
        let transformer = Transformer::new(Scaler::new(1.0).unwrap());
        let pv = store.physical_volume(pv_key).unwrap();
        let placed = placer.place(&mut target, &transformer, pv_key, pv).unwrap();

        assert_eq!(placed, 4);
        assert_eq!(target.physical_volumes, vec![Some(pv_key); 4]);
        let copies: Vec<i32> = registry.placed_volumes().iter().map(|p| p.copy_no).collect();
        assert_eq!(copies, vec![0, 1, 2, 3]);
        assert_eq!(registry.placed_volumes()[0].transform.translation.x, -3.0);
    }

    #[test]
    fn proxy_resolves_with_factory_only() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid("orb", Solid::Orb { radius: 1.0 });
        let mother = store.add_logical_volume("mother", solid);
        let child = store.add_logical_volume("child", solid);
        store
            .place_reflected("child_pv", child, mother, Transform::identity(), 0)
            .unwrap();
        let proxy = store.reflection_of(child).unwrap();

        let mut built = None;
        let placer = DaughterPlacer::new(&store, true, proxy, LogicalVolumeId(0), |lv| {
            built = Some(lv);
            Ok(LogicalVolumeId(1))
        })
        .unwrap();
        assert!(placer.flip_z);
        assert_eq!(built, Some(child));

        let placer = DaughterPlacer::new(&store, false, proxy, LogicalVolumeId(0), |lv| {
            built = Some(lv);
            Ok(LogicalVolumeId(1))
        })
        .unwrap();
        assert!(!placer.flip_z);
        assert_eq!(built, Some(proxy));
    }

    #[test]
    fn record_grows_with_holes() {
        let mut registry = VolumeRegistry::new();
        let mut target = PlacementTarget {
            registry: &mut registry,
            factory: None,
            physical_volumes: Vec::new(),
        };
        let pv: PhysicalVolumeKey = slotmap::KeyData::from_ffi(1).into();
        target.record(2, pv);
        assert_eq!(target.physical_volumes, vec![None, None, Some(pv)]);
    }
}
