// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Memoised conversion of source logical volumes.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use volconv_source::{GeometryStore, LogicalVolumeKey};
use volconv_target::{LogicalVolumeId, UnplacedShape, VolumeRegistry};

use crate::error::{Error, Result};
use crate::naming::NameGenerator;
use crate::printable::PrintableLv;
use crate::solid::SolidConverter;

/// Maps each converted source logical volume to its target counterpart.
///
/// Daughters are not handled here; the table only creates the target
/// volume with its shape and name.
#[derive(Debug)]
pub struct LogicalVolumeTable {
    solids: SolidConverter,
    names: NameGenerator,
    cache: FxHashMap<LogicalVolumeKey, LogicalVolumeId>,
}

impl LogicalVolumeTable {
    pub fn new(solids: SolidConverter, names: NameGenerator) -> Self {
        Self {
            solids,
            names,
            cache: FxHashMap::default(),
        }
    }

    /// Returns the target volume for `lv`, creating it on first use.
    ///
    /// A solid without a target counterpart is replaced by a sphere of the
    /// same volume and reported in the log; the conversion goes on.
    pub fn convert(
        &mut self,
        store: &GeometryStore,
        registry: &mut VolumeRegistry,
        lv: LogicalVolumeKey,
    ) -> Result<LogicalVolumeId> {
        if let Some(&id) = self.cache.get(&lv) {
            return Ok(id);
        }
        let id = self.construct(store, registry, lv)?;
        self.cache.insert(lv, id);
        Ok(id)
    }

    /// Target volume of an already converted `lv`.
    pub fn get(&self, lv: LogicalVolumeKey) -> Option<LogicalVolumeId> {
        self.cache.get(&lv).copied()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Source logical volumes indexed by target logical volume ID.
    ///
    /// The index covers every volume in `registry`; target volumes that do
    /// not come from this table (such as reflected helper copies) are
    /// `None`.
    pub fn make_reverse_index(&self, registry: &VolumeRegistry) -> Vec<Option<LogicalVolumeKey>> {
        let len = self
            .cache
            .values()
            .map(|id| id.index() + 1)
            .max()
            .unwrap_or(0)
            .max(registry.logical_volume_count());
        let mut index = vec![None; len];
        for (&lv, id) in &self.cache {
            index[id.index()] = Some(lv);
        }
        index
    }

    fn construct(
        &mut self,
        store: &GeometryStore,
        registry: &mut VolumeRegistry,
        lv: LogicalVolumeKey,
    ) -> Result<LogicalVolumeId> {
        let solid_key = store.logical_volume(lv)?.solid;
        let shape: Arc<UnplacedShape> = match self.solids.convert(store, solid_key) {
            Ok(shape) => shape,
            Err(Error::UnsupportedSolid { entity_type, name }) => {
                tracing::error!(
                    entity_type = %entity_type,
                    solid = %name,
                    "Failed to convert solid"
                );
                let shape = self.solids.to_sphere(store, solid_key)?;
                tracing::warn!(
                    capacity = shape.capacity(),
                    "Replaced unknown solid with sphere"
                );
                tracing::info!(
                    logical_volume = %PrintableLv::new(store, lv),
                    "Unsupported solid belongs to logical volume"
                );
                shape
            }
            Err(e) => return Err(e),
        };

        let name = self.names.logical_volume_name(store, lv)?;
        Ok(registry.new_logical_volume(name, shape)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::Scaler;
    use crate::transformer::Transformer;
    use approx::assert_relative_eq;
    use volconv_source::{Solid, Vector3};

    fn table(append_pointers: bool) -> LogicalVolumeTable {
        let scaler = Scaler::new(1.0).unwrap();
        LogicalVolumeTable::new(
            SolidConverter::new(scaler, Transformer::new(scaler), false),
            NameGenerator::new(append_pointers),
        )
    }

    #[test]
    fn repeated_conversion_is_cached() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid(
            "box",
            Solid::Box {
                half: Vector3::new(1.0, 1.0, 1.0),
            },
        );
        let lv = store.add_logical_volume("box", solid);
        let mut registry = VolumeRegistry::new();
        let mut table = table(false);

        let a = table.convert(&store, &mut registry, lv).unwrap();
        let b = table.convert(&store, &mut registry, lv).unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.logical_volume_count(), 1);
        assert_eq!(registry.logical_volume(a).unwrap().name, "box");
    }

    #[test]
    fn unsupported_solid_becomes_sphere() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid(
            "weird",
            Solid::Opaque {
                entity_type: "GenericTrap".into(),
                cubic_volume: Some(27.0),
            },
        );
        let lv = store.add_logical_volume("weird", solid);
        let mut registry = VolumeRegistry::new();
        let id = table(true).convert(&store, &mut registry, lv).unwrap();

        let target = registry.logical_volume(id).unwrap();
        assert_eq!(target.shape.type_name(), "Orb");
        assert_relative_eq!(target.shape.capacity(), 27.0, max_relative = 1e-12);
        assert!(target.name.starts_with("weird0x"));
    }

    #[test]
    fn reverse_index_has_holes_for_foreign_volumes() {
        let mut store = GeometryStore::new();
        let solid = store.add_solid("orb", Solid::Orb { radius: 1.0 });
        let a = store.add_logical_volume("a", solid);
        let b = store.add_logical_volume("b", solid);

        let mut registry = VolumeRegistry::new();
        let mut table = table(false);
        table.convert(&store, &mut registry, a).unwrap();
        registry
            .new_logical_volume("helper", Arc::new(UnplacedShape::Orb { radius: 1.0 }))
            .unwrap();
        table.convert(&store, &mut registry, b).unwrap();
        registry
            .new_logical_volume("tail", Arc::new(UnplacedShape::Orb { radius: 1.0 }))
            .unwrap();

        let index = table.make_reverse_index(&registry);
        assert_eq!(index, vec![Some(a), None, Some(b), None]);
        assert_eq!(table.len(), 2);
    }
}
