// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion engine.
//!
//! A run goes through four stages:
//!
//! 1. **Discovering**: collect the logical volumes reachable from the world,
//!    checking that no volume contains itself.
//! 2. **Converting**: convert those volumes in the store's creation order,
//!    so target IDs follow the source layout as closely as possible.
//! 3. **Placing**: walk the tree from the world, placing the daughters of
//!    each target volume exactly once. A source volume placed many times
//!    becomes one target volume referenced by many placements; replicas and
//!    parameterised placements become one placement per copy.
//! 4. **Done**: the world is placed and the reverse indices are built.

mod daughter;
mod discovery;


use std::fmt;

use rustc_hash::FxHashSet;
use volconv_source::{GeometryStore, LogicalVolumeKey, PhysicalVolumeKey, PlacementKind};
use volconv_target::{LogicalVolumeId, ReflectionFactory, VolumeRegistry};

use crate::error::{Error, Result};
use crate::logical_volume::LogicalVolumeTable;
use crate::naming::NameGenerator;
use crate::options::Options;
use crate::printable::PrintableLv;
use crate::scaler::Scaler;
use crate::solid::SolidConverter;
use crate::transformer::Transformer;
use crate::Converted;

use daughter::{DaughterPlacer, PlacementTarget};
use discovery::Discovery;

/// Progress of a [`Converter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unstarted,
    Discovering,
    Converting,
    Placing,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Unstarted => "unstarted",
            Stage::Discovering => "discovering",
            Stage::Converting => "converting",
            Stage::Placing => "placing",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts one source tree into a target registry.
///
/// A converter runs once. If [`Converter::convert`] fails the converter
/// stays in the stage where it failed and must be dropped; the registry may
/// hold a partial geometry.
pub struct Converter<'a> {
    options: Options,
    store: &'a GeometryStore,
    transformer: Transformer,
    logical_volumes: LogicalVolumeTable,
    target: PlacementTarget<'a>,
    built_daughters: FxHashSet<LogicalVolumeId>,
    depth: usize,
    stage: Stage,
}

impl<'a> Converter<'a> {
    /// Creates a converter writing into `registry`, which must be open.
    pub fn new(
        store: &'a GeometryStore,
        registry: &'a mut VolumeRegistry,
        options: Options,
    ) -> Result<Self> {
        if registry.is_closed() {
            return Err(Error::RegistryClosed);
        }
        let scaler = Scaler::new(options.scale)?;
        let transformer = Transformer::new(scaler);
        let solids = SolidConverter::new(scaler, transformer, options.compare_volumes);
        let names = NameGenerator::new(options.append_pointers);

        Ok(Self {
            options,
            store,
            transformer,
            logical_volumes: LogicalVolumeTable::new(solids, names),
            target: PlacementTarget {
                registry,
                factory: options.reflection_factory.then(ReflectionFactory::new),
                physical_volumes: Vec::new(),
            },
            built_daughters: FxHashSet::default(),
            depth: 0,
            stage: Stage::Unstarted,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Converts the tree below `world`, which must be placed without
    /// rotation or translation.
    pub fn convert(&mut self, world: PhysicalVolumeKey) -> Result<Converted> {
        if self.stage != Stage::Unstarted {
            return Err(Error::AlreadyUsed(self.stage.as_str()));
        }
        let store = self.store;
        let world_pv = store.physical_volume(world)?;
        if !world_pv.transform.is_identity() {
            return Err(Error::WorldNotAtOrigin {
                name: world_pv.name.clone(),
            });
        }

        tracing::info!(
            world = %world_pv.name,
            scale = self.options.scale,
            reflection_factory = self.options.reflection_factory,
            "Converting geometry"
        );

        self.stage = Stage::Discovering;
        let reachable =
            Discovery::new(store, self.options.reflection_factory).run(world_pv.logical_volume)?;
        tracing::debug!(count = reachable.len(), "Discovered logical volumes");

        self.stage = Stage::Converting;
        for &lv in store.logical_volumes_in_order() {
            if reachable.contains(&lv) {
                self.logical_volumes
                    .convert(store, self.target.registry, lv)?;
            }
        }

        self.stage = Stage::Placing;
        let world_lv = self.build_with_daughters(world_pv.logical_volume)?;
        let transform = self.transformer.convert(&world_pv.transform);
        let world_id = self
            .target
            .registry
            .place_world(world_lv, world_pv.name.as_str(), transform)?;
        self.target.record(world_id.index(), world);

        let result = Converted {
            world: world_id,
            logical_volumes: self.logical_volumes.make_reverse_index(self.target.registry),
            physical_volumes: std::mem::take(&mut self.target.physical_volumes),
        };
        if result.logical_volumes.is_empty() {
            return Err(Error::Postcondition("logical volume index is empty"));
        }
        if result.physical_volumes.is_empty() {
            return Err(Error::Postcondition("physical volume index is empty"));
        }

        self.stage = Stage::Done;
        tracing::info!(
            logical_volumes = self.target.registry.logical_volume_count(),
            placed_volumes = self.target.registry.placed_volume_count(),
            "Geometry conversion complete"
        );
        Ok(result)
    }

    /// Converts `mother` and, the first time it is seen, places all of its
    /// daughters in it.
    fn build_with_daughters(&mut self, mother: LogicalVolumeKey) -> Result<LogicalVolumeId> {
        let store = self.store;
        let mother_lv = store.logical_volume(mother)?;
        if self.options.verbose {
            tracing::info!(depth = self.depth, volume = %mother_lv.name, "Converting");
        } else {
            tracing::trace!(depth = self.depth, volume = %mother_lv.name, "Converting");
        }

        let mother_id = self
            .logical_volumes
            .convert(store, self.target.registry, mother)?;
        if !self.built_daughters.insert(mother_id) {
            return Ok(mother_id);
        }

        self.depth += 1;
        for &pv_key in &mother_lv.daughters {
            let pv = store.physical_volume(pv_key)?;
            if let PlacementKind::Other { type_name } = &pv.kind {
                tracing::error!(
                    placement_type = %type_name,
                    placement = %pv.name,
                    logical_volume = %PrintableLv::new(store, pv.logical_volume),
                    "Unsupported placement type"
                );
                continue;
            }

            let placer = DaughterPlacer::new(
                store,
                self.target.factory.is_some(),
                pv.logical_volume,
                mother_id,
                |lv| self.build_with_daughters(lv),
            )?;
            placer.place(&mut self.target, &self.transformer, pv_key, pv)?;
        }
        self.depth -= 1;

        Ok(mother_id)
    }
}
