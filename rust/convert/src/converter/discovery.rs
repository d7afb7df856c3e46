// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collection of the logical volumes reachable from the world.

use rustc_hash::FxHashSet;
use volconv_source::{GeometryStore, LogicalVolumeKey};

use crate::error::{Error, Result};

/// Depth-first walk over the placement tree.
///
/// With `resolve_reflections`, reflection proxies are replaced by their
/// constituents so only unreflected volumes are collected. A volume that
/// (directly or through its descendants) contains itself is an error.
pub(crate) struct Discovery<'a> {
    store: &'a GeometryStore,
    resolve_reflections: bool,
    visited: FxHashSet<LogicalVolumeKey>,
    path: FxHashSet<LogicalVolumeKey>,
}

impl<'a> Discovery<'a> {
    pub(crate) fn new(store: &'a GeometryStore, resolve_reflections: bool) -> Self {
        Self {
            store,
            resolve_reflections,
            visited: FxHashSet::default(),
            path: FxHashSet::default(),
        }
    }

    /// Visits `root` and everything below it; returns the visited set.
    pub(crate) fn run(mut self, root: LogicalVolumeKey) -> Result<FxHashSet<LogicalVolumeKey>> {
        let root = self.resolve(root);
        self.visit(root)?;
        Ok(self.visited)
    }

    fn resolve(&self, lv: LogicalVolumeKey) -> LogicalVolumeKey {
        if self.resolve_reflections {
            self.store.constituent_of(lv).unwrap_or(lv)
        } else {
            lv
        }
    }

    fn visit(&mut self, lv: LogicalVolumeKey) -> Result<()> {
        if !self.visited.insert(lv) {
            return Ok(());
        }
        self.path.insert(lv);

        let store = self.store;
        for &pv_key in &store.logical_volume(lv)?.daughters {
            let daughter = self.resolve(store.physical_volume(pv_key)?.logical_volume);
            if self.path.contains(&daughter) {
                return Err(Error::CyclicGeometry {
                    name: store.logical_volume(daughter)?.name.clone(),
                    lv: daughter,
                    placement: pv_key,
                });
            }
            self.visit(daughter)?;
        }

        self.path.remove(&lv);
        Ok(())
    }
}
