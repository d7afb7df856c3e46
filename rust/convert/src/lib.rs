// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # volconv conversion engine
//!
//! Converts a [`GeometryStore`] tree into a [`VolumeRegistry`], where every
//! placement is a separate node with a dense ID. The result maps target IDs
//! back to the source objects they came from.
//!
//! ```
//! use volconv_convert::convert;
//! use volconv_source::{GeometryStore, Solid, Transform, Vector3};
//! use volconv_target::VolumeRegistry;
//!
//! let mut store = GeometryStore::new();
//! let world_solid = store.add_solid("world", Solid::Orb { radius: 100.0 });
//! let world = store.add_logical_volume("world", world_solid);
//! let box_solid = store.add_solid("box", Solid::Box { half: Vector3::new(1.0, 1.0, 1.0) });
//! let box_lv = store.add_logical_volume("box", box_solid);
//! let world_pv = store.place_world("world_pv", world);
//! let box_pv = store.place("box_pv", box_lv, world, Transform::from_translation(5.0, 0.0, 0.0), 0).unwrap();
//!
//! let mut registry = VolumeRegistry::new();
//! let converted = convert(&store, world_pv, &mut registry).unwrap();
//!
//! assert_eq!(converted.physical_volumes, vec![Some(box_pv), Some(world_pv)]);
//! assert_eq!(converted.logical_volumes.len(), 2);
//! ```

pub mod converter;
pub mod error;
pub mod logical_volume;
pub mod naming;
pub mod options;
pub mod printable;
pub mod scaler;
pub mod solid;
pub mod transformer;

pub use converter::{Converter, Stage};
pub use error::{Error, Result};
pub use options::Options;

use volconv_source::{GeometryStore, LogicalVolumeKey, PhysicalVolumeKey};
use volconv_target::{PlacedVolumeId, VolumeRegistry};

/// Output of a conversion.
///
/// Replicated and parameterised source placements appear once per copy in
/// `physical_volumes`; the target copy number identifies the instance.
#[derive(Debug, Clone)]
pub struct Converted {
    /// Target placement of the world.
    pub world: PlacedVolumeId,
    /// Source logical volume of each target logical volume, by target ID.
    pub logical_volumes: Vec<Option<LogicalVolumeKey>>,
    /// Source placement of each target placement, by target ID.
    pub physical_volumes: Vec<Option<PhysicalVolumeKey>>,
}

/// Converts with default [`Options`].
pub fn convert(
    store: &GeometryStore,
    world: PhysicalVolumeKey,
    registry: &mut VolumeRegistry,
) -> Result<Converted> {
    convert_with_options(store, world, registry, &Options::default())
}

/// Converts the tree placed by `world` into `registry`.
///
/// The registry is left open so the caller can add to it or close it.
pub fn convert_with_options(
    store: &GeometryStore,
    world: PhysicalVolumeKey,
    registry: &mut VolumeRegistry,
    options: &Options,
) -> Result<Converted> {
    Converter::new(store, registry, *options)?.convert(world)
}
