// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # volconv source model
//!
//! In-memory hierarchical solid-geometry model. A [`GeometryStore`] owns
//! solids, logical volumes and physical volumes in slot maps with stable
//! keys. A logical volume (solid + list of daughter placements) can be
//! placed any number of times; a single physical volume can stand for many
//! instances when it is a replica or a parameterised placement; and a
//! logical volume can be a reflection proxy mirroring a constituent volume
//! through the Z axis.
//!
//! The store plays the role of the global volume and solid registries of a
//! detector geometry toolkit, but is passed around explicitly so several
//! independent geometries can coexist in one process.

pub mod construction;
pub mod error;
pub mod keys;
pub mod placement;
pub mod reflection;
pub mod replica;
pub mod solid;
pub mod store;

pub use error::{Error, Result};
pub use keys::{LogicalVolumeKey, PhysicalVolumeKey, SolidKey};
pub use placement::{
    InstanceDescriptor, Parameterisation, PhysicalVolume, PlacementKind, Transform,
};
pub use reflection::REFLECTED_NAME_EXTENSION;
pub use replica::{Axis, ReplicaSpec};
pub use solid::{Solid, SolidData};
pub use store::{GeometryStore, LogicalVolume};

// Re-export nalgebra types used throughout the public API
pub use nalgebra::{Rotation3, Vector3};
