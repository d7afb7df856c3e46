// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # volconv target model
//!
//! Volume model laid out for navigation: every placement is its own node
//! with a dense integer ID, logical volumes are numbered the same way, and
//! mirror images are expressed as shapes scaled by a negative factor rather
//! than as a separate kind of volume.

pub mod error;
pub mod reflection;
pub mod registry;
pub mod shape;
pub mod transform;
pub mod volume;

pub use error::{Error, Result};
pub use reflection::{ReflectionFactory, REFLECTED_SUFFIX};
pub use registry::VolumeRegistry;
pub use shape::UnplacedShape;
pub use transform::Transformation3D;
pub use volume::{LogicalVolume, LogicalVolumeId, PlacedVolume, PlacedVolumeId};

pub use nalgebra::{Rotation3, Vector3};
