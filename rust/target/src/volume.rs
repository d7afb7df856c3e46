// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical and placed volumes with dense integer IDs.

use std::fmt;
use std::sync::Arc;

use crate::shape::UnplacedShape;
use crate::transform::Transformation3D;

/// Dense ID of a logical volume (`0..logical_volume_count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalVolumeId(pub u32);

/// Dense ID of a placed volume (`0..placed_volume_count`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacedVolumeId(pub u32);

impl LogicalVolumeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl PlacedVolumeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LogicalVolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LV#{}", self.0)
    }
}

impl fmt::Display for PlacedVolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PV#{}", self.0)
    }
}

/// A shape with the list of volumes placed inside it.
#[derive(Debug, Clone)]
pub struct LogicalVolume {
    pub id: LogicalVolumeId,
    pub name: String,
    pub shape: Arc<UnplacedShape>,
    pub daughters: Vec<PlacedVolumeId>,
}

/// One positioned instance of a logical volume.
#[derive(Debug, Clone)]
pub struct PlacedVolume {
    pub id: PlacedVolumeId,
    pub name: String,
    pub logical_volume: LogicalVolumeId,
    /// `None` for the world.
    pub mother: Option<LogicalVolumeId>,
    pub transform: Transformation3D,
    pub copy_no: i32,
}
