// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based storage of the source geometry.
//!
//! Keys are created by `slotmap::SlotMap` and are the identity of each
//! object: two placements of the same logical volume share the same
//! [`LogicalVolumeKey`]. The raw key bits double as a stable "address" for
//! naming purposes (see [`address`]).

use slotmap::{new_key_type, Key};

new_key_type! {
    /// Key for a solid (shape description).
    pub struct SolidKey;

    /// Key for a logical volume (solid plus daughter placements).
    pub struct LogicalVolumeKey;

    /// Key for a physical volume (placement of a logical volume).
    pub struct PhysicalVolumeKey;
}

/// Returns the identity of a key as a hexadecimal address fragment, e.g.
/// `0x100000003`.
pub fn address<K: Key>(key: K) -> String {
    format!("0x{:x}", key.data().as_ffi())
}
