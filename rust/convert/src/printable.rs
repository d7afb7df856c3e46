// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostic formatting of source logical volumes.

use std::fmt;

use volconv_source::keys::address;
use volconv_source::{GeometryStore, LogicalVolumeKey};

/// Displays a logical volume as `"name"@0x… (ID=n)`.
pub struct PrintableLv<'a> {
    store: &'a GeometryStore,
    lv: LogicalVolumeKey,
}

impl<'a> PrintableLv<'a> {
    pub fn new(store: &'a GeometryStore, lv: LogicalVolumeKey) -> Self {
        Self { store, lv }
    }
}

impl fmt::Display for PrintableLv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.store.logical_volume(self.lv) {
            Ok(lv) => write!(
                f,
                "\"{}\"@{} (ID={})",
                lv.name,
                address(self.lv),
                lv.instance_id
            ),
            Err(_) => write!(f, "{{missing logical volume {}}}", address(self.lv)),
        }
    }
}
