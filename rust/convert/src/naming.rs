// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Names of converted logical volumes.
//!
//! Source names are not unique, so by default the identity of the source
//! volume is appended (`box` becomes `box0x100000002`). Names that already
//! carry such a marker, e.g. from a previous export, are kept verbatim.

use volconv_source::keys::address;
use volconv_source::{GeometryStore, LogicalVolumeKey, REFLECTED_NAME_EXTENSION};

use crate::error::Result;

/// Naming policy for converted logical volumes.
#[derive(Debug, Clone, Copy)]
pub struct NameGenerator {
    append_pointers: bool,
}

impl NameGenerator {
    pub fn new(append_pointers: bool) -> Self {
        Self { append_pointers }
    }

    /// True if `name` contains `0x` followed by a hex digit.
    pub fn has_identity_marker(name: &str) -> bool {
        name.match_indices("0x").any(|(i, _)| {
            name[i + 2..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_hexdigit())
        })
    }

    /// Decorates `name` with the identity of `key` if pointers are enabled.
    pub fn generate(&self, name: &str, key: LogicalVolumeKey) -> String {
        if self.append_pointers {
            format!("{name}{}", address(key))
        } else {
            name.to_string()
        }
    }

    /// Target name for a source logical volume.
    ///
    /// A reflection proxy is named after its constituent with the
    /// reflection extension after the identity marker.
    pub fn logical_volume_name(&self, store: &GeometryStore, lv: LogicalVolumeKey) -> Result<String> {
        let source = store.logical_volume(lv)?;
        if Self::has_identity_marker(&source.name) {
            return Ok(source.name.clone());
        }
        if let Some(constituent) = store.constituent_of(lv) {
            let base = &store.logical_volume(constituent)?.name;
            return Ok(format!(
                "{}{REFLECTED_NAME_EXTENSION}",
                self.generate(base, constituent)
            ));
        }
        Ok(self.generate(&source.name, lv))
    }
}
