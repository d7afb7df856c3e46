// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion options, loadable from JSON or environment variables.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Trace every converted volume at `info` level.
    pub verbose: bool,
    /// Check converted capacities against the source volumes.
    pub compare_volumes: bool,
    /// Append the source identity to names that lack one.
    pub append_pointers: bool,
    /// Place reflected volumes through the reflection factory.
    pub reflection_factory: bool,
    /// Value of one source length unit in target units (0.1 for mm to cm).
    pub scale: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verbose: false,
            compare_volumes: false,
            append_pointers: true,
            reflection_factory: true,
            scale: 1.0,
        }
    }
}

impl Options {
    /// Parses options from a JSON document. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from `VOLCONV_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary variable lookup. Missing or
    /// unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(default)
        };
        Self {
            verbose: flag("VOLCONV_VERBOSE", defaults.verbose),
            compare_volumes: flag("VOLCONV_COMPARE_VOLUMES", defaults.compare_volumes),
            append_pointers: flag("VOLCONV_APPEND_POINTERS", defaults.append_pointers),
            reflection_factory: flag("VOLCONV_REFLECTION_FACTORY", defaults.reflection_factory),
            scale: lookup("VOLCONV_SCALE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.scale),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
