// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid conversion with memoisation and a bounding-sphere fallback.

use std::f64::consts::PI;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use volconv_source::{GeometryStore, Solid, SolidKey};
use volconv_target::UnplacedShape;

use crate::error::{Error, Result};
use crate::scaler::Scaler;
use crate::transformer::Transformer;

/// Volume (in source units) assumed for unsupported solids that do not
/// report one.
pub const DEFAULT_FALLBACK_CAPACITY: f64 = 1.0;

/// Relative capacity difference above which `compare_volumes` warns.
pub const VOLUME_TOLERANCE: f64 = 1e-3;

/// Converts source solids to target shapes.
///
/// Each solid is converted at most once; later requests share the same
/// `Arc`. Failed conversions are not cached.
#[derive(Debug)]
pub struct SolidConverter {
    scaler: Scaler,
    transformer: Transformer,
    compare_volumes: bool,
    cache: FxHashMap<SolidKey, Arc<UnplacedShape>>,
}

impl SolidConverter {
    pub fn new(scaler: Scaler, transformer: Transformer, compare_volumes: bool) -> Self {
        Self {
            scaler,
            transformer,
            compare_volumes,
            cache: FxHashMap::default(),
        }
    }

    /// Number of distinct solids converted so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Converts a solid, reusing a previous result for the same key.
    ///
    /// Returns [`Error::UnsupportedSolid`] when the solid (or any solid it
    /// is built from) has no target counterpart.
    pub fn convert(&mut self, store: &GeometryStore, key: SolidKey) -> Result<Arc<UnplacedShape>> {
        if let Some(shape) = self.cache.get(&key) {
            return Ok(Arc::clone(shape));
        }

        let shape = Arc::new(self.convert_impl(store, key)?);
        if self.compare_volumes {
            self.compare(store, key, &shape)?;
        }
        self.cache.insert(key, Arc::clone(&shape));
        Ok(shape)
    }

    /// Builds a sphere with the same volume as the solid, or with
    /// [`DEFAULT_FALLBACK_CAPACITY`] when the volume is unknown.
    pub fn to_sphere(&self, store: &GeometryStore, key: SolidKey) -> Result<Arc<UnplacedShape>> {
        let volume = store
            .cubic_volume(key)?
            .map(f64::abs)
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_FALLBACK_CAPACITY);
        let radius = (3.0 * volume / (4.0 * PI)).cbrt();
        Ok(Arc::new(UnplacedShape::Orb {
            radius: self.scaler.length(radius),
        }))
    }

    fn convert_impl(&mut self, store: &GeometryStore, key: SolidKey) -> Result<UnplacedShape> {
        let solid = store.solid(key)?;
        let s = &self.scaler;
        let shape = match &solid.shape {
            Solid::Box { half } => UnplacedShape::Box {
                half: s.vector(half),
            },
            Solid::Orb { radius } => UnplacedShape::Orb {
                radius: s.length(*radius),
            },
            Solid::Sphere { rmin, rmax } => UnplacedShape::Sphere {
                rmin: s.length(*rmin),
                rmax: s.length(*rmax),
            },
            Solid::Tube {
                rmin,
                rmax,
                half_z,
                start_phi,
                delta_phi,
            } => UnplacedShape::Tube {
                rmin: s.length(*rmin),
                rmax: s.length(*rmax),
                half_z: s.length(*half_z),
                start_phi: *start_phi,
                delta_phi: *delta_phi,
            },
            Solid::Trd {
                dx1,
                dx2,
                dy1,
                dy2,
                dz,
            } => UnplacedShape::Trd {
                dx1: s.length(*dx1),
                dx2: s.length(*dx2),
                dy1: s.length(*dy1),
                dy2: s.length(*dy2),
                dz: s.length(*dz),
            },
            Solid::Displaced { base, transform } => {
                let transform = self.transformer.convert(transform);
                UnplacedShape::Displaced {
                    base: self.convert(store, *base)?,
                    transform,
                }
            }
            Solid::Reflected { base, scale } => UnplacedShape::Scaled {
                base: self.convert(store, *base)?,
                scale: *scale,
            },
            Solid::Opaque { entity_type, .. } => {
                return Err(Error::UnsupportedSolid {
                    entity_type: entity_type.clone(),
                    name: solid.name.clone(),
                })
            }
        };
        Ok(shape)
    }

    fn compare(&self, store: &GeometryStore, key: SolidKey, shape: &UnplacedShape) -> Result<()> {
        let Some(expected) = store.cubic_volume(key)?.map(|v| self.scaler.volume(v)) else {
            return Ok(());
        };
        let actual = shape.capacity();
        let scale = expected.abs().max(actual.abs()).max(f64::MIN_POSITIVE);
        if (actual - expected).abs() / scale > VOLUME_TOLERANCE {
            let solid = store.solid(key)?;
            tracing::warn!(
                solid = %solid.name,
                entity_type = solid.shape.entity_type(),
                expected,
                actual,
                "Converted solid capacity differs from source volume"
            );
        }
        Ok(())
    }
}
