// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expansion of replicas and parameterised placements, unit scaling,
//! unsupported solids and the density of the produced IDs.

use std::sync::Arc;

use approx::assert_relative_eq;
use volconv_convert::{convert, convert_with_options, Options};
use volconv_source::{
    Axis, GeometryStore, LogicalVolumeKey, Parameterisation, ReplicaSpec, Solid, Transform, Vector3,
};
use volconv_target::VolumeRegistry;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn add_box(store: &mut GeometryStore, name: &str, x: f64, y: f64, z: f64) -> LogicalVolumeKey {
    let solid = store.add_solid(
        name,
        Solid::Box {
            half: Vector3::new(x, y, z),
        },
    );
    store.add_logical_volume(name, solid)
}

/// Rows stacked along y, `pitch` apart, centred on the mother.
#[derive(Debug)]
struct RowStack {
    rows: usize,
    pitch: f64,
}

impl Parameterisation for RowStack {
    fn compute_transform(&self, index: usize) -> Transform {
        let offset = (index as f64 - 0.5 * (self.rows as f64 - 1.0)) * self.pitch;
        Transform::from_translation(0.0, offset, 0.0)
    }
}

#[test]
fn replica_expands_to_one_placement_per_slice() {
    init_tracing();
    let mut store = GeometryStore::new();
    let world = add_box(&mut store, "world", 100.0, 100.0, 100.0);
    let stack = add_box(&mut store, "stack", 10.0, 10.0, 10.0);
    let slice = add_box(&mut store, "slice", 10.0, 10.0, 2.0);
    let world_pv = store.place_world("world_pv", world);
    store.place("stack_pv", stack, world, Transform::identity(), 0).unwrap();
    let slices = store
        .place_replica("slice_pv", slice, stack, ReplicaSpec::new(Axis::Z, 5, 4.0))
        .unwrap();

    let mut registry = VolumeRegistry::new();
    let result = convert(&store, world_pv, &mut registry).unwrap();

    assert_eq!(&result.physical_volumes[..5], &[Some(slices); 5]);
    let placed = &registry.placed_volumes()[..5];
    let copies: Vec<i32> = placed.iter().map(|pv| pv.copy_no).collect();
    assert_eq!(copies, vec![0, 1, 2, 3, 4]);
    let z: Vec<f64> = placed.iter().map(|pv| pv.transform.translation.z).collect();
    for (actual, expected) in z.iter().zip([-8.0, -4.0, 0.0, 4.0, 8.0]) {
        assert_relative_eq!(*actual, expected);
    }
    // All slices share one target volume
    assert!(placed.iter().all(|pv| pv.logical_volume == placed[0].logical_volume));
}

#[test]
fn nested_parameterised_voxels() {
    init_tracing();
    let mut store = GeometryStore::new();
    let world = add_box(&mut store, "world", 100.0, 100.0, 100.0);
    let phantom = add_box(&mut store, "phantom", 8.0, 6.0, 1.0);
    let row = add_box(&mut store, "row", 8.0, 2.0, 1.0);
    let voxel = add_box(&mut store, "voxel", 2.0, 2.0, 1.0);
    let world_pv = store.place_world("world_pv", world);
    let phantom_pv = store
        .place("phantom_pv", phantom, world, Transform::from_translation(0.0, 0.0, 20.0), 0)
        .unwrap();
    let rows = store
        .place_parameterised(
            "row_pv",
            row,
            phantom,
            Arc::new(RowStack { rows: 3, pitch: 4.0 }),
            3,
        )
        .unwrap();
    let voxels = store
        .place_replica("voxel_pv", voxel, row, ReplicaSpec::new(Axis::X, 4, 4.0))
        .unwrap();

    let mut registry = VolumeRegistry::new();
    let result = convert(&store, world_pv, &mut registry).unwrap();

    // The row volume is built once: four voxels, then three rows
    let mut expected = vec![Some(voxels); 4];
    expected.extend([Some(rows); 3]);
    expected.extend([Some(phantom_pv), Some(world_pv)]);
    assert_eq!(result.physical_volumes, expected);
    assert_eq!(registry.logical_volume_count(), 4);

    let pvs = registry.placed_volumes();
    let voxel_copies: Vec<i32> = pvs[..4].iter().map(|pv| pv.copy_no).collect();
    let row_copies: Vec<i32> = pvs[4..7].iter().map(|pv| pv.copy_no).collect();
    assert_eq!(voxel_copies, vec![0, 1, 2, 3]);
    assert_eq!(row_copies, vec![0, 1, 2]);

    let row_y: Vec<f64> = pvs[4..7].iter().map(|pv| pv.transform.translation.y).collect();
    assert_relative_eq!(row_y[0], -4.0);
    assert_relative_eq!(row_y[2], 4.0);
    assert_relative_eq!(pvs[0].transform.translation.x, -6.0);

    let row_lv = registry.logical_volume(pvs[4].logical_volume).unwrap();
    assert_eq!(row_lv.daughters.len(), 4);
}

#[test]
fn phi_replica_rotates_slices() {
    let mut store = GeometryStore::new();
    let world = add_box(&mut store, "world", 100.0, 100.0, 100.0);
    let tube = store.add_solid(
        "ring",
        Solid::Tube {
            rmin: 5.0,
            rmax: 10.0,
            half_z: 2.0,
            start_phi: 0.0,
            delta_phi: 2.0 * std::f64::consts::PI,
        },
    );
    let ring = store.add_logical_volume("ring", tube);
    let sector_solid = store.add_solid(
        "sector",
        Solid::Tube {
            rmin: 5.0,
            rmax: 10.0,
            half_z: 2.0,
            start_phi: 0.0,
            delta_phi: std::f64::consts::FRAC_PI_2,
        },
    );
    let sector = store.add_logical_volume("sector", sector_solid);
    let world_pv = store.place_world("world_pv", world);
    store.place("ring_pv", ring, world, Transform::identity(), 0).unwrap();
    store
        .place_replica(
            "sector_pv",
            sector,
            ring,
            ReplicaSpec::new(Axis::Phi, 4, std::f64::consts::FRAC_PI_2),
        )
        .unwrap();

    let mut registry = VolumeRegistry::new();
    convert(&store, world_pv, &mut registry).unwrap();

    let sectors = &registry.placed_volumes()[..4];
    assert!(sectors.iter().all(|pv| pv.transform.has_rotation()));
    let total: f64 = sectors
        .iter()
        .map(|pv| registry.logical_volume(pv.logical_volume).unwrap().shape.capacity())
        .sum();
    let ring_id = registry.placed_volumes()[4].logical_volume;
    let ring_capacity = registry.logical_volume(ring_id).unwrap().shape.capacity();
    assert_relative_eq!(total, ring_capacity, max_relative = 1e-12);
}

#[test]
fn scale_changes_lengths_and_capacities() {
    let mut store = GeometryStore::new();
    let world = add_box(&mut store, "world", 100.0, 100.0, 100.0);
    let slab = add_box(&mut store, "slab", 1.0, 2.0, 3.0);
    let ball_solid = store.add_solid("ball", Solid::Sphere { rmin: 1.0, rmax: 2.0 });
    let ball = store.add_logical_volume("ball", ball_solid);
    let world_pv = store.place_world("world_pv", world);
    store
        .place("slab_pv", slab, world, Transform::from_translation(10.0, -5.0, 2.5), 0)
        .unwrap();
    store
        .place_reflected("ball_pv", ball, world, Transform::from_translation(0.0, 30.0, 0.0), 0)
        .unwrap();

    let run = |scale: f64| {
        let mut registry = VolumeRegistry::new();
        let options = Options {
            scale,
            ..Options::default()
        };
        convert_with_options(&store, world_pv, &mut registry, &options).unwrap();
        registry
    };
    let (s1, s2) = (1.0, 0.1);
    let a = run(s1);
    let b = run(s2);
    let ratio = s2 / s1;

    assert_eq!(a.logical_volume_count(), b.logical_volume_count());
    for (la, lb) in a.logical_volumes().iter().zip(b.logical_volumes()) {
        assert_eq!(la.name, lb.name);
        assert_relative_eq!(
            lb.shape.capacity(),
            la.shape.capacity() * ratio.powi(3),
            max_relative = 1e-12
        );
    }
    for (pa, pb) in a.placed_volumes().iter().zip(b.placed_volumes()) {
        assert_relative_eq!(
            pb.transform.translation,
            pa.transform.translation * ratio,
            max_relative = 1e-12
        );
    }
}

#[test]
fn unsupported_solid_is_replaced_and_conversion_continues() {
    init_tracing();
    let mut store = GeometryStore::new();
    let world = add_box(&mut store, "world", 100.0, 100.0, 100.0);
    let odd_solid = store.add_solid(
        "twisted",
        Solid::Opaque {
            entity_type: "TwistedBox".into(),
            cubic_volume: Some(125.0),
        },
    );
    let odd = store.add_logical_volume("odd", odd_solid);
    let after = add_box(&mut store, "after", 1.0, 1.0, 1.0);
    let world_pv = store.place_world("world_pv", world);
    store.place("odd_pv", odd, world, Transform::identity(), 0).unwrap();
    store
        .place("after_pv", after, world, Transform::from_translation(20.0, 0.0, 0.0), 0)
        .unwrap();

    let mut registry = VolumeRegistry::new();
    let options = Options {
        scale: 2.0,
        compare_volumes: true,
        verbose: true,
        ..Options::default()
    };
    let result = convert_with_options(&store, world_pv, &mut registry, &options).unwrap();

    assert_eq!(result.physical_volumes.len(), 3);
    let odd_lv = &registry.logical_volumes()[1];
    assert_eq!(result.logical_volumes[1], Some(odd));
    assert_eq!(odd_lv.shape.type_name(), "Orb");
    assert!(odd_lv.shape.capacity() > 0.0);
    assert_relative_eq!(odd_lv.shape.capacity(), 1000.0, max_relative = 1e-12);
}

#[test]
fn ids_are_dense_and_caching_is_stable() {
    let mut store = GeometryStore::new();
    let world = add_box(&mut store, "world", 100.0, 100.0, 100.0);
    let cell = add_box(&mut store, "cell", 1.0, 1.0, 1.0);
    let _unused = add_box(&mut store, "unused", 1.0, 1.0, 1.0);
    let world_pv = store.place_world("world_pv", world);
    for i in 0..10 {
        store
            .place("cell_pv", cell, world, Transform::from_translation(3.0 * i as f64, 0.0, 0.0), i)
            .unwrap();
    }

    let mut registry = VolumeRegistry::new();
    let result = convert(&store, world_pv, &mut registry).unwrap();

    // Unreachable volumes are not converted
    assert_eq!(result.logical_volumes, vec![Some(world), Some(cell)]);
    assert_eq!(result.physical_volumes.len(), 11);
    assert!(result.physical_volumes.iter().all(Option::is_some));
    assert_eq!(result.physical_volumes.last(), Some(&Some(world_pv)));

    for (i, pv) in registry.placed_volumes().iter().enumerate() {
        assert_eq!(pv.id.index(), i);
    }
    let cell_targets: Vec<_> = registry.placed_volumes()[..10]
        .iter()
        .map(|pv| pv.logical_volume)
        .collect();
    assert!(cell_targets.iter().all(|&lv| lv == cell_targets[0]));
    assert_eq!(result.world, registry.placed_volumes()[10].id);
}
