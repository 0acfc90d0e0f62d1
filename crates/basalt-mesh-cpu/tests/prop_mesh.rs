mod common;

use basalt_chunk::{VoxelBuf, VoxelChannel};
use basalt_mesh_cpu::{BlockyMesher, BuildInput};
use common::*;
use proptest::prelude::*;

fn voxel_id() -> impl Strategy<Value = u16> {
    prop_oneof![
        5 => Just(AIR),
        3 => Just(STONE),
        1 => Just(GLASS),
        1 => Just(FERN),
        1 => Just(GRATE),
        1 => Just(SLAB),
        2 => (0u8..=WATER_MAX_LEVEL).prop_map(water),
    ]
}

fn block() -> impl Strategy<Value = (usize, usize, usize, Vec<u16>)> {
    (3usize..=6, 3usize..=6, 3usize..=6).prop_flat_map(|(sx, sy, sz)| {
        let volume = sx * sy * sz;
        (
            Just(sx),
            Just(sy),
            Just(sz),
            prop::collection::vec(voxel_id(), volume),
        )
    })
}

fn make_buf(sx: usize, sy: usize, sz: usize, ids: &[u16]) -> VoxelBuf {
    let mut buf = VoxelBuf::new(sx, sy, sz);
    buf.set_channel_u16(VoxelChannel::Type, ids);
    buf
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Every emitted surface is structurally sound on arbitrary content:
    // triangle-list indices in range, one normal/uv/color per vertex,
    // tangents absent or 4 floats per vertex.
    #[test]
    fn surfaces_are_structurally_sound(
        (sx, sy, sz, ids) in block(),
        lod_index in 0u8..=1,
        collision in any::<bool>(),
    ) {
        let mesher = BlockyMesher::with_library(test_library());
        let buf = make_buf(sx, sy, sz, &ids);
        let out = mesher.build(&BuildInput { voxels: &buf, lod_index, collision_hint: collision });

        for surface in &out.surfaces {
            prop_assert!(surface.material_index < MATERIAL_COUNT);
            prop_assert!(!surface.arrays.is_empty());
            check_integrity(&surface.arrays);
        }
        match out.collision_surface {
            Some(ref c) => {
                prop_assert!(collision);
                prop_assert_eq!(c.indices.len() % 3, 0);
                for &i in &c.indices {
                    prop_assert!((i as usize) < c.positions.len());
                }
            }
            None => prop_assert!(!collision),
        }
    }

    // Two builds of the same input are identical in order and content.
    #[test]
    fn builds_are_reproducible((sx, sy, sz, ids) in block()) {
        let mesher = BlockyMesher::with_library(test_library());
        let buf = make_buf(sx, sy, sz, &ids);
        let a = mesher.build(&BuildInput { voxels: &buf, lod_index: 0, collision_hint: true });
        let b = mesher.build(&BuildInput { voxels: &buf, lod_index: 0, collision_hint: true });

        prop_assert_eq!(a.surfaces.len(), b.surfaces.len());
        for (sa, sb) in a.surfaces.iter().zip(&b.surfaces) {
            prop_assert_eq!(sa.material_index, sb.material_index);
            prop_assert!(mesh_arrays_eq(&sa.arrays, &sb.arrays));
        }
        let ca = a.collision_surface.unwrap();
        let cb = b.collision_surface.unwrap();
        prop_assert_eq!(ca.positions, cb.positions);
        prop_assert_eq!(ca.indices, cb.indices);
    }

    // LOD scaling multiplies main-mesh positions by 2^k; seam geometry only
    // ever adds vertices on top of the scaled base mesh.
    #[test]
    fn lod_positions_scale((sx, sy, sz, ids) in block()) {
        let mesher = BlockyMesher::with_library(test_library());
        let buf = make_buf(sx, sy, sz, &ids);
        let base = mesher.build(&BuildInput { voxels: &buf, lod_index: 0, collision_hint: false });
        let scaled = mesher.build(&BuildInput { voxels: &buf, lod_index: 1, collision_hint: false });

        for surface in &base.surfaces {
            let Some(other) = scaled
                .surfaces
                .iter()
                .find(|s| s.material_index == surface.material_index)
            else {
                // A non-empty LOD 0 surface cannot vanish at LOD 1.
                prop_assert!(surface.arrays.is_empty());
                continue;
            };
            prop_assert!(other.arrays.positions.len() >= surface.arrays.positions.len());
            for (pa, pb) in surface
                .arrays
                .positions
                .iter()
                .zip(&other.arrays.positions)
            {
                prop_assert!((*pa * 2.0).distance_squared(*pb) < 1e-9);
            }
        }
    }
}
