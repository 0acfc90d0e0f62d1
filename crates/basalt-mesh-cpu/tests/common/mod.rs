#![allow(dead_code)]

use basalt_chunk::{VoxelBuf, VoxelChannel};
use basalt_geom::{Vec2, Vec3};
use basalt_mesh_cpu::{BlockyMesher, BuildInput, BuildOutput, MeshArrays, OutputSurface};
use basalt_models::{
    BakedFluid, BakedModel, FluidSide, MaterialId, ModelKind, ModelLibrary, SharedLibrary,
    SIDE_COUNT,
};

pub const EMPTY_PATTERN: u32 = 0;
pub const FULL_PATTERN: u32 = 1;
pub const HALF_PATTERN: u32 = 2;

pub const AIR: u16 = 0;
pub const STONE: u16 = 1;
pub const GLASS: u16 = 2;
pub const FERN: u16 = 3;
pub const WATER_BASE: u16 = 4; // + level, levels 0..=7
pub const GRATE: u16 = 12;
pub const SLAB: u16 = 13;

pub const STONE_MAT: u16 = 0;
pub const GLASS_MAT: u16 = 1;
pub const WATER_MAT: u16 = 2;
pub const MATERIAL_COUNT: usize = 3;

pub const WATER_MAX_LEVEL: u8 = 7;

pub fn water(level: u8) -> u16 {
    WATER_BASE + u16::from(level)
}

/// Quad corners of one unit-cube side. Bottom two vertices first; the top
/// two are the last two, clockwise along the top edge seen from outside.
pub fn side_quad(side: usize) -> [Vec3; 4] {
    match side {
        0 => [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        1 => [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ],
        2 => [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        // Top face: quadrant order (+x,-z), (-x,-z), (-x,+z), (+x,+z)
        3 => [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ],
        4 => [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
        5 => [
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ],
        _ => unreachable!(),
    }
}

pub fn side_indices(side: usize) -> [u32; 6] {
    if side == 3 {
        [0, 2, 1, 0, 3, 2]
    } else {
        [0, 1, 3, 0, 3, 2]
    }
}

fn side_uvs() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
    ]
}

pub fn air_model() -> BakedModel {
    BakedModel {
        empty_sides_mask: 0b11_1111,
        side_pattern_indices: [EMPTY_PATTERN; SIDE_COUNT],
        culls_neighbors: false,
        contributes_to_ao: false,
        ..BakedModel::default()
    }
}

pub fn cube_model(material: u16) -> BakedModel {
    let mut model = BakedModel {
        surface_count: 1,
        empty: false,
        side_pattern_indices: [FULL_PATTERN; SIDE_COUNT],
        ..BakedModel::default()
    };
    model.surfaces[0].material_id = MaterialId(material);
    for side in 0..SIDE_COUNT {
        let surface = &mut model.sides_surfaces[side][0];
        surface.positions = side_quad(side).to_vec();
        surface.uvs = side_uvs();
        surface.indices = side_indices(side).to_vec();
    }
    model.update_empty_sides_mask();
    model
}

pub fn fluid_model(level: u8) -> BakedModel {
    let mut model = BakedModel {
        surface_count: 1,
        empty: false,
        transparency_index: 1,
        contributes_to_ao: false,
        side_pattern_indices: [FULL_PATTERN; SIDE_COUNT],
        kind: ModelKind::Fluid {
            fluid_index: 0,
            level,
        },
        ..BakedModel::default()
    };
    model.surfaces[0].material_id = MaterialId(WATER_MAT);
    model.surfaces[0].collision_enabled = false;
    model
}

pub fn water_fluid(dip_when_flowing_down: bool) -> BakedFluid {
    let mut fluid = BakedFluid {
        material_id: MaterialId(WATER_MAT),
        max_level: WATER_MAX_LEVEL,
        dip_when_flowing_down,
        ..BakedFluid::default()
    };
    for side in 0..SIDE_COUNT {
        fluid.side_surfaces[side] = FluidSide {
            positions: side_quad(side).to_vec(),
            indices: side_indices(side).to_vec(),
            // One tangent per vertex, 4 floats each.
            tangents: [1.0, 0.0, 0.0, 1.0].repeat(4),
        };
    }
    fluid
}

pub fn test_library_with(dip_when_flowing_down: bool) -> SharedLibrary {
    let mut lib = ModelLibrary::default();
    lib.models.push(air_model()); // 0

    lib.models.push(cube_model(STONE_MAT)); // 1

    let mut glass = cube_model(GLASS_MAT); // 2
    glass.transparency_index = 1;
    lib.models.push(glass);

    let mut fern = cube_model(GLASS_MAT); // 3
    fern.culls_neighbors = false;
    fern.contributes_to_ao = false;
    fern.surfaces[0].collision_enabled = false;
    lib.models.push(fern);

    for level in 0..=WATER_MAX_LEVEL {
        lib.models.push(fluid_model(level)); // 4..=11
    }

    let mut grate = cube_model(STONE_MAT); // 12
    grate.cutout_sides_enabled = true;
    for side in 0..SIDE_COUNT {
        // Pre-cut replacement: the lower half of the face.
        let mut cut = grate.sides_surfaces[side].clone();
        for p in &mut cut[0].positions {
            if p.y > 0.5 {
                p.y = 0.5;
            }
        }
        grate.cutout_side_surfaces[side].insert(HALF_PATTERN, cut);
    }
    lib.models.push(grate);

    let mut slab = cube_model(STONE_MAT); // 13
    slab.side_pattern_indices = [HALF_PATTERN; SIDE_COUNT];
    lib.models.push(slab);

    lib.fluids.push(water_fluid(dip_when_flowing_down));

    lib.indexed_materials_count = MATERIAL_COUNT;
    lib.side_pattern_count = 3;
    // A side is covered exactly when the neighboring pattern is the full one.
    lib.side_pattern_occlusion = (0..9).map(|i| i % 3 == FULL_PATTERN as usize).collect();

    SharedLibrary::new(lib)
}

pub fn test_library() -> SharedLibrary {
    test_library_with(false)
}

pub fn buf_from_fn(
    sx: usize,
    sy: usize,
    sz: usize,
    f: impl Fn(usize, usize, usize) -> u16,
) -> VoxelBuf {
    let mut buf = VoxelBuf::new(sx, sy, sz);
    let mut ids = vec![0u16; buf.volume()];
    for z in 0..sz {
        for x in 0..sx {
            for y in 0..sy {
                ids[buf.idx(x, y, z)] = f(x, y, z);
            }
        }
    }
    buf.set_channel_u16(VoxelChannel::Type, &ids);
    buf
}

pub fn build(mesher: &BlockyMesher, buf: &VoxelBuf, lod_index: u8, collision: bool) -> BuildOutput {
    mesher.build(&BuildInput {
        voxels: buf,
        lod_index,
        collision_hint: collision,
    })
}

pub fn surface_for(output: &BuildOutput, material: u16) -> Option<&OutputSurface> {
    output
        .surfaces
        .iter()
        .find(|s| s.material_index == usize::from(material))
}

/// Structural invariants every emitted surface must satisfy.
pub fn check_integrity(arrays: &MeshArrays) {
    let n = arrays.positions.len();
    assert_eq!(arrays.normals.len(), n);
    assert_eq!(arrays.uvs.len(), n);
    assert_eq!(arrays.colors.len(), n);
    assert!(arrays.tangents.is_empty() || arrays.tangents.len() == 4 * n);
    assert_eq!(arrays.indices.len() % 3, 0);
    for &i in &arrays.indices {
        assert!((i as usize) < n, "index {i} out of {n} vertices");
    }
}

pub fn mesh_arrays_eq(a: &MeshArrays, b: &MeshArrays) -> bool {
    a.positions == b.positions
        && a.normals == b.normals
        && a.uvs == b.uvs
        && a.tangents == b.tangents
        && a.colors == b.colors
        && a.indices == b.indices
}

pub fn find_vertex(arrays: &MeshArrays, position: Vec3, normal: Vec3) -> Option<usize> {
    (0..arrays.positions.len()).find(|&i| {
        arrays.positions[i].distance_squared(position) < 1e-10
            && arrays.normals[i].distance_squared(normal) < 1e-10
    })
}
