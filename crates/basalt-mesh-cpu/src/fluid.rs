use basalt_chunk::VoxelId;
use basalt_geom::{lerp, Vec2, Vec3};
use basalt_models::{
    BakedFluid, BakedModel, BakedSurface, FluidSide, FlowState, MaterialId, ModelKind,
    ModelLibrary, SideSurface, SideSurfaces, AIR_ID, AXIS_X, AXIS_Y, AXIS_Z, SIDE_COUNT,
};

use crate::cube::{Side, Strides};

/// Thread-reused destination for procedural fluid geometry. The mesher
/// emits from these buffers right after generation, so nothing is
/// reallocated per fluid voxel.
#[derive(Default)]
pub struct FluidScratch {
    pub top: BakedSurface,
    pub sides: [SideSurfaces; SIDE_COUNT],
}

// Fluids have only one material.
const SURFACE_INDEX: usize = 0;

/// Flow looked up from the 4-bit "corner equals minimum" mask
/// (bit 3 = corner 0 .. bit 0 = corner 3). `0000` cannot happen, `0101` and
/// `1010` are ambiguous, `1111` is flat; all four map to idle.
const MIN_CORNERS_MASK_TO_FLOW_STATE: [FlowState; 16] = [
    FlowState::Idle,
    FlowState::DiagonalPosXPosZ,
    FlowState::DiagonalNegXPosZ,
    FlowState::StraightPosZ,
    FlowState::DiagonalNegXNegZ,
    FlowState::Idle,
    FlowState::StraightNegX,
    FlowState::DiagonalNegXPosZ,
    FlowState::DiagonalPosXNegZ,
    FlowState::StraightPosX,
    FlowState::Idle,
    FlowState::DiagonalPosXPosZ,
    FlowState::StraightNegZ,
    FlowState::DiagonalPosXNegZ,
    FlowState::DiagonalNegXNegZ,
    FlowState::Idle,
];

/// Corner levels from the 3x3 same-layer neighborhood, laid out
/// ```text
///  8 7 6     z
///  5 4 3     |
///  2 1 0  x--o
/// ```
/// with position 4 the current voxel. Each top corner takes the max of its
/// four contributing cells.
pub fn corner_levels_from_fluid_levels(fluid_levels: &[u8; 9]) -> [u8; 4] {
    //    3-------2
    //   /|      /|        z
    //  / |     / |       /
    // 0-------1     x---o
    // |       |
    [
        fluid_levels[1]
            .max(fluid_levels[2])
            .max(fluid_levels[4])
            .max(fluid_levels[5]),
        fluid_levels[0]
            .max(fluid_levels[1])
            .max(fluid_levels[3])
            .max(fluid_levels[4]),
        fluid_levels[3]
            .max(fluid_levels[4])
            .max(fluid_levels[6])
            .max(fluid_levels[7]),
        fluid_levels[4]
            .max(fluid_levels[5])
            .max(fluid_levels[7])
            .max(fluid_levels[8]),
    ]
}

pub fn flow_state_from_corner_levels(corner_levels: &[u8; 4]) -> FlowState {
    let min_level = corner_levels[0]
        .min(corner_levels[1])
        .min(corner_levels[2])
        .min(corner_levels[3]);
    let mask = (usize::from(corner_levels[0] == min_level) << 3)
        | (usize::from(corner_levels[1] == min_level) << 2)
        | (usize::from(corner_levels[2] == min_level) << 1)
        | usize::from(corner_levels[3] == min_level);
    MIN_CORNERS_MASK_TO_FLOW_STATE[mask]
}

pub fn corner_heights_from_corner_levels(corner_levels: &[u8; 4], fluid: &BakedFluid) -> [f32; 4] {
    let max_level_inv = 1.0 / f32::from(fluid.max_level);
    let level_to_height = |level: u8| {
        lerp(
            BakedFluid::BOTTOM_HEIGHT,
            BakedFluid::TOP_HEIGHT,
            f32::from(level) * max_level_inv,
        )
    };
    [
        level_to_height(corner_levels[0]),
        level_to_height(corner_levels[1]),
        level_to_height(corner_levels[2]),
        level_to_height(corner_levels[3]),
    ]
}

/// Swaps the top quad's diagonal:
/// ```text
/// 3---2
/// |   |  {0, 2, 1, 0, 3, 2} --> {0, 3, 1, 1, 3, 2}
/// 0---1
/// ```
fn transpose_quad_triangles(indices: &mut [u32]) {
    if indices.len() < 6 {
        return;
    }
    indices[1] = indices[4];
    indices[3] = indices[2];
}

fn copy_side(src: &FluidSide, uv: Vec2, dst: &mut SideSurface) {
    dst.positions.clear();
    dst.positions.extend_from_slice(&src.positions);

    dst.uvs.clear();
    dst.uvs.resize(src.positions.len(), uv);

    dst.indices.clear();
    dst.indices.extend_from_slice(&src.indices);
    dst.tangents.clear();
    dst.tangents.extend_from_slice(&src.tangents);
}

fn copy_top(src: &FluidSide, material_id: MaterialId, dst: &mut BakedSurface) {
    dst.positions.clear();
    dst.positions.extend_from_slice(&src.positions);

    dst.normals.clear();
    dst.normals.resize(src.positions.len(), Vec3::UP);

    dst.indices.clear();
    dst.indices.extend_from_slice(&src.indices);
    dst.tangents.clear();
    dst.tangents.extend_from_slice(&src.tangents);

    dst.material_id = material_id;
    // Collision on the procedural top is undesirable; swimming handles it.
    dst.collision_enabled = false;
}

/// The top two vertices of a lateral skirt are the last two, clockwise as
/// seen from outside.
fn rewrite_top_edge(side: &mut SideSurface, y2: f32, y3: f32) {
    if side.positions.len() < 4 {
        return;
    }
    side.positions[2].y = y2;
    side.positions[3].y = y3;
}

/// Rebuilds the scratch surfaces for one fluid voxel from its 3x3 in-layer
/// neighborhood and the layer above. Returns whether the top is covered by
/// the same fluid (in which case no top is produced and skirts stay at full
/// template height).
pub(crate) fn generate_fluid_model<T: VoxelId>(
    model: &BakedModel,
    fluid_index: u8,
    voxels: &[T],
    voxel_index: usize,
    strides: Strides,
    library: &ModelLibrary,
    scratch: &mut FluidScratch,
) -> bool {
    let Strides { jx, jy, jz } = strides;

    let top_voxel_id = voxels[(voxel_index as i32 + jy) as usize].id();
    let mut fluid_top_covered = false;
    if library.has_model(top_voxel_id) {
        if let ModelKind::Fluid {
            fluid_index: top_fluid,
            ..
        } = library.model(top_voxel_id).kind
        {
            if top_fluid == fluid_index {
                fluid_top_covered = true;
            }
        }
    }

    let fluid = library.fluid(fluid_index);

    // UVs are assigned differently than typical voxels; the shader interprets
    // them to render a flowing animation. UV.x = axis the face is on,
    // UV.y = flow code. Lateral sides always flow the same direction, the
    // bottom is always idle.
    copy_side(
        &fluid.side_surfaces[Side::NegX.index()],
        Vec2::new(AXIS_X, FlowState::StraightPosZ.uv_code()),
        &mut scratch.sides[Side::NegX.index()][SURFACE_INDEX],
    );
    copy_side(
        &fluid.side_surfaces[Side::PosX.index()],
        Vec2::new(AXIS_X, FlowState::StraightPosZ.uv_code()),
        &mut scratch.sides[Side::PosX.index()][SURFACE_INDEX],
    );
    copy_side(
        &fluid.side_surfaces[Side::NegZ.index()],
        Vec2::new(AXIS_Z, FlowState::StraightPosZ.uv_code()),
        &mut scratch.sides[Side::NegZ.index()][SURFACE_INDEX],
    );
    copy_side(
        &fluid.side_surfaces[Side::PosZ.index()],
        Vec2::new(AXIS_Z, FlowState::StraightPosZ.uv_code()),
        &mut scratch.sides[Side::PosZ.index()][SURFACE_INDEX],
    );
    copy_side(
        &fluid.side_surfaces[Side::NegY.index()],
        Vec2::new(AXIS_Y, FlowState::Idle.uv_code()),
        &mut scratch.sides[Side::NegY.index()][SURFACE_INDEX],
    );

    if fluid_top_covered {
        // No top side. The mesher falls back on the model's baked surfaces
        // for the material id; they carry no geometry.
        debug_assert!(model.active_surfaces().iter().all(|s| s.positions.is_empty()));
        scratch.sides[Side::PosY.index()][SURFACE_INDEX].clear();
        scratch.top.clear();
        return true;
    }

    copy_top(
        &fluid.side_surfaces[Side::PosY.index()],
        fluid.material_id,
        &mut scratch.top,
    );

    // Corners of the top quad adjust to neighbor levels to form slopes.
    //  8 7 6     z
    //  5 4 3     |
    //  2 1 0  x--o
    let mut fluid_levels = [0u8; 9];
    let mut covered_neighbors: u32 = 0;
    let dip_when_flowing_down = fluid.dip_when_flowing_down;

    let mut i = 0usize;
    for dz in -1..=1i32 {
        for dx in -1..=1i32 {
            let nloc = (voxel_index as i32 + dx * jx + dz * jz) as usize;
            let nid = voxels[nloc].id();

            if library.has_model(nid) {
                if let ModelKind::Fluid {
                    fluid_index: neighbor_fluid,
                    level,
                } = library.model(nid).kind
                {
                    if neighbor_fluid == fluid_index {
                        fluid_levels[i] = level;

                        // The current voxel is known not to be covered.
                        if i != 4 {
                            let anloc = (nloc as i32 + jy) as usize;
                            let anid = voxels[anloc].id();
                            if anid != u32::from(AIR_ID) && library.has_model(anid) {
                                if let ModelKind::Fluid {
                                    fluid_index: above_fluid,
                                    ..
                                } = library.model(anid).kind
                                {
                                    if above_fluid == fluid_index {
                                        covered_neighbors |= 1 << i;
                                    }
                                }
                            }
                        }

                        if dip_when_flowing_down
                            && level != fluid.max_level
                            && covered_neighbors & (1 << i) == 0
                        {
                            let bnloc = (nloc as i32 - jy) as usize;
                            let bnid = voxels[bnloc].id();
                            if bnid == u32::from(AIR_ID) {
                                fluid_levels[i] = 0;
                            } else if library.has_model(bnid) {
                                if let ModelKind::Fluid {
                                    fluid_index: below_fluid,
                                    ..
                                } = library.model(bnid).kind
                                {
                                    if below_fluid == fluid_index {
                                        fluid_levels[i] = 0;
                                    }
                                }
                            }
                        }
                    }
                }
            }

            i += 1;
        }
    }

    let corner_levels = corner_levels_from_fluid_levels(&fluid_levels);
    let flow_state = flow_state_from_corner_levels(&corner_levels);
    let mut corner_heights = corner_heights_from_corner_levels(&corner_levels, fluid);

    // Corners whose contributing cells include a covered neighbor sit at
    // full height.
    if covered_neighbors & 0b000_001_011 != 0 {
        corner_heights[1] = 1.0;
    }
    if covered_neighbors & 0b000_100_110 != 0 {
        corner_heights[0] = 1.0;
    }
    if covered_neighbors & 0b011_001_000 != 0 {
        corner_heights[2] = 1.0;
    }
    if covered_neighbors & 0b110_100_000 != 0 {
        corner_heights[3] = 1.0;
    }

    scratch.top.uvs.clear();
    scratch
        .top
        .uvs
        .resize(scratch.top.positions.len(), Vec2::new(AXIS_Y, flow_state.uv_code()));

    rewrite_top_edge(
        &mut scratch.sides[Side::NegX.index()][SURFACE_INDEX],
        corner_heights[2],
        corner_heights[1],
    );
    rewrite_top_edge(
        &mut scratch.sides[Side::PosX.index()][SURFACE_INDEX],
        corner_heights[0],
        corner_heights[3],
    );
    rewrite_top_edge(
        &mut scratch.sides[Side::NegZ.index()][SURFACE_INDEX],
        corner_heights[1],
        corner_heights[0],
    );
    rewrite_top_edge(
        &mut scratch.sides[Side::PosZ.index()][SURFACE_INDEX],
        corner_heights[3],
        corner_heights[2],
    );

    // Top vertices are counter-clockwise starting at (+x, -z).
    for (k, height) in corner_heights.iter().enumerate() {
        if let Some(p) = scratch.top.positions.get_mut(k) {
            p.y = *height;
        }
    }

    // Keep the top quad's diagonal aligned with the flow.
    if flow_state == FlowState::DiagonalPosXPosZ || flow_state == FlowState::DiagonalNegXNegZ {
        transpose_quad_triangles(&mut scratch.top.indices);
    }

    false
}

/// Runs the fluid generator for a lone voxel in an all-air 3x3x3 block, the
/// way an editor previews a fluid model. Returns the top surface and the
/// per-side skirts.
pub fn preview_fluid_model(
    library: &ModelLibrary,
    model_id: u16,
) -> Option<(BakedSurface, [SideSurfaces; SIDE_COUNT])> {
    if !library.has_model(u32::from(model_id)) {
        return None;
    }
    let model = library.model(u32::from(model_id));
    let ModelKind::Fluid { fluid_index, .. } = model.kind else {
        return None;
    };

    let mut ids = [AIR_ID; 27];
    let strides = Strides {
        jx: 3,
        jy: 1,
        jz: 9,
    };
    let center = (1 + strides.jx + strides.jz) as usize;
    ids[center] = model_id;

    let mut scratch = FluidScratch::default();
    generate_fluid_model(model, fluid_index, &ids, center, strides, library, &mut scratch);
    Some((scratch.top, scratch.sides))
}
