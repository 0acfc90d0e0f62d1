use basalt_chunk::VoxelId;
use basalt_geom::{Vec3, Vec3i};
use basalt_models::{ModelLibrary, AIR_ID};

use crate::arrays::MeshArrays;
use crate::constants::PADDING;
use crate::cube::{Side, Strides};

/// Maps side-relative walk coordinates back to block coordinates.
fn side_to_block_coordinates(v: Vec3, side: Side) -> Vec3 {
    match side {
        Side::NegX | Side::PosX => Vec3::new(v.z, v.y, v.x),
        Side::NegY | Side::PosY => Vec3::new(v.y, v.z, v.x),
        Side::NegZ | Side::PosZ => v,
    }
}

/// Walks one outer face layer of the block and emits the side geometry of
/// inner voxels hidden behind exposed outer voxels.
///
/// The exposure check only tests the four in-plane neighbors and the inward
/// voxel for air; it trades accuracy for speed, which is acceptable for
/// geometry whose whole job is covering LOD cracks.
#[allow(clippy::too_many_arguments)]
fn append_side_seams<T: VoxelId>(
    voxels: &[T],
    jump: (i32, i32, i32),
    layer: i32,
    size_x: usize,
    size_y: usize,
    side: Side,
    library: &ModelLibrary,
    arrays_per_material: &mut [MeshArrays],
) {
    let air = u32::from(AIR_ID);
    let pad = PADDING as i32;
    let layer_base = layer * jump.2;
    let side_sign = side.sign();

    // Outer voxels are not part of the final mesh; they exist to occlude the
    // sides of inner voxels touching them.
    for x in pad..size_x as i32 - pad {
        for y in pad..size_y as i32 - pad {
            let buffer_index = (x * jump.0 + y * jump.1 + layer_base) as usize;
            let v = voxels[buffer_index].id();

            if v == air {
                continue;
            }

            // Exposed to air along at least one in-plane axis?
            let nv0 = voxels[(buffer_index as i32 - jump.0) as usize].id();
            let nv1 = voxels[(buffer_index as i32 + jump.0) as usize].id();
            let nv2 = voxels[(buffer_index as i32 - jump.1) as usize].id();
            let nv3 = voxels[(buffer_index as i32 + jump.1) as usize].id();
            if nv0 != air && nv1 != air && nv2 != air && nv3 != air {
                continue;
            }

            // Does the outer voxel hide an inner voxel?
            let inner_id = voxels[(buffer_index as i32 - side_sign * jump.2) as usize].id();
            if inner_id == air || !library.has_model(inner_id) {
                continue;
            }

            // Emit that inner voxel's outward side.
            let origin = side_to_block_coordinates(
                Vec3::new(
                    (x - pad) as f32,
                    (y - pad) as f32,
                    (layer - (side_sign + 1)) as f32,
                ),
                side,
            );

            let model = library.model(inner_id);
            let side_surfaces = &model.sides_surfaces[side.index()];

            for surface_index in 0..usize::from(model.surface_count) {
                let surface = &model.surfaces[surface_index];
                let side_surface = &side_surfaces[surface_index];

                let slot = usize::from(surface.material_id.0);
                if slot >= arrays_per_material.len() {
                    debug_assert!(false, "baked material id {slot} out of range");
                    continue;
                }
                let arrays = &mut arrays_per_material[slot];
                let vertex_count = side_surface.positions.len();
                let index_offset = arrays.positions.len() as u32;

                arrays
                    .positions
                    .extend(side_surface.positions.iter().map(|&p| p + origin));
                arrays.uvs.extend_from_slice(&side_surface.uvs);
                if !side_surface.tangents.is_empty() {
                    arrays.tangents.extend_from_slice(&side_surface.tangents);
                }
                arrays
                    .normals
                    .extend(std::iter::repeat(side.normal()).take(vertex_count));
                arrays
                    .colors
                    .extend(std::iter::repeat(model.color).take(vertex_count));
                arrays
                    .indices
                    .extend(side_surface.indices.iter().map(|&i| index_offset + i));
            }
        }
    }
}

/// Adds extra side geometry on the outer faces of the block for every voxel
/// exposed to air. The resulting skirts hide cracks between neighboring
/// meshes of different LOD without reading child-LOD voxels. Occlusion
/// shading is not applied to seams.
pub(crate) fn append_seams<T: VoxelId>(
    voxels: &[T],
    block_size: Vec3i,
    arrays_per_material: &mut [MeshArrays],
    library: &ModelLibrary,
) {
    let Strides { jx, jy, jz } = Strides::from_block_size(block_size);
    let (sx, sy, sz) = (
        block_size.x as usize,
        block_size.y as usize,
        block_size.z as usize,
    );
    let out = arrays_per_material;

    append_side_seams(voxels, (jx, jy, jz), 0, sx, sy, Side::NegZ, library, out);
    append_side_seams(
        voxels,
        (jx, jy, jz),
        sz as i32 - 1,
        sx,
        sy,
        Side::PosZ,
        library,
        out,
    );
    append_side_seams(voxels, (jz, jy, jx), 0, sz, sy, Side::NegX, library, out);
    append_side_seams(
        voxels,
        (jz, jy, jx),
        sx as i32 - 1,
        sz,
        sy,
        Side::PosX,
        library,
        out,
    );
    append_side_seams(voxels, (jz, jx, jy), 0, sz, sx, Side::NegY, library, out);
    append_side_seams(
        voxels,
        (jz, jx, jy),
        sy as i32 - 1,
        sz,
        sx,
        Side::PosY,
        library,
        out,
    );
}
