use basalt_chunk::VoxelId;
use basalt_geom::{Rgba, Vec3};
use basalt_models::ModelLibrary;

use crate::cube::{NeighborLuts, Side, CORNER_POSITIONS, EDGE_CORNERS, SIDE_CORNERS, SIDE_EDGES};

/// Unknown ids count as blockers so chunk borders don't flicker bright.
#[inline]
fn contributes_to_ao(library: &ModelLibrary, voxel_id: u32) -> bool {
    if library.has_model(voxel_id) {
        library.model(voxel_id).contributes_to_ao
    } else {
        true
    }
}

/// Per-corner shade intensity (0..=3) for one visible side, from the 4 edge
/// and 4 corner neighbors beyond the face plane.
///
/// Combinatory solution for
/// https://0fps.net/2013/07/03/ambient-occlusion-for-minecraft-like-worlds/
/// (inverted):
/// ```text
/// function vertexAO(side1, side2, corner) {
///   if (side1 && side2) { return 0 }
///   return 3 - (side1 + side2 + corner)
/// }
/// ```
pub fn bake_shaded_corners<T: VoxelId>(
    voxels: &[T],
    voxel_index: usize,
    luts: &NeighborLuts,
    side: Side,
    library: &ModelLibrary,
) -> [u8; 8] {
    let mut shaded_corner = [0u8; 8];

    for &edge in &SIDE_EDGES[side.index()] {
        let edge_neighbor_id = voxels[(voxel_index as i32 + luts.edge[edge]) as usize].id();
        if contributes_to_ao(library, edge_neighbor_id) {
            shaded_corner[EDGE_CORNERS[edge][0]] += 1;
            shaded_corner[EDGE_CORNERS[edge][1]] += 1;
        }
    }
    for &corner in &SIDE_CORNERS[side.index()] {
        if shaded_corner[corner] == 2 {
            // Two meeting edges shade fully no matter the diagonal.
            shaded_corner[corner] = 3;
        } else {
            let corner_neighbor_id =
                voxels[(voxel_index as i32 + luts.corner[corner]) as usize].id();
            if contributes_to_ao(library, corner_neighbor_id) {
                shaded_corner[corner] += 1;
            }
        }
    }
    shaded_corner
}

/// Blends the corner intensities into one vertex color. `darkness` arrives
/// pre-divided by 3; the falloff clamp applies to the squared-distance term
/// only.
pub fn shaded_vertex_color(
    shaded_corner: &[u8; 8],
    side: Side,
    vertex_pos: Vec3,
    darkness: f32,
    modulate: Rgba,
) -> Rgba {
    let mut shade = 0.0f32;
    for &corner in &SIDE_CORNERS[side.index()] {
        if shaded_corner[corner] != 0 {
            let mut s = darkness * f32::from(shaded_corner[corner]);
            let mut k = 1.0 - CORNER_POSITIONS[corner].distance_squared(vertex_pos);
            if k < 0.0 {
                k = 0.0;
            }
            s *= k;
            if s > shade {
                shade = s;
            }
        }
    }
    modulate.shaded(1.0 - shade)
}
