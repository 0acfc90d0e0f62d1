use basalt_chunk::VoxelId;
use basalt_geom::{Rgba, Vec3, Vec3i};
use basalt_models::{BakedSurface, ModelKind, ModelLibrary, SideSurface, AIR_ID};

use crate::ao;
use crate::arrays::{CollisionArrays, MeshArrays};
use crate::constants::PADDING;
use crate::cube::{NeighborLuts, Side, Strides};
use crate::fluid::{generate_fluid_model, FluidScratch};
use crate::visibility::{resolve_side, SideVisibility};

/// Looks up the output slot for a material id, skipping surfaces whose baked
/// id escaped the indexed range. That is a baking-layer bug.
#[inline]
fn material_slot(material_count: usize, material_id: u16) -> Option<usize> {
    let slot = usize::from(material_id);
    if slot >= material_count {
        debug_assert!(false, "baked material id {material_id} out of range");
        log::warn!("skipping surface with out-of-range material id {material_id}");
        return None;
    }
    Some(slot)
}

#[allow(clippy::too_many_arguments)]
fn append_side_patch(
    arrays: &mut MeshArrays,
    index_offset: &mut u32,
    side_surface: &SideSurface,
    side: Side,
    origin: Vec3,
    color: Rgba,
    shaded_corner: Option<&[u8; 8]>,
    darkness: f32,
) {
    let vertex_count = side_surface.positions.len();

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

    match shaded_corner {
        Some(shaded) => {
            // Occlusion shading samples the model-local vertex position.
            arrays.colors.extend(
                side_surface
                    .positions
                    .iter()
                    .map(|&p| ao::shaded_vertex_color(shaded, side, p, darkness, color)),
            );
        }
        None => arrays
            .colors
            .extend(std::iter::repeat(color).take(vertex_count)),
    }

    arrays
        .indices
        .extend(side_surface.indices.iter().map(|&i| *index_offset + i));
    *index_offset += vertex_count as u32;
}

fn mirror_into_collision(
    collision: &mut CollisionArrays,
    collision_index_offset: &mut u32,
    positions: &[Vec3],
    indices: &[u32],
    origin: Vec3,
) {
    collision
        .positions
        .extend(positions.iter().map(|&p| p + origin));
    collision
        .indices
        .extend(indices.iter().map(|&i| *collision_index_offset + i));
    *collision_index_offset += positions.len() as u32;
}

/// Culled-face extraction over the interior of a padded block.
///
/// Visits voxels z-major, then x, then y; sides in fixed order; surfaces by
/// index. This order is what makes output deterministic.
#[allow(clippy::too_many_arguments)]
pub(crate) fn generate_blocky_mesh<T: VoxelId>(
    arrays_per_material: &mut [MeshArrays],
    index_offsets: &mut [u32],
    mut collision_surface: Option<&mut CollisionArrays>,
    fluid_scratch: &mut FluidScratch,
    voxels: &[T],
    block_size: Vec3i,
    library: &ModelLibrary,
    bake_occlusion: bool,
    baked_occlusion_darkness: f32,
) {
    let (sx, sy, sz) = (
        block_size.x as usize,
        block_size.y as usize,
        block_size.z as usize,
    );
    debug_assert!(sx >= 2 * PADDING && sy >= 2 * PADDING && sz >= 2 * PADDING);
    debug_assert_eq!(voxels.len(), sx * sy * sz);

    let strides = Strides::from_block_size(block_size);
    let luts = NeighborLuts::new(strides);
    let material_count = arrays_per_material.len();

    let mut collision_index_offset: u32 = 0;

    // The padding ring guarantees every neighbor lookup below stays in
    // bounds without size checks.
    for z in PADDING..sz - PADDING {
        for x in PADDING..sx - PADDING {
            for y in PADDING..sy - PADDING {
                let voxel_index = y + x * sy + z * sx * sy;
                let voxel_id = voxels[voxel_index].id();

                if voxel_id == u32::from(AIR_ID) || !library.has_model(voxel_id) {
                    continue;
                }

                let model = library.model(voxel_id);

                // Hybrid approach: extract cube sides and cull the hidden
                // ones, while still allowing non-cube inner geometry.
                let mut surface_count = usize::from(model.surface_count);
                let mut model_surfaces: &[BakedSurface] = &model.surfaces;
                let mut model_sides_surfaces = &model.sides_surfaces;

                if let ModelKind::Fluid { fluid_index, .. } = model.kind {
                    let covered = generate_fluid_model(
                        model,
                        fluid_index,
                        voxels,
                        voxel_index,
                        strides,
                        library,
                        fluid_scratch,
                    );
                    surface_count = 1;
                    model_sides_surfaces = &fluid_scratch.sides;
                    if !covered {
                        model_surfaces = std::slice::from_ref(&fluid_scratch.top);
                    }
                    // When covered, the baked surfaces stay bound: they are
                    // empty but carry the material id.
                }

                let origin = Vec3::new(
                    (x - PADDING) as f32,
                    (y - PADDING) as f32,
                    (z - PADDING) as f32,
                );

                // Sides pass
                for side in Side::ALL {
                    if model.empty_sides_mask & (1 << side.index()) != 0 {
                        continue;
                    }

                    let mut side_surfaces = &model_sides_surfaces[side.index()];

                    let neighbor_id =
                        voxels[(voxel_index as i32 + luts.side[side.index()]) as usize].id();

                    // Invalid neighbor ids are treated like air.
                    if library.has_model(neighbor_id) {
                        let neighbor = library.model(neighbor_id);
                        match resolve_side(library, model, neighbor, side) {
                            SideVisibility::Culled => continue,
                            SideVisibility::CutOut(cut) => side_surfaces = cut,
                            SideVisibility::Visible => {}
                        }
                    }

                    let shaded_corner = if bake_occlusion {
                        Some(ao::bake_shaded_corners(
                            voxels,
                            voxel_index,
                            &luts,
                            side,
                            library,
                        ))
                    } else {
                        None
                    };

                    for surface_index in 0..surface_count {
                        let surface = &model_surfaces[surface_index];
                        let side_surface = &side_surfaces[surface_index];

                        let Some(slot) = material_slot(material_count, surface.material_id.0)
                        else {
                            continue;
                        };
                        append_side_patch(
                            &mut arrays_per_material[slot],
                            &mut index_offsets[slot],
                            side_surface,
                            side,
                            origin,
                            model.color,
                            shaded_corner.as_ref(),
                            baked_occlusion_darkness,
                        );

                        if let Some(collision) = collision_surface.as_deref_mut() {
                            if surface.collision_enabled {
                                mirror_into_collision(
                                    collision,
                                    &mut collision_index_offset,
                                    &side_surface.positions,
                                    &side_surface.indices,
                                    origin,
                                );
                            }
                        }
                    }
                }

                // Inside pass; no occlusion shading on inner geometry.
                for surface_index in 0..surface_count {
                    let surface = &model_surfaces[surface_index];
                    if surface.positions.is_empty() {
                        continue;
                    }

                    let Some(slot) = material_slot(material_count, surface.material_id.0) else {
                        continue;
                    };
                    let arrays = &mut arrays_per_material[slot];
                    let index_offset = &mut index_offsets[slot];
                    let vertex_count = surface.positions.len();

                    arrays
                        .positions
                        .extend(surface.positions.iter().map(|&p| p + origin));
                    arrays.normals.extend_from_slice(&surface.normals);
                    arrays.uvs.extend_from_slice(&surface.uvs);
                    if !surface.tangents.is_empty() {
                        arrays.tangents.extend_from_slice(&surface.tangents);
                    }
                    arrays
                        .colors
                        .extend(std::iter::repeat(model.color).take(vertex_count));
                    arrays
                        .indices
                        .extend(surface.indices.iter().map(|&i| *index_offset + i));

                    if let Some(collision) = collision_surface.as_deref_mut() {
                        if surface.collision_enabled {
                            mirror_into_collision(
                                collision,
                                &mut collision_index_offset,
                                &surface.positions,
                                &surface.indices,
                                origin,
                            );
                        }
                    }

                    *index_offset += vertex_count as u32;
                }
            }
        }
    }
}
