use basalt_models::{BakedModel, ModelLibrary, SideSurfaces};

use crate::cube::Side;

/// Outcome of the per-side visibility test against one neighbor.
pub enum SideVisibility<'a> {
    /// Fully occluded; emit nothing.
    Culled,
    /// Emit the default side surfaces.
    Visible,
    /// Emit this pre-cut replacement instead of the default.
    CutOut(&'a SideSurfaces),
}

/// Visibility that ignores silhouettes entirely: a neighbor that does not
/// cull, or a transparency-index mismatch, always exposes the face.
#[inline]
pub fn face_visible_regardless_of_shape(model: &BakedModel, neighbor: &BakedModel) -> bool {
    !neighbor.culls_neighbors || model.transparency_index != neighbor.transparency_index
}

/// Shape test: the face shows unless the library says our pattern is fully
/// covered by the neighbor's opposite-side pattern.
#[inline]
pub fn face_visible_according_to_shape(
    library: &ModelLibrary,
    model: &BakedModel,
    neighbor: &BakedModel,
    side: Side,
) -> bool {
    let pattern_a = model.side_pattern_indices[side.index()];
    let pattern_b = neighbor.side_pattern_indices[side.opposite().index()];
    !library.side_pattern_occluded(pattern_a, pattern_b)
}

/// Full per-side resolution: cheap test first, then shape, then the sparse
/// cutout lookup when the model opted in.
pub fn resolve_side<'a>(
    library: &ModelLibrary,
    model: &'a BakedModel,
    neighbor: &BakedModel,
    side: Side,
) -> SideVisibility<'a> {
    if face_visible_regardless_of_shape(model, neighbor) {
        return SideVisibility::Visible;
    }
    if !face_visible_according_to_shape(library, model, neighbor, side) {
        return SideVisibility::Culled;
    }
    if model.cutout_sides_enabled {
        let neighbor_pattern = neighbor.side_pattern_indices[side.opposite().index()];
        // A hashmap hit on a hot path; models opt in sparsely.
        if let Some(cut) = model.cutout_side_surfaces[side.index()].get(&neighbor_pattern) {
            return SideVisibility::CutOut(cut);
        }
    }
    SideVisibility::Visible
}
