use basalt_geom::{Aabb, Rgba, Vec2, Vec3};
use hashbrown::HashMap;

use crate::material::MaterialId;

/// Convention to mean "nothing". Never assign a non-empty model at this index.
pub const AIR_ID: u16 = 0;
/// Sentinel kept for authoring-side serialization; the baked form uses [`ModelKind`].
pub const NULL_FLUID_INDEX: u8 = 255;
/// A model can have up to 2 materials, one surface per material slot.
pub const MAX_SURFACES: usize = 2;
/// Cube sides, in NegX, PosX, NegY, PosY, NegZ, PosZ order.
pub const SIDE_COUNT: usize = 6;

/// The per-material slots of one cube side.
pub type SideSurfaces = [SideSurface; MAX_SURFACES];

/// Mesh of the inner (non-side) part of a model, for one material.
#[derive(Clone, Debug)]
pub struct BakedSurface {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    /// Either empty or 4 floats per vertex.
    pub tangents: Vec<f32>,
    pub material_id: MaterialId,
    pub collision_enabled: bool,
}

impl Default for BakedSurface {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            tangents: Vec::new(),
            material_id: MaterialId(0),
            collision_enabled: true,
        }
    }
}

impl BakedSurface {
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.indices.clear();
        self.tangents.clear();
    }
}

/// Mesh patch on one cube face. Normals are implied by the face, and the
/// material comes positionally from the parent surface at the same index.
///
/// Vertex order convention for non-empty sides: the top two vertices are the
/// last two, `positions[2]` then `positions[3]` running clockwise along the
/// top edge as seen from outside the cube.
#[derive(Default, Clone, Debug)]
pub struct SideSurface {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub tangents: Vec<f32>,
}

impl SideSurface {
    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.indices.clear();
        self.tangents.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// What a voxel id renders as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelKind {
    #[default]
    Plain,
    Fluid {
        /// Index into the library's fluid table.
        fluid_index: u8,
        /// Surface height encoding in `[0, max_level]`.
        level: u8,
    },
}

/// Plain-data render description of one voxel id, produced by the baking
/// layer. Distinct from authoring resources so it can be read from any
/// thread while the user keeps editing.
#[derive(Clone, Debug)]
pub struct BakedModel {
    pub surfaces: [BakedSurface; MAX_SURFACES],
    pub surface_count: u8,
    /// Sides are kept separate from the inner surfaces so they can be
    /// occluded per neighbor.
    pub sides_surfaces: [SideSurfaces; SIDE_COUNT],
    /// Bit `s` set iff side `s` has zero geometry across all surfaces.
    pub empty_sides_mask: u8,
    /// Silhouette id of each side, fed to the library occlusion table.
    pub side_pattern_indices: [u32; SIDE_COUNT],
    /// `[side][neighbor opposite-side pattern id]` => pre-cut side surfaces
    /// used in place of the default when the neighbor only partially covers
    /// the side. Missing entries fall back on the full side.
    pub cutout_side_surfaces: [HashMap<u32, SideSurfaces>; SIDE_COUNT],
    pub cutout_sides_enabled: bool,
    /// Modulating color applied per vertex.
    pub color: Rgba,
    /// 0 is opaque; equal non-zero indices occlude each other, different
    /// indices do not.
    pub transparency_index: u8,
    /// When false this voxel never occludes a neighbor's face (foliage etc).
    pub culls_neighbors: bool,
    pub contributes_to_ao: bool,
    pub empty: bool,
    pub kind: ModelKind,
    // AABB physics data, unread by the mesher.
    pub box_collision_aabbs: Vec<Aabb>,
    pub box_collision_mask: u32,
}

impl Default for BakedModel {
    fn default() -> Self {
        Self {
            surfaces: Default::default(),
            surface_count: 0,
            sides_surfaces: Default::default(),
            empty_sides_mask: 0,
            side_pattern_indices: [0; SIDE_COUNT],
            cutout_side_surfaces: Default::default(),
            cutout_sides_enabled: false,
            color: Rgba::WHITE,
            transparency_index: 0,
            culls_neighbors: true,
            contributes_to_ao: true,
            empty: true,
            kind: ModelKind::Plain,
            box_collision_aabbs: Vec::new(),
            box_collision_mask: 1,
        }
    }
}

impl BakedModel {
    /// The occupied inner-surface slots.
    #[inline]
    pub fn active_surfaces(&self) -> &[BakedSurface] {
        &self.surfaces[..self.surface_count as usize]
    }

    #[inline]
    pub fn side_is_empty(&self, side: usize) -> bool {
        self.sides_surfaces[side].iter().all(|s| s.is_empty())
    }

    /// Recomputes `empty_sides_mask` from the side surfaces.
    pub fn update_empty_sides_mask(&mut self) {
        let mut mask = 0u8;
        for side in 0..SIDE_COUNT {
            if self.side_is_empty(side) {
                mask |= 1 << side;
            }
        }
        self.empty_sides_mask = mask;
    }

    pub fn clear_geometry(&mut self) {
        for surface in &mut self.surfaces {
            surface.clear();
        }
        for side in &mut self.sides_surfaces {
            for surface in side {
                surface.clear();
            }
        }
        self.empty = true;
    }
}
