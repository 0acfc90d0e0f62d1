use basalt_geom::{Rgba, Vec2, Vec3};

/// Per-material mesh output, one entry per host mesh-array slot: VERTEX,
/// NORMAL, TEX_UV, TANGENT (4 floats per vertex when present), COLOR, INDEX.
#[derive(Default, Clone, Debug)]
pub struct MeshArrays {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub tangents: Vec<f32>,
    pub colors: Vec<Rgba>,
    pub indices: Vec<u32>,
}

impl MeshArrays {
    /// Clears all arrays but retains capacity for reuse across builds.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.uvs.clear();
        self.tangents.clear();
        self.colors.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Aggregated collision geometry across all materials; positions and a
/// triangle list only.
#[derive(Default, Clone, Debug)]
pub struct CollisionArrays {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl CollisionArrays {
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.positions.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
