use basalt_geom::Vec3;

use crate::material::MaterialId;
use crate::model::SIDE_COUNT;

/// UV.x axis hints consumed by the flow shader.
pub const AXIS_X: f32 = 0.0;
pub const AXIS_Y: f32 = 1.0;
pub const AXIS_Z: f32 = 2.0;

/// Flow code written into UV.y of fluid faces. The shader reads it to pick a
/// scroll direction, or none when idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FlowState {
    #[default]
    Idle = 0,
    StraightPosX = 1,
    StraightNegX = 2,
    StraightPosZ = 3,
    StraightNegZ = 4,
    DiagonalPosXPosZ = 5,
    DiagonalPosXNegZ = 6,
    DiagonalNegXPosZ = 7,
    DiagonalNegXNegZ = 8,
}

impl FlowState {
    #[inline]
    pub fn uv_code(self) -> f32 {
        self as u8 as f32
    }
}

/// Side skirt template of a fluid. UVs are assigned procedurally at meshing
/// time, and normals are implied by the side.
#[derive(Default, Clone, Debug)]
pub struct FluidSide {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub tangents: Vec<f32>,
}

/// Baked description of one fluid shared by all of its level models.
#[derive(Clone, Debug)]
pub struct BakedFluid {
    pub side_surfaces: [FluidSide; SIDE_COUNT],
    pub material_id: MaterialId,
    pub max_level: u8,
    /// Fake the level of fall-capable neighbors down to 0 so cascades look
    /// steep. Max-level fluid sustains itself, which keeps oceans flat.
    pub dip_when_flowing_down: bool,
}

impl BakedFluid {
    /// Top-surface height of a level-0 voxel.
    pub const BOTTOM_HEIGHT: f32 = 0.0625;
    /// Top-surface height of a max-level voxel.
    pub const TOP_HEIGHT: f32 = 0.9375;
}

impl Default for BakedFluid {
    fn default() -> Self {
        Self {
            side_surfaces: Default::default(),
            material_id: MaterialId(0),
            max_level: 1,
            dip_when_flowing_down: false,
        }
    }
}
