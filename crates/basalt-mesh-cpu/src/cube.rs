use basalt_geom::{Vec3, Vec3i};

pub const SIDE_COUNT: usize = 6;
pub const EDGE_COUNT: usize = 12;
pub const CORNER_COUNT: usize = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    NegX = 0,
    PosX = 1,
    NegY = 2,
    PosY = 3,
    NegZ = 4,
    PosZ = 5,
}

impl Side {
    pub const ALL: [Side; SIDE_COUNT] = [
        Side::NegX,
        Side::PosX,
        Side::NegY,
        Side::PosY,
        Side::NegZ,
        Side::PosZ,
    ];

    /// Returns the `[0..6)` index of this side.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a side index `[0..6)` back into a `Side` value.
    /// Falls back to `NegX` for out-of-range indices.
    #[inline]
    pub fn from_index(i: usize) -> Side {
        match i {
            0 => Side::NegX,
            1 => Side::PosX,
            2 => Side::NegY,
            3 => Side::PosY,
            4 => Side::NegZ,
            5 => Side::PosZ,
            _ => Side::NegX,
        }
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::NegX => Side::PosX,
            Side::PosX => Side::NegX,
            Side::NegY => Side::PosY,
            Side::PosY => Side::NegY,
            Side::NegZ => Side::PosZ,
            Side::PosZ => Side::NegZ,
        }
    }

    /// Returns the unit-normal vector for this side.
    #[inline]
    pub fn normal(self) -> Vec3 {
        SIDE_NORMALS[self.index()]
    }

    /// -1 for negative sides, +1 for positive sides.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Side::NegX | Side::NegY | Side::NegZ => -1,
            Side::PosX | Side::PosY | Side::PosZ => 1,
        }
    }
}

pub const SIDE_NORMALS: [Vec3; SIDE_COUNT] = [
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(0.0, 0.0, 1.0),
];

/// Unit cube corner coordinates, all in `{0,1}^3`.
pub const CORNER_POSITIONS: [Vec3; CORNER_COUNT] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

/// Same corners on the integer grid, for neighbor-offset arithmetic.
pub const CORNER_GRID: [[i32; 3]; CORNER_COUNT] = [
    [1, 0, 0],
    [0, 0, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 0],
    [0, 1, 0],
    [0, 1, 1],
    [1, 1, 1],
];

/// The 4 corners bounding each side.
pub const SIDE_CORNERS: [[usize; 4]; SIDE_COUNT] = [
    [1, 2, 6, 5],
    [0, 4, 7, 3],
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
];

/// Corner pair of each edge. Bottom ring, then vertical, then top ring.
pub const EDGE_CORNERS: [[usize; 2]; EDGE_COUNT] = [
    [0, 1],
    [0, 3],
    [2, 3],
    [1, 2],
    [1, 5],
    [0, 4],
    [3, 7],
    [2, 6],
    [4, 5],
    [4, 7],
    [6, 7],
    [5, 6],
];

/// The two sides each edge belongs to.
pub const EDGE_SIDES: [[usize; 2]; EDGE_COUNT] = [
    [2, 4],
    [2, 1],
    [2, 5],
    [2, 0],
    [0, 4],
    [1, 4],
    [1, 5],
    [0, 5],
    [3, 4],
    [3, 1],
    [3, 5],
    [3, 0],
];

/// The 4 edges bounding each side.
pub const SIDE_EDGES: [[usize; 4]; SIDE_COUNT] = [
    [3, 4, 7, 11],
    [1, 5, 6, 9],
    [0, 1, 2, 3],
    [8, 9, 10, 11],
    [0, 4, 5, 8],
    [2, 6, 7, 10],
];

/// Flat-index strides of the current block: values to add to an address to
/// step one voxel along each axis.
#[derive(Clone, Copy, Debug)]
pub struct Strides {
    pub jx: i32,
    pub jy: i32,
    pub jz: i32,
}

impl Strides {
    #[inline]
    pub fn from_block_size(size: Vec3i) -> Self {
        Self {
            jx: size.y,
            jy: 1,
            jz: size.x * size.y,
        }
    }
}

/// Address deltas to each side, edge, and corner neighbor, rebuilt per block
/// from its strides.
#[derive(Clone, Copy, Debug)]
pub struct NeighborLuts {
    pub side: [i32; SIDE_COUNT],
    pub edge: [i32; EDGE_COUNT],
    pub corner: [i32; CORNER_COUNT],
}

impl NeighborLuts {
    pub fn new(strides: Strides) -> Self {
        let Strides { jx, jy, jz } = strides;
        let side = [-jx, jx, -jy, jy, -jz, jz];
        let mut edge = [0i32; EDGE_COUNT];
        for (e, sides) in EDGE_SIDES.iter().enumerate() {
            edge[e] = side[sides[0]] + side[sides[1]];
        }
        let mut corner = [0i32; CORNER_COUNT];
        for (c, grid) in CORNER_GRID.iter().enumerate() {
            corner[c] = if grid[0] == 1 { jx } else { -jx }
                + if grid[1] == 1 { jy } else { -jy }
                + if grid[2] == 1 { jz } else { -jz };
        }
        Self { side, edge, corner }
    }
}
