//! Dense voxel block buffer with typed, optionally uniform-compressed channels.
#![forbid(unsafe_code)]

use basalt_geom::Vec3i;

/// Voxel id wide enough to index a model table. Implemented for the two
/// supported channel element widths.
pub trait VoxelId: Copy {
    fn id(self) -> u32;
}

impl VoxelId for u8 {
    #[inline]
    fn id(self) -> u32 {
        u32::from(self)
    }
}

impl VoxelId for u16 {
    #[inline]
    fn id(self) -> u32 {
        u32::from(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoxelChannel {
    /// Model ids. The only channel blocky meshing reads.
    Type = 0,
    Sdf = 1,
    Color = 2,
}

pub const CHANNEL_COUNT: usize = 3;

impl VoxelChannel {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelDepth {
    Bits8,
    Bits16,
    Bits32,
}

impl ChannelDepth {
    #[inline]
    pub fn byte_count(self) -> usize {
        match self {
            ChannelDepth::Bits8 => 1,
            ChannelDepth::Bits16 => 2,
            ChannelDepth::Bits32 => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelCompression {
    /// Dense bytes, one element per voxel.
    Raw,
    /// Every voxel holds `uniform_value`; no backing bytes.
    Uniform,
    /// Palette-indexed storage, produced by streaming. Meshers must
    /// decompress before use.
    Palette,
}

#[derive(Clone, Debug)]
struct ChannelData {
    depth: ChannelDepth,
    compression: ChannelCompression,
    uniform_value: u64,
    bytes: Vec<u8>,
}

impl ChannelData {
    fn uniform(depth: ChannelDepth, value: u64) -> Self {
        Self {
            depth,
            compression: ChannelCompression::Uniform,
            uniform_value: value,
            bytes: Vec::new(),
        }
    }
}

/// A dense 3D block of voxel channels, padded by one voxel on every face.
///
/// Flat indexing is y-fastest: `index = y + x*sy + z*sx*sy`.
#[derive(Clone, Debug)]
pub struct VoxelBuf {
    sx: usize,
    sy: usize,
    sz: usize,
    channels: [ChannelData; CHANNEL_COUNT],
}

impl VoxelBuf {
    /// A block with every channel uniform zero.
    pub fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self {
            sx,
            sy,
            sz,
            channels: [
                ChannelData::uniform(ChannelDepth::Bits16, 0),
                ChannelData::uniform(ChannelDepth::Bits16, 0),
                ChannelData::uniform(ChannelDepth::Bits16, 0),
            ],
        }
    }

    #[inline]
    pub fn size(&self) -> Vec3i {
        Vec3i::new(self.sx as i32, self.sy as i32, self.sz as i32)
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    /// Flat index of `(x, y, z)`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        y + x * self.sy + z * self.sx * self.sy
    }

    /// Address deltas `(jx, jy, jz)` for stepping one voxel along each axis.
    #[inline]
    pub fn strides(&self) -> (usize, usize, usize) {
        (self.sy, 1, self.sx * self.sy)
    }

    #[inline]
    pub fn channel_depth(&self, channel: VoxelChannel) -> ChannelDepth {
        self.channels[channel.index()].depth
    }

    #[inline]
    pub fn channel_compression(&self, channel: VoxelChannel) -> ChannelCompression {
        self.channels[channel.index()].compression
    }

    #[inline]
    pub fn channel_uniform_value(&self, channel: VoxelChannel) -> u64 {
        self.channels[channel.index()].uniform_value
    }

    /// Read-only bytes of a raw channel. `None` unless the channel is
    /// raw-compressed.
    pub fn channel_as_bytes(&self, channel: VoxelChannel) -> Option<&[u8]> {
        let ch = &self.channels[channel.index()];
        match ch.compression {
            ChannelCompression::Raw => Some(&ch.bytes),
            _ => None,
        }
    }

    /// Collapses a channel to a single value, dropping its storage.
    pub fn make_uniform(&mut self, channel: VoxelChannel, value: u64) {
        let depth = self.channels[channel.index()].depth;
        self.channels[channel.index()] = ChannelData::uniform(depth, value);
    }

    /// Fills a channel with 8-bit elements. `values.len()` must equal the
    /// block volume.
    pub fn set_channel_u8(&mut self, channel: VoxelChannel, values: &[u8]) {
        debug_assert_eq!(values.len(), self.volume());
        self.channels[channel.index()] = ChannelData {
            depth: ChannelDepth::Bits8,
            compression: ChannelCompression::Raw,
            uniform_value: 0,
            bytes: values.to_vec(),
        };
    }

    /// Fills a channel with 16-bit elements. `values.len()` must equal the
    /// block volume.
    pub fn set_channel_u16(&mut self, channel: VoxelChannel, values: &[u16]) {
        debug_assert_eq!(values.len(), self.volume());
        let mut bytes = Vec::with_capacity(values.len() * 2);
        for v in values {
            bytes.extend_from_slice(&v.to_ne_bytes());
        }
        self.channels[channel.index()] = ChannelData {
            depth: ChannelDepth::Bits16,
            compression: ChannelCompression::Raw,
            uniform_value: 0,
            bytes,
        };
    }

    /// Injects raw channel bytes as-is, e.g. from a streaming source. No
    /// length validation; consumers check against the block volume.
    pub fn set_channel_raw_bytes(
        &mut self,
        channel: VoxelChannel,
        depth: ChannelDepth,
        bytes: Vec<u8>,
    ) {
        self.channels[channel.index()] = ChannelData {
            depth,
            compression: ChannelCompression::Raw,
            uniform_value: 0,
            bytes,
        };
    }

    /// Marks a channel palette-compressed. Storage is opaque to this crate.
    pub fn set_channel_palette(&mut self, channel: VoxelChannel, depth: ChannelDepth, bytes: Vec<u8>) {
        self.channels[channel.index()] = ChannelData {
            depth,
            compression: ChannelCompression::Palette,
            uniform_value: 0,
            bytes,
        };
    }
}
