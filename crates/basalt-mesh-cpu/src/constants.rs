//! Shared constants for basalt-mesh-cpu.

/// One voxel of neighbor data on every block face. The interior meshed
/// region is `[PADDING, size - PADDING)` per axis.
pub const PADDING: usize = 1;

/// Smallest block size the mesher accepts per axis.
pub const MIN_BLOCK_SIZE: usize = 2 * PADDING;
