//! CPU blocky voxel mesher: culled-face extraction with per-side silhouette
//! occlusion, baked corner occlusion, procedural fluid tops, and LOD seam
//! skirts. One triangle surface per material, ready for GPU upload.
#![forbid(unsafe_code)]

pub mod ao;
pub mod arrays;
pub mod build;
pub mod constants;
pub mod cube;
pub mod error;
pub mod fluid;
mod mesher;
mod seams;
pub mod visibility;

pub use arrays::{CollisionArrays, MeshArrays};
pub use build::{BlockyMesher, BuildInput, BuildOutput, MesherParams, OutputSurface, PrimitiveType};
pub use constants::PADDING;
pub use cube::{NeighborLuts, Side, Strides};
pub use error::BuildError;
pub use fluid::preview_fluid_model;
