//! Baked model, fluid, and material data consumed by the mesher.
//!
//! Everything in this crate is a plain-data snapshot: the authoring layer
//! bakes it once, then any number of build threads read it behind a
//! [`SharedLibrary`] read lock without further copying.
#![forbid(unsafe_code)]

pub mod fluid;
pub mod library;
pub mod material;
pub mod model;

pub use fluid::{BakedFluid, FluidSide, FlowState, AXIS_X, AXIS_Y, AXIS_Z};
pub use library::{ModelLibrary, SharedLibrary};
pub use material::{Material, MaterialCatalog, MaterialId};
pub use model::{
    BakedModel, BakedSurface, ModelKind, SideSurface, SideSurfaces, AIR_ID, MAX_SURFACES,
    NULL_FLUID_INDEX, SIDE_COUNT,
};
