use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::fluid::BakedFluid;
use crate::material::{Material, MaterialCatalog};
use crate::model::BakedModel;

/// Baked snapshot of every model, fluid, and material the mesher can touch.
///
/// A voxel id `v` is valid iff `v < models.len()`; the mesher treats unknown
/// ids as air. Built once by the authoring layer, read-only during builds.
#[derive(Default, Clone, Debug)]
pub struct ModelLibrary {
    pub models: Vec<BakedModel>,
    pub fluids: Vec<BakedFluid>,
    /// Material ids used by surfaces are dense in `[0, indexed_materials_count)`.
    pub indexed_materials_count: usize,
    /// Number of distinct side silhouettes across all models.
    pub side_pattern_count: u32,
    /// Row-major `[pattern_a * side_pattern_count + pattern_b]`: whether a
    /// side with pattern `a` is fully covered by an adjacent side with
    /// pattern `b`.
    pub side_pattern_occlusion: Vec<bool>,
    pub materials: MaterialCatalog,
}

impl ModelLibrary {
    #[inline]
    pub fn has_model(&self, id: u32) -> bool {
        (id as usize) < self.models.len()
    }

    #[inline]
    pub fn model(&self, id: u32) -> &BakedModel {
        &self.models[id as usize]
    }

    #[inline]
    pub fn fluid(&self, index: u8) -> &BakedFluid {
        &self.fluids[index as usize]
    }

    /// Whether a side with pattern `pattern_a` is fully covered by a
    /// neighboring side with pattern `pattern_b`. Out-of-range patterns
    /// never occlude.
    #[inline]
    pub fn side_pattern_occluded(&self, pattern_a: u32, pattern_b: u32) -> bool {
        if pattern_a >= self.side_pattern_count || pattern_b >= self.side_pattern_count {
            return false;
        }
        let i = (pattern_a * self.side_pattern_count + pattern_b) as usize;
        self.side_pattern_occlusion.get(i).copied().unwrap_or(false)
    }

    pub fn get_material_by_index(&self, index: usize) -> Option<&Material> {
        self.materials.materials.get(index)
    }
}

/// Shared handle to a [`ModelLibrary`] behind a reader-writer lock.
///
/// Builds hold the lock in read mode for the duration of one meshing pass;
/// authoring code takes write mode and must not hold it across a build.
#[derive(Clone, Default)]
pub struct SharedLibrary {
    inner: Arc<RwLock<ModelLibrary>>,
}

impl SharedLibrary {
    pub fn new(library: ModelLibrary) -> Self {
        Self {
            inner: Arc::new(RwLock::new(library)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, ModelLibrary> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, ModelLibrary> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
