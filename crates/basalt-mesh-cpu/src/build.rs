use std::cell::RefCell;
use std::sync::RwLock;

use basalt_chunk::{ChannelCompression, ChannelDepth, VoxelBuf, VoxelChannel, VoxelId};
use basalt_geom::Vec3i;
use basalt_models::{Material, SharedLibrary};

use crate::arrays::{CollisionArrays, MeshArrays};
use crate::constants::MIN_BLOCK_SIZE;
use crate::error::BuildError;
use crate::fluid::FluidScratch;
use crate::mesher::generate_blocky_mesh;
use crate::seams::append_seams;

/// Mesher configuration, readable while authoring code replaces it.
#[derive(Clone)]
pub struct MesherParams {
    pub library: Option<SharedLibrary>,
    pub bake_occlusion: bool,
    /// In `[0, 1]`; scaled down before baking so a fully shaded corner lands
    /// at exactly this darkness.
    pub baked_occlusion_darkness: f32,
}

impl Default for MesherParams {
    fn default() -> Self {
        Self {
            library: None,
            bake_occlusion: true,
            baked_occlusion_darkness: 0.8,
        }
    }
}

pub struct BuildInput<'a> {
    pub voxels: &'a VoxelBuf,
    pub lod_index: u8,
    pub collision_hint: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrimitiveType {
    #[default]
    Triangles,
}

#[derive(Default, Clone, Debug)]
pub struct OutputSurface {
    pub arrays: MeshArrays,
    pub material_index: usize,
}

/// One build's result: a surface per non-empty material, plus the optional
/// aggregated collision surface.
#[derive(Default, Clone, Debug)]
pub struct BuildOutput {
    pub surfaces: Vec<OutputSurface>,
    pub collision_surface: Option<CollisionArrays>,
    pub primitive: PrimitiveType,
}

/// Per-thread build scratch. Buffers are cleared between builds, never
/// freed, so repeated meshing on the same worker stays allocation-quiet.
#[derive(Default)]
struct MesherCache {
    arrays_per_material: Vec<MeshArrays>,
    index_offsets: Vec<u32>,
    collision: CollisionArrays,
    fluid: FluidScratch,
    wide_ids: Vec<u16>,
}

thread_local! {
    static TLS_CACHE: RefCell<MesherCache> = RefCell::new(MesherCache::default());
}

/// Blocky voxel mesher: turns a padded TYPE-channel block into one triangle
/// surface per material, with optional baked occlusion, fluid top
/// reconstruction, and LOD seam skirts.
pub struct BlockyMesher {
    params: RwLock<MesherParams>,
}

impl Default for BlockyMesher {
    fn default() -> Self {
        Self::new(MesherParams::default())
    }
}

impl BlockyMesher {
    pub fn new(params: MesherParams) -> Self {
        Self {
            params: RwLock::new(params),
        }
    }

    pub fn with_library(library: SharedLibrary) -> Self {
        Self::new(MesherParams {
            library: Some(library),
            ..MesherParams::default()
        })
    }

    fn params(&self) -> MesherParams {
        self.params.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn params_mut(&self) -> std::sync::RwLockWriteGuard<'_, MesherParams> {
        self.params.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_library(&self, library: Option<SharedLibrary>) {
        self.params_mut().library = library;
    }

    pub fn library(&self) -> Option<SharedLibrary> {
        self.params().library
    }

    pub fn set_occlusion_enabled(&self, enabled: bool) {
        self.params_mut().bake_occlusion = enabled;
    }

    pub fn occlusion_enabled(&self) -> bool {
        self.params().bake_occlusion
    }

    pub fn set_occlusion_darkness(&self, darkness: f32) {
        self.params_mut().baked_occlusion_darkness = darkness.clamp(0.0, 1.0);
    }

    pub fn occlusion_darkness(&self) -> f32 {
        self.params().baked_occlusion_darkness
    }

    /// Bitmask of the voxel channels a build reads.
    pub fn used_channels_mask(&self) -> u32 {
        1 << VoxelChannel::Type.index()
    }

    pub fn material_index_count(&self) -> usize {
        self.params()
            .library
            .map(|lib| lib.read().indexed_materials_count)
            .unwrap_or(0)
    }

    /// Host-material passthrough for surface `material_index` resolution.
    pub fn get_material_by_index(&self, index: usize) -> Option<Material> {
        self.params()
            .library
            .and_then(|lib| lib.read().get_material_by_index(index).cloned())
    }

    /// Meshes one block. Never panics across this boundary: failures come
    /// back as an empty output, with a single log line for the hard kinds.
    pub fn build(&self, input: &BuildInput<'_>) -> BuildOutput {
        let mut output = BuildOutput::default();
        if let Err(err) = self.build_into(input, &mut output) {
            if !err.is_soft() {
                log::error!("blocky mesh build failed: {err}");
            }
            output = BuildOutput::default();
        }
        output
    }

    fn build_into(
        &self,
        input: &BuildInput<'_>,
        output: &mut BuildOutput,
    ) -> Result<(), BuildError> {
        let channel = VoxelChannel::Type;
        let params = self.params();

        // A missing library is a valid state while the user sets things up.
        let library = params.library.as_ref().ok_or(BuildError::MissingLibrary)?;

        match input.voxels.channel_compression(channel) {
            // All voxels share one id: all-air and all-cube blocks both mesh
            // to nothing worth emitting.
            ChannelCompression::Uniform => return Err(BuildError::UniformBuffer),
            ChannelCompression::Raw => {}
            _ => return Err(BuildError::UnsupportedCompression),
        }

        let block_size = input.voxels.size();
        let min = MIN_BLOCK_SIZE as i32;
        if block_size.x < min || block_size.y < min || block_size.z < min {
            return Err(BuildError::ChannelReadFailed);
        }

        let raw = input
            .voxels
            .channel_as_bytes(channel)
            .ok_or(BuildError::ChannelReadFailed)?;
        let depth = input.voxels.channel_depth(channel);
        let volume = input.voxels.volume();

        let mut darkness = 0.0;
        if params.bake_occlusion {
            // Corner intensities go up to 3.
            darkness = params.baked_occlusion_darkness / 3.0;
        }

        TLS_CACHE.with(|cell| -> Result<(), BuildError> {
            let mut cache = cell.borrow_mut();
            let MesherCache {
                arrays_per_material,
                index_offsets,
                collision,
                fluid,
                wide_ids,
            } = &mut *cache;

            for arrays in arrays_per_material.iter_mut() {
                arrays.clear_keep_capacity();
            }
            collision.clear_keep_capacity();

            {
                // Baked data is the only library form safe to read here;
                // authoring data may be edited concurrently.
                let lib = library.read();

                let material_count = lib.indexed_materials_count;
                if arrays_per_material.len() < material_count {
                    arrays_per_material.resize(material_count, MeshArrays::default());
                }
                index_offsets.clear();
                index_offsets.resize(material_count, 0);

                let arrays = &mut arrays_per_material[..material_count];
                let collision_out = if input.collision_hint {
                    Some(&mut *collision)
                } else {
                    None
                };

                #[allow(clippy::too_many_arguments)]
                fn mesh_ids<T: VoxelId>(
                    ids: &[T],
                    arrays: &mut [MeshArrays],
                    index_offsets: &mut [u32],
                    collision_out: Option<&mut CollisionArrays>,
                    fluid: &mut FluidScratch,
                    block_size: Vec3i,
                    lib: &basalt_models::ModelLibrary,
                    bake_occlusion: bool,
                    darkness: f32,
                    lod_index: u8,
                ) {
                    generate_blocky_mesh(
                        arrays,
                        index_offsets,
                        collision_out,
                        fluid,
                        ids,
                        block_size,
                        lib,
                        bake_occlusion,
                        darkness,
                    );
                    if lod_index > 0 {
                        append_seams(ids, block_size, arrays, lib);
                    }
                }

                match depth {
                    ChannelDepth::Bits8 => {
                        if raw.len() != volume {
                            return Err(BuildError::ChannelReadFailed);
                        }
                        mesh_ids(
                            raw,
                            arrays,
                            index_offsets,
                            collision_out,
                            fluid,
                            block_size,
                            &lib,
                            params.bake_occlusion,
                            darkness,
                            input.lod_index,
                        );
                    }
                    ChannelDepth::Bits16 => {
                        if raw.len() != volume * 2 {
                            return Err(BuildError::ChannelReadFailed);
                        }
                        // Zero-copy view when the byte buffer happens to be
                        // 2-aligned; one linear copy into scratch otherwise.
                        let ids: &[u16] = match bytemuck::try_cast_slice(raw) {
                            Ok(ids) => ids,
                            Err(_) => {
                                wide_ids.clear();
                                wide_ids.extend(
                                    raw.chunks_exact(2)
                                        .map(|b| u16::from_ne_bytes([b[0], b[1]])),
                                );
                                wide_ids
                            }
                        };
                        mesh_ids(
                            ids,
                            arrays,
                            index_offsets,
                            collision_out,
                            fluid,
                            block_size,
                            &lib,
                            params.bake_occlusion,
                            darkness,
                            input.lod_index,
                        );
                    }
                    _ => return Err(BuildError::UnsupportedDepth),
                }
            }

            // Lock released; scale and package.
            if input.lod_index > 0 {
                // Might not look good, but at least it's something.
                let lod_scale = (1u32 << input.lod_index) as f32;
                for arrays in arrays_per_material.iter_mut() {
                    for p in &mut arrays.positions {
                        *p = *p * lod_scale;
                    }
                }
                if input.collision_hint {
                    for p in &mut collision.positions {
                        *p = *p * lod_scale;
                    }
                }
            }

            for (material_index, arrays) in arrays_per_material.iter().enumerate() {
                if arrays.is_empty() {
                    continue;
                }
                output.surfaces.push(OutputSurface {
                    arrays: arrays.clone(),
                    material_index,
                });
            }
            if input.collision_hint {
                output.collision_surface = Some(collision.clone());
            }
            output.primitive = PrimitiveType::Triangles;
            Ok(())
        })
    }
}
