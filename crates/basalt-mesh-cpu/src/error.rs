use std::error::Error;
use std::fmt;

/// Why a build produced no mesh. Soft kinds are valid authoring states and
/// stay silent; hard kinds log a single line. Neither crosses the build
/// boundary as a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// No library assigned yet.
    MissingLibrary,
    /// Uniform-compressed type channel: all-air or a trivially absent mesh.
    UniformBuffer,
    UnsupportedCompression,
    UnsupportedDepth,
    /// Channel bytes missing or inconsistent with the block size.
    ChannelReadFailed,
}

impl BuildError {
    /// Soft failures emit empty output without logging.
    #[inline]
    pub fn is_soft(self) -> bool {
        matches!(self, BuildError::MissingLibrary | BuildError::UniformBuffer)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingLibrary => write!(f, "no model library assigned"),
            BuildError::UniformBuffer => write!(f, "uniform-compressed type channel"),
            BuildError::UnsupportedCompression => {
                write!(f, "unsupported voxel channel compression")
            }
            BuildError::UnsupportedDepth => write!(f, "unsupported voxel channel depth"),
            BuildError::ChannelReadFailed => write!(f, "failed to read voxel channel data"),
        }
    }
}

impl Error for BuildError {}
