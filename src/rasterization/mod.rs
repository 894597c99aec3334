//! Conversion of closed surfaces into binary voxel masks over a label grid.

pub use self::grid::{GridExtent, GridGeometry, ScalarType};
pub use self::image_stencil::ImageStencil;
pub use self::mask_rasterizer::{MaskRasterizer, MergeMode, OperationMode, RasterError};
pub use self::voxel_mask::VoxelMask;

mod grid;
mod image_stencil;
mod mask_rasterizer;
mod voxel_mask;
