use crate::math::{Matrix4, Real};
use crate::rasterization::grid::{GridExtent, GridGeometry};
use crate::rasterization::image_stencil::ImageStencil;
use crate::rasterization::voxel_mask::VoxelMask;
use crate::shape::SurfaceMesh;

/// How a rasterized surface is labelled and merged into a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum OperationMode {
    /// Label the voxels inside the surface and add them to the segment.
    FillInside,
    /// Label the voxels outside the surface and add them to the segment.
    FillOutside,
    /// Label the voxels inside the surface and remove them from the segment.
    EraseInside,
    /// Label the voxels outside the surface and remove them from the segment.
    EraseOutside,
}

impl OperationMode {
    /// The label written to voxels covered by the surface interior.
    pub fn inside_value(self) -> u8 {
        match self {
            OperationMode::FillInside | OperationMode::EraseInside => 1,
            OperationMode::FillOutside | OperationMode::EraseOutside => 0,
        }
    }

    /// The label written to every other voxel of the target grid.
    pub fn outside_value(self) -> u8 {
        1 - self.inside_value()
    }

    /// How the finished mask is meant to be merged into the segment.
    pub fn merge_mode(self) -> MergeMode {
        match self {
            OperationMode::FillInside | OperationMode::FillOutside => MergeMode::Add,
            OperationMode::EraseInside | OperationMode::EraseOutside => MergeMode::Remove,
        }
    }
}

/// How a mask combines with the labels already stored in a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum MergeMode {
    /// Labelled voxels are added to the segment.
    Add,
    /// Labelled voxels are removed from the segment.
    Remove,
}

/// Error indicating that a surface could not be rasterized onto a grid.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum RasterError {
    /// The voxel-to-world matrix of the target grid is singular or not finite.
    #[error("the target grid has no invertible voxel-to-world matrix.")]
    InvalidTargetGrid,
    /// Tried to combine masks rasterized over different grids.
    #[error("masks over different grids cannot be combined.")]
    IncompatibleMask,
}

/// Converts closed surfaces into binary voxel masks over a target grid.
///
/// The surface is mapped into the grid's voxel space and scan-converted slice
/// by slice. Voxels whose center lies inside the surface get the mode's inside
/// label, all remaining voxels of the target extent get the outside label, so
/// rasterizing the same surface with [`OperationMode::FillInside`] and
/// [`OperationMode::FillOutside`] yields exact complements.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaskRasterizer;

impl MaskRasterizer {
    /// Creates a rasterizer.
    pub fn new() -> Self {
        MaskRasterizer
    }

    /// Rasterizes `surface` (given in world space) onto `target`.
    ///
    /// `world_to_ijk` maps the surface into the grid's voxel space. It is
    /// usually [`GridGeometry::world_to_ijk`], possibly composed with a
    /// parent frame transform. Parts of the surface extending past the
    /// target extent are clipped. Fails with
    /// `RasterError::InvalidTargetGrid` if the transform is not finite and
    /// invertible.
    pub fn rasterize(
        &self,
        surface: &SurfaceMesh,
        world_to_ijk: &Matrix4<Real>,
        target: &GridGeometry,
        mode: OperationMode,
    ) -> Result<VoxelMask, RasterError> {
        let invertible = world_to_ijk.iter().all(|e| e.is_finite())
            && world_to_ijk.try_inverse().is_some();

        if !invertible {
            log::error!("the world-to-voxel matrix is not invertible, refusing to rasterize");
            return Err(RasterError::InvalidTargetGrid);
        }

        let in_ijk = surface.transformed(world_to_ijk);
        let aabb = in_ijk.aabb();

        // Only the slice range actually crossed by the surface gets scanned.
        let full = target.extent;
        let lo_z = (aabb.mins.z.floor() as i32).max(full.mins[2]);
        let hi_z = (aabb.maxs.z.ceil() as i32).min(full.maxs[2]);
        let working = GridExtent::new(
            [full.mins[0], full.mins[1], lo_z],
            [full.maxs[0], full.maxs[1], hi_z],
        );

        let stencil = ImageStencil::from_surface(&in_ijk, working);
        log::debug!(
            "rasterized surface covers {} of {} voxels",
            stencil.count_inside(),
            full.num_voxels()
        );

        Ok(VoxelMask::from_stencil(
            &stencil,
            full,
            mode,
            target.scalar_type,
            target.ijk_to_world,
        ))
    }
}
