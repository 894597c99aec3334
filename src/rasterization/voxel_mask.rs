use crate::math::{Matrix4, Real};
use crate::rasterization::grid::{GridExtent, ScalarType};
use crate::rasterization::image_stencil::ImageStencil;
use crate::rasterization::mask_rasterizer::{OperationMode, RasterError};

/// A binary labelmap covering the full extent of a target grid.
///
/// Every voxel holds either the inside value or the outside value of the
/// [`OperationMode`] the mask was rasterized with, so a mask always describes
/// the whole grid and two masks over the same grid can be combined voxel by
/// voxel.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelMask {
    extent: GridExtent,
    values: Vec<u8>,
    scalar_type: ScalarType,
    ijk_to_world: Matrix4<Real>,
}

impl VoxelMask {
    /// Materializes a stencil as a labelmap over `extent`.
    ///
    /// Voxels covered by the stencil get `mode.inside_value()`, every other
    /// voxel of `extent` gets `mode.outside_value()`.
    pub(super) fn from_stencil(
        stencil: &ImageStencil,
        extent: GridExtent,
        mode: OperationMode,
        scalar_type: ScalarType,
        ijk_to_world: Matrix4<Real>,
    ) -> Self {
        let mut values = vec![mode.outside_value(); extent.num_voxels()];
        let covered = stencil.extent();

        for iz in covered.mins[2]..=covered.maxs[2] {
            for iy in covered.mins[1]..=covered.maxs[1] {
                for ix in covered.mins[0]..=covered.maxs[0] {
                    let ijk = [ix, iy, iz];

                    if stencil.contains(ijk) {
                        if let Some(id) = extent.linear_index(ijk) {
                            values[id] = mode.inside_value();
                        }
                    }
                }
            }
        }

        VoxelMask {
            extent,
            values,
            scalar_type,
            ijk_to_world,
        }
    }

    /// The grid extent this mask covers.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// The scalar type this mask converts to when exported with [`VoxelMask::cast_bytes`].
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// The voxel-to-world matrix of the grid this mask was rasterized for.
    pub fn ijk_to_world(&self) -> &Matrix4<Real> {
        &self.ijk_to_world
    }

    /// The label values, in x-fastest layout matching [`GridExtent::linear_index`].
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// The label stored at `ijk`, or `None` if `ijk` lies outside the extent.
    pub fn value(&self, ijk: [i32; 3]) -> Option<u8> {
        self.extent.linear_index(ijk).map(|id| self.values[id])
    }

    /// The number of voxels with a nonzero label.
    pub fn count_nonzero(&self) -> usize {
        self.values.iter().filter(|v| **v != 0).count()
    }

    /// Merges `other` into `self` with a voxelwise maximum.
    ///
    /// Both masks must cover the same extent of the same grid with the same
    /// scalar type, otherwise `RasterError::IncompatibleMask` is returned and
    /// `self` is left untouched.
    pub fn accumulate(&mut self, other: &VoxelMask) -> Result<(), RasterError> {
        if self.extent != other.extent
            || self.scalar_type != other.scalar_type
            || self.ijk_to_world != other.ijk_to_world
        {
            return Err(RasterError::IncompatibleMask);
        }

        for (dst, src) in self.values.iter_mut().zip(other.values.iter()) {
            *dst = (*dst).max(*src);
        }

        Ok(())
    }

    /// Serializes the labels to little-endian bytes of this mask's scalar type.
    pub fn cast_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.values.len() * self.scalar_type.size_in_bytes());

        for &value in &self.values {
            match self.scalar_type {
                ScalarType::U8 => bytes.push(value),
                ScalarType::I8 => bytes.push(value as i8 as u8),
                ScalarType::U16 => bytes.extend_from_slice(&(value as u16).to_le_bytes()),
                ScalarType::I16 => bytes.extend_from_slice(&(value as i16).to_le_bytes()),
                ScalarType::U32 => bytes.extend_from_slice(&(value as u32).to_le_bytes()),
                ScalarType::I32 => bytes.extend_from_slice(&(value as i32).to_le_bytes()),
                ScalarType::F32 => bytes.extend_from_slice(&(value as f32).to_le_bytes()),
                ScalarType::F64 => bytes.extend_from_slice(&(value as f64).to_le_bytes()),
            }
        }

        bytes
    }
}

#[cfg(test)]
mod test {
    use super::VoxelMask;
    use crate::math::{Matrix4, Real, Vector};
    use crate::rasterization::grid::{GridExtent, ScalarType};
    use crate::rasterization::image_stencil::test::box_surface;
    use crate::rasterization::image_stencil::ImageStencil;
    use crate::rasterization::mask_rasterizer::{OperationMode, RasterError};

    fn box_mask(lo: Real, hi: Real, mode: OperationMode) -> VoxelMask {
        let extent = GridExtent::new([0, 0, 0], [10, 10, 10]);
        let stencil = ImageStencil::from_surface(&box_surface(lo, hi), extent);
        VoxelMask::from_stencil(&stencil, extent, mode, ScalarType::U8, Matrix4::identity())
    }

    #[test]
    fn fill_and_erase_modes_choose_the_labelled_side() {
        let fill_inside = box_mask(2.0, 8.0, OperationMode::FillInside);
        assert_eq!(fill_inside.count_nonzero(), 6 * 6 * 6);
        assert_eq!(fill_inside.value([5, 5, 5]), Some(1));
        assert_eq!(fill_inside.value([0, 0, 0]), Some(0));
        assert_eq!(fill_inside.value([11, 5, 5]), None);

        let erase_outside = box_mask(2.0, 8.0, OperationMode::EraseOutside);
        assert_eq!(erase_outside.count_nonzero(), 11 * 11 * 11 - 6 * 6 * 6);
        assert_eq!(erase_outside.value([5, 5, 5]), Some(0));
        assert_eq!(erase_outside.value([0, 0, 0]), Some(1));
    }

    #[test]
    fn accumulate_is_a_voxelwise_maximum() {
        let mut left = box_mask(1.0, 4.0, OperationMode::FillInside);
        let right = box_mask(3.0, 6.0, OperationMode::FillInside);

        left.accumulate(&right).unwrap();

        // Two 3x3x3 boxes overlapping in a single voxel.
        assert_eq!(left.count_nonzero(), 27 + 27 - 1);
        assert_eq!(left.value([1, 1, 1]), Some(1));
        assert_eq!(left.value([3, 3, 3]), Some(1));
        assert_eq!(left.value([5, 5, 5]), Some(1));

        let snapshot = left.clone();
        left.accumulate(&right).unwrap();
        assert_eq!(left, snapshot);
    }

    #[test]
    fn masks_over_different_grids_cannot_be_combined() {
        let mut mask = box_mask(2.0, 8.0, OperationMode::FillInside);

        let extent = GridExtent::new([0, 0, 0], [5, 5, 5]);
        let stencil = ImageStencil::from_surface(&box_surface(1.0, 3.0), extent);
        let smaller = VoxelMask::from_stencil(
            &stencil,
            extent,
            OperationMode::FillInside,
            ScalarType::U8,
            Matrix4::identity(),
        );

        assert_eq!(mask.accumulate(&smaller), Err(RasterError::IncompatibleMask));

        let mut shifted = mask.clone();
        shifted.ijk_to_world = Matrix4::identity().append_translation(&Vector::new(1.0, 0.0, 0.0));
        assert_eq!(mask.accumulate(&shifted), Err(RasterError::IncompatibleMask));
    }

    #[test]
    fn cast_bytes_honours_the_scalar_type() {
        let extent = GridExtent::new([0, 0, 0], [1, 0, 0]);
        let stencil = ImageStencil::from_surface(&box_surface(-5.0, -4.0), extent);

        let narrow = VoxelMask::from_stencil(
            &stencil,
            extent,
            OperationMode::FillOutside,
            ScalarType::U8,
            Matrix4::identity(),
        );
        assert_eq!(narrow.cast_bytes(), vec![1, 1]);

        let wide = VoxelMask::from_stencil(
            &stencil,
            extent,
            OperationMode::FillOutside,
            ScalarType::U16,
            Matrix4::identity(),
        );
        assert_eq!(wide.cast_bytes(), vec![1, 0, 1, 0]);

        let float = VoxelMask::from_stencil(
            &stencil,
            extent,
            OperationMode::FillOutside,
            ScalarType::F32,
            Matrix4::identity(),
        );
        let mut expected = Vec::new();
        expected.extend_from_slice(&1.0f32.to_le_bytes());
        expected.extend_from_slice(&1.0f32.to_le_bytes());
        assert_eq!(float.cast_bytes(), expected);
    }
}
