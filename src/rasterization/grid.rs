use crate::math::{Matrix4, Real};

/// Inclusive voxel index bounds of a grid along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridExtent {
    /// Smallest voxel index along each axis, inclusive.
    pub mins: [i32; 3],
    /// Largest voxel index along each axis, inclusive.
    pub maxs: [i32; 3],
}

impl GridExtent {
    /// An extent spanning `mins` to `maxs`, both inclusive.
    pub fn new(mins: [i32; 3], maxs: [i32; 3]) -> Self {
        Self { mins, maxs }
    }

    /// The number of voxels along each axis, zero when the extent is inverted.
    pub fn dimensions(&self) -> [usize; 3] {
        let mut dims = [0; 3];

        for i in 0..3 {
            dims[i] = (self.maxs[i] - self.mins[i] + 1).max(0) as usize;
        }

        dims
    }

    /// The total number of voxels of this extent.
    pub fn num_voxels(&self) -> usize {
        let [nx, ny, nz] = self.dimensions();
        nx * ny * nz
    }

    /// Whether the voxel index `ijk` lies inside this extent.
    pub fn contains(&self, ijk: [i32; 3]) -> bool {
        (0..3).all(|i| self.mins[i] <= ijk[i] && ijk[i] <= self.maxs[i])
    }

    /// The linear offset of the voxel `ijk`, in x-fastest order.
    ///
    /// Returns `None` when `ijk` lies outside this extent.
    pub fn linear_index(&self, ijk: [i32; 3]) -> Option<usize> {
        if !self.contains(ijk) {
            return None;
        }

        let [nx, ny, _] = self.dimensions();
        let dx = (ijk[0] - self.mins[0]) as usize;
        let dy = (ijk[1] - self.mins[1]) as usize;
        let dz = (ijk[2] - self.mins[2]) as usize;
        Some(dx + nx * (dy + ny * dz))
    }
}

/// Scalar type of a label volume's voxel payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum ScalarType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    F32,
    F64,
}

impl ScalarType {
    /// The size of one voxel of this type, in bytes.
    pub fn size_in_bytes(self) -> usize {
        match self {
            ScalarType::U8 | ScalarType::I8 => 1,
            ScalarType::U16 | ScalarType::I16 => 2,
            ScalarType::U32 | ScalarType::I32 | ScalarType::F32 => 4,
            ScalarType::F64 => 8,
        }
    }
}

/// Geometry of a target label volume: its voxel extent, scalar type, and the
/// matrix placing voxel indices in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GridGeometry {
    /// Inclusive voxel bounds of the volume.
    pub extent: GridExtent,
    /// Scalar type of the voxel payload.
    pub scalar_type: ScalarType,
    /// Homogeneous matrix mapping voxel indices (IJK) to world coordinates.
    pub ijk_to_world: Matrix4<Real>,
}

impl GridGeometry {
    /// The inverse of `ijk_to_world`, mapping world coordinates to voxel
    /// indices.
    ///
    /// Returns `None` when the matrix is singular or has non-finite entries,
    /// in which case no mask can be placed reliably in this volume.
    pub fn world_to_ijk(&self) -> Option<Matrix4<Real>> {
        if self.ijk_to_world.iter().any(|e| !e.is_finite()) {
            return None;
        }

        self.ijk_to_world.try_inverse()
    }
}
