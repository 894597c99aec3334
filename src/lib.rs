/*!
volclip
========

**volclip** is the geometry core of an interactive "volume clip" editing
tool for 3D medical image segmentation: a handful of user-placed fiducial
points is turned into a closed, smoothed, consistently oriented triangulated
surface, which is then rasterized into a binary voxel mask and merged into a
segment's label volume.

The crate exposes two leaf components and one orchestration layer:

- [`reconstruction`] builds closed surfaces from point sets, either through
  a robust convex triangulation with subdivision smoothing or through an
  implicit signed-distance fit for denser clouds.
- [`rasterization`] converts a closed surface into a binary occupancy mask
  over a target voxel grid and combines masks for additive or subtractive
  label updates.
- [`clip`] ties both together behind the narrow collaborator interfaces a
  host application is expected to provide (fiducial source, target grid,
  segment identity).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod clip;
pub mod rasterization;
pub mod reconstruction;
pub mod shape;
pub mod transformation;
pub mod utils;

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use na::Matrix4;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub type Real = f64;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub type Real = f32;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The dimension of the ambient space.
    pub type Dim = na::U3;

    /// The point type.
    pub type Point<N> = na::Point3<N>;

    /// The vector type.
    pub type Vector<N> = na::Vector3<N>;

    /// The unit vector type.
    pub type UnitVector<N> = na::UnitVector3<N>;
}
