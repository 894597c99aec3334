//! Transformation and refinement of point clouds and meshes.

pub use self::convex_hull::{convex_hull, try_convex_hull, ConvexHullError};
pub use self::implicit_surface::{implicit_surface, ImplicitSurfaceError, ImplicitSurfaceParams};
pub use self::marching_cubes::{march_scalar_field, ScalarField};
pub use self::subdivision::{butterfly_subdivide, butterfly_subdivide_with_tension};

mod convex_hull;
pub(crate) mod convex_hull_utils;
mod implicit_surface;
mod marching_cubes;
mod subdivision;
