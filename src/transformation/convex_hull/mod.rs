pub use self::convex_hull::{convex_hull, try_convex_hull};
pub use self::error::ConvexHullError;
use self::triangle_facet::TriangleFacet;

mod convex_hull;
mod error;
mod initial_mesh;
mod triangle_facet;
