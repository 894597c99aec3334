//! Geometric primitives: triangles and triangulated surfaces.

pub use self::surface_mesh::{
    SurfaceMesh, SurfaceMeshError, SurfaceTopology, TopoFace, TopoHalfEdge, TopoVertex,
    TopologyError,
};
pub use self::triangle::Triangle;

mod surface_mesh;
mod triangle;
