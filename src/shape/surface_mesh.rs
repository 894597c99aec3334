use crate::bounding_volume::Aabb;
use crate::math::{Matrix4, Point, Real};
use crate::shape::Triangle;
use crate::utils;
use hashbrown::{HashMap, HashSet};

/// Indicates an inconsistency in the topology of a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// Found a triangle with two or three identical vertices.
    #[error("the triangle {0} has at least two identical vertices.")]
    BadTriangle(u32),
    /// At least two adjacent triangles have opposite orientations.
    #[error("the triangles {triangle1} and {triangle2} sharing the edge {edge:?} have opposite orientations.")]
    BadAdjacentTrianglesOrientation {
        /// The first triangle, with an orientation opposite to the second triangle.
        triangle1: u32,
        /// The second triangle, with an orientation opposite to the first triangle.
        triangle2: u32,
        /// The edge shared between the two triangles.
        edge: (u32, u32),
    },
}

/// Indicates an inconsistency while building a surface mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceMeshError {
    /// A surface mesh must contain at least one triangle.
    #[error("a surface mesh must contain at least one triangle.")]
    EmptyIndices,
    /// Indicates an inconsistency in the topology of a surface mesh.
    #[error("topology error: {0}")]
    Topology(TopologyError),
}

/// A vertex of a surface mesh's half-edge topology.
#[derive(Clone, Copy, Debug)]
pub struct TopoVertex {
    /// One of the half-edges with this vertex as its origin.
    pub half_edge: u32,
}

/// A face of a surface mesh's half-edge topology.
#[derive(Clone, Copy, Debug)]
pub struct TopoFace {
    /// The half-edge adjacent to this face, with a starting point equal
    /// to the first point of this face.
    pub half_edge: u32,
}

/// A half-edge of a surface mesh's half-edge topology.
#[derive(Clone, Copy, Debug)]
pub struct TopoHalfEdge {
    /// The next half-edge.
    pub next: u32,
    /// This half-edge twin on the adjacent triangle.
    ///
    /// This is `u32::MAX` if there is no twin.
    pub twin: u32,
    /// The first vertex of this edge.
    pub vertex: u32,
    /// The face associated to this half-edge.
    pub face: u32,
}

/// The half-edge topology information of a surface mesh.
#[derive(Default, Clone, Debug)]
pub struct SurfaceTopology {
    /// The vertices of this half-edge representation.
    pub vertices: Vec<TopoVertex>,
    /// The faces of this half-edge representation.
    pub faces: Vec<TopoFace>,
    /// The half-edges of this half-edge representation.
    pub half_edges: Vec<TopoHalfEdge>,
}

/// A triangulated surface in 3-D space.
///
/// The mesh owns a vertex buffer and a triangle index buffer and always
/// maintains the half-edge topology deduced from the index buffer. Building
/// a `SurfaceMesh` merges bit-identical duplicate vertices and drops
/// degenerate or duplicate triangles, so adjacency can be recovered from
/// shared vertex indices alone.
///
/// Surfaces produced by reconstruction are closed (watertight) 2-manifolds
/// with outward-facing winding; [`SurfaceMesh::is_closed`] reports whether
/// that invariant actually holds for the buffers at hand.
#[derive(Clone, Debug)]
pub struct SurfaceMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    topology: SurfaceTopology,
}

impl SurfaceMesh {
    /// Creates a surface mesh from a vertex and an index buffer.
    ///
    /// Bit-identical duplicate vertices are merged, degenerate and duplicate
    /// triangles are dropped, and the half-edge topology is computed.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, SurfaceMeshError> {
        if indices.is_empty() {
            return Err(SurfaceMeshError::EmptyIndices);
        }

        let (vertices, indices) = merge_duplicate_vertices(&vertices, &indices);

        if indices.is_empty() {
            return Err(SurfaceMeshError::EmptyIndices);
        }

        let topology =
            compute_topology(vertices.len(), &indices).map_err(SurfaceMeshError::Topology)?;

        Ok(Self {
            vertices,
            indices,
            topology,
        })
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The half-edge topology of this mesh.
    #[inline]
    pub fn topology(&self) -> &SurfaceTopology {
        &self.topology
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// The triangle with index `fid`.
    #[inline]
    pub fn triangle(&self, fid: u32) -> Triangle {
        let idx = self.indices[fid as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// The axis-aligned bounding box of this mesh.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Does every edge of this mesh have exactly two incident triangles?
    ///
    /// A closed mesh encloses a volume: the scan-line rasterizer relies on
    /// every line crossing the surface an even number of times.
    pub fn is_closed(&self) -> bool {
        self.topology.half_edges.iter().all(|he| he.twin != u32::MAX)
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// Positive when the mesh is closed with outward-facing winding. The
    /// value is meaningless for open meshes.
    pub fn signed_volume(&self) -> Real {
        let mut volume = 0.0;

        for idx in &self.indices {
            let a = self.vertices[idx[0] as usize].coords;
            let b = self.vertices[idx[1] as usize].coords;
            let c = self.vertices[idx[2] as usize].coords;
            volume += a.dot(&b.cross(&c));
        }

        volume / 6.0
    }

    /// Reverses the orientation of every triangle of this mesh.
    pub fn reverse(&mut self) {
        self.indices.iter_mut().for_each(|idx| idx.swap(0, 1));

        // Reversing every face cannot introduce topology errors, so the
        // recomputation always succeeds.
        if let Ok(topology) = compute_topology(self.vertices.len(), &self.indices) {
            self.topology = topology;
        }
    }

    /// Returns this mesh with all vertices transformed by the homogeneous matrix `m`.
    ///
    /// The index buffer and topology are shared combinatorics and are kept
    /// as-is. Note that a transform with negative determinant flips the
    /// geometric orientation of the faces.
    pub fn transformed(&self, m: &Matrix4<Real>) -> Self {
        let vertices = self.vertices.iter().map(|pt| m.transform_point(pt)).collect();

        Self {
            vertices,
            indices: self.indices.clone(),
            topology: self.topology.clone(),
        }
    }
}

/// Merges bit-identical vertices and drops degenerate or duplicate triangles.
fn merge_duplicate_vertices(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let mut vtx_to_id = HashMap::new();
    let mut new_vertices = Vec::with_capacity(vertices.len());
    let mut new_indices = Vec::with_capacity(indices.len());
    let mut triangle_set = HashSet::new();

    fn resolve_coord_id(
        coord: &Point<Real>,
        vtx_to_id: &mut HashMap<(u64, u64, u64), u32>,
        new_vertices: &mut Vec<Point<Real>>,
    ) -> u32 {
        // Key on the raw bit patterns: only bit-identical coordinates merge.
        let key = (
            (coord.x as f64).to_bits(),
            (coord.y as f64).to_bits(),
            (coord.z as f64).to_bits(),
        );
        let id = *vtx_to_id.entry(key).or_insert(new_vertices.len() as u32);

        if id == new_vertices.len() as u32 {
            new_vertices.push(*coord);
        }

        id
    }

    for t in indices {
        let va = resolve_coord_id(&vertices[t[0] as usize], &mut vtx_to_id, &mut new_vertices);
        let vb = resolve_coord_id(&vertices[t[1] as usize], &mut vtx_to_id, &mut new_vertices);
        let vc = resolve_coord_id(&vertices[t[2] as usize], &mut vtx_to_id, &mut new_vertices);

        let is_degenerate = va == vb || va == vc || vb == vc;

        if !is_degenerate {
            let (a, b, c) = utils::sort3(&va, &vb, &vc);
            if triangle_set.insert((*a, *b, *c)) {
                new_indices.push([va, vb, vc]);
            }
        }
    }

    new_vertices.shrink_to_fit();
    (new_vertices, new_indices)
}

/// Computes half-edge topological information from an index buffer.
///
/// Fails if a triangle indexes the same vertex twice, or if two adjacent
/// triangles disagree on their orientation (the same directed edge appears
/// twice).
fn compute_topology(
    num_vertices: usize,
    indices: &[[u32; 3]],
) -> Result<SurfaceTopology, TopologyError> {
    let mut topology = SurfaceTopology::default();
    let mut half_edge_map = HashMap::new();

    topology.vertices.resize(
        num_vertices,
        TopoVertex {
            half_edge: u32::MAX,
        },
    );

    // First, create three half-edges for each face.
    for (fid, idx) in indices.iter().enumerate() {
        let half_edge_base_id = topology.half_edges.len() as u32;

        if idx[0] == idx[1] || idx[0] == idx[2] || idx[1] == idx[2] {
            return Err(TopologyError::BadTriangle(fid as u32));
        }

        for k in 0u32..3 {
            let half_edge = TopoHalfEdge {
                next: half_edge_base_id + (k + 1) % 3,
                // We don't know which one it is yet.
                // If the twin doesn't exist, we use `u32::MAX` as
                // its (invalid) index. This value can be relied on
                // by other algorithms.
                twin: u32::MAX,
                vertex: idx[k as usize],
                face: fid as u32,
            };
            topology.half_edges.push(half_edge);

            let edge_key = (idx[k as usize], idx[(k as usize + 1) % 3]);

            if let Some(existing) = half_edge_map.insert(edge_key, half_edge_base_id + k) {
                // If the same directed edge already exists then we have two
                // triangles sharing it with incompatible orientations.
                return Err(TopologyError::BadAdjacentTrianglesOrientation {
                    edge: edge_key,
                    triangle1: topology.half_edges[existing as usize].face,
                    triangle2: fid as u32,
                });
            }

            topology.vertices[idx[k as usize] as usize].half_edge = half_edge_base_id + k;
        }

        topology.faces.push(TopoFace {
            half_edge: half_edge_base_id,
        })
    }

    // Second, identify twins.
    for (key, he1) in &half_edge_map {
        if key.0 < key.1 {
            // Test, to avoid checking the same pair twice.
            if let Some(he2) = half_edge_map.get(&(key.1, key.0)) {
                topology.half_edges[*he1 as usize].twin = *he2;
                topology.half_edges[*he2 as usize].twin = *he1;
            }
        }
    }

    Ok(topology)
}
