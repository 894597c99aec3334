//! Isosurface extraction from a regularly sampled scalar field.

use crate::math::{Point, Real, Vector};
use hashbrown::HashMap;

/// A scalar field sampled on a regular axis-aligned lattice.
///
/// Samples are stored in `x`-fastest order. The lattice point `(ix, iy, iz)`
/// lies at `origin + spacing * (ix, iy, iz)` in world space.
#[derive(Clone, Debug)]
pub struct ScalarField {
    values: Vec<Real>,
    dimensions: [usize; 3],
    origin: Point<Real>,
    spacing: Real,
}

impl ScalarField {
    /// Allocates a zero-filled field with `dimensions` samples along each axis.
    pub fn new(dimensions: [usize; 3], origin: Point<Real>, spacing: Real) -> Self {
        Self {
            values: vec![0.0; dimensions[0] * dimensions[1] * dimensions[2]],
            dimensions,
            origin,
            spacing,
        }
    }

    /// The number of samples along each axis.
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    /// The spacing between two neighbor samples.
    pub fn spacing(&self) -> Real {
        self.spacing
    }

    /// The world position of the lattice point `(ix, iy, iz)`.
    pub fn position(&self, ix: usize, iy: usize, iz: usize) -> Point<Real> {
        self.origin + Vector::new(ix as Real, iy as Real, iz as Real) * self.spacing
    }

    /// The sample stored at the lattice point `(ix, iy, iz)`.
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> Real {
        self.values[self.index(ix, iy, iz)]
    }

    /// Overwrites the sample stored at the lattice point `(ix, iy, iz)`.
    pub fn set(&mut self, ix: usize, iy: usize, iz: usize, value: Real) {
        let id = self.index(ix, iy, iz);
        self.values[id] = value;
    }

    /// Evaluates `f` at every lattice point and stores the result.
    pub fn fill(&mut self, mut f: impl FnMut(&Point<Real>) -> Real) {
        for iz in 0..self.dimensions[2] {
            for iy in 0..self.dimensions[1] {
                for ix in 0..self.dimensions[0] {
                    let value = f(&self.position(ix, iy, iz));
                    self.set(ix, iy, iz, value);
                }
            }
        }
    }

    fn index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + self.dimensions[0] * (iy + self.dimensions[1] * iz)
    }
}

/// Extracts the isosurface `field = iso_value` with the marching-cubes cell
/// triangulations.
///
/// Crossing vertices are computed once per lattice edge, so triangles emitted
/// by neighbor cells share bit-identical vertices and the result is watertight
/// wherever the surface does not reach the lattice boundary. Triangle normals
/// point towards the region sampled below the iso-value.
pub fn march_scalar_field(
    field: &ScalarField,
    iso_value: Real,
) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let [nx, ny, nz] = field.dimensions();
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    if nx < 2 || ny < 2 || nz < 2 {
        return (vertices, indices);
    }

    let mut edge_vertices = HashMap::new();

    for iz in 0..nz - 1 {
        for iy in 0..ny - 1 {
            for ix in 0..nx - 1 {
                let mut config = 0usize;

                for (corner, offset) in CELL_CORNERS.iter().enumerate() {
                    if field.get(ix + offset[0], iy + offset[1], iz + offset[2]) < iso_value {
                        config |= 1 << corner;
                    }
                }

                for triangle in &TRIANGLE_TABLE[config] {
                    if *triangle == NO_TRIANGLE {
                        break;
                    }

                    indices.push([
                        crossing_vertex(
                            field,
                            iso_value,
                            ix,
                            iy,
                            iz,
                            triangle[0],
                            &mut edge_vertices,
                            &mut vertices,
                        ),
                        crossing_vertex(
                            field,
                            iso_value,
                            ix,
                            iy,
                            iz,
                            triangle[1],
                            &mut edge_vertices,
                            &mut vertices,
                        ),
                        crossing_vertex(
                            field,
                            iso_value,
                            ix,
                            iy,
                            iz,
                            triangle[2],
                            &mut edge_vertices,
                            &mut vertices,
                        ),
                    ]);
                }
            }
        }
    }

    (vertices, indices)
}

/// Returns the output vertex where the surface crosses a cell edge, creating
/// it if no neighbor cell emitted it already.
fn crossing_vertex(
    field: &ScalarField,
    iso_value: Real,
    ix: usize,
    iy: usize,
    iz: usize,
    edge: u8,
    edge_vertices: &mut HashMap<(usize, usize, usize, u8), u32>,
    vertices: &mut Vec<Point<Real>>,
) -> u32 {
    let (offset, axis) = CELL_EDGES[edge as usize];
    let key = (ix + offset[0], iy + offset[1], iz + offset[2], axis);

    if let Some(id) = edge_vertices.get(&key) {
        return *id;
    }

    let mut end = [key.0, key.1, key.2];
    end[axis as usize] += 1;

    let pa = field.position(key.0, key.1, key.2);
    let pb = field.position(end[0], end[1], end[2]);
    let va = field.get(key.0, key.1, key.2);
    let vb = field.get(end[0], end[1], end[2]);

    // The crossing is always interpolated from the lower lattice endpoint so
    // that every cell sharing this edge produces the exact same vertex.
    let t = ((iso_value - va) / (vb - va)).clamp(0.0, 1.0);
    let id = vertices.len() as u32;
    vertices.push(pa + (pb - pa) * t);
    let _ = edge_vertices.insert(key, id);
    id
}

// Corner k of a cell, as an offset from its lowest lattice corner. Corners
// 0-3 wind around the bottom face, corners 4-7 around the top face.
const CELL_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

// Lattice edge supporting each of the 12 cell edges: offset of its lower
// lattice endpoint and axis towards its upper endpoint.
const CELL_EDGES: [([usize; 3], u8); 12] = [
    ([0, 0, 0], 0),
    ([1, 0, 0], 1),
    ([0, 1, 0], 0),
    ([0, 0, 0], 1),
    ([0, 0, 1], 0),
    ([1, 0, 1], 1),
    ([0, 1, 1], 0),
    ([0, 0, 1], 1),
    ([0, 0, 0], 2),
    ([1, 0, 0], 2),
    ([1, 1, 0], 2),
    ([0, 1, 0], 2),
];

const NO_TRIANGLE: [u8; 3] = [u8::MAX; 3];

/// Triangulations of the 256 sign configurations of a cell.
///
/// Rows are indexed by the cell configuration, with bit `k` set when corner
/// `k` samples below the iso-value. Entries are triangles given as triples of
/// cell edge ids, padded with [`NO_TRIANGLE`].
#[rustfmt::skip]
static TRIANGLE_TABLE: [[[u8; 3]; 5]; 256] = [
    [NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 3], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 1, 9], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 8, 3], [9, 8, 1], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 10], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 3], [1, 2, 10], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[9, 2, 10], [0, 2, 9], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[2, 8, 3], [2, 10, 8], [10, 9, 8], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 11, 2], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 11, 2], [8, 11, 0], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 9, 0], [2, 3, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 11, 2], [1, 9, 11], [9, 8, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 10, 1], [11, 10, 3], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 10, 1], [0, 8, 10], [8, 11, 10], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 9, 0], [3, 11, 9], [11, 10, 9], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 8, 10], [10, 8, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 7, 8], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 3, 0], [7, 3, 4], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 1, 9], [8, 4, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 1, 9], [4, 7, 1], [7, 3, 1], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 10], [8, 4, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[3, 4, 7], [3, 0, 4], [1, 2, 10], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 2, 10], [9, 0, 2], [8, 4, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[2, 10, 9], [2, 9, 7], [2, 7, 3], [7, 9, 4], NO_TRIANGLE],
    [[8, 4, 7], [3, 11, 2], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[11, 4, 7], [11, 2, 4], [2, 0, 4], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 0, 1], [8, 4, 7], [2, 3, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[4, 7, 11], [9, 4, 11], [9, 11, 2], [9, 2, 1], NO_TRIANGLE],
    [[3, 10, 1], [3, 11, 10], [7, 8, 4], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 11, 10], [1, 4, 11], [1, 0, 4], [7, 11, 4], NO_TRIANGLE],
    [[4, 7, 8], [9, 0, 11], [9, 11, 10], [11, 0, 3], NO_TRIANGLE],
    [[4, 7, 11], [4, 11, 9], [9, 11, 10], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 5, 4], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[9, 5, 4], [0, 8, 3], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 5, 4], [1, 5, 0], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[8, 5, 4], [8, 3, 5], [3, 1, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 10], [9, 5, 4], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[3, 0, 8], [1, 2, 10], [4, 9, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 2, 10], [5, 4, 2], [4, 0, 2], NO_TRIANGLE, NO_TRIANGLE],
    [[2, 10, 5], [3, 2, 5], [3, 5, 4], [3, 4, 8], NO_TRIANGLE],
    [[9, 5, 4], [2, 3, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 11, 2], [0, 8, 11], [4, 9, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 5, 4], [0, 1, 5], [2, 3, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[2, 1, 5], [2, 5, 8], [2, 8, 11], [4, 8, 5], NO_TRIANGLE],
    [[10, 3, 11], [10, 1, 3], [9, 5, 4], NO_TRIANGLE, NO_TRIANGLE],
    [[4, 9, 5], [0, 8, 1], [8, 10, 1], [8, 11, 10], NO_TRIANGLE],
    [[5, 4, 0], [5, 0, 11], [5, 11, 10], [11, 0, 3], NO_TRIANGLE],
    [[5, 4, 8], [5, 8, 10], [10, 8, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 7, 8], [5, 7, 9], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[9, 3, 0], [9, 5, 3], [5, 7, 3], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 7, 8], [0, 1, 7], [1, 5, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 5, 3], [3, 5, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[9, 7, 8], [9, 5, 7], [10, 1, 2], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 1, 2], [9, 5, 0], [5, 3, 0], [5, 7, 3], NO_TRIANGLE],
    [[8, 0, 2], [8, 2, 5], [8, 5, 7], [10, 5, 2], NO_TRIANGLE],
    [[2, 10, 5], [2, 5, 3], [3, 5, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[7, 9, 5], [7, 8, 9], [3, 11, 2], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 5, 7], [9, 7, 2], [9, 2, 0], [2, 7, 11], NO_TRIANGLE],
    [[2, 3, 11], [0, 1, 8], [1, 7, 8], [1, 5, 7], NO_TRIANGLE],
    [[11, 2, 1], [11, 1, 7], [7, 1, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 5, 8], [8, 5, 7], [10, 1, 3], [10, 3, 11], NO_TRIANGLE],
    [[5, 7, 0], [5, 0, 9], [7, 11, 0], [1, 0, 10], [11, 10, 0]],
    [[11, 10, 0], [11, 0, 3], [10, 5, 0], [8, 0, 7], [5, 7, 0]],
    [[11, 10, 5], [7, 11, 5], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[10, 6, 5], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 3], [5, 10, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[9, 0, 1], [5, 10, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 8, 3], [1, 9, 8], [5, 10, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 6, 5], [2, 6, 1], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 6, 5], [1, 2, 6], [3, 0, 8], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 6, 5], [9, 0, 6], [0, 2, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 9, 8], [5, 8, 2], [5, 2, 6], [3, 2, 8], NO_TRIANGLE],
    [[2, 3, 11], [10, 6, 5], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[11, 0, 8], [11, 2, 0], [10, 6, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 1, 9], [2, 3, 11], [5, 10, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 10, 6], [1, 9, 2], [9, 11, 2], [9, 8, 11], NO_TRIANGLE],
    [[6, 3, 11], [6, 5, 3], [5, 1, 3], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 11], [0, 11, 5], [0, 5, 1], [5, 11, 6], NO_TRIANGLE],
    [[3, 11, 6], [0, 3, 6], [0, 6, 5], [0, 5, 9], NO_TRIANGLE],
    [[6, 5, 9], [6, 9, 11], [11, 9, 8], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 10, 6], [4, 7, 8], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 3, 0], [4, 7, 3], [6, 5, 10], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 9, 0], [5, 10, 6], [8, 4, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 6, 5], [1, 9, 7], [1, 7, 3], [7, 9, 4], NO_TRIANGLE],
    [[6, 1, 2], [6, 5, 1], [4, 7, 8], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 5], [5, 2, 6], [3, 0, 4], [3, 4, 7], NO_TRIANGLE],
    [[8, 4, 7], [9, 0, 5], [0, 6, 5], [0, 2, 6], NO_TRIANGLE],
    [[7, 3, 9], [7, 9, 4], [3, 2, 9], [5, 9, 6], [2, 6, 9]],
    [[3, 11, 2], [7, 8, 4], [10, 6, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 10, 6], [4, 7, 2], [4, 2, 0], [2, 7, 11], NO_TRIANGLE],
    [[0, 1, 9], [4, 7, 8], [2, 3, 11], [5, 10, 6], NO_TRIANGLE],
    [[9, 2, 1], [9, 11, 2], [9, 4, 11], [7, 11, 4], [5, 10, 6]],
    [[8, 4, 7], [3, 11, 5], [3, 5, 1], [5, 11, 6], NO_TRIANGLE],
    [[5, 1, 11], [5, 11, 6], [1, 0, 11], [7, 11, 4], [0, 4, 11]],
    [[0, 5, 9], [0, 6, 5], [0, 3, 6], [11, 6, 3], [8, 4, 7]],
    [[6, 5, 9], [6, 9, 11], [4, 7, 9], [7, 11, 9], NO_TRIANGLE],
    [[10, 4, 9], [6, 4, 10], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 10, 6], [4, 9, 10], [0, 8, 3], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 0, 1], [10, 6, 0], [6, 4, 0], NO_TRIANGLE, NO_TRIANGLE],
    [[8, 3, 1], [8, 1, 6], [8, 6, 4], [6, 1, 10], NO_TRIANGLE],
    [[1, 4, 9], [1, 2, 4], [2, 6, 4], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 0, 8], [1, 2, 9], [2, 4, 9], [2, 6, 4], NO_TRIANGLE],
    [[0, 2, 4], [4, 2, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[8, 3, 2], [8, 2, 4], [4, 2, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 4, 9], [10, 6, 4], [11, 2, 3], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 2], [2, 8, 11], [4, 9, 10], [4, 10, 6], NO_TRIANGLE],
    [[3, 11, 2], [0, 1, 6], [0, 6, 4], [6, 1, 10], NO_TRIANGLE],
    [[6, 4, 1], [6, 1, 10], [4, 8, 1], [2, 1, 11], [8, 11, 1]],
    [[9, 6, 4], [9, 3, 6], [9, 1, 3], [11, 6, 3], NO_TRIANGLE],
    [[8, 11, 1], [8, 1, 0], [11, 6, 1], [9, 1, 4], [6, 4, 1]],
    [[3, 11, 6], [3, 6, 0], [0, 6, 4], NO_TRIANGLE, NO_TRIANGLE],
    [[6, 4, 8], [11, 6, 8], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[7, 10, 6], [7, 8, 10], [8, 9, 10], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 7, 3], [0, 10, 7], [0, 9, 10], [6, 7, 10], NO_TRIANGLE],
    [[10, 6, 7], [1, 10, 7], [1, 7, 8], [1, 8, 0], NO_TRIANGLE],
    [[10, 6, 7], [10, 7, 1], [1, 7, 3], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 6], [1, 6, 8], [1, 8, 9], [8, 6, 7], NO_TRIANGLE],
    [[2, 6, 9], [2, 9, 1], [6, 7, 9], [0, 9, 3], [7, 3, 9]],
    [[7, 8, 0], [7, 0, 6], [6, 0, 2], NO_TRIANGLE, NO_TRIANGLE],
    [[7, 3, 2], [6, 7, 2], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[2, 3, 11], [10, 6, 8], [10, 8, 9], [8, 6, 7], NO_TRIANGLE],
    [[2, 0, 7], [2, 7, 11], [0, 9, 7], [6, 7, 10], [9, 10, 7]],
    [[1, 8, 0], [1, 7, 8], [1, 10, 7], [6, 7, 10], [2, 3, 11]],
    [[11, 2, 1], [11, 1, 7], [10, 6, 1], [6, 7, 1], NO_TRIANGLE],
    [[8, 9, 6], [8, 6, 7], [9, 1, 6], [11, 6, 3], [1, 3, 6]],
    [[0, 9, 1], [11, 6, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[7, 8, 0], [7, 0, 6], [3, 11, 0], [11, 6, 0], NO_TRIANGLE],
    [[7, 11, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[7, 6, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[3, 0, 8], [11, 7, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 1, 9], [11, 7, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[8, 1, 9], [8, 3, 1], [11, 7, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 1, 2], [6, 11, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 10], [3, 0, 8], [6, 11, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[2, 9, 0], [2, 10, 9], [6, 11, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[6, 11, 7], [2, 10, 3], [10, 8, 3], [10, 9, 8], NO_TRIANGLE],
    [[7, 2, 3], [6, 2, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[7, 0, 8], [7, 6, 0], [6, 2, 0], NO_TRIANGLE, NO_TRIANGLE],
    [[2, 7, 6], [2, 3, 7], [0, 1, 9], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 6, 2], [1, 8, 6], [1, 9, 8], [8, 7, 6], NO_TRIANGLE],
    [[10, 7, 6], [10, 1, 7], [1, 3, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 7, 6], [1, 7, 10], [1, 8, 7], [1, 0, 8], NO_TRIANGLE],
    [[0, 3, 7], [0, 7, 10], [0, 10, 9], [6, 10, 7], NO_TRIANGLE],
    [[7, 6, 10], [7, 10, 8], [8, 10, 9], NO_TRIANGLE, NO_TRIANGLE],
    [[6, 8, 4], [11, 8, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[3, 6, 11], [3, 0, 6], [0, 4, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[8, 6, 11], [8, 4, 6], [9, 0, 1], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 4, 6], [9, 6, 3], [9, 3, 1], [11, 3, 6], NO_TRIANGLE],
    [[6, 8, 4], [6, 11, 8], [2, 10, 1], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 10], [3, 0, 11], [0, 6, 11], [0, 4, 6], NO_TRIANGLE],
    [[4, 11, 8], [4, 6, 11], [0, 2, 9], [2, 10, 9], NO_TRIANGLE],
    [[10, 9, 3], [10, 3, 2], [9, 4, 3], [11, 3, 6], [4, 6, 3]],
    [[8, 2, 3], [8, 4, 2], [4, 6, 2], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 4, 2], [4, 6, 2], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 9, 0], [2, 3, 4], [2, 4, 6], [4, 3, 8], NO_TRIANGLE],
    [[1, 9, 4], [1, 4, 2], [2, 4, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[8, 1, 3], [8, 6, 1], [8, 4, 6], [6, 10, 1], NO_TRIANGLE],
    [[10, 1, 0], [10, 0, 6], [6, 0, 4], NO_TRIANGLE, NO_TRIANGLE],
    [[4, 6, 3], [4, 3, 8], [6, 10, 3], [0, 3, 9], [10, 9, 3]],
    [[10, 9, 4], [6, 10, 4], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 9, 5], [7, 6, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 3], [4, 9, 5], [11, 7, 6], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 0, 1], [5, 4, 0], [7, 6, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[11, 7, 6], [8, 3, 4], [3, 5, 4], [3, 1, 5], NO_TRIANGLE],
    [[9, 5, 4], [10, 1, 2], [7, 6, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[6, 11, 7], [1, 2, 10], [0, 8, 3], [4, 9, 5], NO_TRIANGLE],
    [[7, 6, 11], [5, 4, 10], [4, 2, 10], [4, 0, 2], NO_TRIANGLE],
    [[3, 4, 8], [3, 5, 4], [3, 2, 5], [10, 5, 2], [11, 7, 6]],
    [[7, 2, 3], [7, 6, 2], [5, 4, 9], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 5, 4], [0, 8, 6], [0, 6, 2], [6, 8, 7], NO_TRIANGLE],
    [[3, 6, 2], [3, 7, 6], [1, 5, 0], [5, 4, 0], NO_TRIANGLE],
    [[6, 2, 8], [6, 8, 7], [2, 1, 8], [4, 8, 5], [1, 5, 8]],
    [[9, 5, 4], [10, 1, 6], [1, 7, 6], [1, 3, 7], NO_TRIANGLE],
    [[1, 6, 10], [1, 7, 6], [1, 0, 7], [8, 7, 0], [9, 5, 4]],
    [[4, 0, 10], [4, 10, 5], [0, 3, 10], [6, 10, 7], [3, 7, 10]],
    [[7, 6, 10], [7, 10, 8], [5, 4, 10], [4, 8, 10], NO_TRIANGLE],
    [[6, 9, 5], [6, 11, 9], [11, 8, 9], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 6, 11], [0, 6, 3], [0, 5, 6], [0, 9, 5], NO_TRIANGLE],
    [[0, 11, 8], [0, 5, 11], [0, 1, 5], [5, 6, 11], NO_TRIANGLE],
    [[6, 11, 3], [6, 3, 5], [5, 3, 1], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 10], [9, 5, 11], [9, 11, 8], [11, 5, 6], NO_TRIANGLE],
    [[0, 11, 3], [0, 6, 11], [0, 9, 6], [5, 6, 9], [1, 2, 10]],
    [[11, 8, 5], [11, 5, 6], [8, 0, 5], [10, 5, 2], [0, 2, 5]],
    [[6, 11, 3], [6, 3, 5], [2, 10, 3], [10, 5, 3], NO_TRIANGLE],
    [[5, 8, 9], [5, 2, 8], [5, 6, 2], [3, 8, 2], NO_TRIANGLE],
    [[9, 5, 6], [9, 6, 0], [0, 6, 2], NO_TRIANGLE, NO_TRIANGLE],
    [[1, 5, 8], [1, 8, 0], [5, 6, 8], [3, 8, 2], [6, 2, 8]],
    [[1, 5, 6], [2, 1, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 3, 6], [1, 6, 10], [3, 8, 6], [5, 6, 9], [8, 9, 6]],
    [[10, 1, 0], [10, 0, 6], [9, 5, 0], [5, 6, 0], NO_TRIANGLE],
    [[0, 3, 8], [5, 6, 10], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[10, 5, 6], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[11, 5, 10], [7, 5, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[11, 5, 10], [11, 7, 5], [8, 3, 0], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 11, 7], [5, 10, 11], [1, 9, 0], NO_TRIANGLE, NO_TRIANGLE],
    [[10, 7, 5], [10, 11, 7], [9, 8, 1], [8, 3, 1], NO_TRIANGLE],
    [[11, 1, 2], [11, 7, 1], [7, 5, 1], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 3], [1, 2, 7], [1, 7, 5], [7, 2, 11], NO_TRIANGLE],
    [[9, 7, 5], [9, 2, 7], [9, 0, 2], [2, 11, 7], NO_TRIANGLE],
    [[7, 5, 2], [7, 2, 11], [5, 9, 2], [3, 2, 8], [9, 8, 2]],
    [[2, 5, 10], [2, 3, 5], [3, 7, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[8, 2, 0], [8, 5, 2], [8, 7, 5], [10, 2, 5], NO_TRIANGLE],
    [[9, 0, 1], [5, 10, 3], [5, 3, 7], [3, 10, 2], NO_TRIANGLE],
    [[9, 8, 2], [9, 2, 1], [8, 7, 2], [10, 2, 5], [7, 5, 2]],
    [[1, 3, 5], [3, 7, 5], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 7], [0, 7, 1], [1, 7, 5], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 0, 3], [9, 3, 5], [5, 3, 7], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 8, 7], [5, 9, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[5, 8, 4], [5, 10, 8], [10, 11, 8], NO_TRIANGLE, NO_TRIANGLE],
    [[5, 0, 4], [5, 11, 0], [5, 10, 11], [11, 3, 0], NO_TRIANGLE],
    [[0, 1, 9], [8, 4, 10], [8, 10, 11], [10, 4, 5], NO_TRIANGLE],
    [[10, 11, 4], [10, 4, 5], [11, 3, 4], [9, 4, 1], [3, 1, 4]],
    [[2, 5, 1], [2, 8, 5], [2, 11, 8], [4, 5, 8], NO_TRIANGLE],
    [[0, 4, 11], [0, 11, 3], [4, 5, 11], [2, 11, 1], [5, 1, 11]],
    [[0, 2, 5], [0, 5, 9], [2, 11, 5], [4, 5, 8], [11, 8, 5]],
    [[9, 4, 5], [2, 11, 3], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[2, 5, 10], [3, 5, 2], [3, 4, 5], [3, 8, 4], NO_TRIANGLE],
    [[5, 10, 2], [5, 2, 4], [4, 2, 0], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 10, 2], [3, 5, 10], [3, 8, 5], [4, 5, 8], [0, 1, 9]],
    [[5, 10, 2], [5, 2, 4], [1, 9, 2], [9, 4, 2], NO_TRIANGLE],
    [[8, 4, 5], [8, 5, 3], [3, 5, 1], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 4, 5], [1, 0, 5], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[8, 4, 5], [8, 5, 3], [9, 0, 5], [0, 3, 5], NO_TRIANGLE],
    [[9, 4, 5], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 11, 7], [4, 9, 11], [9, 10, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 8, 3], [4, 9, 7], [9, 11, 7], [9, 10, 11], NO_TRIANGLE],
    [[1, 10, 11], [1, 11, 4], [1, 4, 0], [7, 4, 11], NO_TRIANGLE],
    [[3, 1, 4], [3, 4, 8], [1, 10, 4], [7, 4, 11], [10, 11, 4]],
    [[4, 11, 7], [9, 11, 4], [9, 2, 11], [9, 1, 2], NO_TRIANGLE],
    [[9, 7, 4], [9, 11, 7], [9, 1, 11], [2, 11, 1], [0, 8, 3]],
    [[11, 7, 4], [11, 4, 2], [2, 4, 0], NO_TRIANGLE, NO_TRIANGLE],
    [[11, 7, 4], [11, 4, 2], [8, 3, 4], [3, 2, 4], NO_TRIANGLE],
    [[2, 9, 10], [2, 7, 9], [2, 3, 7], [7, 4, 9], NO_TRIANGLE],
    [[9, 10, 7], [9, 7, 4], [10, 2, 7], [8, 7, 0], [2, 0, 7]],
    [[3, 7, 10], [3, 10, 2], [7, 4, 10], [1, 10, 0], [4, 0, 10]],
    [[1, 10, 2], [8, 7, 4], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 9, 1], [4, 1, 7], [7, 1, 3], NO_TRIANGLE, NO_TRIANGLE],
    [[4, 9, 1], [4, 1, 7], [0, 8, 1], [8, 7, 1], NO_TRIANGLE],
    [[4, 0, 3], [7, 4, 3], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[4, 8, 7], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[9, 10, 8], [10, 11, 8], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[3, 0, 9], [3, 9, 11], [11, 9, 10], NO_TRIANGLE, NO_TRIANGLE],
    [[0, 1, 10], [0, 10, 8], [8, 10, 11], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 1, 10], [11, 3, 10], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 2, 11], [1, 11, 9], [9, 11, 8], NO_TRIANGLE, NO_TRIANGLE],
    [[3, 0, 9], [3, 9, 11], [1, 2, 9], [2, 11, 9], NO_TRIANGLE],
    [[0, 2, 11], [8, 0, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[3, 2, 11], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[2, 3, 8], [2, 8, 10], [10, 8, 9], NO_TRIANGLE, NO_TRIANGLE],
    [[9, 10, 2], [0, 9, 2], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[2, 3, 8], [2, 8, 10], [0, 1, 8], [1, 10, 8], NO_TRIANGLE],
    [[1, 10, 2], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[1, 3, 8], [9, 1, 8], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 9, 1], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [[0, 3, 8], NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
    [NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE, NO_TRIANGLE],
];
