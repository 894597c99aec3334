use crate::math::Real;
use crate::rasterization::GridExtent;
use crate::shape::SurfaceMesh;
use smallvec::SmallVec;

/// Binary occupancy stencil of a closed surface over a voxel extent.
///
/// The stencil is filled by scan-line rasterization: the surface is sectioned
/// by the plane of every Z slice, each section is crossed with every Y row,
/// and runs of voxels between consecutive X crossings are marked inside by
/// even-odd parity.
pub struct ImageStencil {
    extent: GridExtent,
    inside: Vec<bool>,
}

impl ImageStencil {
    /// Rasterizes `surface`, given in voxel index space, over `extent`.
    ///
    /// Voxel centers sit on integer coordinates. Classifications are
    /// half-open (a vertex exactly on a section plane counts as below it), so
    /// a closed surface fills the half-open voxel range it covers and
    /// touching surfaces never double-count crossings.
    pub fn from_surface(surface: &SurfaceMesh, extent: GridExtent) -> Self {
        let mut stencil = ImageStencil {
            extent,
            inside: vec![false; extent.num_voxels()],
        };

        for iz in extent.mins[2]..=extent.maxs[2] {
            let sections = slice_sections(surface, iz as Real);

            if sections.is_empty() {
                continue;
            }

            for iy in extent.mins[1]..=extent.maxs[1] {
                let y = iy as Real;
                let mut crossings: SmallVec<[Real; 8]> = SmallVec::new();

                for &[p, q] in &sections {
                    if (p.y > y) != (q.y > y) {
                        let t = (y - p.y) / (q.y - p.y);
                        crossings.push(p.x + t * (q.x - p.x));
                    }
                }

                if crossings.is_empty() {
                    continue;
                }

                crossings.sort_unstable_by(|a, b| {
                    a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal)
                });

                if crossings.len() % 2 != 0 {
                    // A row grazing the surface can produce an odd crossing
                    // count; skip it rather than guessing the parity.
                    log::debug!(
                        "dropping stencil row y = {iy}, z = {iz} with {} crossings",
                        crossings.len()
                    );
                    continue;
                }

                for pair in crossings.chunks_exact(2) {
                    stencil.fill_row(iy, iz, pair[0], pair[1]);
                }
            }
        }

        stencil
    }

    /// The extent this stencil covers.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Whether the voxel `ijk` lies inside the stencil.
    pub fn contains(&self, ijk: [i32; 3]) -> bool {
        self.extent
            .linear_index(ijk)
            .map_or(false, |id| self.inside[id])
    }

    /// The number of voxels inside the stencil.
    pub fn count_inside(&self) -> usize {
        self.inside.iter().filter(|inside| **inside).count()
    }

    // Marks the integer positions of the half-open run `[x_enter, x_exit)`.
    fn fill_row(&mut self, iy: i32, iz: i32, x_enter: Real, x_exit: Real) {
        let first = (x_enter.ceil() as i32).max(self.extent.mins[0]);
        let last = (x_exit.ceil() as i32 - 1).min(self.extent.maxs[0]);

        for ix in first..=last {
            if let Some(id) = self.extent.linear_index([ix, iy, iz]) {
                self.inside[id] = true;
            }
        }
    }
}

/// Segments where `surface` crosses the plane `z = z_plane`.
///
/// Each triangle with vertices on both sides of the plane contributes one
/// segment; for a closed surface the segments chain into closed loops.
fn slice_sections(surface: &SurfaceMesh, z_plane: Real) -> Vec<[na::Point2<Real>; 2]> {
    let mut sections = Vec::new();

    for triangle in surface.triangles() {
        let [a, b, c] = triangle.vertices();
        let mut ends: SmallVec<[na::Point2<Real>; 2]> = SmallVec::new();

        for (p, q) in [(a, b), (b, c), (c, a)] {
            if (p.z > z_plane) != (q.z > z_plane) {
                let t = (z_plane - p.z) / (q.z - p.z);
                ends.push(na::Point2::new(
                    p.x + t * (q.x - p.x),
                    p.y + t * (q.y - p.y),
                ));
            }
        }

        if ends.len() == 2 {
            sections.push([ends[0], ends[1]]);
        }
    }

    sections
}
