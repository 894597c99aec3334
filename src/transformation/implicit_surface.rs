//! Implicit surface fit of an unorganized point cloud.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{SurfaceMesh, SurfaceMeshError};
use crate::transformation::{march_scalar_field, ScalarField};
use crate::utils;
use hashbrown::HashSet;
use kiddo::{KdTree, SquaredEuclidean};
use na::Matrix3;
use std::collections::VecDeque;

/// Parameters controlling the implicit surface fit of a point cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImplicitSurfaceParams {
    /// Number of neighbors used to fit the tangent plane of each point.
    ///
    /// This is clamped to `[3, number of distinct input points]`. Larger
    /// neighborhoods smooth out noise but wash out small features.
    pub neighborhood_size: usize,
    /// Spacing of the sampling lattice, in the same units as the input points.
    ///
    /// Smaller spacings follow the cloud more closely and produce more
    /// triangles. Must be positive and finite.
    pub sample_spacing: Real,
}

impl Default for ImplicitSurfaceParams {
    fn default() -> Self {
        Self {
            neighborhood_size: 20,
            sample_spacing: 80.0,
        }
    }
}

/// Error indicating that no implicit surface could be fitted to a point cloud.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ImplicitSurfaceError {
    /// Fewer than four distinct, finite points were given.
    #[error("fitting an implicit surface requires at least four distinct points.")]
    NotEnoughPoints,
    /// The requested sampling spacing is zero, negative, or not finite.
    #[error("the sampling spacing must be positive and finite.")]
    InvalidSampleSpacing,
    /// The sampled field has no zero crossing, so there is no surface to extract.
    #[error("the sampled signed-distance field has no zero crossing.")]
    EmptySurface,
    /// The contoured zero set could not be assembled into a surface mesh.
    #[error("SurfaceMeshError: {0}")]
    SurfaceMeshError(SurfaceMeshError),
}

impl From<SurfaceMeshError> for ImplicitSurfaceError {
    fn from(value: SurfaceMeshError) -> Self {
        ImplicitSurfaceError::SurfaceMeshError(value)
    }
}

/// Fits a smooth, closed surface to an unorganized point cloud.
///
/// Every point gets a tangent plane least-squares fitted to its
/// `params.neighborhood_size` nearest neighbors, with plane normals oriented
/// consistently by propagation along the neighbor graph. The signed distance
/// to the nearest tangent plane is then sampled on a lattice of
/// `params.sample_spacing` and its zero set is contoured and wound outwards.
///
/// The cloud must sample a closed surface densely relative to
/// `params.sample_spacing`, otherwise the zero set may be clipped by the
/// sampling lattice and the result will not be closed. Non-finite points and
/// exact duplicates are ignored.
pub fn implicit_surface(
    points: &[Point<Real>],
    params: &ImplicitSurfaceParams,
) -> Result<SurfaceMesh, ImplicitSurfaceError> {
    if !params.sample_spacing.is_finite() || params.sample_spacing <= 0.0 {
        return Err(ImplicitSurfaceError::InvalidSampleSpacing);
    }

    let mut seen = HashSet::new();
    let mut cloud = Vec::with_capacity(points.len());

    for pt in points {
        if !(pt.x.is_finite() && pt.y.is_finite() && pt.z.is_finite()) {
            continue;
        }

        if seen.insert([pt.x.to_bits(), pt.y.to_bits(), pt.z.to_bits()]) {
            cloud.push(*pt);
        }
    }

    if cloud.len() < 4 {
        return Err(ImplicitSurfaceError::NotEnoughPoints);
    }

    let mut tree: KdTree<Real, 3> = KdTree::new();

    for (id, pt) in cloud.iter().enumerate() {
        tree.add(&[pt.x, pt.y, pt.z], id as u64);
    }

    // Local tangent plane of every point. The query point itself is part of
    // its own neighborhood since it is stored in the tree.
    let k = params.neighborhood_size.clamp(3, cloud.len());
    let mut centers = Vec::with_capacity(cloud.len());
    let mut normals = Vec::with_capacity(cloud.len());
    let mut neighbors = Vec::with_capacity(cloud.len());

    for pt in &cloud {
        let nearest = tree.nearest_n::<SquaredEuclidean>(&[pt.x, pt.y, pt.z], k);
        let ids: Vec<usize> = nearest.iter().map(|n| n.item as usize).collect();
        let ring: Vec<Point<Real>> = ids.iter().map(|id| cloud[*id]).collect();
        let (center, cov) = utils::center_cov(&ring);

        centers.push(center);
        normals.push(smallest_eigenvector(&cov));
        neighbors.push(ids);
    }

    orient_normals(&cloud, &neighbors, &mut normals);

    // Signed distance to the nearest tangent plane (Hoppe's estimate).
    let mut center_tree: KdTree<Real, 3> = KdTree::new();

    for (id, center) in centers.iter().enumerate() {
        center_tree.add(&[center.x, center.y, center.z], id as u64);
    }

    let spacing = params.sample_spacing;
    let aabb = Aabb::from_points(cloud.iter().copied());
    // Two extra cell layers on every side so the zero set can close before
    // reaching the lattice boundary.
    let pad = 2.0 * spacing;
    let origin = aabb.mins - Vector::repeat(pad);
    let extent = aabb.maxs - aabb.mins + Vector::repeat(2.0 * pad);
    let dimensions = [
        (extent.x / spacing).ceil() as usize + 1,
        (extent.y / spacing).ceil() as usize + 1,
        (extent.z / spacing).ceil() as usize + 1,
    ];

    let mut field = ScalarField::new(dimensions, origin, spacing);
    field.fill(|pt| {
        let nearest = center_tree.nearest_one::<SquaredEuclidean>(&[pt.x, pt.y, pt.z]);
        let id = nearest.item as usize;
        (pt - centers[id]).dot(&normals[id])
    });

    let (vertices, indices) = march_scalar_field(&field, 0.0);

    if indices.is_empty() {
        return Err(ImplicitSurfaceError::EmptySurface);
    }

    let mut mesh = SurfaceMesh::new(vertices, indices)?;

    // The contour winds towards the negative side of the field. Rewind it so
    // that the enclosed volume comes out positive.
    if mesh.signed_volume() < 0.0 {
        mesh.reverse();
    }

    Ok(mesh)
}

fn smallest_eigenvector(cov: &Matrix3<Real>) -> Vector<Real> {
    let eig = cov.symmetric_eigen();
    let mut imin = 0;

    for i in 1..3 {
        if eig.eigenvalues[i] < eig.eigenvalues[imin] {
            imin = i;
        }
    }

    eig.eigenvectors.column(imin).into_owned()
}

/// Flips tangent plane normals so neighbor planes face the same way.
///
/// Orientation spreads breadth-first along the neighbor graph, starting at
/// the highest point of each connected component with its normal facing up.
fn orient_normals(
    cloud: &[Point<Real>],
    neighbors: &[Vec<usize>],
    normals: &mut [Vector<Real>],
) {
    let seed = cloud
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.z.partial_cmp(&b.z).unwrap_or(core::cmp::Ordering::Equal))
        .map(|(id, _)| id)
        .unwrap_or(0);

    let mut visited = vec![false; cloud.len()];
    let mut queue = VecDeque::new();

    for start in core::iter::once(seed).chain(0..cloud.len()) {
        if visited[start] {
            continue;
        }

        if normals[start].z < 0.0 {
            normals[start] = -normals[start];
        }

        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let current_normal = normals[current];

            for neighbor in &neighbors[current] {
                if !visited[*neighbor] {
                    visited[*neighbor] = true;

                    if normals[*neighbor].dot(&current_normal) < 0.0 {
                        normals[*neighbor] = -normals[*neighbor];
                    }

                    queue.push_back(*neighbor);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{implicit_surface, ImplicitSurfaceError, ImplicitSurfaceParams};
    use crate::math::{Point, Real};

    fn sphere_cloud(rows: usize, radius: Real) -> Vec<Point<Real>> {
        let pi = core::f64::consts::PI as Real;
        let mut cloud = Vec::new();

        for i in 0..rows {
            let theta = pi * i as Real / (rows - 1) as Real;
            for j in 0..rows {
                let phi = 2.0 * pi * j as Real / rows as Real;
                cloud.push(Point::new(
                    radius * theta.sin() * phi.cos(),
                    radius * theta.sin() * phi.sin(),
                    radius * theta.cos(),
                ));
            }
        }

        cloud
    }

    #[test]
    fn sphere_cloud_yields_a_closed_outward_surface() {
        let cloud = sphere_cloud(12, 1.0);
        let params = ImplicitSurfaceParams {
            neighborhood_size: 20,
            sample_spacing: 0.25,
        };

        let mesh = implicit_surface(&cloud, &params).unwrap();

        assert!(mesh.is_closed());

        let volume = mesh.signed_volume();
        let ball = 4.0 / 3.0 * (core::f64::consts::PI as Real);
        assert!(volume > 0.0);
        assert!((volume - ball).abs() < 0.3 * ball);
    }

    #[test]
    fn duplicated_points_do_not_count_twice() {
        let mut cloud = sphere_cloud(12, 1.0);
        cloud.extend_from_within(..);

        let params = ImplicitSurfaceParams {
            neighborhood_size: 20,
            sample_spacing: 0.25,
        };

        let mesh = implicit_surface(&cloud, &params).unwrap();
        assert!(mesh.is_closed());
    }

    #[test]
    fn few_points_are_rejected() {
        let cloud = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];

        assert_eq!(
            implicit_surface(&cloud, &ImplicitSurfaceParams::default()).unwrap_err(),
            ImplicitSurfaceError::NotEnoughPoints
        );
    }

    #[test]
    fn non_positive_spacing_is_rejected() {
        let cloud = sphere_cloud(6, 1.0);
        let params = ImplicitSurfaceParams {
            neighborhood_size: 20,
            sample_spacing: 0.0,
        };

        assert_eq!(
            implicit_surface(&cloud, &params).unwrap_err(),
            ImplicitSurfaceError::InvalidSampleSpacing
        );
    }
}
