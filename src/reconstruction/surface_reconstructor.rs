use crate::math::{Point, Real};
use crate::shape::SurfaceMesh;
use crate::transformation::{self, ImplicitSurfaceParams};

/// Largest relative change of enclosed volume the smoothing stage may introduce.
const MAX_VOLUME_DRIFT: Real = 0.1;

/// Stencil tensions tried in order until the smoothed volume stays within
/// [`MAX_VOLUME_DRIFT`]. The zero rung is midpoint refinement and never drifts.
const TENSION_LADDER: [Real; 5] = [1.0, 0.5, 0.25, 0.125, 0.0];

/// Selects how a [`SurfaceReconstructor`] turns a point set into a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReconstructionMethod {
    /// Boundary of the Delaunay tetrahedralization of the points, i.e. their
    /// convex hull, smoothed by interpolating subdivision passes.
    ///
    /// Tolerates very small point sets (four points and upwards) and always
    /// encloses every input point, at the cost of only producing convex
    /// surfaces.
    Delaunay {
        /// Number of butterfly subdivision passes applied to the hull.
        smoothing_passes: u32,
    },
    /// Implicit signed-distance fit of the points, contoured at zero.
    ///
    /// Captures concave shapes, but needs at least ten points sampling a
    /// closed surface densely relative to the sampling spacing.
    Implicit {
        /// Tangent-plane fit and sampling parameters.
        params: ImplicitSurfaceParams,
    },
}

impl Default for ReconstructionMethod {
    fn default() -> Self {
        ReconstructionMethod::Delaunay {
            smoothing_passes: 3,
        }
    }
}

/// Builds closed, smoothed, outward-oriented surfaces from fiducial points.
///
/// Reconstruction is deterministic and cheap enough to re-run on every point
/// mutation; callers keep the last successful surface around for preview
/// reuse, no caching happens here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceReconstructor {
    /// The reconstruction path used by [`SurfaceReconstructor::reconstruct`].
    pub method: ReconstructionMethod,
}

impl SurfaceReconstructor {
    /// A reconstructor using the given method.
    pub fn new(method: ReconstructionMethod) -> Self {
        Self { method }
    }

    /// Builds a closed surface enclosing `points`.
    ///
    /// Returns `None` when there are not enough points for the configured
    /// method (fewer than 3 for [`ReconstructionMethod::Delaunay`], fewer
    /// than 10 for [`ReconstructionMethod::Implicit`]) or when the points are
    /// too degenerate to enclose any volume (all coincident, collinear, or
    /// coplanar). Degeneracies never escalate to a panic or an error.
    pub fn reconstruct(&self, points: &[Point<Real>]) -> Option<SurfaceMesh> {
        let mesh = match self.method {
            ReconstructionMethod::Delaunay { smoothing_passes } => {
                reconstruct_delaunay(points, smoothing_passes)?
            }
            ReconstructionMethod::Implicit { params } => {
                if points.len() < 10 {
                    return None;
                }

                match transformation::implicit_surface(points, &params) {
                    Ok(mesh) => mesh,
                    Err(err) => {
                        log::debug!("implicit reconstruction failed: {err}");
                        return None;
                    }
                }
            }
        };

        // Only closed surfaces with an actual interior can be rasterized
        // sensibly downstream.
        (mesh.is_closed() && mesh.signed_volume() > 0.0).then_some(mesh)
    }
}

fn reconstruct_delaunay(points: &[Point<Real>], smoothing_passes: u32) -> Option<SurfaceMesh> {
    if points.len() < 3 {
        return None;
    }

    let (vertices, indices) = match transformation::try_convex_hull(points) {
        Ok(hull) => hull,
        Err(err) => {
            log::debug!("hull reconstruction failed: {err}");
            return None;
        }
    };

    let hull = match SurfaceMesh::new(vertices, indices) {
        Ok(hull) => hull,
        Err(err) => {
            log::debug!("hull reconstruction failed: {err}");
            return None;
        }
    };

    if smoothing_passes == 0 {
        return Some(hull);
    }

    let hull_volume = hull.signed_volume();

    // The interpolating stencil bulges sharp, sparse hulls well past the
    // volume their points outline. Relax the tension until the smoothed
    // volume stays within the drift budget.
    for tension in TENSION_LADDER {
        let smoothed =
            match transformation::butterfly_subdivide_with_tension(&hull, smoothing_passes, tension)
            {
                Ok(smoothed) => smoothed,
                Err(err) => {
                    // The coarse hull is still a valid enclosure of the points.
                    log::debug!("hull smoothing failed, keeping the coarse hull: {err}");
                    return Some(hull);
                }
            };

        if (smoothed.signed_volume() - hull_volume).abs() <= MAX_VOLUME_DRIFT * hull_volume {
            if tension < 1.0 {
                log::debug!("smoothing damped to tension {tension} to hold the enclosed volume");
            }

            return Some(smoothed);
        }
    }

    Some(hull)
}

#[cfg(test)]
mod test {
    use super::{ReconstructionMethod, SurfaceReconstructor};
    use crate::math::{Point, Real};
    use crate::transformation::ImplicitSurfaceParams;

    fn tetrahedron_corners() -> Vec<Point<Real>> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ]
    }

    fn octahedron_corners() -> Vec<Point<Real>> {
        vec![
            Point::new(1.0, 0.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.0, 0.0, -1.0),
        ]
    }

    #[test]
    fn fewer_than_three_points_give_no_surface() {
        let reconstructor = SurfaceReconstructor::default();
        let points = tetrahedron_corners();

        assert!(reconstructor.reconstruct(&[]).is_none());
        assert!(reconstructor.reconstruct(&points[..1]).is_none());
        assert!(reconstructor.reconstruct(&points[..2]).is_none());
    }

    #[test]
    fn degenerate_points_give_no_surface() {
        let reconstructor = SurfaceReconstructor::default();

        let coplanar: Vec<_> = (0..8)
            .map(|i| Point::new(i as Real, (i * i) as Real, 0.0))
            .collect();
        assert!(reconstructor.reconstruct(&coplanar).is_none());

        let coincident = vec![Point::new(1.0, 2.0, 3.0); 5];
        assert!(reconstructor.reconstruct(&coincident).is_none());
    }

    #[test]
    fn four_points_give_a_closed_surface_through_them() {
        let points = tetrahedron_corners();
        let reconstructor = SurfaceReconstructor::default();
        let mesh = reconstructor.reconstruct(&points).unwrap();

        assert!(mesh.is_closed());
        assert!(mesh.vertices().len() >= 4);

        // Subdivision interpolates, so every input point stays on the surface.
        for pt in &points {
            let on_surface = mesh
                .vertices()
                .iter()
                .any(|vtx| na::distance(vtx, pt) < 1.0e-4);
            assert!(on_surface, "input point {pt} not found on the surface");
        }
    }

    #[test]
    fn reconstruction_is_deterministic() {
        let points = octahedron_corners();
        let reconstructor = SurfaceReconstructor::default();

        let first = reconstructor.reconstruct(&points).unwrap();
        let second = reconstructor.reconstruct(&points).unwrap();

        assert_eq!(first.vertices().len(), second.vertices().len());
        assert_relative_eq!(
            first.signed_volume(),
            second.signed_volume(),
            epsilon = 1.0e-7
        );
    }

    #[test]
    fn smoothing_keeps_the_octahedron_volume_within_ten_percent() {
        let points = octahedron_corners();

        let coarse = SurfaceReconstructor::new(ReconstructionMethod::Delaunay {
            smoothing_passes: 0,
        })
        .reconstruct(&points)
        .unwrap();
        let smoothed = SurfaceReconstructor::default().reconstruct(&points).unwrap();

        let coarse_volume = coarse.signed_volume();
        let smoothed_volume = smoothed.signed_volume();

        assert_relative_eq!(coarse_volume, 4.0 / 3.0, epsilon = 1.0e-5);
        assert!(smoothed_volume > 0.0);
        assert!((smoothed_volume - coarse_volume).abs() < 0.1 * coarse_volume);
    }

    #[test]
    fn implicit_path_needs_ten_points() {
        let reconstructor = SurfaceReconstructor::new(ReconstructionMethod::Implicit {
            params: ImplicitSurfaceParams {
                neighborhood_size: 20,
                sample_spacing: 0.25,
            },
        });

        // Nine well-spread points are still below the implicit path's gate.
        let points: Vec<_> = (0..9)
            .map(|i| {
                let angle = i as Real;
                Point::new(angle.cos(), angle.sin(), (i % 3) as Real - 1.0)
            })
            .collect();

        assert!(reconstructor.reconstruct(&points).is_none());
    }

    #[test]
    fn implicit_path_reconstructs_a_dense_sphere_cloud() {
        let pi = core::f64::consts::PI as Real;
        let mut points = Vec::new();

        for i in 0..12 {
            let theta = pi * i as Real / 11.0;
            for j in 0..12 {
                let phi = 2.0 * pi * j as Real / 12.0;
                points.push(Point::new(
                    theta.sin() * phi.cos(),
                    theta.sin() * phi.sin(),
                    theta.cos(),
                ));
            }
        }

        let reconstructor = SurfaceReconstructor::new(ReconstructionMethod::Implicit {
            params: ImplicitSurfaceParams {
                neighborhood_size: 20,
                sample_spacing: 0.25,
            },
        });

        let mesh = reconstructor.reconstruct(&points).unwrap();
        assert!(mesh.is_closed());
        assert!(mesh.signed_volume() > 0.0);
    }
}
