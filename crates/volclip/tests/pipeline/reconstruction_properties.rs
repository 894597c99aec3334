use volclip::math::{Point, Real};
use volclip::reconstruction::{ReconstructionMethod, SurfaceReconstructor};

use super::support::octahedron;

fn coarse_hull() -> SurfaceReconstructor {
    SurfaceReconstructor {
        method: ReconstructionMethod::Delaunay { smoothing_passes: 0 },
    }
}

#[test]
fn smoothing_keeps_the_octahedron_volume() {
    let points = octahedron(Point::new(5.0, 5.0, 5.0), 3.0);

    let coarse = coarse_hull().reconstruct(&points).unwrap();
    let smoothed = SurfaceReconstructor::default().reconstruct(&points).unwrap();

    assert!(coarse.is_closed());
    assert!(smoothed.is_closed());

    // An octahedron with half-diagonal r encloses 4r^3/3.
    assert_relative_eq!(coarse.signed_volume(), 36.0, epsilon = 1.0e-6);

    let drift = (smoothed.signed_volume() - coarse.signed_volume()).abs();
    assert!(drift < 0.1 * coarse.signed_volume());

    // The subdivision interpolates, so the fiducials stay on the surface.
    for pt in &points {
        assert!(smoothed
            .vertices()
            .iter()
            .any(|vtx| na::distance(vtx, pt) < 1.0e-6));
    }
}

#[test]
fn random_clouds_stay_inside_their_coarse_hull() {
    let mut rng = oorandom::Rand32::new(172);
    let mut points = Vec::new();

    for _ in 0..40 {
        points.push(Point::new(
            (rng.rand_float() * 8.0 + 1.0) as Real,
            (rng.rand_float() * 8.0 + 1.0) as Real,
            (rng.rand_float() * 8.0 + 1.0) as Real,
        ));
    }

    let hull = coarse_hull().reconstruct(&points).unwrap();
    assert!(hull.is_closed());

    for pt in &points {
        for tri in hull.triangles() {
            if let Some(normal) = tri.normal() {
                assert!((*pt - tri.a).dot(&normal) <= 1.0e-6);
            }
        }
    }
}

#[test]
fn reconstruction_survives_collinear_and_duplicate_points() {
    let reconstructor = SurfaceReconstructor::default();

    let collinear: Vec<_> = (0..8)
        .map(|i| Point::new(i as Real, 2.0 * i as Real, 0.5))
        .collect();
    assert!(reconstructor.reconstruct(&collinear).is_none());

    let mut duplicated = octahedron(Point::new(5.0, 5.0, 5.0), 3.0);
    duplicated.extend_from_within(..);
    let surface = reconstructor.reconstruct(&duplicated).unwrap();
    assert!(surface.is_closed());
    assert!(surface.signed_volume() > 0.0);
}
