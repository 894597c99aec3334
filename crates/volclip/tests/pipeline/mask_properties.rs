use volclip::math::{Matrix4, Point, Real};
use volclip::rasterization::{MaskRasterizer, OperationMode};
use volclip::reconstruction::SurfaceReconstructor;
use volclip::shape::SurfaceMesh;

use super::support::{octahedron, unit_grid};

fn smoothed_octahedron() -> SurfaceMesh {
    SurfaceReconstructor::default()
        .reconstruct(&octahedron(Point::new(5.0, 5.0, 5.0), 3.0))
        .unwrap()
}

#[test]
fn fill_polarities_partition_the_grid() {
    let surface = smoothed_octahedron();
    let grid = unit_grid();
    let rasterizer = MaskRasterizer::new();

    let inside = rasterizer
        .rasterize(
            &surface,
            &Matrix4::identity(),
            &grid,
            OperationMode::FillInside,
        )
        .unwrap();
    let outside = rasterizer
        .rasterize(
            &surface,
            &Matrix4::identity(),
            &grid,
            OperationMode::FillOutside,
        )
        .unwrap();

    assert!(inside.count_nonzero() > 0);
    assert_eq!(
        inside.count_nonzero() + outside.count_nonzero(),
        grid.extent.num_voxels()
    );

    for (a, b) in inside.values().iter().zip(outside.values()) {
        assert_eq!(a + b, 1);
    }
}

#[test]
fn accumulating_a_mask_with_itself_changes_nothing() {
    let surface = smoothed_octahedron();
    let grid = unit_grid();

    let mask = MaskRasterizer::new()
        .rasterize(
            &surface,
            &Matrix4::identity(),
            &grid,
            OperationMode::FillInside,
        )
        .unwrap();

    let mut accumulated = mask.clone();
    accumulated.accumulate(&mask).unwrap();

    assert_eq!(accumulated, mask);
}

#[test]
fn labelled_voxels_stay_within_one_voxel_of_the_surface_bounds() {
    let surface = smoothed_octahedron();
    let aabb = surface.aabb();
    let grid = unit_grid();

    let mask = MaskRasterizer::new()
        .rasterize(
            &surface,
            &Matrix4::identity(),
            &grid,
            OperationMode::FillInside,
        )
        .unwrap();
    assert!(mask.count_nonzero() > 0);

    for iz in 0..=10 {
        for iy in 0..=10 {
            for ix in 0..=10 {
                if mask.value([ix, iy, iz]) == Some(1) {
                    let ijk = [ix, iy, iz];

                    for k in 0..3 {
                        assert!(ijk[k] as Real >= aabb.mins[k] - 1.0);
                        assert!(ijk[k] as Real <= aabb.maxs[k] + 1.0);
                    }
                }
            }
        }
    }
}
