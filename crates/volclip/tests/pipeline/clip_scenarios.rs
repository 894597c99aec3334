use volclip::clip::ClipTool;
use volclip::math::{Matrix4, Point};
use volclip::rasterization::{GridExtent, GridGeometry, OperationMode, ScalarType};
use volclip::reconstruction::{ReconstructionMethod, SurfaceReconstructor};
use volclip::transformation::ImplicitSurfaceParams;

use super::support::{octahedron, sphere_cloud, unit_grid, FakeMarkup, FakeSegment};

#[test]
fn fill_apply_edit_erase_workflow() {
    let grid = unit_grid();
    let mut segment = FakeSegment::new(grid.extent);
    let markup = FakeMarkup {
        positions: octahedron(Point::new(5.0, 5.0, 5.0), 3.0),
    };

    let mut tool = ClipTool::default();

    let preview = tool.points_changed(&markup, &segment).unwrap();
    assert_eq!(preview.color, segment.color);
    assert!(preview.mesh.is_closed());

    let summary = tool
        .apply(&markup, &grid, OperationMode::FillInside, &mut segment)
        .unwrap()
        .unwrap();
    assert!(summary.labelled_voxels > 0);
    assert_eq!(segment.labelled(), summary.labelled_voxels);
    assert_eq!(segment.label_at([5, 5, 5]), 1);

    // A later session re-opens the segment, restores the stored points and
    // erases the clip again.
    let mut editor = ClipTool::default();
    let restored = editor.begin_edit(&segment);
    assert_eq!(restored, markup.positions);

    let erased = editor
        .apply(
            restored.as_slice(),
            &grid,
            OperationMode::EraseInside,
            &mut segment,
        )
        .unwrap()
        .unwrap();
    assert_eq!(erased.labelled_voxels, summary.labelled_voxels);
    assert_eq!(segment.labelled(), 0);
}

#[test]
fn erasing_a_shifted_clip_preserves_the_rest() {
    let grid = unit_grid();
    let mut segment = FakeSegment::new(grid.extent);
    let mut tool = ClipTool::default();

    let first = octahedron(Point::new(4.0, 5.0, 5.0), 2.5);
    let second = octahedron(Point::new(7.0, 5.0, 5.0), 2.5);

    let _ = tool
        .apply(
            first.as_slice(),
            &grid,
            OperationMode::FillInside,
            &mut segment,
        )
        .unwrap();
    let filled = segment.labelled();
    assert!(filled > 0);

    let _ = tool.points_changed(second.as_slice(), &segment);
    let _ = tool
        .apply(
            second.as_slice(),
            &grid,
            OperationMode::EraseInside,
            &mut segment,
        )
        .unwrap();

    assert!(segment.labelled() > 0);
    assert!(segment.labelled() < filled);

    // Deep inside the first clip only.
    assert_eq!(segment.label_at([3, 5, 5]), 1);
    // Inside both clips, so the erase removed it.
    assert_eq!(segment.label_at([5, 5, 5]), 0);
}

#[test]
fn world_grids_with_scaling_are_honoured() {
    // Voxels half a world unit wide: the world-space octahedron around
    // (2.5, 2.5, 2.5) lands on the voxel box around (5, 5, 5).
    let grid = GridGeometry {
        extent: GridExtent::new([0, 0, 0], [10, 10, 10]),
        scalar_type: ScalarType::U8,
        ijk_to_world: Matrix4::new_scaling(0.5),
    };
    let mut segment = FakeSegment::new(grid.extent);
    let mut tool = ClipTool::default();

    let points = octahedron(Point::new(2.5, 2.5, 2.5), 1.5);
    let summary = tool
        .apply(
            points.as_slice(),
            &grid,
            OperationMode::FillInside,
            &mut segment,
        )
        .unwrap()
        .unwrap();

    assert!(summary.labelled_voxels > 0);
    assert_eq!(segment.label_at([5, 5, 5]), 1);
    assert_eq!(segment.label_at([0, 0, 0]), 0);
}

#[test]
fn implicit_reconstruction_drives_the_pipeline_too() {
    let grid = unit_grid();
    let mut segment = FakeSegment::new(grid.extent);

    let method = ReconstructionMethod::Implicit {
        params: ImplicitSurfaceParams {
            neighborhood_size: 12,
            sample_spacing: 0.5,
        },
    };
    let mut tool = ClipTool::new(SurfaceReconstructor { method });

    let cloud = sphere_cloud(Point::new(5.0, 5.0, 5.0), 2.5);
    let preview = tool.points_changed(cloud.as_slice(), &segment).unwrap();
    assert!(preview.mesh.is_closed());

    let summary = tool
        .apply(
            cloud.as_slice(),
            &grid,
            OperationMode::FillInside,
            &mut segment,
        )
        .unwrap()
        .unwrap();

    // A radius 2.5 ball covers roughly 80 unit voxels.
    assert!(summary.labelled_voxels > 40);
    assert!(summary.labelled_voxels < 130);
    assert_eq!(segment.label_at([5, 5, 5]), 1);
}
