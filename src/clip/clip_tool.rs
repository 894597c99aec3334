use crate::clip::SegmentTag;
use crate::math::{Point, Real};
use crate::rasterization::{
    GridGeometry, MaskRasterizer, MergeMode, OperationMode, RasterError, VoxelMask,
};
use crate::reconstruction::SurfaceReconstructor;
use crate::shape::SurfaceMesh;

/// The control points driving a clip operation, owned by the host.
pub trait PointSource {
    /// The number of control points.
    fn len(&self) -> usize;

    /// Whether the source holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The world-space position of the `i`-th point.
    fn position(&self, i: usize) -> Point<Real>;
}

impl PointSource for [Point<Real>] {
    fn len(&self) -> usize {
        <[Point<Real>]>::len(self)
    }

    fn position(&self, i: usize) -> Point<Real> {
        self[i]
    }
}

/// The segment receiving the clip, owned by the host.
///
/// The handle bundles the segment's identity (display color, persisted point
/// snapshot) with the merge half of the pipeline. How labelled voxels combine
/// with other segments is entirely up to the implementation.
pub trait SegmentHandle {
    /// The RGB display color of the segment.
    fn color(&self) -> [f32; 3];

    /// The stored point-set snapshot, if the segment carries one.
    fn read_tag(&self) -> Option<Vec<u8>>;

    /// Stores `tag` as the segment's point-set snapshot.
    fn write_tag(&mut self, tag: &[u8]);

    /// Merges the labelled voxels of `mask` into the segment.
    fn apply_labelmap(&mut self, mask: &VoxelMask, mode: MergeMode) -> Result<(), ClipError>;
}

/// A freshly reconstructed preview surface.
#[derive(Clone, Copy, Debug)]
pub struct PreviewUpdate<'a> {
    /// The reconstructed surface, in world space.
    pub mesh: &'a SurfaceMesh,
    /// The display color of the active segment.
    pub color: [f32; 3],
}

/// What an apply changed, for host-side reporting and undo bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApplySummary {
    /// The operation that was applied.
    pub mode: OperationMode,
    /// The number of voxels carrying the active label in the merged mask.
    pub labelled_voxels: usize,
}

/// Error interrupting an apply.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClipError {
    /// Rasterization onto the target grid failed.
    #[error("RasterError: {0}")]
    RasterError(RasterError),
    /// The segment refused the labelmap merge.
    #[error("the segment rejected the labelmap merge.")]
    MergeRejected,
}

impl From<RasterError> for ClipError {
    fn from(value: RasterError) -> Self {
        ClipError::RasterError(value)
    }
}

/// Interactive clip pipeline tying reconstruction and rasterization together.
///
/// The host calls [`ClipTool::points_changed`] after every point mutation to
/// refresh the preview surface, and [`ClipTool::apply`] to burn the surface
/// into a segment. The surface built for the preview is reused by the apply,
/// so the expensive reconstruction runs once per point change, not once per
/// apply.
#[derive(Clone, Debug, Default)]
pub struct ClipTool {
    reconstructor: SurfaceReconstructor,
    rasterizer: MaskRasterizer,
    surface: Option<SurfaceMesh>,
}

impl ClipTool {
    /// Creates a tool reconstructing surfaces with `reconstructor`.
    pub fn new(reconstructor: SurfaceReconstructor) -> Self {
        ClipTool {
            reconstructor,
            rasterizer: MaskRasterizer::new(),
            surface: None,
        }
    }

    /// The reconstruction settings used for previews and applies.
    pub fn reconstructor(&self) -> &SurfaceReconstructor {
        &self.reconstructor
    }

    /// The surface built by the last reconstruction, if it succeeded.
    pub fn preview_surface(&self) -> Option<&SurfaceMesh> {
        self.surface.as_ref()
    }

    /// Rebuilds the preview surface after a point mutation.
    ///
    /// Returns `None` while the points do not enclose a volume. The update
    /// carries the segment's display color so hosts can render the preview
    /// without consulting the segment again.
    pub fn points_changed<P, S>(&mut self, points: &P, segment: &S) -> Option<PreviewUpdate<'_>>
    where
        P: PointSource + ?Sized,
        S: SegmentHandle + ?Sized,
    {
        let cloud = gather(points);
        self.surface = self.reconstructor.reconstruct(&cloud);

        let color = segment.color();
        self.surface
            .as_ref()
            .map(|mesh| PreviewUpdate { mesh, color })
    }

    /// Rasterizes the current surface onto `grid` and merges it into
    /// `segment`.
    ///
    /// Returns `Ok(None)` when there is no surface to apply, which is not an
    /// error: the host simply keeps collecting points. On success the point
    /// set is snapshotted into the segment's tag so a later
    /// [`ClipTool::begin_edit`] can restore it.
    pub fn apply<P, S>(
        &mut self,
        points: &P,
        grid: &GridGeometry,
        mode: OperationMode,
        segment: &mut S,
    ) -> Result<Option<ApplySummary>, ClipError>
    where
        P: PointSource + ?Sized,
        S: SegmentHandle + ?Sized,
    {
        let cloud = gather(points);

        // Hosts may apply without ever having requested a preview.
        if self.surface.is_none() {
            self.surface = self.reconstructor.reconstruct(&cloud);
        }

        let surface = match &self.surface {
            Some(surface) => surface,
            None => return Ok(None),
        };

        let world_to_ijk = match grid.world_to_ijk() {
            Some(m) => m,
            None => {
                log::error!("the target grid matrix is not invertible, aborting the apply");
                return Err(RasterError::InvalidTargetGrid.into());
            }
        };

        let mask = self
            .rasterizer
            .rasterize(surface, &world_to_ijk, grid, mode)?;
        segment.apply_labelmap(&mask, mode.merge_mode())?;
        segment.write_tag(&SegmentTag::from_points(&cloud).encode());

        let labelled_voxels = mask.count_nonzero();
        log::info!("applied {mode:?} labelling {labelled_voxels} voxels");

        Ok(Some(ApplySummary {
            mode,
            labelled_voxels,
        }))
    }

    /// Restores the point set stored in a segment's tag to resume editing it.
    ///
    /// Drops the preview surface. A missing or unreadable tag yields an
    /// empty point set, so editing a segment that was never clipped simply
    /// starts fresh.
    pub fn begin_edit<S>(&mut self, segment: &S) -> Vec<Point<Real>>
    where
        S: SegmentHandle + ?Sized,
    {
        self.surface = None;

        let bytes = match segment.read_tag() {
            Some(bytes) => bytes,
            None => return Vec::new(),
        };

        match SegmentTag::decode(&bytes) {
            Ok(tag) => tag.points(),
            Err(err) => {
                log::debug!("stored tag is unreadable, starting fresh: {err}");
                Vec::new()
            }
        }
    }
}

fn gather<P: PointSource + ?Sized>(points: &P) -> Vec<Point<Real>> {
    (0..points.len()).map(|i| points.position(i)).collect()
}

#[cfg(test)]
mod test {
    use super::{ClipError, ClipTool, SegmentHandle};
    use crate::math::{Matrix4, Point, Real};
    use crate::rasterization::{
        GridExtent, GridGeometry, MergeMode, OperationMode, RasterError, ScalarType, VoxelMask,
    };

    struct FakeSegment {
        color: [f32; 3],
        tag: Option<Vec<u8>>,
        labels: Vec<u8>,
        extent: GridExtent,
    }

    impl FakeSegment {
        fn new(extent: GridExtent) -> Self {
            FakeSegment {
                color: [0.9, 0.1, 0.2],
                tag: None,
                labels: vec![0; extent.num_voxels()],
                extent,
            }
        }

        fn labelled(&self) -> usize {
            self.labels.iter().filter(|v| **v != 0).count()
        }
    }

    impl SegmentHandle for FakeSegment {
        fn color(&self) -> [f32; 3] {
            self.color
        }

        fn read_tag(&self) -> Option<Vec<u8>> {
            self.tag.clone()
        }

        fn write_tag(&mut self, tag: &[u8]) {
            self.tag = Some(tag.to_vec());
        }

        fn apply_labelmap(&mut self, mask: &VoxelMask, mode: MergeMode) -> Result<(), ClipError> {
            assert_eq!(mask.extent(), self.extent);

            for (dst, src) in self.labels.iter_mut().zip(mask.values()) {
                if *src != 0 {
                    *dst = match mode {
                        MergeMode::Add => 1,
                        MergeMode::Remove => 0,
                    };
                }
            }

            Ok(())
        }
    }

    struct RefusingSegment {
        tag: Option<Vec<u8>>,
    }

    impl SegmentHandle for RefusingSegment {
        fn color(&self) -> [f32; 3] {
            [0.5, 0.5, 0.5]
        }

        fn read_tag(&self) -> Option<Vec<u8>> {
            self.tag.clone()
        }

        fn write_tag(&mut self, tag: &[u8]) {
            self.tag = Some(tag.to_vec());
        }

        fn apply_labelmap(&mut self, _mask: &VoxelMask, _mode: MergeMode) -> Result<(), ClipError> {
            Err(ClipError::MergeRejected)
        }
    }

    fn grid() -> GridGeometry {
        GridGeometry {
            extent: GridExtent::new([0, 0, 0], [10, 10, 10]),
            scalar_type: ScalarType::U8,
            ijk_to_world: Matrix4::identity(),
        }
    }

    fn octahedron() -> Vec<Point<Real>> {
        vec![
            Point::new(2.0, 5.0, 5.0),
            Point::new(8.0, 5.0, 5.0),
            Point::new(5.0, 2.0, 5.0),
            Point::new(5.0, 8.0, 5.0),
            Point::new(5.0, 5.0, 2.0),
            Point::new(5.0, 5.0, 8.0),
        ]
    }

    #[test]
    fn previews_carry_the_segment_color() {
        let mut tool = ClipTool::default();
        let segment = FakeSegment::new(grid().extent);
        let points = octahedron();

        let update = tool.points_changed(points.as_slice(), &segment).unwrap();
        assert_eq!(update.color, [0.9, 0.1, 0.2]);
        assert!(update.mesh.is_closed());

        assert!(tool.preview_surface().is_some());
    }

    #[test]
    fn too_few_points_preview_nothing_and_apply_skips() {
        let mut tool = ClipTool::default();
        let mut segment = FakeSegment::new(grid().extent);
        let points = vec![Point::new(1.0, 1.0, 1.0), Point::new(2.0, 1.0, 1.0)];

        assert!(tool.points_changed(points.as_slice(), &segment).is_none());

        let summary = tool
            .apply(
                points.as_slice(),
                &grid(),
                OperationMode::FillInside,
                &mut segment,
            )
            .unwrap();
        assert_eq!(summary, None);
        assert_eq!(segment.labelled(), 0);
        assert!(segment.tag.is_none());
    }

    #[test]
    fn erasing_with_the_same_points_clears_a_fill() {
        let mut tool = ClipTool::default();
        let mut segment = FakeSegment::new(grid().extent);
        let points = octahedron();

        let filled = tool
            .apply(
                points.as_slice(),
                &grid(),
                OperationMode::FillInside,
                &mut segment,
            )
            .unwrap()
            .unwrap();
        assert_eq!(filled.mode, OperationMode::FillInside);
        assert!(filled.labelled_voxels > 0);
        assert_eq!(segment.labelled(), filled.labelled_voxels);

        let erased = tool
            .apply(
                points.as_slice(),
                &grid(),
                OperationMode::EraseInside,
                &mut segment,
            )
            .unwrap()
            .unwrap();
        assert_eq!(erased.labelled_voxels, filled.labelled_voxels);
        assert_eq!(segment.labelled(), 0);
    }

    #[test]
    fn apply_snapshots_the_points_for_a_later_edit() {
        let mut tool = ClipTool::default();
        let mut segment = FakeSegment::new(grid().extent);
        let points = octahedron();

        let _ = tool
            .apply(
                points.as_slice(),
                &grid(),
                OperationMode::FillInside,
                &mut segment,
            )
            .unwrap();

        let restored = tool.begin_edit(&segment);
        assert_eq!(restored, points);
        assert!(tool.preview_surface().is_none());
    }

    #[test]
    fn begin_edit_without_a_readable_tag_starts_fresh() {
        let mut tool = ClipTool::default();
        let mut segment = FakeSegment::new(grid().extent);

        assert!(tool.begin_edit(&segment).is_empty());

        segment.tag = Some(vec![42, 42, 42]);
        assert!(tool.begin_edit(&segment).is_empty());
    }

    #[test]
    fn invalid_grids_abort_before_touching_the_segment() {
        let mut tool = ClipTool::default();
        let mut segment = FakeSegment::new(grid().extent);
        let points = octahedron();

        let mut bad = grid();
        bad.ijk_to_world = Matrix4::zeros();

        let err = tool
            .apply(
                points.as_slice(),
                &bad,
                OperationMode::FillInside,
                &mut segment,
            )
            .unwrap_err();
        assert_eq!(err, ClipError::RasterError(RasterError::InvalidTargetGrid));
        assert_eq!(segment.labelled(), 0);
        assert!(segment.tag.is_none());
    }

    #[test]
    fn a_rejected_merge_leaves_the_tag_unwritten() {
        let mut tool = ClipTool::default();
        let mut segment = RefusingSegment { tag: None };
        let points = octahedron();

        let err = tool
            .apply(
                points.as_slice(),
                &grid(),
                OperationMode::FillInside,
                &mut segment,
            )
            .unwrap_err();
        assert_eq!(err, ClipError::MergeRejected);
        assert!(segment.read_tag().is_none());
    }
}
