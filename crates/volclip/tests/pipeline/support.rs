use volclip::clip::{ClipError, PointSource, SegmentHandle};
use volclip::math::{Matrix4, Point, Real};
use volclip::rasterization::{GridExtent, GridGeometry, MergeMode, ScalarType, VoxelMask};

// Label storage standing in for a host segmentation engine: one byte per
// voxel, a display color, and room for the persisted point snapshot.
pub struct FakeSegment {
    pub color: [f32; 3],
    pub tag: Option<Vec<u8>>,
    pub labels: Vec<u8>,
    pub extent: GridExtent,
}

impl FakeSegment {
    pub fn new(extent: GridExtent) -> Self {
        FakeSegment {
            color: [0.25, 0.5, 1.0],
            tag: None,
            labels: vec![0; extent.num_voxels()],
            extent,
        }
    }

    pub fn labelled(&self) -> usize {
        self.labels.iter().filter(|v| **v != 0).count()
    }

    pub fn label_at(&self, ijk: [i32; 3]) -> u8 {
        self.labels[self.extent.linear_index(ijk).unwrap()]
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

// Host-side markup node holding the fiducial positions.
pub struct FakeMarkup {
    pub positions: Vec<Point<Real>>,
}

impl PointSource for FakeMarkup {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, i: usize) -> Point<Real> {
        self.positions[i]
    }
}

pub fn unit_grid() -> GridGeometry {
    GridGeometry {
        extent: GridExtent::new([0, 0, 0], [10, 10, 10]),
        scalar_type: ScalarType::U8,
        ijk_to_world: Matrix4::identity(),
    }
}

pub fn octahedron(center: Point<Real>, radius: Real) -> Vec<Point<Real>> {
    vec![
        Point::new(center.x - radius, center.y, center.z),
        Point::new(center.x + radius, center.y, center.z),
        Point::new(center.x, center.y - radius, center.z),
        Point::new(center.x, center.y + radius, center.z),
        Point::new(center.x, center.y, center.z - radius),
        Point::new(center.x, center.y, center.z + radius),
    ]
}

pub fn sphere_cloud(center: Point<Real>, radius: Real) -> Vec<Point<Real>> {
    let rows = 12;
    let mut cloud = Vec::new();

    for i in 0..=rows {
        let theta = core::f64::consts::PI * (i as Real) / (rows as Real);

        for j in 0..(2 * rows) {
            let phi = core::f64::consts::PI * (j as Real) / (rows as Real);
            cloud.push(Point::new(
                center.x + radius * theta.sin() * phi.cos(),
                center.y + radius * theta.sin() * phi.sin(),
                center.z + radius * theta.cos(),
            ));
        }
    }

    cloud
}
