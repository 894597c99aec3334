use crate::math::{Point, Real};

/// Version written into every encoded tag.
pub const TAG_VERSION: u16 = 1;

// Fixed header (version + count) followed by three f64 coordinates per point.
const HEADER_LEN: usize = 6;
const POINT_LEN: usize = 24;

/// Error indicating that a stored tag could not be decoded.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TagError {
    /// The byte string is shorter than the fixed tag header.
    #[error("the tag is shorter than its fixed header.")]
    TruncatedHeader,
    /// The tag was written by an unknown format version.
    #[error("unsupported tag version {0}.")]
    UnsupportedVersion(u16),
    /// The payload length disagrees with the advertised point count.
    #[error("the tag length does not match its point count.")]
    CountMismatch,
}

/// The point set of a clip operation, as persisted alongside a segment.
///
/// The wire format is little-endian: a `u16` version, a `u32` point count,
/// then three `f64` coordinates per point. Coordinates are stored as `f64`
/// regardless of the build's `Real` precision, so encoding and decoding a
/// tag is bit-exact in the default build.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentTag {
    points: Vec<[f64; 3]>,
}

impl SegmentTag {
    /// Snapshots `points` into a tag.
    pub fn from_points(points: &[Point<Real>]) -> Self {
        let points = points
            .iter()
            .map(|pt| [f64::from(pt.x), f64::from(pt.y), f64::from(pt.z)])
            .collect();
        SegmentTag { points }
    }

    /// The number of points stored in this tag.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this tag stores no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The stored coordinates, exactly as they appear on the wire.
    pub fn wire_points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// The stored points, narrowed to the build's `Real` precision.
    pub fn points(&self) -> Vec<Point<Real>> {
        self.points
            .iter()
            .map(|pt| Point::new(pt[0] as Real, pt[1] as Real, pt[2] as Real))
            .collect()
    }

    /// Serializes this tag.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.points.len() * POINT_LEN);
        bytes.extend_from_slice(&TAG_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(self.points.len() as u32).to_le_bytes());

        for pt in &self.points {
            for coord in pt {
                bytes.extend_from_slice(&coord.to_le_bytes());
            }
        }

        bytes
    }

    /// Deserializes a tag, validating version and length before reading any
    /// point.
    pub fn decode(bytes: &[u8]) -> Result<Self, TagError> {
        if bytes.len() < HEADER_LEN {
            return Err(TagError::TruncatedHeader);
        }

        let version = u16::from_le_bytes([bytes[0], bytes[1]]);
        if version != TAG_VERSION {
            return Err(TagError::UnsupportedVersion(version));
        }

        let count = u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]) as usize;
        let payload = &bytes[HEADER_LEN..];

        if payload.len() % POINT_LEN != 0 || payload.len() / POINT_LEN != count {
            return Err(TagError::CountMismatch);
        }

        let mut points = Vec::with_capacity(count);

        for chunk in payload.chunks_exact(POINT_LEN) {
            let coord = |at: usize| {
                let mut raw = [0; 8];
                raw.copy_from_slice(&chunk[at..at + 8]);
                f64::from_le_bytes(raw)
            };
            points.push([coord(0), coord(8), coord(16)]);
        }

        Ok(SegmentTag { points })
    }
}
