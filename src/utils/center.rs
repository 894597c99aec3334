use crate::math::{Point, Real};

/// The centroid of a set of points, all weighted equally.
///
/// # Panics
///
/// Panics if `pts` is empty.
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(!pts.is_empty(), "the centroid of no points is undefined.");

    let denom = 1.0 / (pts.len() as Real);
    let mut res = Point::origin();

    for pt in pts {
        res += pt.coords * denom;
    }

    res
}
