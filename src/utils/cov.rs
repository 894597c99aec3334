use crate::math::{Point, Real};
use crate::utils;
use na::Matrix3;

/// The covariance matrix of a set of points.
pub fn cov(pts: &[Point<Real>]) -> Matrix3<Real> {
    center_cov(pts).1
}

/// The centroid and covariance matrix of a set of points.
pub fn center_cov(pts: &[Point<Real>]) -> (Point<Real>, Matrix3<Real>) {
    let center = utils::center(pts);
    let mut cov = Matrix3::zeros();

    for pt in pts {
        let rel = *pt - center;
        cov += rel * rel.transpose();
    }

    (center, cov / (pts.len() as Real))
}
