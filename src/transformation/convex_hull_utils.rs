use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// Returns the index of the support point of a list of points.
pub fn support_point_id(direction: &Vector<Real>, points: &[Point<Real>]) -> Option<usize> {
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (id, pt) in points.iter().enumerate() {
        let dot = direction.dot(&pt.coords);

        if dot > max {
            argmax = Some(id);
            max = dot;
        }
    }

    argmax
}

/// Returns the index of the support point of an indexed list of points.
pub fn indexed_support_point_id<I>(
    direction: &Vector<Real>,
    points: &[Point<Real>],
    idx: I,
) -> Option<usize>
where
    I: Iterator<Item = usize>,
{
    let mut argmax = None;
    let mut max = -Real::MAX;

    for i in idx {
        let dot = direction.dot(&points[i].coords);

        if dot > max {
            argmax = Some(i);
            max = dot;
        }
    }

    argmax
}

/// Returns the number of the support point of an indexed list of points.
///
/// The returned value is an index in the sequence yielded by `idx`, not an
/// index into `points`.
pub fn indexed_support_point_nth<I>(
    direction: &Vector<Real>,
    points: &[Point<Real>],
    idx: I,
) -> Option<usize>
where
    I: Iterator<Item = usize>,
{
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (k, i) in idx.enumerate() {
        let dot = direction.dot(&points[i].coords);

        if dot > max {
            argmax = Some(k);
            max = dot;
        }
    }

    argmax
}

/// Scale and center the given set of points so that they fit inside of the
/// unit cube centered at the origin.
///
/// Returns the center and the scaling factor that were applied.
pub fn normalize(coords: &mut [Point<Real>]) -> (Point<Real>, Real) {
    let aabb = Aabb::from_points(coords.iter().copied());
    let diag = na::distance(&aabb.mins, &aabb.maxs);
    let center = aabb.center();

    for c in coords.iter_mut() {
        *c = (*c + (-center.coords)) / diag;
    }

    (center, diag)
}
