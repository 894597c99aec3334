//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};

/// An Axis Aligned Bounding Box.
///
/// A box aligned with the coordinate axes, represented by its smallest and
/// largest corner. It is the bounding volume used everywhere in this crate:
/// surfaces expose their Aabb so the rasterizer can clamp its working extent
/// to the region the surface actually covers.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// The smallest corner of this AABB.
    pub mins: Point<Real>,
    /// The largest corner of this AABB.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must be componentwise smaller than `maxs` for the box to be
    /// non-degenerate.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::MAX` and
    /// `maxs` components set to `-Real::MAX`.
    ///
    /// This is a useful seed for incremental AABB construction: growing it
    /// with [`Aabb::take_point`] makes it converge to the exact bounding box
    /// of the points taken.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Computes the AABB of a set of points.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = 0.5;
        (self.maxs - self.mins) * half
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Tests whether `point` is inside this AABB, boundary included.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Tests whether `other` is fully contained in `self`, boundary included.
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        self.contains_local_point(&other.mins) && self.contains_local_point(&other.maxs)
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb;
    use crate::math::Point;

    #[test]
    fn aabb_from_points_is_tight() {
        let aabb = Aabb::from_points([
            Point::new(1.0, 2.0, 3.0),
            Point::new(-1.0, 5.0, 0.5),
            Point::new(0.0, 0.0, 0.0),
        ]);

        assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 0.0));
        assert_eq!(aabb.maxs, Point::new(1.0, 5.0, 3.0));
    }

    #[test]
    fn aabb_merged_contains_both() {
        let a = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point::new(-2.0, 0.5, 0.0), Point::new(0.0, 3.0, 0.5));
        let m = a.merged(&b);

        assert!(m.contains(&a));
        assert!(m.contains(&b));
        assert!(!a.contains(&b));
    }
}
