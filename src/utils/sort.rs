/// Sorts three values in increasing order with a three-comparison network.
#[inline]
pub fn sort3<'a, T: PartialOrd>(a: &'a T, b: &'a T, c: &'a T) -> (&'a T, &'a T, &'a T) {
    let (mut lo, mut mid, mut hi) = (a, b, c);

    if lo > mid {
        core::mem::swap(&mut lo, &mut mid);
    }

    if mid > hi {
        core::mem::swap(&mut mid, &mut hi);
    }

    if lo > mid {
        core::mem::swap(&mut lo, &mut mid);
    }

    (lo, mid, hi)
}
