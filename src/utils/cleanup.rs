use crate::math::{Point, Real};

/// Drops every point the index buffer never references, compacting `points`
/// and remapping `idx` onto the compacted buffer.
pub fn remove_unused_points(points: &mut Vec<Point<Real>>, idx: &mut [[u32; 3]]) {
    const UNUSED: u32 = u32::MAX;
    let mut remap = vec![UNUSED; points.len()];

    for tri in idx.iter() {
        for id in tri {
            remap[*id as usize] = 0;
        }
    }

    let mut kept = Vec::with_capacity(points.len());

    for (i, slot) in remap.iter_mut().enumerate() {
        if *slot != UNUSED {
            *slot = kept.len() as u32;
            kept.push(points[i]);
        }
    }

    *points = kept;

    for tri in idx.iter_mut() {
        for id in tri {
            *id = remap[*id as usize];
        }
    }
}
