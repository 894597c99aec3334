use super::initial_mesh::try_get_initial_facets;
use super::{ConvexHullError, TriangleFacet};
use crate::math::{Point, Real};
use crate::transformation::convex_hull_utils::{
    indexed_support_point_id, indexed_support_point_nth, normalize,
};
use crate::utils;

/// Computes the convex hull of a set of points.
///
/// # Panics
/// Panics if the hull computation fails. See [`try_convex_hull`] for a
/// fallible version.
pub fn convex_hull(points: &[Point<Real>]) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    try_convex_hull(points).unwrap()
}

/// Computes the convex hull of a set of points.
///
/// The resulting triangles are wound counter-clockwise when seen from outside
/// of the hull, i.e., their normals point away from its interior.
pub fn try_convex_hull(
    points: &[Point<Real>],
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ConvexHullError> {
    if points.len() < 4 {
        return Err(ConvexHullError::IncompleteInput);
    }

    let mut normalized_points = points.to_vec();
    let _ = normalize(&mut normalized_points[..]);

    let mut undecidable_points = Vec::new();
    let mut silhouette_loop_facets_and_idx = Vec::new();
    let mut removed_facets = Vec::new();

    let mut triangles =
        try_get_initial_facets(&mut normalized_points[..], &mut undecidable_points)?;

    let mut i = 0;
    while i != triangles.len() {
        silhouette_loop_facets_and_idx.clear();

        if !triangles[i].valid || triangles[i].affinely_dependent {
            i += 1;
            continue;
        }

        let pt_id = indexed_support_point_id(
            &triangles[i].normal,
            &normalized_points[..],
            triangles[i].visible_points[..].iter().copied(),
        );

        if let Some(point) = pt_id {
            triangles[i].valid = false;

            removed_facets.clear();
            removed_facets.push(i);

            for j in 0usize..3 {
                compute_silhouette(
                    triangles[i].adj[j],
                    triangles[i].indirect_adj_id[j],
                    point,
                    &mut silhouette_loop_facets_and_idx,
                    &normalized_points[..],
                    &mut removed_facets,
                    &mut triangles[..],
                );
            }

            // In some degenerate cases (because of float rounding problems), the silhouette may:
            // 1. Contain self-intersections (i.e. a single vertex is used by more than two edges).
            // 2. Contain multiple disjoint (but nested) loops.
            fix_silhouette_topology(
                &normalized_points,
                &mut silhouette_loop_facets_and_idx,
                &mut removed_facets,
                &mut triangles[..],
            )?;

            if silhouette_loop_facets_and_idx.is_empty() {
                // Due to inaccuracies, the silhouette could not be computed
                // (the point seems to be visible from every triangle).
                let mut any_valid = false;
                for j in i + 1..triangles.len() {
                    if triangles[j].valid && !triangles[j].affinely_dependent {
                        any_valid = true;
                    }
                }

                if any_valid {
                    return Err(ConvexHullError::InternalError(
                        "could not compute the silhouette of a support point",
                    ));
                }

                triangles[i].valid = true;
                break;
            }

            attach_and_push_facets(
                &silhouette_loop_facets_and_idx[..],
                point,
                &normalized_points[..],
                &mut triangles,
                &removed_facets[..],
                &mut undecidable_points,
            )?;
        }

        i += 1;
    }

    let mut idx = Vec::new();

    for facet in triangles.iter() {
        if facet.valid {
            idx.push([
                facet.pts[0] as u32,
                facet.pts[1] as u32,
                facet.pts[2] as u32,
            ]);
        }
    }

    let mut points = points.to_vec();
    utils::remove_unused_points(&mut points, &mut idx[..]);

    if points.is_empty() {
        return Err(ConvexHullError::InternalError("empty output mesh"));
    }

    Ok((points, idx))
}

fn compute_silhouette(
    facet: usize,
    indirect_id: usize,
    point: usize,
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    points: &[Point<Real>],
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) {
    if triangles[facet].valid {
        if !triangles[facet].order_independent_can_be_seen_by_point(point, points) {
            out_facets_and_idx.push((facet, indirect_id));
        } else {
            triangles[facet].valid = false; // The facet must be removed from the convex hull.
            removed_facets.push(facet);

            compute_silhouette(
                triangles[facet].adj[(indirect_id + 1) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + 1) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );

            compute_silhouette(
                triangles[facet].adj[(indirect_id + 2) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + 2) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );
        }
    }
}

fn fix_silhouette_topology(
    points: &[Point<Real>],
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) -> Result<(), ConvexHullError> {
    let mut workspace = vec![0; points.len()];
    let mut needs_fixing = false;

    // NOTE: we work with the second_point_from_edge instead
    // of the first one, because when we traverse the silhouette
    // we see the second edge point before the first.
    for (facet, adj_id) in &*out_facets_and_idx {
        let p = triangles[*facet].second_point_from_edge(*adj_id);
        workspace[p] += 1;

        if workspace[p] > 1 {
            needs_fixing = true;
        }
    }

    // We detected a topological problem, i.e., we have
    // multiple loops.
    if needs_fixing {
        log::debug!(
            "repairing a self-intersecting silhouette with {} edges",
            out_facets_and_idx.len()
        );

        // First, we need to know which loop is the one we
        // need to keep.
        let mut loop_start = 0;
        for (facet, adj_id) in &*out_facets_and_idx {
            let p1 = points[triangles[*facet].second_point_from_edge(*adj_id)];
            let p2 = points[triangles[*facet].first_point_from_edge(*adj_id)];
            let supp = indexed_support_point_nth(
                &(p2 - p1),
                points,
                out_facets_and_idx
                    .iter()
                    .map(|(f, ai)| triangles[*f].second_point_from_edge(*ai)),
            )
            .ok_or(ConvexHullError::MissingSupportPoint)?;
            let selected = &out_facets_and_idx[supp];
            if workspace[triangles[selected.0].second_point_from_edge(selected.1)] == 1 {
                // This is a valid point to start with.
                loop_start = supp;
                break;
            }
        }

        let mut removing = None;
        let old_facets_and_idx = std::mem::take(out_facets_and_idx);

        for i in 0..old_facets_and_idx.len() {
            let facet_id = (loop_start + i) % old_facets_and_idx.len();
            let (facet, adj_id) = old_facets_and_idx[facet_id];

            match removing {
                Some(p) => {
                    let p1 = triangles[facet].second_point_from_edge(adj_id);
                    if p == p1 {
                        removing = None;
                    }
                }
                _ => {
                    let p1 = triangles[facet].second_point_from_edge(adj_id);
                    if workspace[p1] > 1 {
                        removing = Some(p1);
                    }
                }
            }

            if removing.is_some() {
                if triangles[facet].valid {
                    triangles[facet].valid = false;
                    removed_facets.push(facet);
                }
            } else {
                out_facets_and_idx.push((facet, adj_id));
            }
        }
    }

    Ok(())
}

fn attach_and_push_facets(
    silhouette_loop_facets_and_idx: &[(usize, usize)],
    point: usize,
    points: &[Point<Real>],
    triangles: &mut Vec<TriangleFacet>,
    removed_facets: &[usize],
    undecidable: &mut Vec<usize>,
) -> Result<(), ConvexHullError> {
    // The silhouette is built to be in CCW order.
    let mut new_facets = Vec::with_capacity(silhouette_loop_facets_and_idx.len());

    // Create new facets.
    let mut adj_facet: usize;
    let mut indirect_id: usize;

    for i in 0..silhouette_loop_facets_and_idx.len() {
        adj_facet = silhouette_loop_facets_and_idx[i].0;
        indirect_id = silhouette_loop_facets_and_idx[i].1;

        let facet = TriangleFacet::new(
            point,
            triangles[adj_facet].second_point_from_edge(indirect_id),
            triangles[adj_facet].first_point_from_edge(indirect_id),
            points,
        );
        new_facets.push(facet);
    }

    // Link the facets together.
    for i in 0..silhouette_loop_facets_and_idx.len() {
        let prev_facet = if i == 0 {
            triangles.len() + silhouette_loop_facets_and_idx.len() - 1
        } else {
            triangles.len() + i - 1
        };

        let (middle_facet, middle_id) = silhouette_loop_facets_and_idx[i];
        let next_facet = triangles.len() + (i + 1) % silhouette_loop_facets_and_idx.len();

        new_facets[i].set_facets_adjascency(prev_facet, middle_facet, next_facet, 2, middle_id, 0);

        if triangles[triangles[middle_facet].adj[middle_id]].valid {
            // We are about to overwrite a valid adjacency link.
            return Err(ConvexHullError::InternalError("inconsistent silhouette"));
        }

        triangles[middle_facet].adj[middle_id] = triangles.len() + i; // The future id of curr_facet.
        triangles[middle_facet].indirect_adj_id[middle_id] = 1;
    }

    // Assign to each facet some of the points which can see it.
    for curr_facet in removed_facets.iter() {
        for visible_point in triangles[*curr_facet].visible_points.iter() {
            if points[*visible_point] == points[point] {
                continue;
            }

            let mut furthest = usize::MAX;
            let mut furthest_dist = 0.0;

            for (i, curr_facet) in new_facets.iter_mut().enumerate() {
                if !curr_facet.affinely_dependent {
                    let distance = curr_facet.distance_to_point(*visible_point, points);

                    if distance > furthest_dist {
                        furthest = i;
                        furthest_dist = distance;
                    }
                }
            }

            if furthest != usize::MAX && new_facets[furthest].can_see_point(*visible_point, points)
            {
                new_facets[furthest].add_visible_point(*visible_point, points);
            }

            // If none of the facets can be seen from the point, it is implicitly
            // deleted because it won't be referenced by any facet.
        }
    }

    // Try to assign collinear points to one of the new facets.
    let mut i = 0;

    while i != undecidable.len() {
        let mut furthest = usize::MAX;
        let mut furthest_dist = 0.0;
        let undecidable_point = undecidable[i];

        for (j, curr_facet) in new_facets.iter_mut().enumerate() {
            if curr_facet.can_see_point(undecidable_point, points) {
                let distance = curr_facet.distance_to_point(undecidable_point, points);

                if distance > furthest_dist {
                    furthest = j;
                    furthest_dist = distance;
                }
            }
        }

        if furthest != usize::MAX {
            new_facets[furthest].add_visible_point(undecidable_point, points);
            let _ = undecidable.swap_remove(i);
        } else {
            i += 1;
        }
    }

    // Push facets.
    triangles.append(&mut new_facets);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{convex_hull, try_convex_hull, ConvexHullError};
    use crate::math::{Point, Real};
    use crate::shape::SurfaceMesh;

    fn cube_corners() -> Vec<Point<Real>> {
        let mut corners = Vec::new();
        for i in 0..8 {
            corners.push(Point::new(
                (i & 1) as Real,
                ((i >> 1) & 1) as Real,
                ((i >> 2) & 1) as Real,
            ));
        }
        corners
    }

    #[test]
    fn cube_hull_discards_interior_points() {
        let mut points = cube_corners();
        points.push(Point::new(0.5, 0.5, 0.5));
        points.push(Point::new(0.25, 0.75, 0.5));
        points.push(Point::new(0.9, 0.1, 0.2));

        let (vertices, indices) = convex_hull(&points);
        assert_eq!(vertices.len(), 8);

        let mesh = SurfaceMesh::new(vertices, indices).unwrap();
        assert!(mesh.is_closed());
        assert_relative_eq!(mesh.signed_volume(), 1.0, epsilon = 1.0e-5);
    }

    #[test]
    fn hull_encloses_all_input_points() {
        let mut rng = oorandom::Rand32::new(1822);
        let mut points = Vec::new();

        for _ in 0..100 {
            let theta = rng.rand_float() as Real * std::f64::consts::TAU as Real;
            let z = rng.rand_float() as Real * 2.0 - 1.0;
            let r = (1.0 - z * z).max(0.0).sqrt();
            points.push(Point::new(r * theta.cos(), r * theta.sin(), z));
        }

        let (vertices, indices) = try_convex_hull(&points).unwrap();
        let tolerance = crate::math::DEFAULT_EPSILON.sqrt();

        for idx in &indices {
            let a = vertices[idx[0] as usize];
            let b = vertices[idx[1] as usize];
            let c = vertices[idx[2] as usize];
            let normal = (b - a).cross(&(c - a));

            for pt in &points {
                // No input point may lie on the outer side of a hull facet.
                assert!(normal.dot(&(pt - a)) <= tolerance);
            }
        }
    }

    #[test]
    fn coplanar_points_have_no_hull() {
        let points = [
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(0.3, 0.2, 1.0),
        ];

        assert_eq!(
            try_convex_hull(&points),
            Err(ConvexHullError::MissingSupportPoint)
        );
    }

    #[test]
    fn too_few_points_are_rejected() {
        let points = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];

        assert_eq!(
            try_convex_hull(&points),
            Err(ConvexHullError::IncompleteInput)
        );
    }
}
