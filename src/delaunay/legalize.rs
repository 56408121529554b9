//! Edge-flip legalization driven by an explicit worklist.
//!
//! An edge is illegal when the vertex opposite it in one adjacent triangle
//! lies inside the circumcircle of the other. Flipping replaces the two
//! triangles with the pair sharing the other diagonal; the four outer edges
//! of the new pair are then queued for re-checking. The queue replaces
//! recursion, so stack depth stays flat and a flip budget bounds the work.
//!
//! Predicates are looked up by vertex index, so the same pass serves plain
//! point slices and the incremental builder's arena with corners at infinity.

use crate::errors::{DelaunayError, DelaunayResult};
use crate::geometry::mesh::{Edge, Triangle};
use crate::geometry::predicates::IndexedPredicates;
use std::cmp::Ordering;

/// Positions of the triangles sharing `edge`.
///
/// # Errors
/// Returns [`DelaunayError::ValidationFailed`] if more than two triangles
/// share the edge.
fn incident_triangles(triangles: &[Triangle], edge: Edge) -> DelaunayResult<[Option<usize>; 2]> {
    let mut found = [None, None];
    let mut count = 0;
    for (pos, triangle) in triangles.iter().enumerate() {
        if !triangle.has_edge(edge) {
            continue;
        }
        if count == 2 {
            return Err(DelaunayError::ValidationFailed(format!(
                "edge {:?} is shared by more than two triangles",
                edge.endpoints()
            )));
        }
        found[count] = Some(pos);
        count += 1;
    }
    Ok(found)
}

/// Whether `a`–`b` properly crosses `u`–`v`, i.e. the quadrilateral
/// `u, a, v, b` is strictly convex and can be flipped.
fn diagonals_cross<P: IndexedPredicates + ?Sized>(
    predicates: &P,
    u: usize,
    v: usize,
    a: usize,
    b: usize,
) -> bool {
    let opposite = |x: Ordering, y: Ordering| x != Ordering::Equal && x == y.reverse();
    opposite(predicates.orientation(u, v, a), predicates.orientation(u, v, b))
        && opposite(predicates.orientation(a, b, u), predicates.orientation(a, b, v))
}

/// Flip illegal edges until the worklist is empty.
///
/// `pending` seeds the worklist. Edges with fewer than two incident triangles
/// are skipped. Returns the number of flips performed.
///
/// # Errors
/// Returns [`DelaunayError::FlipLimitExceeded`] when more than `flip_limit`
/// flips are needed, and [`DelaunayError::ValidationFailed`] if the triangle
/// set is not a manifold along a checked edge.
pub fn legalize<P: IndexedPredicates + ?Sized>(
    predicates: &P,
    triangles: &mut [Triangle],
    mut pending: Vec<Edge>,
    flip_limit: usize,
) -> DelaunayResult<usize> {
    let mut flips = 0;

    while let Some(edge) = pending.pop() {
        let [Some(first), Some(second)] = incident_triangles(triangles, edge)? else {
            continue;
        };
        let (u, v) = edge.endpoints();
        let (Some(a), Some(b)) = (
            triangles[first].opposite(edge),
            triangles[second].opposite(edge),
        ) else {
            continue;
        };

        if !predicates.in_circumcircle(u, v, a, b) {
            continue;
        }
        if !diagonals_cross(predicates, u, v, a, b) {
            log::trace!("edge {u}-{v} is illegal but not flippable");
            continue;
        }

        flips += 1;
        if flips > flip_limit {
            log::warn!("legalization did not settle after {flip_limit} flips");
            return Err(DelaunayError::FlipLimitExceeded { limit: flip_limit });
        }

        log::trace!("flipping {u}-{v} to {a}-{b}");
        triangles[first] = Triangle::new(a, b, u);
        triangles[second] = Triangle::new(a, b, v);
        pending.extend([
            Edge::new(a, u),
            Edge::new(u, b),
            Edge::new(b, v),
            Edge::new(v, a),
        ]);
    }

    Ok(flips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mesh::Point;

    // Convex quadrilateral whose short diagonal is 1-3.
    fn kite() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, -0.5),
            Point::new(4.0, 0.0),
            Point::new(2.0, 0.5),
        ]
    }

    #[test]
    fn test_illegal_edge_is_flipped() {
        let points = kite();
        let mut triangles = vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)];
        let flips = legalize(points.as_slice(), &mut triangles, vec![Edge::new(0, 2)], 10)
            .expect("legalization should settle");
        assert_eq!(flips, 1);
        triangles.sort_unstable();
        assert_eq!(triangles, vec![Triangle::new(0, 1, 3), Triangle::new(1, 2, 3)]);
    }

    #[test]
    fn test_legal_edge_is_kept() {
        let points = kite();
        let mut triangles = vec![Triangle::new(0, 1, 3), Triangle::new(1, 2, 3)];
        let flips = legalize(points.as_slice(), &mut triangles, vec![Edge::new(1, 3)], 10)
            .expect("legalization should settle");
        assert_eq!(flips, 0);
        assert_eq!(triangles, vec![Triangle::new(0, 1, 3), Triangle::new(1, 2, 3)]);
    }

    #[test]
    fn test_boundary_edge_is_skipped() {
        let points = kite();
        let mut triangles = vec![Triangle::new(0, 1, 2)];
        let flips = legalize(points.as_slice(), &mut triangles, vec![Edge::new(0, 1)], 10)
            .expect("legalization should settle");
        assert_eq!(flips, 0);
    }

    #[test]
    fn test_non_convex_quad_is_not_flipped() {
        // 3 lies inside triangle 0-1-2, so 1-3 does not cross 0-2
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(2.0, 1.0),
        ];
        assert!(!diagonals_cross(points.as_slice(), 0, 2, 1, 3));
        assert!(diagonals_cross(kite().as_slice(), 0, 2, 1, 3));
    }

    #[test]
    fn test_flip_limit() {
        let points = kite();
        let mut triangles = vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)];
        let result = legalize(points.as_slice(), &mut triangles, vec![Edge::new(0, 2)], 0);
        assert_eq!(result, Err(DelaunayError::FlipLimitExceeded { limit: 0 }));
    }

    #[test]
    fn test_non_manifold_edge_rejected() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.5, 1.0),
            Point::new(0.5, -1.0),
            Point::new(0.5, 2.0),
        ];
        let mut triangles = vec![
            Triangle::new(0, 1, 2),
            Triangle::new(0, 1, 3),
            Triangle::new(0, 1, 4),
        ];
        let result = legalize(points.as_slice(), &mut triangles, vec![Edge::new(0, 1)], 10);
        assert!(matches!(result, Err(DelaunayError::ValidationFailed(_))));
    }
}
