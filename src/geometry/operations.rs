//! Triangulation checks that work for either algorithm's output.
//!
//! These are the properties both triangulators must satisfy on
//! general-position input: Delaunay legality, hull coverage and edge sharing.

use super::mesh::{Point, Triangulation};
use super::predicates::{in_circle, orient};
use super::traits::CoordinateScalar;
use crate::errors::{DelaunayError, DelaunayResult};
use std::cmp::Ordering;

/// Relative tolerance for comparing triangulated area with hull area
pub const AREA_TOLERANCE: f64 = 1e-9;

/// Unsigned area of triangle `a`, `b`, `c`.
#[must_use]
pub fn triangle_area<T: CoordinateScalar>(a: Point<T>, b: Point<T>, c: Point<T>) -> T {
    orient(a, b, c).abs() / (T::one() + T::one())
}

/// Unsigned area of a simple polygon given in vertex order (shoelace formula).
///
/// Vertices are taken relative to the first one, so the result keeps its
/// precision for small polygons far from the origin.
#[must_use]
pub fn polygon_area<T: CoordinateScalar>(polygon: &[Point<T>]) -> T {
    if polygon.len() < 3 {
        return T::zero();
    }
    let n = polygon.len();
    let origin = polygon[0];
    let twice = (1..n - 1).fold(T::zero(), |acc, i| {
        acc + orient(origin, polygon[i], polygon[i + 1])
    });
    twice.abs() / (T::one() + T::one())
}

/// Indices of the convex hull in counter-clockwise order (monotone chain).
///
/// Collinear boundary points are dropped.
#[must_use]
pub fn convex_hull_indices<T: CoordinateScalar>(points: &[Point<T>]) -> Vec<usize> {
    if points.len() < 3 {
        return (0..points.len()).collect();
    }

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (points[i], points[j]);
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });

    let mut hull: Vec<usize> = Vec::with_capacity(2 * points.len());
    // lower chain
    for &idx in &order {
        while hull.len() >= 2
            && orient(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[idx],
            ) <= T::zero()
        {
            hull.pop();
        }
        hull.push(idx);
    }
    // upper chain
    let lower_len = hull.len() + 1;
    for &idx in order.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && orient(
                points[hull[hull.len() - 2]],
                points[hull[hull.len() - 1]],
                points[idx],
            ) <= T::zero()
        {
            hull.pop();
        }
        hull.push(idx);
    }
    // the last point repeats the first
    hull.pop();
    hull
}

/// Area of the convex hull of `points`.
#[must_use]
pub fn convex_hull_area<T: CoordinateScalar>(points: &[Point<T>]) -> T {
    let hull: Vec<Point<T>> = convex_hull_indices(points)
        .into_iter()
        .map(|i| points[i])
        .collect();
    polygon_area(&hull)
}

/// Whether no input point lies strictly inside any triangle's circumcircle.
#[must_use]
pub fn is_delaunay<T: CoordinateScalar>(triangulation: &Triangulation<T>) -> bool {
    first_illegal(triangulation).is_none()
}

fn first_illegal<T: CoordinateScalar>(
    triangulation: &Triangulation<T>,
) -> Option<(usize, [usize; 3])> {
    let points = triangulation.points();
    triangulation.triangles().iter().find_map(|triangle| {
        let [a, b, c] = triangulation.triangle_points(triangle);
        (0..points.len())
            .filter(|&v| !triangle.contains(v))
            .find(|&v| in_circle(a, b, c, points[v]))
            .map(|v| (v, triangle.vertices()))
    })
}

/// Check every structural and Delaunay property of a triangulation.
///
/// For three or more input points: no degenerate triangle, every triangle
/// Delaunay-legal, every edge shared by one or two triangles, hull edges
/// matching the convex hull, and total area equal to the hull area.
///
/// # Errors
/// Returns [`DelaunayError::DegeneratePosition`] for a zero-area triangle and
/// [`DelaunayError::ValidationFailed`] for any other violated property.
pub fn validate_triangulation<T: CoordinateScalar>(
    triangulation: &Triangulation<T>,
) -> DelaunayResult<()> {
    let points = triangulation.points();
    if points.len() < 3 {
        return if triangulation.is_empty() {
            Ok(())
        } else {
            Err(DelaunayError::ValidationFailed(format!(
                "{} triangles over fewer than three points",
                triangulation.triangle_count()
            )))
        };
    }

    for triangle in triangulation.triangles() {
        let [a, b, c] = triangulation.triangle_points(triangle);
        if orient(a, b, c) == T::zero() {
            return Err(DelaunayError::DegeneratePosition(format!(
                "triangle {:?} has collinear vertices",
                triangle.vertices()
            )));
        }
    }

    if let Some((v, triangle)) = first_illegal(triangulation) {
        return Err(DelaunayError::ValidationFailed(format!(
            "point {v} lies inside the circumcircle of triangle {triangle:?}"
        )));
    }

    let edges = triangulation.edges();
    if let Some((edge, count)) = edges.iter().find(|&(_, &count)| count > 2) {
        return Err(DelaunayError::ValidationFailed(format!(
            "edge {:?} shared by {count} triangles",
            edge.endpoints()
        )));
    }

    let hull = convex_hull_indices(points);
    let hull_edge_count = triangulation.hull_edges().len();
    if hull.len() >= 3 && hull_edge_count != hull.len() {
        return Err(DelaunayError::ValidationFailed(format!(
            "{hull_edge_count} boundary edges but the convex hull has {} sides",
            hull.len()
        )));
    }

    let hull_area = convex_hull_area(points);
    let covered = triangulation.area();
    let tolerance = T::from(AREA_TOLERANCE).unwrap_or_else(T::epsilon);
    if (covered - hull_area).abs() > tolerance * hull_area.max(T::one()) {
        return Err(DelaunayError::ValidationFailed(format!(
            "triangles cover {covered:?} but the convex hull has area {hull_area:?}"
        )));
    }

    Ok(())
}
