//! Geometric predicates.
//!
//! Plain floating-point evaluation: inputs are assumed to be in general
//! position, so no exact or adaptive arithmetic is attempted. A near-degenerate
//! configuration can flip a sign; that is a precondition violation, not a bug.

use super::mesh::Point;
use super::traits::CoordinateScalar;
use std::cmp::Ordering;

/// Twice the signed area of triangle `a`, `b`, `c`.
///
/// Positive iff `a → b → c` turns counter-clockwise, zero iff collinear.
#[inline]
#[must_use]
pub fn orient<T: CoordinateScalar>(a: Point<T>, b: Point<T>, c: Point<T>) -> T {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// The lifted-paraboloid determinant of `a`, `b`, `c`, `d`.
///
/// Equal to the 4×4 determinant with rows `[x, y, x² + y², 1]`, evaluated in
/// its translated 3×3 form. Positive iff `d` lies inside the circumcircle of a
/// counter-clockwise `a, b, c`; the sign flips for a clockwise triangle.
#[must_use]
pub fn incircle_det<T: CoordinateScalar>(a: Point<T>, b: Point<T>, c: Point<T>, d: Point<T>) -> T {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    adx * (bdy * clift - cdy * blift) - ady * (bdx * clift - cdx * blift)
        + alift * (bdx * cdy - cdx * bdy)
}

/// Whether `d` lies strictly inside the circumcircle of `a`, `b`, `c`.
///
/// Independent of the orientation of the triangle. Points on the circle are
/// not inside.
#[must_use]
pub fn in_circle<T: CoordinateScalar>(a: Point<T>, b: Point<T>, c: Point<T>, d: Point<T>) -> bool {
    let det = incircle_det(a, b, c, d);
    if orient(a, b, c) > T::zero() {
        det > T::zero()
    } else {
        det < T::zero()
    }
}

/// The angle ∠qpr at `p`, in `[0, π]`.
///
/// Returns negative infinity when either leg has zero length, so a duplicate
/// point is never the maximum.
#[must_use]
pub fn angle<T: CoordinateScalar>(p: Point<T>, q: Point<T>, r: Point<T>) -> T {
    let (v1x, v1y) = (q.x - p.x, q.y - p.y);
    let (v2x, v2y) = (r.x - p.x, r.y - p.y);
    let len1 = v1x.hypot(v1y);
    let len2 = v2x.hypot(v2y);
    if len1 == T::zero() || len2 == T::zero() {
        return T::neg_infinity();
    }
    let cos_theta = (v1x * v2x + v1y * v2y) / (len1 * len2);
    cos_theta.max(-T::one()).min(T::one()).acos()
}

/// Squared Euclidean distance.
#[inline]
#[must_use]
pub fn dist2<T: CoordinateScalar>(p: Point<T>, q: Point<T>) -> T {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

/// Orientation and in-circle tests addressed by vertex index.
///
/// Implemented for plain point slices and for the incremental builder's
/// arena, whose super-triangle corners have no finite coordinates.
pub trait IndexedPredicates {
    /// Sign of the orientation of `a`, `b`, `c`; `Greater` is counter-clockwise.
    fn orientation(&self, a: usize, b: usize, c: usize) -> Ordering;

    /// Whether vertex `d` lies strictly inside the circumcircle of `a`, `b`, `c`.
    fn in_circumcircle(&self, a: usize, b: usize, c: usize, d: usize) -> bool;
}

impl<T: CoordinateScalar> IndexedPredicates for [Point<T>] {
    fn orientation(&self, a: usize, b: usize, c: usize) -> Ordering {
        orient(self[a], self[b], self[c])
            .partial_cmp(&T::zero())
            .unwrap_or(Ordering::Equal)
    }

    fn in_circumcircle(&self, a: usize, b: usize, c: usize, d: usize) -> bool {
        in_circle(self[a], self[b], self[c], self[d])
    }
}
