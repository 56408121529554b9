//! The incremental builder's vertex arena: the input points followed by three
//! super-triangle corners placed at infinity.
//!
//! Coordinates are taken relative to the centre of the input's bounding box,
//! and corner `k` sits at `M·direction[k]` for a parameter `M` that grows
//! without bound. Every coordinate is then a polynomial in `M` of degree at
//! most one. The orientation determinant has degree at most two, and the
//! lifted 4×4 in-circle determinant degree at most four. A predicate reports
//! the sign its determinant settles on for large `M`, which is the sign of
//! the highest non-zero coefficient.
//!
//! In that limit no corner is ever inside the circumcircle of three input
//! points, so hull triangles of near-flat input are never swallowed. With
//! a finite super-triangle of any size, some input can make them disappear.

use crate::geometry::mesh::Point;
use crate::geometry::predicates::IndexedPredicates;
use crate::geometry::traits::CoordinateScalar;
use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

const DEGREE: usize = 4;

/// Polynomial in `M`, lowest coefficient first.
///
/// Products drop terms above degree four; no determinant here produces them.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Poly<T>([T; DEGREE + 1]);

impl<T: CoordinateScalar> Poly<T> {
    fn linear(constant: T, slope: T) -> Self {
        let mut coefficients = [T::zero(); DEGREE + 1];
        coefficients[0] = constant;
        coefficients[1] = slope;
        Self(coefficients)
    }

    fn constant(value: T) -> Self {
        Self::linear(value, T::zero())
    }

    /// Sign for all sufficiently large `M`.
    fn eventual_sign(&self) -> Ordering {
        self.0
            .iter()
            .rev()
            .find(|&&c| c != T::zero())
            .and_then(|c| c.partial_cmp(&T::zero()))
            .unwrap_or(Ordering::Equal)
    }
}

impl<T: CoordinateScalar> Add for Poly<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<T: CoordinateScalar> Sub for Poly<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<T: CoordinateScalar> Mul for Poly<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut product = [T::zero(); DEGREE + 1];
        for (i, &a) in self.0.iter().enumerate() {
            for (j, &b) in rhs.0.iter().enumerate().take(DEGREE + 1 - i) {
                product[i + j] = product[i + j] + a * b;
            }
        }
        Self(product)
    }
}

/// One row `[x, y, x² + y²]` of the lifted determinant.
#[derive(Debug, Clone, Copy)]
struct Lifted<T> {
    x: Poly<T>,
    y: Poly<T>,
    lift: Poly<T>,
}

fn det3<T: CoordinateScalar>(r0: Lifted<T>, r1: Lifted<T>, r2: Lifted<T>) -> Poly<T> {
    r0.x * (r1.y * r2.lift - r1.lift * r2.y) - r0.y * (r1.x * r2.lift - r1.lift * r2.x)
        + r0.lift * (r1.x * r2.y - r1.y * r2.x)
}

/// Input points plus three super-triangle corners at infinity.
///
/// Corners take arena indices `n`, `n + 1` and `n + 2`, where `n` is the
/// number of input points, and wind counter-clockwise in that order.
#[derive(Debug, Clone, Copy)]
pub struct SuperTriangleArena<'a, T: CoordinateScalar> {
    points: &'a [Point<T>],
    center: Point<T>,
    directions: [Point<T>; 3],
}

impl<'a, T: CoordinateScalar> SuperTriangleArena<'a, T> {
    /// Arena over `points`, which should be non-empty.
    #[must_use]
    pub fn new(points: &'a [Point<T>]) -> Self {
        let (min, max) = points.iter().fold(
            (
                Point::new(T::infinity(), T::infinity()),
                Point::new(T::neg_infinity(), T::neg_infinity()),
            ),
            |(lo, hi), p| {
                (
                    Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        );
        let two = T::one() + T::one();
        let span = (max.x - min.x).max(max.y - min.y).max(T::one());
        Self {
            points,
            center: Point::new((min.x + max.x) / two, (min.y + max.y) / two),
            directions: [
                Point::new(-span, -span),
                Point::new(span, -span),
                Point::new(T::zero(), span),
            ],
        }
    }

    /// The input points
    #[must_use]
    pub const fn points(&self) -> &'a [Point<T>] {
        self.points
    }

    /// Arena indices of the three corners, counter-clockwise
    #[must_use]
    pub const fn corners(&self) -> [usize; 3] {
        let n = self.points.len();
        [n, n + 1, n + 2]
    }

    /// Whether `v` is a super-triangle corner.
    #[must_use]
    pub const fn is_corner(&self, v: usize) -> bool {
        v >= self.points.len()
    }

    fn coordinates(&self, v: usize) -> (Poly<T>, Poly<T>) {
        match v.checked_sub(self.points.len()) {
            None => {
                let p = self.points[v];
                (
                    Poly::constant(p.x - self.center.x),
                    Poly::constant(p.y - self.center.y),
                )
            }
            Some(k) => {
                let d = self.directions[k];
                (Poly::linear(T::zero(), d.x), Poly::linear(T::zero(), d.y))
            }
        }
    }

    fn lifted(&self, v: usize) -> Lifted<T> {
        let (x, y) = self.coordinates(v);
        Lifted {
            x,
            y,
            lift: x * x + y * y,
        }
    }
}

impl<T: CoordinateScalar> IndexedPredicates for SuperTriangleArena<'_, T> {
    fn orientation(&self, a: usize, b: usize, c: usize) -> Ordering {
        if ![a, b, c].iter().any(|&v| self.is_corner(v)) {
            return self.points.orientation(a, b, c);
        }
        let (ax, ay) = self.coordinates(a);
        let (bx, by) = self.coordinates(b);
        let (cx, cy) = self.coordinates(c);
        ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).eventual_sign()
    }

    fn in_circumcircle(&self, a: usize, b: usize, c: usize, d: usize) -> bool {
        if ![a, b, c, d].iter().any(|&v| self.is_corner(v)) {
            return self.points.in_circumcircle(a, b, c, d);
        }
        let orientation = self.orientation(a, b, c);
        if orientation == Ordering::Equal {
            return false;
        }
        let [ra, rb, rc, rd] = [a, b, c, d].map(|v| self.lifted(v));
        // cofactor expansion of the 4×4 determinant along its column of ones
        let det = det3(ra, rb, rc) - det3(rb, rc, rd) + det3(ra, rc, rd) - det3(ra, rb, rd);
        det.eventual_sign() == orientation
    }
}
