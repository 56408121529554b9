//! Core traits shared by the triangulators.
//!
//! The coordinate scalar abstracts over the float type; the `Triangulator`
//! trait is the seam both algorithms sit behind, so callers (the CLI, the
//! benchmarks, the cross-validation tests) never depend on either one directly.

use super::mesh::{Point, Triangulation};
use crate::errors::DelaunayResult;

/// Core numeric trait for coordinates in geometric calculations
pub trait CoordinateScalar:
    Clone + Copy + PartialEq + PartialOrd + std::fmt::Debug + 'static + num_traits::Float
{
}

impl<T> CoordinateScalar for T where
    T: Clone + Copy + PartialEq + PartialOrd + std::fmt::Debug + 'static + num_traits::Float
{
}

/// A Delaunay triangulation algorithm.
///
/// Both implementations honour the same contract: given distinct points in
/// general position, return every Delaunay triangle exactly once. Fewer than
/// three points yield an empty triangulation rather than an error.
pub trait Triangulator<T: CoordinateScalar> {
    /// Algorithm identifier for logging and reports
    fn name(&self) -> &'static str;

    /// Triangulate the given points.
    ///
    /// # Errors
    /// Returns an error if an internal invariant of the algorithm breaks,
    /// which only happens on input violating the general-position precondition.
    fn triangulate(&mut self, points: &[Point<T>]) -> DelaunayResult<Triangulation<T>>;
}
