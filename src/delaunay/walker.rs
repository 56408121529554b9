//! Constant-workspace Delaunay triangulation.
//!
//! The walker never builds an adjacency structure. For every base point it
//! starts from the nearest neighbour (always a Delaunay edge) and rotates
//! clockwise around the base point, rediscovering each incident Delaunay
//! triangle with a brute-force apex search over all points. Apart from the
//! input slice and whatever the caller does with emitted triangles, the
//! workspace is a fixed handful of indices and counters.
//!
//! # Complexity
//!
//! - Time: O(n) per apex search, O(n³) worst case overall
//! - Auxiliary space: O(1)

use crate::errors::{DelaunayError, DelaunayResult};
use crate::geometry::mesh::{Point, Triangle, Triangulation};
use crate::geometry::predicates::{angle, dist2, in_circle, orient};
use crate::geometry::traits::{CoordinateScalar, Triangulator};

/// Result of a clockwise apex search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apex {
    /// Index of the apex point
    pub index: usize,
    /// `true` when found on the right of the edge (a real Delaunay triangle),
    /// `false` when the edge is a hull edge and the maximum-angle fallback
    /// jumped across the hull gap
    pub is_strict: bool,
}

/// Counters collected during a walk. Fixed size, so they do not break the
/// constant-workspace property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStatistics {
    /// Base points whose rotation was started
    pub base_points_visited: u64,
    /// Base points skipped because the first-edge search failed
    pub base_points_skipped: u64,
    /// Rotations ended early by a failed apex search
    pub rotations_aborted: u64,
    /// Rotations cut off by the step guard
    pub rotations_cut_off: u64,
    /// Apexes found strictly to the right of the edge
    pub strict_apexes: u64,
    /// Apexes found through the maximum-angle fallback
    pub fallback_apexes: u64,
    /// Triangles handed to the caller
    pub triangles_emitted: u64,
}

/// Find the point nearest to `base`; `base`–nearest is always a Delaunay edge.
///
/// # Errors
/// Returns [`DelaunayError::NoCandidate`] if there is no other point.
pub fn first_delaunay_edge<T: CoordinateScalar>(
    points: &[Point<T>],
    base: usize,
) -> DelaunayResult<usize> {
    let p = points[base];
    let mut best: Option<(usize, T)> = None;
    for (j, &q) in points.iter().enumerate() {
        if j == base {
            continue;
        }
        let d = dist2(p, q);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((j, d));
        }
    }
    best.map(|(j, _)| j).ok_or(DelaunayError::NoCandidate {
        base,
        edge_end: None,
    })
}

/// Find the apex of the Delaunay triangle clockwise of directed edge `base → end`.
///
/// Candidates are the points strictly right of the edge; the apex is the one
/// whose circle with the edge contains no other candidate. Circles through a
/// fixed chord are nested on each side of it, so a single pass that swaps in
/// any candidate falling inside the current circle finds it. When nothing is
/// on the right the edge is a hull edge and the point maximising ∠(end, base, r)
/// is returned instead, marked non-strict.
///
/// # Errors
/// Returns [`DelaunayError::NoCandidate`] if no point qualifies either way.
pub fn clockwise_next_apex<T: CoordinateScalar>(
    points: &[Point<T>],
    base: usize,
    end: usize,
) -> DelaunayResult<Apex> {
    let (p, q) = (points[base], points[end]);

    let mut candidate: Option<usize> = None;
    for (r, &point) in points.iter().enumerate() {
        if r == base || r == end || orient(p, q, point) >= T::zero() {
            continue;
        }
        match candidate {
            Some(current) if !in_circle(p, q, points[current], point) => {}
            _ => candidate = Some(r),
        }
    }
    if let Some(index) = candidate {
        return Ok(Apex {
            index,
            is_strict: true,
        });
    }

    let mut widest: Option<(usize, T)> = None;
    for (r, &point) in points.iter().enumerate() {
        if r == base || r == end {
            continue;
        }
        let theta = angle(p, q, point);
        if theta == T::neg_infinity() {
            continue;
        }
        if widest.is_none_or(|(_, best)| theta > best) {
            widest = Some((r, theta));
        }
    }
    log::trace!("edge {base}->{end} is a hull edge, falling back to widest angle");
    widest
        .map(|(index, _)| Apex {
            index,
            is_strict: false,
        })
        .ok_or(DelaunayError::NoCandidate {
            base,
            edge_end: Some(end),
        })
}

/// Constant-workspace triangulator
#[derive(Debug, Clone, Default)]
pub struct ConstantWorkspaceWalker {
    stats: WalkStatistics,
}

impl ConstantWorkspaceWalker {
    /// Creates a new walker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent walk
    #[must_use]
    pub const fn statistics(&self) -> WalkStatistics {
        self.stats
    }

    /// Walk every base point and hand each Delaunay triangle to `emit` as
    /// soon as it is found.
    ///
    /// A triangle is emitted only from its minimum-index vertex and only when
    /// its apex came from the strict branch, so each one is emitted once.
    /// Nothing is allocated; a failed search only abandons the current base
    /// point. Fewer than three points emit nothing.
    pub fn for_each_triangle<T, F>(&mut self, points: &[Point<T>], mut emit: F)
    where
        T: CoordinateScalar,
        F: FnMut(Triangle),
    {
        self.stats = WalkStatistics::default();
        if points.len() < 3 {
            return;
        }

        for base in 0..points.len() {
            let first = match first_delaunay_edge(points, base) {
                Ok(first) => first,
                Err(e) => {
                    log::debug!("skipping base point: {e}");
                    self.stats.base_points_skipped += 1;
                    continue;
                }
            };
            self.stats.base_points_visited += 1;

            // A vertex has at most n - 1 neighbours plus one hull gap.
            let mut steps_left = points.len();
            let mut end = first;
            loop {
                if steps_left == 0 {
                    log::warn!("rotation around {base} did not close, input is degenerate");
                    self.stats.rotations_cut_off += 1;
                    break;
                }
                steps_left -= 1;

                let apex = match clockwise_next_apex(points, base, end) {
                    Ok(apex) => apex,
                    Err(e) => {
                        log::debug!("aborting rotation: {e}");
                        self.stats.rotations_aborted += 1;
                        break;
                    }
                };

                if apex.is_strict {
                    self.stats.strict_apexes += 1;
                    if base < end && base < apex.index {
                        self.stats.triangles_emitted += 1;
                        emit(Triangle::new(base, end, apex.index));
                    }
                } else {
                    self.stats.fallback_apexes += 1;
                }

                end = apex.index;
                if end == first {
                    break;
                }
            }
        }

        log::debug!(
            "walk finished: {} triangles, {} strict / {} fallback apexes",
            self.stats.triangles_emitted,
            self.stats.strict_apexes,
            self.stats.fallback_apexes
        );
    }
}

impl<T: CoordinateScalar> Triangulator<T> for ConstantWorkspaceWalker {
    fn name(&self) -> &'static str {
        "constant-workspace"
    }

    fn triangulate(&mut self, points: &[Point<T>]) -> DelaunayResult<Triangulation<T>> {
        let mut triangles = Vec::new();
        self.for_each_triangle(points, |triangle| triangles.push(triangle));
        Ok(Triangulation::new(points.to_vec(), triangles))
    }
}
