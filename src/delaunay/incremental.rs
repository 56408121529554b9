//! Incremental (Bowyer-Watson) Delaunay triangulation.
//!
//! Points are inserted one at a time into an explicit triangle set that
//! starts as a single super-triangle enclosing the input. Each insertion
//! carves out the cavity of triangles whose circumcircles contain the new
//! point, re-fans the cavity boundary to the point, and runs an edge-flip
//! legalization pass over the new triangles. Triangles touching the
//! super-triangle are dropped at the end.
//!
//! The super-triangle corners sit at infinity (see [`super::super_triangle`]),
//! so the result is the Delaunay triangulation of the input however thin its
//! hull is.
//!
//! # Complexity
//!
//! - Time: O(n) triangles scanned per insertion, O(n²) overall
//! - Space: O(n)

use super::legalize::legalize;
use super::super_triangle::SuperTriangleArena;
use crate::errors::{DelaunayError, DelaunayResult};
use crate::geometry::mesh::{Edge, Point, Triangle, Triangulation};
use crate::geometry::operations::convex_hull_indices;
use crate::geometry::predicates::IndexedPredicates;
use crate::geometry::traits::{CoordinateScalar, Triangulator};
use num_traits::cast::NumCast;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Phases of a single point insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionPhase {
    /// Collecting triangles whose circumcircle contains the point
    Scanning,
    /// Finding the cavity boundary edges
    ExtractingBoundary,
    /// Replacing the cavity with a fan around the point
    Rebuilding,
    /// Flipping illegal edges around the new triangles
    Legalizing,
    /// Insertion complete
    Done,
}

impl fmt::Display for InsertionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scanning => "scanning",
            Self::ExtractingBoundary => "extracting boundary",
            Self::Rebuilding => "rebuilding",
            Self::Legalizing => "legalizing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Statistics tracking for insertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionStatistics {
    /// Points inserted
    pub points_inserted: u64,
    /// Bad triangles removed, summed over all insertions
    pub bad_triangles_found: u64,
    /// Cavity boundary edges re-fanned, summed over all insertions
    pub cavity_edges: u64,
    /// Edge flips performed by legalization
    pub flips_performed: u64,
    /// Largest size of the working triangle set
    pub peak_triangles: usize,
}

impl InsertionStatistics {
    /// Creates a new statistics tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Average number of bad triangles per insertion.
    #[must_use]
    pub fn average_cavity_size(&self) -> f64 {
        if self.points_inserted == 0 {
            return 0.0;
        }
        let bad: f64 = NumCast::from(self.bad_triangles_found).unwrap_or(0.0);
        let inserted: f64 = NumCast::from(self.points_inserted).unwrap_or(1.0);
        bad / inserted
    }
}

/// Working state owned by one run: the arena of input points and
/// super-triangle corners, and the mutable triangle set.
struct Workspace<'a, T: CoordinateScalar> {
    arena: SuperTriangleArena<'a, T>,
    triangles: Vec<Triangle>,
}

impl<'a, T: CoordinateScalar> Workspace<'a, T> {
    /// Bootstrap with the super-triangle as the only triangle.
    fn bootstrap(input: &'a [Point<T>]) -> Self {
        let arena = SuperTriangleArena::new(input);
        let [s0, s1, s2] = arena.corners();
        Self {
            arena,
            triangles: vec![Triangle::new(s0, s1, s2)],
        }
    }

    fn cavity_error(point: usize, phase: InsertionPhase, detail: &str) -> DelaunayError {
        DelaunayError::CavityInvariant {
            point,
            detail: format!("{detail} (while {phase})"),
        }
    }

    /// Insert the point at arena index `p`.
    fn insert(
        &mut self,
        p: usize,
        flip_limit: usize,
        stats: &mut InsertionStatistics,
    ) -> DelaunayResult<()> {
        let mut phase = InsertionPhase::Scanning;
        let bad: Vec<usize> = self
            .triangles
            .iter()
            .enumerate()
            .filter_map(|(pos, t)| {
                let [a, b, c] = t.vertices();
                self.arena.in_circumcircle(a, b, c, p).then_some(pos)
            })
            .collect();
        if bad.is_empty() {
            return Err(Self::cavity_error(
                p,
                phase,
                "point lies in no circumcircle (duplicate point)",
            ));
        }

        phase = InsertionPhase::ExtractingBoundary;
        log::trace!("point {p}: {phase}, {} bad triangles", bad.len());
        let mut edge_use: BTreeMap<Edge, usize> = BTreeMap::new();
        for &pos in &bad {
            for edge in self.triangles[pos].edges() {
                *edge_use.entry(edge).or_insert(0) += 1;
            }
        }
        let boundary: Vec<Edge> = edge_use
            .into_iter()
            .filter_map(|(edge, count)| (count == 1).then_some(edge))
            .collect();

        phase = InsertionPhase::Rebuilding;
        // positions are ascending, so removing back to front keeps them valid
        for &pos in bad.iter().rev() {
            self.triangles.swap_remove(pos);
        }

        for &edge in &boundary {
            let (u, v) = edge.endpoints();
            let retained = self.triangles.iter().filter(|t| t.has_edge(edge)).count();
            let outer = self.arena.is_corner(u) && self.arena.is_corner(v);
            if retained > 1 || (retained == 0 && !outer) {
                return Err(Self::cavity_error(
                    p,
                    phase,
                    &format!("boundary edge {u}-{v} borders {retained} retained triangles"),
                ));
            }
            if self.arena.orientation(u, v, p) == Ordering::Equal {
                return Err(Self::cavity_error(
                    p,
                    phase,
                    &format!("point is collinear with boundary edge {u}-{v}"),
                ));
            }
        }

        let first_new = self.triangles.len();
        self.triangles.extend(boundary.iter().map(|e| {
            let (u, v) = e.endpoints();
            Triangle::new(u, v, p)
        }));
        stats.peak_triangles = stats.peak_triangles.max(self.triangles.len());

        phase = InsertionPhase::Legalizing;
        let pending: Vec<Edge> = self.triangles[first_new..]
            .iter()
            .flat_map(Triangle::edges)
            .collect();
        let flips = legalize(&self.arena, &mut self.triangles, pending, flip_limit)?;
        if flips > 0 {
            log::debug!("point {p}: {phase} flipped {flips} edges");
        }

        phase = InsertionPhase::Done;
        log::trace!("point {p}: {phase}");
        stats.points_inserted += 1;
        stats.bad_triangles_found += bad.len() as u64;
        stats.cavity_edges += boundary.len() as u64;
        stats.flips_performed += flips as u64;
        Ok(())
    }

    /// Drop every triangle touching a super-triangle corner.
    ///
    /// # Errors
    /// Returns [`DelaunayError::ValidationFailed`] if the remaining triangles
    /// do not close up along the convex hull of the input.
    fn finalize(mut self) -> DelaunayResult<Triangulation<T>> {
        let arena = self.arena;
        self.triangles
            .retain(|t| !t.vertices().iter().any(|&v| arena.is_corner(v)));
        let triangulation = Triangulation::new(arena.points().to_vec(), self.triangles);

        let hull_sides = convex_hull_indices(arena.points()).len();
        let boundary = triangulation.hull_edges().len();
        if hull_sides >= 3 && boundary != hull_sides {
            return Err(DelaunayError::ValidationFailed(format!(
                "incremental build left {boundary} boundary edges but the convex hull has {hull_sides} sides"
            )));
        }
        Ok(triangulation)
    }
}

/// Incremental triangulator with randomized insertion order
#[derive(Debug)]
pub struct IncrementalBuilder {
    flip_limit: Option<usize>,
    rng: StdRng,
    stats: InsertionStatistics,
}

impl Default for IncrementalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalBuilder {
    /// Creates a builder whose shuffle is seeded from the process-wide generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates a builder with a deterministic insertion shuffle.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            flip_limit: None,
            rng: StdRng::seed_from_u64(seed),
            stats: InsertionStatistics::new(),
        }
    }

    /// Sets the per-insertion flip budget (default 8n + 64).
    #[must_use]
    pub const fn flip_limit(mut self, limit: usize) -> Self {
        self.flip_limit = Some(limit);
        self
    }

    /// Statistics of the most recent run
    #[must_use]
    pub const fn statistics(&self) -> InsertionStatistics {
        self.stats
    }
}

impl<T: CoordinateScalar> Triangulator<T> for IncrementalBuilder {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn triangulate(&mut self, points: &[Point<T>]) -> DelaunayResult<Triangulation<T>> {
        self.stats = InsertionStatistics::new();
        let n = points.len();
        if n < 3 {
            return Ok(Triangulation::empty(points.to_vec()));
        }

        let flip_limit = self.flip_limit.unwrap_or(8 * n + 64);

        let mut workspace = Workspace::bootstrap(points);
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);

        for p in order {
            workspace.insert(p, flip_limit, &mut self.stats)?;
        }

        let triangulation = workspace.finalize()?;
        log::debug!(
            "incremental build finished: {} triangles, {} flips, peak working set {}",
            triangulation.triangle_count(),
            self.stats.flips_performed,
            self.stats.peak_triangles
        );
        Ok(triangulation)
    }
}
