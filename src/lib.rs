#![allow(clippy::multiple_crate_versions)]
#![warn(missing_docs)]

//! Constant-workspace Delaunay triangulation of planar point sets.
//!
//! This library provides two independent triangulators for the same problem
//! and the tools to check them against each other.
//!
//! # Key Features
//!
//! - A constant-workspace walker that rediscovers each Delaunay triangle by
//!   rotating around every base point, with O(1) auxiliary memory
//! - An incremental Bowyer-Watson builder with super-triangle bootstrap,
//!   cavity re-triangulation and worklist edge-flip legalization
//! - Validation of Delaunay legality, edge sharing and hull coverage
//! - Seeded general-position point generation and point file input
//!
//! # Example
//!
//! ```rust
//! use constant_workspace_delaunay::{ConstantWorkspaceWalker, Point, Triangulator};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(0.0, 1.0),
//! ];
//! let triangulation = ConstantWorkspaceWalker::new()
//!     .triangulate(&points)
//!     .expect("the walker never fails");
//! assert_eq!(triangulation.triangle_count(), 1);
//! ```

use std::time::Instant;

// Module declarations (avoiding mod.rs files)
/// Error types for the triangulation library.
pub mod errors;

/// Point generation and point file input.
pub mod util;

/// Command line configuration.
pub mod config;

/// Geometry primitives shared by both triangulators.
pub mod geometry {
    /// Point arena, edges, triangles and triangulations.
    pub mod mesh;
    /// Validation and area operations on triangulations.
    pub mod operations;
    /// Orientation and in-circle predicates.
    pub mod predicates;
    /// Core traits for scalars and triangulators.
    pub mod traits;
}

/// Delaunay triangulation algorithms.
pub mod delaunay {
    /// Incremental Bowyer-Watson builder.
    pub mod incremental;
    /// Worklist edge-flip legalization.
    pub mod legalize;
    /// Run results.
    pub mod report;
    /// Builder arena with the super-triangle corners at infinity.
    pub mod super_triangle;
    /// Constant-workspace walker.
    pub mod walker;
}

// Re-exports for convenience
pub use config::{Algorithm, DelaunayConfig, TestConfig};
pub use delaunay::incremental::{IncrementalBuilder, InsertionStatistics};
pub use delaunay::report::{AlgorithmRun, RunReport};
pub use delaunay::walker::{ConstantWorkspaceWalker, WalkStatistics};
pub use errors::{DelaunayError, DelaunayResult};
pub use geometry::mesh::{Edge, Point, Triangle, Triangulation};
pub use geometry::operations::{is_delaunay, validate_triangulation};
pub use geometry::traits::{CoordinateScalar, Triangulator};
pub use util::{PointGenerator, generate_general_position_points, parse_points, read_points};

/// Runs a triangulator and times it.
///
/// # Errors
///
/// Propagates any error from the triangulator.
pub fn timed_run(
    triangulator: &mut dyn Triangulator<f64>,
    points: &[Point],
) -> DelaunayResult<AlgorithmRun> {
    let start = Instant::now();
    let triangulation = triangulator.triangulate(points)?;
    let elapsed = start.elapsed();
    log::debug!(
        "{} produced {} triangles in {elapsed:?}",
        triangulator.name(),
        triangulation.triangle_count()
    );
    Ok(AlgorithmRun {
        name: triangulator.name(),
        triangulation,
        elapsed,
    })
}

/// Compares two triangulations of the same points.
///
/// # Errors
///
/// Returns [`DelaunayError::Disagreement`] if the triangle sets differ.
pub fn compare(walker: &Triangulation, incremental: &Triangulation) -> DelaunayResult<()> {
    if walker.same_triangles(incremental) {
        return Ok(());
    }
    Err(DelaunayError::Disagreement {
        walker: walker.triangle_count(),
        incremental: incremental.triangle_count(),
        differing: walker.symmetric_difference(incremental),
    })
}

/// Triangulates `points` with both algorithms, validates both results and
/// requires them to agree.
///
/// # Errors
///
/// Returns the first validation failure, a [`DelaunayError::Disagreement`],
/// or any error raised by the incremental builder.
pub fn cross_validate(points: &[Point], seed: u64) -> DelaunayResult<Triangulation> {
    let walked = ConstantWorkspaceWalker::new().triangulate(points)?;
    let built = IncrementalBuilder::with_seed(seed).triangulate(points)?;
    validate_triangulation(&walked)?;
    validate_triangulation(&built)?;
    compare(&walked, &built)?;
    Ok(walked)
}

fn load_points(config: &DelaunayConfig) -> DelaunayResult<Vec<Point>> {
    if let Some(path) = &config.input {
        log::info!("Reading points from {}", path.display());
        return read_points(path);
    }

    let count = config.points.ok_or_else(|| {
        DelaunayError::InvalidParameters("either a point count or an input file is required".to_string())
    })?;
    let generator = config
        .seed
        .map_or_else(PointGenerator::new, PointGenerator::with_seed);
    generator
        .bound(config.bound)
        .jitter(config.jitter)
        .generate(count as usize)
}

/// Runs the triangulators selected by the given configuration.
///
/// # Arguments
///
/// * `config` - Configuration parameters for the run
///
/// # Returns
///
/// A [`RunReport`] with one [`AlgorithmRun`] per triangulator and, when both
/// ran, whether they agreed.
///
/// # Errors
///
/// Returns [`DelaunayError::InvalidParameters`] for an invalid configuration,
/// input and generation errors, errors raised by the incremental builder, and
/// with cross-validation enabled a validation failure or
/// [`DelaunayError::Disagreement`].
pub fn run(config: &DelaunayConfig) -> DelaunayResult<RunReport> {
    config.validate().map_err(DelaunayError::InvalidParameters)?;

    let points = load_points(config)?;
    log::info!("Number of points: {}", points.len());
    log::info!("Algorithm: {:?}", config.algorithm);

    let mut runs = Vec::with_capacity(2);
    if config.algorithm.runs_walker() {
        let mut walker = ConstantWorkspaceWalker::new();
        runs.push(timed_run(&mut walker, &points)?);
        let stats = walker.statistics();
        log::debug!(
            "walker: {} strict and {} fallback apexes, {} rotations cut off",
            stats.strict_apexes,
            stats.fallback_apexes,
            stats.rotations_cut_off
        );
    }
    if config.algorithm.runs_incremental() {
        let mut builder = config
            .seed
            .map_or_else(IncrementalBuilder::new, IncrementalBuilder::with_seed);
        runs.push(timed_run(&mut builder, &points)?);
        let stats = builder.statistics();
        log::debug!(
            "incremental: {} flips, average cavity {:.2}, peak working set {}",
            stats.flips_performed,
            stats.average_cavity_size(),
            stats.peak_triangles
        );
    }

    let agreement = match runs.as_slice() {
        [walked, built] => Some(walked.triangulation.same_triangles(&built.triangulation)),
        _ => None,
    };

    let report = RunReport {
        point_count: points.len(),
        runs,
        agreement,
    };
    report.log_summary();

    if config.cross_validate {
        for run in &report.runs {
            validate_triangulation(&run.triangulation)?;
        }
        if let [walked, built] = report.runs.as_slice() {
            compare(&walked.triangulation, &built.triangulation)?;
        }
        log::info!("Cross-validation passed");
    }

    Ok(report)
}
