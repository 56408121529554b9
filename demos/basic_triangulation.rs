//! Basic example of using the constant-workspace Delaunay library
//!
//! This example shows how to:
//! - Generate a seeded point set in general position
//! - Triangulate it with both algorithms
//! - Stream the walker's triangles without collecting them
//! - Validate and compare the results

use constant_workspace_delaunay::{
    ConstantWorkspaceWalker, IncrementalBuilder, PointGenerator, Triangulator, compare,
    validate_triangulation,
};
use log::{LevelFilter, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    info!("Starting basic triangulation example");

    let count = 48;
    let seed = 2024;
    let points = PointGenerator::with_seed(seed).bound(50.0).generate(count)?;
    info!("Generated {count} points with seed {seed}");

    // Stream triangles straight out of the walker
    let mut walker = ConstantWorkspaceWalker::new();
    let mut streamed = 0;
    walker.for_each_triangle(&points, |triangle| {
        if streamed < 3 {
            info!("  first triangles: {:?}", triangle.vertices());
        }
        streamed += 1;
    });
    info!("Walker streamed {streamed} triangles");

    let walked = walker.triangulate(&points)?;
    let stats = walker.statistics();
    info!(
        "Walker: {} strict apexes, {} hull-gap fallbacks",
        stats.strict_apexes, stats.fallback_apexes
    );

    let mut builder = IncrementalBuilder::with_seed(seed);
    let built = builder.triangulate(&points)?;
    let insertion = builder.statistics();
    info!(
        "Builder: {} flips, average cavity {:.2}, peak working set {} triangles",
        insertion.flips_performed,
        insertion.average_cavity_size(),
        insertion.peak_triangles
    );

    validate_triangulation(&walked)?;
    validate_triangulation(&built)?;
    compare(&walked, &built)?;

    info!("Final triangulation:");
    info!("  Vertices: {}", walked.vertex_count());
    info!("  Edges: {}", walked.edge_count());
    info!("  Triangles: {}", walked.triangle_count());
    info!("  Hull edges: {}", walked.hull_edges().len());
    info!("  Area: {:.3}", walked.area());

    info!("Example completed successfully!");
    Ok(())
}
