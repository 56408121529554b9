//! Script to find generator seeds whose point sets both triangulators agree on
//!
//! This script generates point sets for a range of seeds and sizes, runs
//! cross-validation on each and reports the seeds that pass.

#![allow(clippy::uninlined_format_args)]

use constant_workspace_delaunay::{PointGenerator, cross_validate};

/// Test a seed and return (vertices, edges, triangles, hull edges) if it cross-validates
fn test_seed(seed: u64, points: usize) -> Option<(usize, usize, usize, usize)> {
    let input = PointGenerator::with_seed(seed).generate(points).ok()?;
    match cross_validate(&input, seed) {
        Ok(tri) => Some((
            tri.vertex_count(),
            tri.edge_count(),
            tri.triangle_count(),
            tri.hull_edges().len(),
        )),
        Err(e) => {
            println!("  Seed {}: {}", seed, e);
            None
        }
    }
}

fn main() {
    println!("=== SEED VALIDATION FOR TRIANGULATION TESTS ===\n");

    let sizes = [8, 20, 40];

    for &points in &sizes {
        println!("Finding seeds for {} points:", points);

        let mut good_seeds = Vec::new();
        for seed in 1..=50 {
            if let Some((v, e, f, h)) = test_seed(seed, points) {
                good_seeds.push(seed);
                println!("  Seed {}: V={}, E={}, F={}, hull={}", seed, v, e, f, h);

                // Stop after finding 5 good seeds for each size
                if good_seeds.len() >= 5 {
                    break;
                }
            }
        }

        if good_seeds.is_empty() {
            println!("  ❌ No agreeing seeds found in range 1-50");
        } else {
            println!("  ✅ Found {} valid seeds", good_seeds.len());
            println!("  Recommended seed: {}", good_seeds[0]);
        }

        println!();
    }
}
