//! Constant-workspace Delaunay binary executable.
//!
//! Generates or reads a point set, triangulates it with the selected
//! algorithms and reports timings and agreement.

use constant_workspace_delaunay::{DelaunayConfig, run};

fn main() {
    // Initialize logging
    env_logger::init();

    let config = DelaunayConfig::from_args();
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {e}");
        eprintln!("error: {e}");
        std::process::exit(2);
    }

    match run(&config) {
        Ok(report) => {
            if config.print
                && let Some(triangulation) = report.primary()
            {
                for triangle in triangulation.triangles() {
                    let [a, b, c] = triangle.vertices();
                    println!("{a} {b} {c}");
                }
            }
            log::info!("Triangulation completed successfully");
        }
        Err(e) => {
            log::error!("Triangulation failed: {e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
