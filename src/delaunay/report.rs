//! Results of a triangulation run.

use crate::geometry::mesh::Triangulation;
use num_traits::cast::NumCast;
use std::time::Duration;

/// One triangulator's output from a run.
#[derive(Debug, Clone)]
pub struct AlgorithmRun {
    /// Triangulator name as reported by [`crate::Triangulator::name`]
    pub name: &'static str,
    /// The triangulation produced
    pub triangulation: Triangulation,
    /// Wall-clock time spent triangulating
    pub elapsed: Duration,
}

impl AlgorithmRun {
    /// Triangles produced per second of wall-clock time.
    #[must_use]
    pub fn triangles_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        let count: f64 = NumCast::from(self.triangulation.triangle_count()).unwrap_or(0.0);
        count / seconds
    }
}

/// Results from a run of one or both triangulators.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of input points
    pub point_count: usize,
    /// Per-algorithm results in the order they ran
    pub runs: Vec<AlgorithmRun>,
    /// `Some(true)` if both algorithms ran and produced the same triangles
    pub agreement: Option<bool>,
}

impl RunReport {
    /// Look up a run by triangulator name.
    #[must_use]
    pub fn run(&self, name: &str) -> Option<&AlgorithmRun> {
        self.runs.iter().find(|run| run.name == name)
    }

    /// The triangulation of the first algorithm that ran.
    #[must_use]
    pub fn primary(&self) -> Option<&Triangulation> {
        self.runs.first().map(|run| &run.triangulation)
    }

    /// Total wall-clock time across all runs.
    #[must_use]
    pub fn total_elapsed(&self) -> Duration {
        self.runs.iter().map(|run| run.elapsed).sum()
    }

    /// Logs a summary of every run.
    pub fn log_summary(&self) {
        log::info!("Run Results:");
        log::info!("  Points: {}", self.point_count);
        for run in &self.runs {
            log::info!(
                "  {}: {} triangles in {:.3?} ({:.0} triangles/s)",
                run.name,
                run.triangulation.triangle_count(),
                run.elapsed,
                run.triangles_per_second()
            );
        }
        match self.agreement {
            Some(true) => log::info!("  Triangulators agree"),
            Some(false) => log::warn!("  Triangulators disagree"),
            None => {}
        }
    }
}
