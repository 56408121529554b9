//! Configuration management for triangulation runs.
//!
//! This module provides structured configuration for a run of the `cwdt`
//! binary, including:
//! - Where the points come from (generated or read from a file)
//! - Which triangulators run
//! - Point generator parameters
//! - Output and cross-validation options

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which triangulators a run executes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Constant-workspace walker only
    Walker,
    /// Incremental Bowyer-Watson builder only
    Incremental,
    /// Both, so their outputs can be compared
    #[default]
    Both,
}

impl Algorithm {
    /// Whether the constant-workspace walker runs.
    #[must_use]
    pub const fn runs_walker(self) -> bool {
        matches!(self, Self::Walker | Self::Both)
    }

    /// Whether the incremental builder runs.
    #[must_use]
    pub const fn runs_incremental(self) -> bool {
        matches!(self, Self::Incremental | Self::Both)
    }
}

/// Main configuration structure for triangulation runs.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct DelaunayConfig {
    /// Number of points to generate
    #[arg(
        short = 'n',
        long,
        required_unless_present = "input",
        value_parser = clap::value_parser!(u32).range(3..)
    )]
    pub points: Option<u32>,

    /// Read points from a file (`x y` or `x,y` per line) instead of generating them
    #[arg(short, long, conflicts_with = "points")]
    pub input: Option<PathBuf>,

    /// Triangulator(s) to run
    #[arg(short, long, value_enum, default_value_t = Algorithm::Both)]
    pub algorithm: Algorithm,

    /// Seed for point generation and the insertion shuffle
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Side length of the square points are sampled from
    #[arg(long, default_value = "100.0")]
    pub bound: f64,

    /// Jitter added to each generated coordinate
    #[arg(long, default_value = "0.001")]
    pub jitter: f64,

    /// Fail unless both triangulators agree and pass validation
    #[arg(long, default_value = "false")]
    pub cross_validate: bool,

    /// Print the resulting triangles as index triples on stdout
    #[arg(long, default_value = "false")]
    pub print: bool,
}

impl DelaunayConfig {
    /// Builds a new instance of `DelaunayConfig` from command line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Creates a configuration that generates `points` points with a fixed seed.
    #[must_use]
    pub const fn new(points: u32, seed: u64) -> Self {
        Self {
            points: Some(points),
            input: None,
            algorithm: Algorithm::Both,
            seed: Some(seed),
            bound: 100.0,
            jitter: 1e-3,
            cross_validate: false,
            print: false,
        }
    }

    /// Validates the configuration parameters.
    ///
    /// # Errors
    ///
    /// Returns an error message if any parameters are invalid.
    pub fn validate(&self) -> Result<(), String> {
        match (self.points, &self.input) {
            (None, None) => return Err("Either --points or --input is required".to_string()),
            (Some(n), None) if n < 3 => {
                return Err("Number of points must be at least 3".to_string());
            }
            _ => {}
        }

        if !(self.bound > 0.0) {
            return Err(format!("Bound must be positive, got {}", self.bound));
        }

        if !(self.jitter >= 0.0) {
            return Err(format!("Jitter must be non-negative, got {}", self.jitter));
        }

        if self.cross_validate && self.algorithm != Algorithm::Both {
            return Err("Cross-validation requires --algorithm both".to_string());
        }

        Ok(())
    }
}

/// Configuration preset for quick testing.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl TestConfig {
    /// Creates a small, fast configuration suitable for unit tests.
    #[must_use]
    pub const fn small() -> DelaunayConfig {
        DelaunayConfig::new(12, 7)
    }

    /// Creates a medium-sized configuration for integration tests.
    #[must_use]
    pub const fn medium() -> DelaunayConfig {
        DelaunayConfig::new(40, 11)
    }

    /// Creates a large configuration for performance testing.
    #[must_use]
    pub const fn large() -> DelaunayConfig {
        DelaunayConfig::new(120, 13)
    }
}
