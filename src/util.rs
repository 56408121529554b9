//! Point generation and point input.

use crate::errors::{DelaunayError, DelaunayResult};
use crate::geometry::mesh::Point;
use crate::geometry::predicates::incircle_det;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::path::Path;

/// Default cocircularity rejection threshold for generated points
pub const DEFAULT_COCIRCULAR_TOLERANCE: f64 = 1e-6;

/// Generates random points approximating general position.
///
/// Candidates are uniform in `[0, bound]²` plus a small jitter, rounded to six
/// decimals. A candidate is rejected if it duplicates an accepted point or if
/// its lifted-paraboloid determinant with any accepted triple is below the
/// cocircularity tolerance. The cocircularity check is O(n³) per candidate;
/// disable it for large benchmark inputs.
#[derive(Debug)]
pub struct PointGenerator {
    bound: f64,
    jitter: f64,
    cocircular_tolerance: Option<f64>,
    max_attempts: Option<usize>,
    rng: StdRng,
}

impl PointGenerator {
    /// Creates a generator with a deterministic seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            bound: 100.0,
            jitter: 1e-3,
            cocircular_tolerance: Some(DEFAULT_COCIRCULAR_TOLERANCE),
            max_attempts: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the process-wide generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Sets the side length of the sampling square.
    #[must_use]
    pub const fn bound(mut self, bound: f64) -> Self {
        self.bound = bound;
        self
    }

    /// Sets the jitter amplitude.
    #[must_use]
    pub const fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the cocircularity tolerance; `None` disables the check.
    #[must_use]
    pub const fn cocircular_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.cocircular_tolerance = tolerance;
        self
    }

    /// Sets how many candidates may be drawn (default 100 per requested point).
    #[must_use]
    pub const fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    fn draw(&mut self) -> Point {
        let round = |v: f64| (v * 1e6).round() / 1e6;
        let coordinate = |rng: &mut StdRng| {
            let base = rng.random_range(0.0..=self.bound);
            let offset = if self.jitter > 0.0 {
                rng.random_range(-self.jitter..=self.jitter)
            } else {
                0.0
            };
            round(base + offset)
        };
        let x = coordinate(&mut self.rng);
        let y = coordinate(&mut self.rng);
        Point::new(x, y)
    }

    fn is_cocircular(accepted: &[Point], candidate: Point, tolerance: f64) -> bool {
        let n = accepted.len();
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    let det = incircle_det(accepted[i], accepted[j], accepted[k], candidate);
                    if det.abs() < tolerance {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Generate `count` points.
    ///
    /// # Errors
    /// Returns [`DelaunayError::InvalidParameters`] for a non-positive bound or
    /// negative jitter, and [`DelaunayError::GenerationExhausted`] if the attempt
    /// budget runs out first.
    pub fn generate(&mut self, count: usize) -> DelaunayResult<Vec<Point>> {
        if !(self.bound > 0.0) || !(self.jitter >= 0.0) {
            return Err(DelaunayError::InvalidParameters(format!(
                "bound must be positive and jitter non-negative, got bound {} and jitter {}",
                self.bound, self.jitter
            )));
        }

        let max_attempts = self.max_attempts.unwrap_or(count.saturating_mul(100).max(100));
        let mut points: Vec<Point> = Vec::with_capacity(count);
        let mut attempts = 0;
        while points.len() < count {
            if attempts == max_attempts {
                return Err(DelaunayError::GenerationExhausted {
                    requested: count,
                    generated: points.len(),
                    attempts,
                });
            }
            attempts += 1;

            let candidate = self.draw();
            if points.contains(&candidate) {
                continue;
            }
            if let Some(tolerance) = self.cocircular_tolerance
                && Self::is_cocircular(&points, candidate, tolerance)
            {
                log::trace!("rejecting cocircular candidate {candidate:?}");
                continue;
            }
            points.push(candidate);
        }

        log::debug!("generated {count} points in {attempts} attempts");
        Ok(points)
    }
}

impl Default for PointGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate `count` points with the default bound, jitter and tolerance.
///
/// # Errors
/// See [`PointGenerator::generate`].
pub fn generate_general_position_points(
    count: usize,
    seed: Option<u64>,
) -> DelaunayResult<Vec<Point>> {
    let mut generator = seed.map_or_else(PointGenerator::new, PointGenerator::with_seed);
    generator.generate(count)
}

/// Parse points from text, one per line as `x y` or `x,y`.
///
/// Blank lines and anything after `#` are ignored.
///
/// # Errors
/// Returns [`DelaunayError::InputParse`] with the 1-based line number of the
/// first malformed line.
pub fn parse_points(input: &str) -> DelaunayResult<Vec<Point>> {
    let mut points = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        let parse_error = |message: String| DelaunayError::InputParse {
            line: index + 1,
            message,
        };
        let [x, y] = fields.as_slice() else {
            return Err(parse_error(format!(
                "expected two coordinates, found {}",
                fields.len()
            )));
        };
        let x: f64 = x
            .parse()
            .map_err(|e| parse_error(format!("invalid x coordinate {x:?}: {e}")))?;
        let y: f64 = y
            .parse()
            .map_err(|e| parse_error(format!("invalid y coordinate {y:?}: {e}")))?;
        if !x.is_finite() || !y.is_finite() {
            return Err(parse_error("coordinates must be finite".to_string()));
        }
        points.push(Point::new(x, y));
    }
    Ok(points)
}

/// Read points from a file in the format accepted by [`parse_points`].
///
/// # Errors
/// Returns [`DelaunayError::Io`] if the file cannot be read, or a parse error.
pub fn read_points(path: &Path) -> DelaunayResult<Vec<Point>> {
    let contents = std::fs::read_to_string(path)?;
    parse_points(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_deterministic() {
        let a = PointGenerator::with_seed(5).generate(12).expect("generation");
        let b = PointGenerator::with_seed(5).generate(12).expect("generation");
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_points_in_bounds_and_distinct() {
        let points = PointGenerator::with_seed(9)
            .bound(10.0)
            .jitter(0.0)
            .generate(20)
            .expect("generation");
        assert_eq!(points.len(), 20);
        for (i, p) in points.iter().enumerate() {
            assert!((0.0..=10.0).contains(&p.x));
            assert!((0.0..=10.0).contains(&p.y));
            assert!(!points[i + 1..].contains(p));
        }
    }

    #[test]
    fn test_generated_points_not_cocircular() {
        let points = PointGenerator::with_seed(3).generate(10).expect("generation");
        assert!(!PointGenerator::is_cocircular(&points[..9], points[9], 1e-6));
    }

    #[test]
    fn test_generation_exhausted() {
        let result = PointGenerator::with_seed(1).max_attempts(2).generate(5);
        assert_eq!(
            result,
            Err(DelaunayError::GenerationExhausted {
                requested: 5,
                generated: 2,
                attempts: 2
            })
        );
    }

    #[test]
    fn test_invalid_bound() {
        let result = PointGenerator::with_seed(1).bound(0.0).generate(5);
        assert!(matches!(result, Err(DelaunayError::InvalidParameters(_))));
    }

    #[test]
    fn test_convenience_generator() {
        let points = generate_general_position_points(8, Some(2)).expect("generation");
        assert_eq!(points.len(), 8);
    }

    #[test]
    fn test_parse_points() {
        let input = "# square\n0 0\n4,0\n\n4 4   # corner\n0.0, 4.0\n";
        let points = parse_points(input).expect("valid input");
        assert_eq!(
            points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(0.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_parse_points_reports_line() {
        let err = parse_points("0 0\n1\n").expect_err("second line is malformed");
        assert!(matches!(err, DelaunayError::InputParse { line: 2, .. }));

        let err = parse_points("0 0\n1 x\n").expect_err("second line is malformed");
        assert!(matches!(err, DelaunayError::InputParse { line: 2, .. }));
    }

    #[test]
    fn test_read_points_missing_file() {
        let result = read_points(Path::new("/nonexistent/points.txt"));
        assert!(matches!(result, Err(DelaunayError::Io(_))));
    }
}
