//! Error types for the triangulation library.

/// Main error type for triangulation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelaunayError {
    /// No eligible nearest neighbour or next apex exists for a base point.
    ///
    /// `edge_end` is `None` when the first-edge search failed, otherwise the
    /// far endpoint of the directed edge whose apex could not be found.
    #[error("No candidate point for base {base} (edge end: {edge_end:?})")]
    NoCandidate {
        /// Index of the base point being rotated around
        base: usize,
        /// Endpoint of the directed edge being rotated, if any
        edge_end: Option<usize>,
    },

    /// Input violates general position (collinear or cocircular ties).
    ///
    /// Triangulators never raise this; only validation reports it.
    #[error("Degenerate position: {0}")]
    DegeneratePosition(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The cavity carved out by an insertion is malformed.
    #[error("Cavity invariant violated while inserting point {point}: {detail}")]
    CavityInvariant {
        /// Index of the point being inserted
        point: usize,
        /// What went wrong
        detail: String,
    },

    /// Edge-flip legalization did not settle within its budget.
    #[error("Edge legalization exceeded {limit} flips")]
    FlipLimitExceeded {
        /// The flip budget that was exhausted
        limit: usize,
    },

    /// A produced triangulation failed a structural or Delaunay check.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The two triangulators produced different triangle sets.
    #[error(
        "Triangulators disagree: walker produced {walker} triangles, incremental produced {incremental}, {differing} differ"
    )]
    Disagreement {
        /// Triangles produced by the constant-workspace walker
        walker: usize,
        /// Triangles produced by the incremental builder
        incremental: usize,
        /// Size of the symmetric difference
        differing: usize,
    },

    /// Point generation could not reach the requested count.
    #[error("Generated only {generated} of {requested} points after {attempts} attempts")]
    GenerationExhausted {
        /// Requested point count
        requested: usize,
        /// Points accepted before giving up
        generated: usize,
        /// Candidates drawn
        attempts: usize,
    },

    /// A line of point input could not be parsed.
    #[error("Line {line}: {message}")]
    InputParse {
        /// 1-based line number
        line: usize,
        /// Parse failure description
        message: String,
    },

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DelaunayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for triangulation operations.
pub type DelaunayResult<T> = Result<T, DelaunayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_candidate_display() {
        let err = DelaunayError::NoCandidate {
            base: 3,
            edge_end: None,
        };
        assert_eq!(
            err.to_string(),
            "No candidate point for base 3 (edge end: None)"
        );
    }

    #[test]
    fn test_disagreement_display() {
        let err = DelaunayError::Disagreement {
            walker: 10,
            incremental: 9,
            differing: 1,
        };
        assert!(err.to_string().contains("walker produced 10"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: DelaunayError = io.into();
        assert!(matches!(err, DelaunayError::Io(msg) if msg.contains("missing.txt")));
    }
}
