//! Error types for the colony engine.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type AcoResult<T> = Result<T, AcoError>;

/// Errors reported by instance loading, configuration and the optimization loop.
///
/// Numeric degeneracy during city selection (every candidate weight zero) is
/// not an error; it is recovered locally with a uniform choice.
#[derive(Debug, Error)]
pub enum AcoError {
    /// A run parameter is missing or outside its documented range.
    #[error("invalid configuration for `{parameter}`: {reason}")]
    Configuration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A pheromone deposit `1/cost` would not be a finite positive number.
    ///
    /// Happens only for degenerate instances, e.g. all cities sharing one
    /// coordinate.
    #[error("non-finite pheromone deposit for tour cost {cost}")]
    NonFiniteDeposit {
        /// The tour cost that produced the deposit.
        cost: f64,
    },

    /// A constructed tour is not a permutation of the city indices.
    #[error("invalid tour: {reason}")]
    InvalidTour {
        /// Which permutation property failed.
        reason: String,
    },

    /// Syntax error in a coordinate file.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The instance declares a cost function other than 2-D Euclidean.
    #[error("unsupported edge weight type `{0}` (only EUC_2D is supported)")]
    UnsupportedEdgeWeight(String),

    /// Failure reading an instance file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcoError {
    pub(crate) fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        AcoError::Configuration {
            parameter,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_tour(reason: impl Into<String>) -> Self {
        AcoError::InvalidTour {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_names_parameter() {
        let err = AcoError::config("rho", "must be in [0, 1], got 1.5");
        let msg = err.to_string();
        assert!(msg.contains("`rho`"), "{msg}");
        assert!(msg.contains("1.5"), "{msg}");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.tsp");
        let err: AcoError = io.into();
        assert!(matches!(err, AcoError::Io(_)));
    }
}
