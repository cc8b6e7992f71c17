//! Error types for query building.

use thiserror::Error;

/// Errors that can occur while building a query.
///
/// The builder itself is permissive and never fails; only the construction
/// of identifiers is validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// An argument was rejected at a validation boundary.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the rejected argument.
        argument: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
}

/// Result type for query building operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_argument() {
        let err = QueryError::InvalidArgument {
            argument: "name",
            reason: "field name cannot be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument `name`: field name cannot be empty"
        );
    }
}
