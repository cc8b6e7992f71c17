//! Error types for data service requests.

use thiserror::Error;

/// Error returned by a [`DataTransport`](crate::DataTransport).
///
/// The client does not interpret transport failures; they are carried as-is.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while reading from a data service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The transport failed to complete the request.
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// The query does not name a target model.
    #[error("Query has no target model")]
    MissingModel,

    /// The payload could not be decoded into the requested type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for data service operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
