//! Traits for issuing read requests.
//!
//! This module defines the [`DataTransport`] trait that carries a
//! [`ReadRequest`] to the remote data service. The client never depends on
//! how the request travels: HTTP, an in-process handler or a test double all
//! plug in here.
//!
//! # Example: Implementing DataTransport over a blocking HTTP client
//!
//! ```ignore
//! use most_client::{DataTransport, ReadRequest, TransportError};
//! use serde_json::Value;
//!
//! struct HttpTransport {
//!     agent: ureq::Agent,
//! }
//!
//! impl DataTransport for HttpTransport {
//!     fn fetch(&self, request: &ReadRequest) -> Result<Value, TransportError> {
//!         let url = format!("{}{}/index.json", request.base_url, request.model);
//!         let mut call = self.agent.get(&url);
//!         for (name, value) in request.params.to_pairs() {
//!             call = call.query(name, &value);
//!         }
//!         Ok(call.call()?.into_json()?)
//!     }
//! }
//! ```

use serde_json::Value;

use crate::error::TransportError;
use crate::request::ReadRequest;

/// Trait for transports that can issue read requests to a data service.
///
/// Each call is a single request/response exchange. The payload is returned
/// untouched; its shape (a list, or an object wrapping a list and a count)
/// is up to the remote endpoint.
pub trait DataTransport {
    /// Issues `request` and returns the response payload.
    fn fetch(&self, request: &ReadRequest) -> Result<Value, TransportError>;
}

impl<T: DataTransport + ?Sized> DataTransport for &T {
    fn fetch(&self, request: &ReadRequest) -> Result<Value, TransportError> {
        (**self).fetch(request)
    }
}

impl<T: DataTransport + ?Sized> DataTransport for Box<T> {
    fn fetch(&self, request: &ReadRequest) -> Result<Value, TransportError> {
        (**self).fetch(request)
    }
}
