//! Read requests handed to the transport.

use most_query::QueryParams;

/// A single read request against a data service.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRequest {
    /// Base URL of the data service.
    pub base_url: String,
    /// The model to read from.
    pub model: String,
    /// The projected query parameters.
    pub params: QueryParams,
}

impl ReadRequest {
    /// Returns the `$`-prefixed wire parameters in their canonical order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.params.to_pairs()
    }
}
