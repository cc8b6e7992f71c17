//! Configuration types for the data service client.

/// Configuration for a [`ClientDataService`](crate::ClientDataService).
///
/// # Example
///
/// ```rust
/// use most_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .with_base_url("https://example.com/api/")
///     .with_default_page_size(25)
///     .build();
///
/// assert_eq!(config.base_url, "https://example.com/api/");
/// assert_eq!(config.default_page_size, Some(25));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the data service, handed to the transport untouched.
    pub base_url: String,
    /// Page size sent as `$top` when a query sets none (None = server default).
    pub default_page_size: Option<u32>,
}

impl ClientConfig {
    /// Creates a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: String,
    default_page_size: Option<u32>,
}

impl ClientConfigBuilder {
    /// Sets the base URL of the data service.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the page size used when a query sets no `$top`.
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = Some(page_size);
        self
    }

    /// Builds the ClientConfig.
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url,
            default_page_size: self.default_page_size,
        }
    }
}
